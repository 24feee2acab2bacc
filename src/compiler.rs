//! コンパイラのメイン処理モジュール
//!
//! パイプライン全体（字句解析 → 構文解析 → コード生成 → エントリ
//! ポイント生成）を駆動する。各段階はスコープ計時の下で実行されるが、
//! 計時・ログは副チャネルであり結果には影響しない。

use std::time::Instant;

use inkwell::context::Context;
use log::{debug, info};

use crate::ast::Function;
use crate::codegen::CodeGenerator;
use crate::error::PiResult;
use crate::lexer;
use crate::parser::Parser;

/// スコープ計時。生成時に `[START]`、破棄時に `[DONE ]` と経過時間を
/// `log` ファサードへ記録する。ロガーが未設定なら全て no-op
pub struct PhaseTimer {
    name: &'static str,
    start: Instant,
}

impl PhaseTimer {
    pub fn start(name: &'static str) -> Self {
        info!("[START] {}", name);
        Self {
            name,
            start: Instant::now(),
        }
    }
}

impl Drop for PhaseTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        info!("[DONE ] {} ({:.3} ms)", self.name, elapsed_ms);
    }
}

/// ソーステキストを字句解析・構文解析して関数ASTを返す
pub fn parse_source(source: &str) -> PiResult<Function> {
    let tokens = {
        let _timer = PhaseTimer::start("Lexical Analysis");
        lexer::tokenize(source)?
    };
    debug!("tokenized into {} tokens", tokens.len());

    let _timer = PhaseTimer::start("Parsing");
    let mut parser = Parser::new(tokens);
    let func = parser.parse_function()?;
    debug!(
        "parsed function '{}' with {} statements",
        func.name,
        func.body.len()
    );

    Ok(func)
}

/// ソーステキスト全体をコンパイルし、直列化したIRモジュールを返す
pub fn compile_to_ir(context: &Context, source: &str, module_name: &str) -> PiResult<String> {
    let func = parse_source(source)?;

    let mut codegen = CodeGenerator::new(context, module_name);
    {
        let _timer = PhaseTimer::start("Code Generation");
        codegen.generate(&func)?;
    }
    {
        let _timer = PhaseTimer::start("LLVM IR Construction (Main)");
        codegen.create_main_wrapper(&func.name)?;
    }

    Ok(codegen.print_ir())
}
