//! 統一的なエラーハンドリングモジュール
//!
//! パイプライン全体で使われるエラー型を定義する。各段階は最初の
//! エラーで中断し、呼び出し側へ値として伝播する（巻き戻しによる
//! 制御移動は行わない）。`Display` 実装が診断の正規フォーマット。

use codespan_reporting::diagnostic::{Diagnostic, Label};
use thiserror::Error;

use crate::ast::PiType;

/// Piコンパイラの統一エラー型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PiError {
    /// 字句解析エラー（閉じ引用符を欠いた文字リテラル）
    #[error(transparent)]
    Lex(#[from] LexError),

    /// 構文解析エラー
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// リテラル種別と宣言型の不一致
    #[error(transparent)]
    TypeMismatch(#[from] TypeMismatchError),

    /// コード生成エラー
    #[error(transparent)]
    Codegen(#[from] CodegenError),

    /// ファイルI/Oエラー
    #[error("Error reading the file: {0}")]
    Io(String),
}

/// 文字リテラルの閉じ引用符欠落。トークン化を即座に中断する
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Lex Error\nMissing closing quote in character literal\nLine {line}, column {column}\n")]
pub struct LexError {
    pub line: u32,
    pub column: u32,
}

/// 期待したトークンが現れなかった。違反トークンの位置と字句を運ぶ
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Syntax Error\n{message}\nLine {line}, column {column}\nEncountered: \"{lexeme}\"\n")]
pub struct SyntaxError {
    pub message: String,
    pub line: u32,
    pub column: u32,
    pub lexeme: String,
}

/// 定数初期化子のリテラル種別が宣言型と合わない
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Type Mismatch Error\nExpected {expected} literal for constant of type {declared}\nLine {line}, column {column}\n")]
pub struct TypeMismatchError {
    /// "number" または "char"
    pub expected: &'static str,
    pub declared: PiType,
    pub line: u32,
    pub column: u32,
}

/// コード生成エラーの詳細
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodegenError {
    #[error("Error: [Line {line}, Col {column}] Unknown variable: {name}")]
    UnknownVariable { name: String, line: u32, column: u32 },

    #[error("Error: [Line {line}, Col {column}] Constant value out of range for type {ty}")]
    ConstantOutOfRange { ty: PiType, line: u32, column: u32 },

    #[error("Error: [Line {line}, Col {column}] Division by zero")]
    DivisionByZero { line: u32, column: u32 },

    #[error("Error: [Line {line}, Col {column}] Function must return a value")]
    MissingReturnValue { line: u32, column: u32 },

    #[error("Error: [Line {line}, Col {column}] Void function cannot return a value")]
    VoidReturnValue { line: u32, column: u32 },

    /// エントリポイント生成時に対象関数が見つからない（通常は到達不能）
    #[error("Error: Function {name} not found in module")]
    FunctionNotFound { name: String },

    #[error("Error: {message}")]
    Internal { message: String },
}

impl PiError {
    /// エラーが指すソース位置（1始まり）。位置を持たない種別は `None`
    pub fn position(&self) -> Option<(u32, u32)> {
        match self {
            PiError::Lex(e) => Some((e.line, e.column)),
            PiError::Syntax(e) => Some((e.line, e.column)),
            PiError::TypeMismatch(e) => Some((e.line, e.column)),
            PiError::Codegen(e) => match e {
                CodegenError::UnknownVariable { line, column, .. }
                | CodegenError::ConstantOutOfRange { line, column, .. }
                | CodegenError::DivisionByZero { line, column }
                | CodegenError::MissingReturnValue { line, column }
                | CodegenError::VoidReturnValue { line, column } => Some((*line, *column)),
                CodegenError::FunctionNotFound { .. } | CodegenError::Internal { .. } => None,
            },
            PiError::Io(_) => None,
        }
    }

    /// codespan-reporting の Diagnostic に変換（--verbose のスニペット表示用）
    pub fn to_diagnostic(&self, file_id: usize, source: &str) -> Diagnostic<usize> {
        let diagnostic = Diagnostic::error().with_message(self.to_string());

        match self.position() {
            Some((line, column)) => {
                let offset = byte_offset(source, line, column);
                let end = (offset + 1).min(source.len()).max(offset);
                diagnostic.with_labels(vec![Label::primary(file_id, offset..end)])
            }
            None => diagnostic,
        }
    }
}

impl From<inkwell::builder::BuilderError> for PiError {
    fn from(e: inkwell::builder::BuilderError) -> Self {
        PiError::Codegen(CodegenError::Internal {
            message: format!("LLVM builder error: {:?}", e),
        })
    }
}

impl From<std::io::Error> for PiError {
    fn from(e: std::io::Error) -> Self {
        PiError::Io(e.to_string())
    }
}

/// 1始まりの行・桁をバイトオフセットに戻す
fn byte_offset(source: &str, line: u32, column: u32) -> usize {
    let mut remaining = line.saturating_sub(1);
    let mut line_start = 0;
    for (i, b) in source.bytes().enumerate() {
        if remaining == 0 {
            break;
        }
        if b == b'\n' {
            line_start = i + 1;
            remaining -= 1;
        }
    }
    (line_start + column.saturating_sub(1) as usize).min(source.len())
}

/// Result型のエイリアス
pub type PiResult<T> = Result<T, PiError>;
