//! メインコード生成器

use inkwell::builder::Builder;
use inkwell::context::Context;
use inkwell::module::{Linkage, Module};
use inkwell::types::IntType;
use inkwell::values::{FunctionValue, IntValue, PointerValue};
use inkwell::AddressSpace;
use std::collections::HashMap;

use crate::ast::{Function, PiType};
use crate::error::{CodegenError, PiResult};

use super::types;

/// シンボルテーブルの束縛。named storage と符号の有無を保持する。
/// 不透明ポインタのロードには要素型が必要なのでLLVM型も併せて持つ
pub(super) struct Binding<'ctx> {
    pub ptr: PointerValue<'ctx>,
    pub int_type: IntType<'ctx>,
    pub is_unsigned: bool,
}

/// メインコード生成器構造体
pub struct CodeGenerator<'ctx> {
    pub context: &'ctx Context,
    pub module: Module<'ctx>,
    pub builder: Builder<'ctx>,

    /// 関数ごとの定数束縛。関数エントリでクリアされる
    pub(super) symbols: HashMap<String, Binding<'ctx>>,
    /// 外部宣言された行出力プリミティブ
    pub(super) puts_fn: FunctionValue<'ctx>,
    /// 現在生成中の関数の宣言された戻り型
    pub(super) current_return_type: PiType,
}

impl<'ctx> CodeGenerator<'ctx> {
    pub fn new(context: &'ctx Context, module_name: &str) -> Self {
        let module = context.create_module(module_name);
        let builder = context.create_builder();

        // 標準出力への行書き込みプリミティブとして puts を宣言する
        let i8_ptr_type = context.ptr_type(AddressSpace::default());
        let puts_type = context.i32_type().fn_type(&[i8_ptr_type.into()], false);
        let puts_fn = module.add_function("puts", puts_type, Some(Linkage::External));

        Self {
            context,
            module,
            builder,
            symbols: HashMap::new(),
            puts_fn,
            current_return_type: PiType::Void,
        }
    }

    /// LLVMモジュールを取得
    pub fn get_module(&self) -> &Module<'ctx> {
        &self.module
    }

    /// 関数ASTをモジュールへ下ろす
    pub fn generate(&mut self, func: &Function) -> PiResult<()> {
        let return_type = types::int_type(self.context, func.return_type);

        let fn_type = match return_type {
            Some(int_type) => int_type.fn_type(&[], false),
            None => self.context.void_type().fn_type(&[], false),
        };
        let function = self.module.add_function(&func.name, fn_type, None);

        let entry = self.context.append_basic_block(function, "entry");
        self.builder.position_at_end(entry);

        // シンボルテーブルは関数ごとに新しく始める
        self.symbols.clear();
        self.current_return_type = func.return_type;

        for stmt in &func.body {
            self.generate_statement(stmt)?;
        }

        // 明示的なreturnで終わらなかった場合の既定の終端
        if !self.current_block_has_terminator() {
            match return_type {
                Some(int_type) => {
                    self.builder
                        .build_return(Some(&int_type.const_int(0, false)))?;
                }
                None => {
                    self.builder.build_return(None)?;
                }
            }
        }

        self.verify_function(function, &func.name)
    }

    /// エントリポイントのラッパーを生成する。
    ///
    /// 生成済みの関数を名前で呼び出し、固定の成功コードを返す
    /// `main` を作る。
    pub fn create_main_wrapper(&mut self, target_name: &str) -> PiResult<()> {
        let i32_type = self.context.i32_type();
        let main_type = i32_type.fn_type(&[], false);
        let main_fn = self.module.add_function("main", main_type, None);

        let entry = self.context.append_basic_block(main_fn, "entry");
        self.builder.position_at_end(entry);

        let target = self.module.get_function(target_name).ok_or_else(|| {
            CodegenError::FunctionNotFound {
                name: target_name.to_string(),
            }
        })?;

        self.builder.build_call(target, &[], "call")?;
        self.builder
            .build_return(Some(&i32_type.const_int(0, false)))?;

        self.verify_function(main_fn, "main")
    }

    /// モジュールをテキスト形式で直列化する
    pub fn print_ir(&self) -> String {
        self.module.print_to_string().to_string()
    }

    /// 宣言型の幅・符号に合わせた暗黙キャスト
    pub(super) fn cast_to(
        &self,
        value: IntValue<'ctx>,
        target: IntType<'ctx>,
        target_signed: bool,
    ) -> PiResult<IntValue<'ctx>> {
        let src_width = value.get_type().get_bit_width();
        let dst_width = target.get_bit_width();

        let casted = if src_width == dst_width {
            value
        } else if src_width < dst_width {
            if target_signed {
                self.builder.build_int_s_extend(value, target, "sext")?
            } else {
                self.builder.build_int_z_extend(value, target, "zext")?
            }
        } else {
            self.builder.build_int_truncate(value, target, "trunc")?
        };

        Ok(casted)
    }

    pub(super) fn current_block_has_terminator(&self) -> bool {
        self.builder
            .get_insert_block()
            .and_then(|bb| bb.get_terminator())
            .is_some()
    }

    fn verify_function(&self, function: FunctionValue<'ctx>, name: &str) -> PiResult<()> {
        if function.verify(true) {
            Ok(())
        } else {
            // 検証失敗時にLLVM IRを出力してデバッグ
            function.print_to_stderr();
            Err(CodegenError::Internal {
                message: format!("Function verification failed: {}", name),
            }
            .into())
        }
    }
}
