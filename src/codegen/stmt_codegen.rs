//! 文のコード生成

use crate::ast::{Expr, PiType, Stmt};
use crate::error::{CodegenError, PiResult};
use crate::lexer::Token;

use super::code_generator::{Binding, CodeGenerator};
use super::types;

impl<'ctx> CodeGenerator<'ctx> {
    /// 文をコンパイル
    pub(super) fn generate_statement(&mut self, stmt: &Stmt) -> PiResult<()> {
        match stmt {
            Stmt::Print { text, .. } => self.generate_print(text),
            Stmt::Const {
                name, ty, value, ..
            } => self.generate_const(name, *ty, value),
            Stmt::Return { value, token } => self.generate_return(value.as_ref(), token),
        }
    }

    /// print文をコンパイル。文字列をグローバル定数として配置し、
    /// 行出力プリミティブを呼び出す。戻り値は使わない
    fn generate_print(&mut self, text: &str) -> PiResult<()> {
        let string_const = self.context.const_string(text.as_bytes(), true);
        let global = self.module.add_global(string_const.get_type(), None, "str");
        global.set_initializer(&string_const);
        global.set_constant(true);

        let array_type = self.context.i8_type().array_type(text.len() as u32 + 1);
        let indices = [
            self.context.i32_type().const_zero(),
            self.context.i32_type().const_zero(),
        ];

        let ptr = unsafe {
            self.builder.build_in_bounds_gep(
                array_type,
                global.as_pointer_value(),
                &indices,
                "str_ptr",
            )?
        };

        self.builder.build_call(self.puts_fn, &[ptr.into()], "puts")?;
        Ok(())
    }

    /// const文をコンパイル
    fn generate_const(&mut self, name: &str, ty: PiType, value: &Expr) -> PiResult<()> {
        // 範囲検査は初期化子が直接の数値リテラルの場合にのみ行う
        if let Expr::Number { value: literal, token } = value {
            if !types::literal_in_range(ty, *literal) {
                return Err(CodegenError::ConstantOutOfRange {
                    ty,
                    line: token.line,
                    column: token.column,
                }
                .into());
            }
        }

        let int_type = types::int_type(self.context, ty).ok_or_else(|| {
            CodegenError::Internal {
                message: format!("Unsupported constant type: {}", ty),
            }
        })?;

        let (init, _) = self.generate_expression(value)?;

        let alloca = self.builder.build_alloca(int_type, name)?;
        let casted = self.cast_to(init, int_type, !ty.is_unsigned())?;
        self.builder.build_store(alloca, casted)?;

        // 束縛の登録は格納が済んでから。初期化子が自分自身を参照する
        // ことはできない
        self.symbols.insert(
            name.to_string(),
            Binding {
                ptr: alloca,
                int_type,
                is_unsigned: ty.is_unsigned(),
            },
        );

        Ok(())
    }

    /// return文をコンパイル
    fn generate_return(&mut self, value: Option<&Expr>, token: &Token) -> PiResult<()> {
        let return_type = types::int_type(self.context, self.current_return_type);

        match (value, return_type) {
            (None, Some(_)) => Err(CodegenError::MissingReturnValue {
                line: token.line,
                column: token.column,
            }
            .into()),
            (Some(_), None) => Err(CodegenError::VoidReturnValue {
                line: token.line,
                column: token.column,
            }
            .into()),
            (None, None) => {
                self.builder.build_return(None)?;
                Ok(())
            }
            (Some(expr), Some(int_type)) => {
                let (result, _) = self.generate_expression(expr)?;
                let casted =
                    self.cast_to(result, int_type, !self.current_return_type.is_unsigned())?;
                self.builder.build_return(Some(&casted))?;
                Ok(())
            }
        }
    }
}
