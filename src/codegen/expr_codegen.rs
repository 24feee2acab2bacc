//! 式のコード生成
//!
//! 式の評価は `(値, 符号なしか)` の組を返す。符号なしの性質は被演算子の
//! 論理和として伝播し、符号あり・なしが混ざった演算は符号なしの意味論を
//! とる。数値リテラルは64ビット定数に下ろし、利用箇所でのキャストが
//! 文脈の幅へ合わせる。

use inkwell::values::IntValue;

use crate::ast::{BinOp, Expr};
use crate::error::{CodegenError, PiResult};

use super::code_generator::CodeGenerator;

impl<'ctx> CodeGenerator<'ctx> {
    /// 式を下ろす
    pub(super) fn generate_expression(&mut self, expr: &Expr) -> PiResult<(IntValue<'ctx>, bool)> {
        match expr {
            Expr::Number { value, .. } => Ok((
                self.context.i64_type().const_int(*value as u64, false),
                false,
            )),

            Expr::Char { value, .. } => Ok((
                self.context.i8_type().const_int(*value as u64, false),
                false,
            )),

            Expr::Variable { name, token } => {
                let binding = self.symbols.get(name).ok_or_else(|| {
                    CodegenError::UnknownVariable {
                        name: name.clone(),
                        line: token.line,
                        column: token.column,
                    }
                })?;
                let ptr = binding.ptr;
                let int_type = binding.int_type;
                let is_unsigned = binding.is_unsigned;

                let loaded = self.builder.build_load(int_type, ptr, name)?;
                Ok((loaded.into_int_value(), is_unsigned))
            }

            Expr::Binary {
                op, left, right, ..
            } => {
                let (lhs, left_unsigned) = self.generate_expression(left)?;
                let (rhs, right_unsigned) = self.generate_expression(right)?;
                let is_unsigned = left_unsigned || right_unsigned;

                // 演算前に両辺を64ビットへ広げる
                let lhs = self.widen_to_i64(lhs, left_unsigned)?;
                let rhs = self.widen_to_i64(rhs, right_unsigned)?;

                let value = match op {
                    BinOp::Add => self.builder.build_int_add(lhs, rhs, "addtmp")?,
                    BinOp::Sub => self.builder.build_int_sub(lhs, rhs, "subtmp")?,
                    BinOp::Mul => self.builder.build_int_mul(lhs, rhs, "multmp")?,
                    BinOp::Div => {
                        // 右辺がリテラルの0ならコンパイル時に拒否する
                        if right.is_zero_literal() {
                            let zero = right.token();
                            return Err(CodegenError::DivisionByZero {
                                line: zero.line,
                                column: zero.column,
                            }
                            .into());
                        }

                        if is_unsigned {
                            self.builder.build_int_unsigned_div(lhs, rhs, "divtmp")?
                        } else {
                            self.builder.build_int_signed_div(lhs, rhs, "divtmp")?
                        }
                    }
                };

                Ok((value, is_unsigned))
            }
        }
    }

    /// 被演算子を64ビット幅へ拡張する。拡張命令は被演算子自身の符号に従う
    fn widen_to_i64(&self, value: IntValue<'ctx>, is_unsigned: bool) -> PiResult<IntValue<'ctx>> {
        let i64_type = self.context.i64_type();
        if value.get_type().get_bit_width() == 64 {
            return Ok(value);
        }

        let widened = if is_unsigned {
            self.builder.build_int_z_extend(value, i64_type, "zext")?
        } else {
            self.builder.build_int_s_extend(value, i64_type, "sext")?
        };
        Ok(widened)
    }
}
