//! パーサーモジュール
//!
//! トークン列を単一関数のASTへ解析する。再帰下降構文解析を使用し、
//! 式は優先順位ごとの関数（加減算 → 乗除算 → 因子）で処理する。
//! 単調に進むカーソルのみで動作し、バックトラックや回復は行わない。

mod expr_parser;
mod parser_impl;

pub use parser_impl::Parser;

use crate::error::PiError;

/// パーサーのResult型
pub type ParseResult<T> = Result<T, PiError>;
