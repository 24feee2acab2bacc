//! LLVM型変換と定数範囲検査

use inkwell::context::Context;
use inkwell::types::IntType;

use crate::ast::PiType;

/// 値型に対応するLLVM整数型を返す。`void` は `None`
///
/// 符号なし型は同じビット幅の整数型を共有し、符号の違いはキャストと
/// 除算命令の選択でのみ現れる。
pub fn int_type(context: &Context, ty: PiType) -> Option<IntType<'_>> {
    match ty.bit_width()? {
        8 => Some(context.i8_type()),
        16 => Some(context.i16_type()),
        32 => Some(context.i32_type()),
        _ => Some(context.i64_type()),
    }
}

/// 直接の数値リテラル初期化子に対する範囲検査。
///
/// 検査するのは int8 / uint8 / int16 / uint16 / uint32 のみ。int32 /
/// int64 / uint64 と文字型は64ビットリテラル比較の範囲内として扱い
/// 検査しない（意図的に部分的な検証をそのまま保っている）。
pub fn literal_in_range(ty: PiType, value: i64) -> bool {
    match ty {
        PiType::Int8 => (-128..=127).contains(&value),
        PiType::Uint8 => (0..=255).contains(&value),
        PiType::Int16 => (-32768..=32767).contains(&value),
        PiType::Uint16 => (0..=65535).contains(&value),
        PiType::Uint32 => (0..=4294967295).contains(&value),
        _ => true,
    }
}
