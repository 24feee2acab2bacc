//! Abstract Syntax Tree (AST) definitions for the Pi language.
//!
//! A compilation unit is a single `Function` whose body is an ordered
//! sequence of statements. Every node carries its originating token so
//! that later stages can report source positions.

use serde::{Deserialize, Serialize};

use crate::lexer::{Token, TokenKind};

/// The declared type of a constant or function return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PiType {
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Char8,
    Char16,
    Char32,
    Void,
}

impl PiType {
    /// Maps a type-keyword token to its type, if the token is one.
    pub fn from_token_kind(kind: TokenKind) -> Option<PiType> {
        match kind {
            TokenKind::Int8 => Some(PiType::Int8),
            TokenKind::Int16 => Some(PiType::Int16),
            TokenKind::Int32 => Some(PiType::Int32),
            TokenKind::Int64 => Some(PiType::Int64),
            TokenKind::Uint8 => Some(PiType::Uint8),
            TokenKind::Uint16 => Some(PiType::Uint16),
            TokenKind::Uint32 => Some(PiType::Uint32),
            TokenKind::Uint64 => Some(PiType::Uint64),
            TokenKind::Char8 => Some(PiType::Char8),
            TokenKind::Char16 => Some(PiType::Char16),
            TokenKind::Char32 => Some(PiType::Char32),
            TokenKind::Void => Some(PiType::Void),
            _ => None,
        }
    }

    /// Storage width in bits; `None` for `void`.
    pub fn bit_width(self) -> Option<u32> {
        match self {
            PiType::Int8 | PiType::Uint8 | PiType::Char8 => Some(8),
            PiType::Int16 | PiType::Uint16 | PiType::Char16 => Some(16),
            PiType::Int32 | PiType::Uint32 | PiType::Char32 => Some(32),
            PiType::Int64 | PiType::Uint64 => Some(64),
            PiType::Void => None,
        }
    }

    /// Only the `uint*` keywords carry unsigned semantics.
    pub fn is_unsigned(self) -> bool {
        matches!(
            self,
            PiType::Uint8 | PiType::Uint16 | PiType::Uint32 | PiType::Uint64
        )
    }

    /// True for `int*` and `uint*` types (valid targets of number literals).
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            PiType::Int8
                | PiType::Int16
                | PiType::Int32
                | PiType::Int64
                | PiType::Uint8
                | PiType::Uint16
                | PiType::Uint32
                | PiType::Uint64
        )
    }

    /// True for `char*` types (valid targets of char literals).
    pub fn is_char(self) -> bool {
        matches!(self, PiType::Char8 | PiType::Char16 | PiType::Char32)
    }

    /// The source keyword for this type.
    pub fn name(self) -> &'static str {
        match self {
            PiType::Int8 => "int8",
            PiType::Int16 => "int16",
            PiType::Int32 => "int32",
            PiType::Int64 => "int64",
            PiType::Uint8 => "uint8",
            PiType::Uint16 => "uint16",
            PiType::Uint32 => "uint32",
            PiType::Uint64 => "uint64",
            PiType::Char8 => "char8",
            PiType::Char16 => "char16",
            PiType::Char32 => "char32",
            PiType::Void => "void",
        }
    }
}

impl std::fmt::Display for PiType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Expression nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Number {
        value: i64,
        token: Token,
    },
    Char {
        value: u8,
        token: Token,
    },
    Variable {
        name: String,
        token: Token,
    },
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        token: Token,
    },
}

impl Expr {
    /// The originating token, for diagnostics.
    pub fn token(&self) -> &Token {
        match self {
            Expr::Number { token, .. }
            | Expr::Char { token, .. }
            | Expr::Variable { token, .. }
            | Expr::Binary { token, .. } => token,
        }
    }

    /// True when the expression is the literal `0` (possibly sign-folded).
    pub fn is_zero_literal(&self) -> bool {
        matches!(self, Expr::Number { value: 0, .. })
    }
}

/// Statement nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    Print {
        text: String,
        token: Token,
    },
    Const {
        name: String,
        ty: PiType,
        value: Expr,
        token: Token,
    },
    Return {
        value: Option<Expr>,
        token: Token,
    },
}

/// A single Pi function definition — the root of the AST.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub return_type: PiType,
    pub body: Vec<Stmt>,
    /// The function-name token.
    pub token: Token,
}
