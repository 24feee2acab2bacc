//! トークン定義

use logos::Logos;
use serde::{Deserialize, Serialize};

/// 字句解析中の失敗分類。
///
/// `UnknownCharacter` はデフォルト（どのパターンにも一致しない入力）で、
/// 致命的ではなく UNKNOWN トークンになる。`UnterminatedChar` のみが
/// トークン化全体を中断させる。
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    #[default]
    UnknownCharacter,
    UnterminatedChar,
}

/// Pi言語のトークン種別
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(error = LexErrorKind)]
pub enum TokenKind {
    // キーワード
    #[token("func")]
    Func,
    #[token("start")]
    Start,
    #[token("print")]
    Print,
    #[token("const")]
    Const,
    #[token("return")]
    Return,

    // 整数型
    #[token("int8")]
    Int8,
    #[token("int16")]
    Int16,
    #[token("int32")]
    Int32,
    #[token("int64")]
    Int64,
    #[token("uint8")]
    Uint8,
    #[token("uint16")]
    Uint16,
    #[token("uint32")]
    Uint32,
    #[token("uint64")]
    Uint64,

    // 文字型
    #[token("char8")]
    Char8,
    #[token("char16")]
    Char16,
    #[token("char32")]
    Char32,

    #[token("void")]
    Void,

    // 識別子（キーワードの後に来る必要がある。数字では始まらない）
    #[regex(r"[A-Za-z][A-Za-z0-9]*")]
    Ident,

    // 数値リテラル（数値変換は構文解析時に行う）
    #[regex(r"[0-9]+")]
    Number,

    // 文字列リテラル。閉じ引用符がなければ入力末尾まで黙って消費する
    #[regex(r#""[^"]*"?"#)]
    Str,

    // 文字リテラル。閉じ引用符の欠落だけが致命的な字句エラーになる
    #[regex(r"'(\\.|[^\\])'", priority = 10)]
    #[regex(r"'(\\.|[^\\])?", unterminated_char, priority = 3)]
    CharLit,

    // 区切り記号・演算子
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(":")]
    Colon,
    #[token("=")]
    Assign,
    #[token("->")]
    Arrow,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    // 特殊トークン（パターンを持たない）
    Eof,
    Unknown,
}

/// 閉じ引用符を欠いた文字リテラルを致命的エラーへ写すコールバック
fn unterminated_char(_lex: &mut logos::Lexer<TokenKind>) -> Result<(), LexErrorKind> {
    Err(LexErrorKind::UnterminatedChar)
}

/// 位置情報付きトークン。
///
/// `lexeme` は原則としてソースの部分文字列。文字列リテラルは引用符を
/// 除いた中身、文字リテラルはエスケープ解決後の1文字を保持する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    /// 1始まりの行番号
    pub line: u32,
    /// 1始まりの桁番号
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }
}
