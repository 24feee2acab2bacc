//! トークナイザのメイン実装
//!
//! logos が生成した字句解析器をラップし、バイトスパンを1始まりの
//! 行・桁位置に変換しながらトークン列を組み立てる。

use logos::Logos;

use crate::error::LexError;

use super::token::{LexErrorKind, Token, TokenKind};

/// バイトオフセットから行・桁位置への変換テーブル
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let mut starts = vec![0];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                starts.push(i + 1);
            }
        }
        Self { starts }
    }

    /// オフセットに対応する (行, 桁) を返す。どちらも1始まり
    fn position(&self, offset: usize) -> (u32, u32) {
        let idx = self.starts.partition_point(|&s| s <= offset) - 1;
        ((idx + 1) as u32, (offset - self.starts[idx] + 1) as u32)
    }
}

/// エスケープ解決。`\` の後の1バイトを対応する文字に写す
fn resolve_char(inner: &str) -> char {
    let mut chars = inner.chars();
    match chars.next() {
        Some('\\') => match chars.next() {
            Some('n') => '\n',
            Some('t') => '\t',
            Some('r') => '\r',
            Some('0') => '\0',
            Some(other) => other,
            None => '\\',
        },
        Some(first) => first,
        None => '\0',
    }
}

/// ソーステキストをトークン列に変換する。
///
/// 認識できない文字は UNKNOWN トークンとして取り込むため、閉じ引用符を
/// 欠いた文字リテラル以外では失敗しない。末尾には入力終端を指す EOF
/// トークンがちょうど1つ付く。
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let index = LineIndex::new(source);
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let (line, column) = index.position(span.start);

        match result {
            Ok(kind) => {
                let slice = lexer.slice();
                let lexeme = match kind {
                    TokenKind::Str => {
                        // 引用符を除いた中身。閉じ引用符は無い場合もある
                        let inner = &slice[1..];
                        inner.strip_suffix('"').unwrap_or(inner).to_string()
                    }
                    TokenKind::CharLit => {
                        resolve_char(&slice[1..slice.len() - 1]).to_string()
                    }
                    _ => slice.to_string(),
                };
                tokens.push(Token::new(kind, lexeme, line, column));
            }
            Err(LexErrorKind::UnterminatedChar) => {
                return Err(LexError { line, column });
            }
            Err(LexErrorKind::UnknownCharacter) => {
                tokens.push(Token::new(TokenKind::Unknown, lexer.slice(), line, column));
            }
        }
    }

    let (line, column) = index.position(source.len());
    tokens.push(Token::new(TokenKind::Eof, "", line, column));
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_tokenization() {
        let tokens = tokenize("const x: int8 = 42").unwrap();

        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Const,
                TokenKind::Ident,
                TokenKind::Colon,
                TokenKind::Int8,
                TokenKind::Assign,
                TokenKind::Number,
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[1].lexeme, "x");
        assert_eq!(tokens[5].lexeme, "42");
    }

    #[test]
    fn test_string_literal_strips_quotes() {
        let tokens = tokenize(r#"print("hello")"#).unwrap();
        assert_eq!(tokens[2].kind, TokenKind::Str);
        assert_eq!(tokens[2].lexeme, "hello");
    }

    #[test]
    fn test_char_escape_resolution() {
        let tokens = tokenize(r"'\n'").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::CharLit);
        assert_eq!(tokens[0].lexeme, "\n");
    }

    #[test]
    fn test_positions_are_one_based() {
        let tokens = tokenize("func\n  start").unwrap();
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].column), (2, 3));
    }

    #[test]
    fn test_unterminated_char_is_fatal() {
        let err = tokenize("const c: char8 = 'a").unwrap_err();
        assert_eq!((err.line, err.column), (1, 18));
    }
}
