//! 式の解析
//!
//! 標準的な左結合の二項演算。乗除算が加減算より強く束縛する。

use crate::ast::{BinOp, Expr};
use crate::error::SyntaxError;
use crate::lexer::TokenKind;

use super::{ParseResult, Parser};

impl Parser {
    /// 加減算式を解析
    ///
    /// ```text
    /// Expression := Term (('+'|'-') Term)*
    /// ```
    pub(super) fn parse_expression(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_term()?;

        loop {
            let op = match self.current_token().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            let token = self.current_token().clone();
            self.advance();
            let right = self.parse_term()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                token,
            };
        }

        Ok(left)
    }

    /// 乗除算式を解析
    fn parse_term(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_factor()?;

        loop {
            let op = match self.current_token().kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                _ => break,
            };
            let token = self.current_token().clone();
            self.advance();
            let right = self.parse_factor()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                token,
            };
        }

        Ok(left)
    }

    /// 因子を解析
    ///
    /// 単項マイナスは因子へ再帰し、数値リテラルに直接かかる場合は
    /// ノードを作らず符号をリテラルへ畳み込む（解析時定数畳み込み）。
    /// ASTに単項ノードは存在しないため、それ以外への適用はエラー
    fn parse_factor(&mut self) -> ParseResult<Expr> {
        match self.current_token().kind {
            TokenKind::Minus => {
                let minus = self.current_token().clone();
                self.advance();
                match self.parse_factor()? {
                    Expr::Number { value, token } => Ok(Expr::Number {
                        value: -value,
                        token,
                    }),
                    _ => Err(SyntaxError {
                        message: "Unary '-' is only supported before numeric literals"
                            .to_string(),
                        line: minus.line,
                        column: minus.column,
                        lexeme: minus.lexeme,
                    }
                    .into()),
                }
            }
            TokenKind::Number => {
                let token = self.current_token().clone();
                let value = token.lexeme.parse::<i64>().map_err(|_| SyntaxError {
                    message: "Number literal exceeds 64-bit signed range".to_string(),
                    line: token.line,
                    column: token.column,
                    lexeme: token.lexeme.clone(),
                })?;
                self.advance();
                Ok(Expr::Number { value, token })
            }
            TokenKind::CharLit => {
                let token = self.current_token().clone();
                let value = token.lexeme.bytes().next().unwrap_or(0);
                self.advance();
                Ok(Expr::Char { value, token })
            }
            TokenKind::Ident => {
                let token = self.current_token().clone();
                self.advance();
                Ok(Expr::Variable {
                    name: token.lexeme.clone(),
                    token,
                })
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RParen, "Expected ')' after expression")?;
                Ok(expr)
            }
            _ => Err(self.error("Expected expression")),
        }
    }
}
