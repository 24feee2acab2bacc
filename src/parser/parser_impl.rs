//! メインパーサー構造とユーティリティ

use crate::ast::{Expr, Function, PiType, Stmt};
use crate::error::{SyntaxError, TypeMismatchError};
use crate::lexer::{Token, TokenKind};

use super::ParseResult;

/// Piパーサー
pub struct Parser {
    pub(super) tokens: Vec<Token>,
    pub(super) current: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        // カーソルのセンチネルとして末尾のEOFに依存する
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            tokens.push(Token::new(TokenKind::Eof, "", 1, 1));
        }
        Self { tokens, current: 0 }
    }

    /// 単一のトップレベル関数を解析する
    ///
    /// ```text
    /// Function := 'func' (START | IDENT) '(' ')' '->' Type '{' Statement* '}'
    /// ```
    pub fn parse_function(&mut self) -> ParseResult<Function> {
        self.expect(
            TokenKind::Func,
            "Expected 'func' at beginning of function definition",
        )?;

        // 関数名はエントリポイント 'start' か一般の識別子
        let name_token = self.current_token().clone();
        match name_token.kind {
            TokenKind::Start | TokenKind::Ident => self.advance(),
            _ => return Err(self.error("Expected function name after 'func'")),
        }

        self.expect(TokenKind::LParen, "Expected '(' after function name")?;
        self.expect(
            TokenKind::RParen,
            "Expected ')' after '(' in function definition",
        )?;
        self.expect(TokenKind::Arrow, "Expected '->' after parameter list")?;

        let return_type = match PiType::from_token_kind(self.current_token().kind) {
            Some(ty) => {
                self.advance();
                ty
            }
            None => return Err(self.error("Expected return type after '->'")),
        };

        self.expect(TokenKind::LBrace, "Expected '{' to start function body")?;

        let mut body = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.check(TokenKind::Eof) {
            body.push(self.parse_statement()?);
        }

        self.expect(TokenKind::RBrace, "Expected '}' to close function body")?;

        Ok(Function {
            name: name_token.lexeme.clone(),
            return_type,
            body,
            token: name_token,
        })
    }

    /// 文を解析する（print / const / return）
    fn parse_statement(&mut self) -> ParseResult<Stmt> {
        match self.current_token().kind {
            TokenKind::Print => self.parse_print(),
            TokenKind::Const => self.parse_const(),
            TokenKind::Return => self.parse_return(),
            _ => Err(self.error("Expected statement (print, const or return)")),
        }
    }

    fn parse_print(&mut self) -> ParseResult<Stmt> {
        let token = self.current_token().clone();
        self.advance();
        self.expect(TokenKind::LParen, "Expected '(' after 'print'")?;

        let text = match self.current_token().kind {
            TokenKind::Str => {
                let text = self.current_token().lexeme.clone();
                self.advance();
                text
            }
            _ => return Err(self.error("Expected string literal in print statement")),
        };

        self.expect(TokenKind::RParen, "Expected ')' after string literal")?;

        Ok(Stmt::Print { text, token })
    }

    fn parse_const(&mut self) -> ParseResult<Stmt> {
        let token = self.current_token().clone();
        self.advance();

        let name = match self.current_token().kind {
            TokenKind::Ident => {
                let name = self.current_token().lexeme.clone();
                self.advance();
                name
            }
            _ => return Err(self.error("Expected identifier after 'const'")),
        };

        self.expect(TokenKind::Colon, "Expected ':' after identifier")?;

        // 定数の宣言型は値型のみ。voidは関数の戻り型にしか現れない
        let ty = match PiType::from_token_kind(self.current_token().kind) {
            Some(ty) if ty != PiType::Void => {
                self.advance();
                ty
            }
            _ => return Err(self.error("Expected type after ':'")),
        };

        self.expect(TokenKind::Assign, "Expected '=' after type")?;

        let value = self.parse_expression()?;

        // リテラル種別と宣言型の整合性は解析時に確認する。
        // 複合式の初期化子はここでは検査しない
        match &value {
            Expr::Number { token: lit, .. } if !ty.is_integer() => {
                return Err(TypeMismatchError {
                    expected: "char",
                    declared: ty,
                    line: lit.line,
                    column: lit.column,
                }
                .into());
            }
            Expr::Char { token: lit, .. } if !ty.is_char() => {
                return Err(TypeMismatchError {
                    expected: "number",
                    declared: ty,
                    line: lit.line,
                    column: lit.column,
                }
                .into());
            }
            _ => {}
        }

        Ok(Stmt::Const {
            name,
            ty,
            value,
            token,
        })
    }

    fn parse_return(&mut self) -> ParseResult<Stmt> {
        let token = self.current_token().clone();
        self.advance();

        // 値の有無は先読みだけで決める。式を開始できるトークンが
        // 続くときに限り式を読む
        let value = match self.current_token().kind {
            TokenKind::Number | TokenKind::CharLit | TokenKind::LParen | TokenKind::Ident => {
                Some(self.parse_expression()?)
            }
            _ => None,
        };

        Ok(Stmt::Return { value, token })
    }

    // ==================== ユーティリティメソッド ====================

    /// 現在のトークンを取得。範囲外アクセスは末尾のEOFに丸める
    pub(super) fn current_token(&self) -> &Token {
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    /// 次のトークンに進む
    pub(super) fn advance(&mut self) {
        if self.current < self.tokens.len() {
            self.current += 1;
        }
    }

    /// 特定のトークンをチェック（進まない）
    pub(super) fn check(&self, kind: TokenKind) -> bool {
        self.current_token().kind == kind
    }

    /// 特定のトークンを期待し、無ければSyntaxErrorを返す
    pub(super) fn expect(&mut self, kind: TokenKind, message: &str) -> ParseResult<()> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(message))
        }
    }

    /// 現在のトークン位置でSyntaxErrorを作成
    pub(super) fn error(&self, message: &str) -> crate::error::PiError {
        let token = self.current_token();
        SyntaxError {
            message: message.to_string(),
            line: token.line,
            column: token.column,
            lexeme: token.lexeme.clone(),
        }
        .into()
    }
}
