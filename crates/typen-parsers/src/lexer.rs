//! Lexer: tokenizes annotation and signature text
//!
//! Produces the token stream consumed by the specifier and signature parsers.
//! Handles identifiers, quoted strings, integer and float literals, and the
//! punctuation of a parameter list (`( ) [ ] , : = | * ** ->`).

use crate::errors::{ParseError, ParseResult};

/// A token produced by the lexer
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Raw text; for strings, the unescaped contents without quotes
    pub text: String,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub col: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            col,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    StringLiteral,
    IntLiteral,
    FloatLiteral,

    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    Comma,
    Colon,
    Equals,
    Pipe,
    Star,
    DoubleStar,
    Arrow, // ->

    Eof,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identifier => write!(f, "identifier"),
            Self::StringLiteral => write!(f, "string literal"),
            Self::IntLiteral => write!(f, "integer"),
            Self::FloatLiteral => write!(f, "float"),
            Self::OpenParen => write!(f, "("),
            Self::CloseParen => write!(f, ")"),
            Self::OpenBracket => write!(f, "["),
            Self::CloseBracket => write!(f, "]"),
            Self::Comma => write!(f, ","),
            Self::Colon => write!(f, ":"),
            Self::Equals => write!(f, "="),
            Self::Pipe => write!(f, "|"),
            Self::Star => write!(f, "*"),
            Self::DoubleStar => write!(f, "**"),
            Self::Arrow => write!(f, "->"),
            Self::Eof => write!(f, "end of input"),
        }
    }
}

pub struct Lexer {
    input: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Tokenize the entire input. The last token is always `Eof`.
    pub fn tokenize(&mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments();

            if self.pos >= self.input.len() {
                tokens.push(Token::new(TokenKind::Eof, "", self.line, self.col));
                break;
            }

            let token = self.next_token()?;
            tokens.push(token);
        }

        Ok(tokens)
    }

    fn next_token(&mut self) -> ParseResult<Token> {
        let ch = self.input[self.pos];
        let line = self.line;
        let col = self.col;

        let single = match ch {
            '(' => Some(TokenKind::OpenParen),
            ')' => Some(TokenKind::CloseParen),
            '[' => Some(TokenKind::OpenBracket),
            ']' => Some(TokenKind::CloseBracket),
            ',' => Some(TokenKind::Comma),
            ':' => Some(TokenKind::Colon),
            '=' => Some(TokenKind::Equals),
            '|' => Some(TokenKind::Pipe),
            _ => None,
        };
        if let Some(kind) = single {
            self.advance();
            return Ok(Token::new(kind, ch.to_string(), line, col));
        }

        match ch {
            '*' if self.peek_at(1) == Some('*') => {
                self.advance();
                self.advance();
                Ok(Token::new(TokenKind::DoubleStar, "**", line, col))
            }
            '*' => {
                self.advance();
                Ok(Token::new(TokenKind::Star, "*", line, col))
            }
            '-' if self.peek_at(1) == Some('>') => {
                self.advance();
                self.advance();
                Ok(Token::new(TokenKind::Arrow, "->", line, col))
            }
            '-' if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => self.read_number(),
            '"' | '\'' => self.read_string_literal(ch),
            c if c.is_ascii_digit() => self.read_number(),
            c if c.is_alphabetic() || c == '_' => self.read_identifier(),
            _ => Err(ParseError::Syntax {
                line,
                col,
                message: format!("Unexpected character: '{}'", ch),
            }),
        }
    }

    fn read_string_literal(&mut self, quote: char) -> ParseResult<Token> {
        let line = self.line;
        let col = self.col;
        self.advance(); // skip opening quote

        let mut text = String::new();
        while self.pos < self.input.len() && self.input[self.pos] != quote {
            if self.input[self.pos] == '\\' {
                if let Some(next) = self.peek_at(1) {
                    self.advance();
                    text.push(match next {
                        'n' => '\n',
                        't' => '\t',
                        other => other,
                    });
                    self.advance();
                    continue;
                }
            }
            text.push(self.input[self.pos]);
            self.advance();
        }

        if self.pos >= self.input.len() {
            return Err(ParseError::Syntax {
                line,
                col,
                message: "Unterminated string literal".into(),
            });
        }

        self.advance(); // skip closing quote
        Ok(Token::new(TokenKind::StringLiteral, text, line, col))
    }

    fn read_number(&mut self) -> ParseResult<Token> {
        let line = self.line;
        let col = self.col;
        let mut text = String::new();
        let mut kind = TokenKind::IntLiteral;

        if self.input[self.pos] == '-' {
            text.push('-');
            self.advance();
        }
        while let Some(c) = self.peek_at(0) {
            if c.is_ascii_digit() || c == '_' {
                text.push(c);
            } else if c == '.' && kind == TokenKind::IntLiteral {
                kind = TokenKind::FloatLiteral;
                text.push(c);
            } else if matches!(c, 'e' | 'E') {
                kind = TokenKind::FloatLiteral;
                text.push(c);
                if let Some(sign @ ('+' | '-')) = self.peek_at(1) {
                    self.advance();
                    text.push(sign);
                }
            } else {
                break;
            }
            self.advance();
        }

        Ok(Token::new(kind, text, line, col))
    }

    fn read_identifier(&mut self) -> ParseResult<Token> {
        let line = self.line;
        let col = self.col;
        let mut text = String::new();

        // Dotted names such as `typing.List` are read as one identifier.
        while self.pos < self.input.len()
            && (self.input[self.pos].is_alphanumeric()
                || self.input[self.pos] == '_'
                || (self.input[self.pos] == '.'
                    && self.peek_at(1).is_some_and(|c| c.is_alphabetic() || c == '_')))
        {
            text.push(self.input[self.pos]);
            self.advance();
        }

        Ok(Token::new(TokenKind::Identifier, text, line, col))
    }

    fn skip_whitespace_and_comments(&mut self) {
        while self.pos < self.input.len() {
            let ch = self.input[self.pos];
            if ch.is_whitespace() {
                self.advance();
            } else if ch == '#' {
                while self.pos < self.input.len() && self.input[self.pos] != '\n' {
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    fn advance(&mut self) {
        if self.pos < self.input.len() {
            if self.input[self.pos] == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
            self.pos += 1;
        }
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }
}
