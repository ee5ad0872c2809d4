//! Parser: recursive descent over annotation and signature tokens
//!
//! Specifier grammar:
//!
//! ```text
//! spec    := primary ('|' primary)*
//! primary := NAME ['[' spec (',' spec)* ']'] | 'Literal' '[' literal (',' literal)* ']'
//! ```
//!
//! Signature grammar:
//!
//! ```text
//! sig   := ['def'] NAME '(' [param (',' param)* [',']] ')' ['->' spec] [':']
//! param := NAME [':' spec] ['=' literal] | '*' [NAME [':' spec]] | '**' NAME [':' spec]
//! ```

use typen_core::decl::{CallableKind, FunctionDecl, Param, SignatureBuilder};
use typen_core::specifier::{PlainType, Specifier};
use typen_core::value::Value;

use crate::errors::{ParseError, ParseResult};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::registry::ClassRegistry;

/// Module prefixes that builtin names may be qualified with.
const QUALIFIERS: &[&str] = &["typing.", "builtins."];

/// Deepest nesting of type arguments a specifier may have.
pub const MAX_NESTING: usize = 64;

pub struct Parser<'r> {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    registry: &'r ClassRegistry,
}

impl<'r> Parser<'r> {
    pub fn new(input: &str, registry: &'r ClassRegistry) -> ParseResult<Self> {
        let tokens = Lexer::new(input).tokenize()?;
        Ok(Self {
            tokens,
            pos: 0,
            depth: 0,
            registry,
        })
    }

    /// Parse the whole input as a single specifier expression.
    pub fn parse_specifier(mut self) -> ParseResult<Specifier> {
        let spec = self.specifier()?;
        self.expect(TokenKind::Eof)?;
        Ok(spec)
    }

    /// Parse the whole input as one function signature.
    pub fn parse_signature(mut self, kind: CallableKind) -> ParseResult<FunctionDecl> {
        if self.check(TokenKind::Identifier) && self.peek().text == "def" {
            self.advance();
        }
        let name = self.expect_identifier()?;
        self.expect(TokenKind::OpenParen)?;

        let mut builder = SignatureBuilder::new(name).kind(kind);
        let mut keyword_only = false;
        // Position of a bare `*` still waiting for a keyword-only parameter.
        let mut bare_star: Option<(usize, usize)> = None;

        while !self.check(TokenKind::CloseParen) {
            if self.check(TokenKind::Star) {
                let star = self.advance().clone();
                keyword_only = true;
                if self.check(TokenKind::Identifier) {
                    let param = self.annotated_param()?;
                    builder = builder.var_positional(param);
                } else {
                    bare_star = Some((star.line, star.col));
                }
            } else if self.check(TokenKind::DoubleStar) {
                self.advance();
                let param = self.annotated_param()?;
                builder = builder.var_keyword(param);
            } else {
                let mut param = self.annotated_param()?;
                if self.check(TokenKind::Equals) {
                    self.advance();
                    param = param.default(self.literal()?);
                }
                if keyword_only {
                    bare_star = None;
                    builder = builder.keyword_only(param);
                } else {
                    builder = builder.param(param);
                }
            }

            if !self.check(TokenKind::CloseParen) {
                self.expect(TokenKind::Comma)?;
            }
        }
        self.expect(TokenKind::CloseParen)?;

        if let Some((line, col)) = bare_star {
            return Err(ParseError::Syntax {
                line,
                col,
                message: "named arguments must follow bare *".into(),
            });
        }

        if self.check(TokenKind::Arrow) {
            self.advance();
            builder = builder.returns(self.specifier()?);
        }
        if self.check(TokenKind::Colon) {
            self.advance();
        }
        self.expect(TokenKind::Eof)?;

        Ok(builder.build()?)
    }

    // -- Specifiers --

    fn specifier(&mut self) -> ParseResult<Specifier> {
        if self.depth >= MAX_NESTING {
            let tok = self.peek();
            return Err(ParseError::Syntax {
                line: tok.line,
                col: tok.col,
                message: "type nesting too deep".into(),
            });
        }
        self.depth += 1;
        let spec = self.union();
        self.depth -= 1;
        spec
    }

    fn union(&mut self) -> ParseResult<Specifier> {
        let mut members = vec![self.primary()?];
        while self.check(TokenKind::Pipe) {
            self.advance();
            members.push(self.primary()?);
        }
        Ok(union_of(members))
    }

    fn primary(&mut self) -> ParseResult<Specifier> {
        let token = self.expect(TokenKind::Identifier)?.clone();
        let name = unqualified(&token.text);

        let plain = match name {
            "int" => Some(PlainType::Int),
            "float" => Some(PlainType::Float),
            "bool" => Some(PlainType::Bool),
            "str" => Some(PlainType::Str),
            "bytes" => Some(PlainType::Bytes),
            "None" | "NoneType" => Some(PlainType::None),
            "Any" | "object" => Some(PlainType::Any),
            _ => None,
        };
        if let Some(ty) = plain {
            return Ok(ty.into());
        }

        match name {
            "list" | "List" => {
                if !self.check(TokenKind::OpenBracket) {
                    return Ok(PlainType::List.into());
                }
                let mut args = self.type_arguments()?;
                if args.len() != 1 {
                    return Err(arity_error(&token, "exactly one type argument"));
                }
                Ok(Specifier::list_of(args.remove(0)))
            }
            "tuple" | "Tuple" => {
                if !self.check(TokenKind::OpenBracket) {
                    return Ok(PlainType::Tuple.into());
                }
                Ok(Specifier::tuple_of(self.type_arguments()?))
            }
            "dict" | "Dict" => {
                if !self.check(TokenKind::OpenBracket) {
                    return Ok(PlainType::Dict.into());
                }
                let mut args = self.type_arguments()?;
                if args.len() != 2 {
                    return Err(arity_error(&token, "a key and a value type"));
                }
                let value = args.remove(1);
                Ok(Specifier::dict_of(args.remove(0), value))
            }
            "Optional" => {
                let mut args = self.type_arguments()?;
                if args.len() != 1 {
                    return Err(arity_error(&token, "exactly one type argument"));
                }
                Ok(union_of(vec![args.remove(0), PlainType::None.into()]))
            }
            "Union" => {
                let args = self.type_arguments()?;
                if args.is_empty() {
                    return Err(arity_error(&token, "at least one type argument"));
                }
                Ok(union_of(args))
            }
            "Literal" => {
                self.expect(TokenKind::OpenBracket)?;
                let mut values = vec![self.literal()?];
                while self.check(TokenKind::Comma) {
                    self.advance();
                    if self.check(TokenKind::CloseBracket) {
                        break;
                    }
                    values.push(self.literal()?);
                }
                self.expect(TokenKind::CloseBracket)?;
                Ok(Specifier::EnumeratedValues(values))
            }
            _ => self
                .registry
                .lookup(&token.text)
                .or_else(|| self.registry.lookup(name))
                .ok_or_else(|| ParseError::UnknownName {
                    line: token.line,
                    col: token.col,
                    name: token.text.clone(),
                }),
        }
    }

    fn type_arguments(&mut self) -> ParseResult<Vec<Specifier>> {
        self.expect(TokenKind::OpenBracket)?;
        let mut args = Vec::new();
        while !self.check(TokenKind::CloseBracket) {
            args.push(self.specifier()?);
            if !self.check(TokenKind::CloseBracket) {
                self.expect(TokenKind::Comma)?;
            }
        }
        self.expect(TokenKind::CloseBracket)?;
        Ok(args)
    }

    // -- Parameters and literals --

    fn annotated_param(&mut self) -> ParseResult<Param> {
        let name = self.expect_identifier()?;
        let mut param = Param::new(name);
        if self.check(TokenKind::Colon) {
            self.advance();
            param = param.hint(self.specifier()?);
        }
        Ok(param)
    }

    fn literal(&mut self) -> ParseResult<Value> {
        let token = self.advance().clone();
        let invalid = || ParseError::InvalidLiteral {
            line: token.line,
            col: token.col,
            text: token.text.clone(),
        };
        match token.kind {
            TokenKind::IntLiteral => token
                .text
                .replace('_', "")
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| invalid()),
            TokenKind::FloatLiteral => token
                .text
                .replace('_', "")
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| invalid()),
            TokenKind::StringLiteral => Ok(Value::Str(token.text.clone())),
            TokenKind::Identifier => match token.text.as_str() {
                "True" => Ok(Value::Bool(true)),
                "False" => Ok(Value::Bool(false)),
                "None" => Ok(Value::None),
                _ => Err(invalid()),
            },
            TokenKind::Eof => Err(ParseError::UnexpectedEof("literal".into())),
            _ => Err(invalid()),
        }
    }

    // -- Token helpers --

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn advance(&mut self) -> &Token {
        let idx = self.pos.min(self.tokens.len() - 1);
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        &self.tokens[idx]
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<&Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else if self.check(TokenKind::Eof) {
            Err(ParseError::UnexpectedEof(kind.to_string()))
        } else {
            let tok = self.peek();
            Err(ParseError::UnexpectedToken {
                line: tok.line,
                col: tok.col,
                expected: kind.to_string(),
                found: tok.text.clone(),
            })
        }
    }

    fn expect_identifier(&mut self) -> ParseResult<String> {
        let tok = self.expect(TokenKind::Identifier)?;
        Ok(tok.text.clone())
    }
}

fn unqualified(name: &str) -> &str {
    QUALIFIERS
        .iter()
        .find_map(|prefix| name.strip_prefix(prefix))
        .unwrap_or(name)
}

fn arity_error(token: &Token, expected: &str) -> ParseError {
    ParseError::Syntax {
        line: token.line,
        col: token.col,
        message: format!("'{}' takes {}", token.text, expected),
    }
}

/// Collapse union members: a single member stands alone, and an instance-of
/// joined with `None` becomes an optional instance-of.
fn union_of(mut members: Vec<Specifier>) -> Specifier {
    if members.len() == 1 {
        return members.remove(0);
    }
    if members.len() == 2 {
        let none_idx = members
            .iter()
            .position(|m| matches!(m, Specifier::Plain(PlainType::None)));
        if let Some(idx) = none_idx {
            if let Specifier::InstanceOf { class, .. } = &members[1 - idx] {
                return Specifier::optional_instance_of(class.clone());
            }
        }
    }
    Specifier::UnionOf(members)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
