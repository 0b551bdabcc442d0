use thiserror::Error;

use crate::lexer::{Position, Token, TokenKind};

#[derive(Debug, PartialEq, Error)]
pub enum ParseError {
    #[error("unexpected end of input at {position}, expected {expected}")]
    PrematureEndOfInput {
        expected: Expected,
        position: Position,
    },
    #[error("expected {expected}, got {got}")]
    UnexpectedToken { expected: Expected, got: Token },
    #[error("integer `{literal}` out of range at {position}")]
    InvalidInteger {
        literal: std::rc::Rc<str>,
        position: Position,
    },
    #[error("cannot start an expression with {token}")]
    NoPrefixFunction { token: Token },
}

#[derive(Debug, PartialEq)]
pub enum Expected {
    Token(TokenKind),
    Identifier,
    Expression,
}

impl std::fmt::Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "{}", kind),
            Expected::Identifier => write!(f, "an identifier"),
            Expected::Expression => write!(f, "an expression"),
        }
    }
}

impl ParseError {
    pub fn premature_end(expected: Expected, position: Position) -> Self {
        ParseError::PrematureEndOfInput { expected, position }
    }

    pub fn unexpected_token(expected: TokenKind, got: Option<Token>, end: Position) -> ParseError {
        match got {
            Some(got) => ParseError::UnexpectedToken {
                expected: Expected::Token(expected),
                got,
            },
            None => ParseError::PrematureEndOfInput {
                expected: Expected::Token(expected),
                position: end,
            },
        }
    }

    pub fn unexpected_other(expected: Expected, got: Option<Token>, end: Position) -> ParseError {
        match got {
            Some(got) => ParseError::UnexpectedToken { expected, got },
            None => ParseError::PrematureEndOfInput { expected, position: end },
        }
    }
}
