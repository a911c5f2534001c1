use std::fmt::Display;

use thiserror::Error;

use crate::lexer::{Token, TokenKind};

#[derive(Debug, PartialEq, Error)]
pub enum ParseError {
    #[error("unexpected end of input, expected {expected}")]
    PrematureEndOfInput { expected: Expected },
    #[error("line {}: unexpected {:?}, expected {expected}", .got.line, .got.kind)]
    UnexpectedToken { expected: Expected, got: Token },
    #[error("line {}: invalid integer literal: {source}", .token.line)]
    InvalidLiteral {
        token: Token,
        source: std::num::ParseIntError,
    },
    #[error("line {}: expected an expression, found {:?}", .0.line, .0.kind)]
    NoPrefixFunction(Token),
    #[error("line {}: only a variable can be assigned to", .0.line)]
    InvalidAssignmentTarget(Token),
}

#[derive(Debug, PartialEq)]
pub enum Expected {
    Token(TokenKind),
    Identifier,
    Expression,
    IntegerLiteral,
}

impl Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "{:?}", kind),
            Expected::Identifier => write!(f, "an identifier"),
            Expected::Expression => write!(f, "an expression"),
            Expected::IntegerLiteral => write!(f, "an integer literal"),
        }
    }
}

impl ParseError {
    pub fn premature_end_expected_expression() -> Self {
        ParseError::PrematureEndOfInput {
            expected: Expected::Expression,
        }
    }

    pub fn unexpected_token(expected: TokenKind, got: Option<Token>) -> ParseError {
        match got {
            Some(got) => ParseError::UnexpectedToken {
                expected: Expected::Token(expected),
                got,
            },
            None => ParseError::PrematureEndOfInput {
                expected: Expected::Token(expected),
            },
        }
    }

    pub fn unexpected_other(expected: Expected, got: Option<Token>) -> ParseError {
        match got {
            Some(got) => ParseError::UnexpectedToken { expected, got },
            None => ParseError::PrematureEndOfInput { expected },
        }
    }
}
