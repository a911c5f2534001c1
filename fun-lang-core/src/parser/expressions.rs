use super::error;
use super::error::ParseError;
use crate::ast::{BinaryOperator, Expression, Identifier};
use crate::lexer::{Token, TokenKind};
use crate::parser::Parser;
use crate::stack::ensure_sufficient_stack;

#[derive(PartialOrd, PartialEq, Debug)]
pub enum Precedence {
    Lowest = 0,
    Or,
    And,
    Equals,
    LessGreater,
    Sum,
    Product,
}

pub fn precedence_of(token: &TokenKind) -> Precedence {
    match token {
        TokenKind::Or => Precedence::Or,
        TokenKind::And => Precedence::And,
        TokenKind::Equal => Precedence::Equals,
        TokenKind::NotEqual => Precedence::Equals,
        TokenKind::LessThan => Precedence::LessGreater,
        TokenKind::GreaterThan => Precedence::LessGreater,
        TokenKind::LessEqual => Precedence::LessGreater,
        TokenKind::GreaterEqual => Precedence::LessGreater,
        TokenKind::Plus => Precedence::Sum,
        TokenKind::Minus => Precedence::Sum,
        TokenKind::Asterisk => Precedence::Product,
        TokenKind::Slash => Precedence::Product,
        TokenKind::Percent => Precedence::Product,
        _ => Precedence::Lowest,
    }
}

pub fn binary_operator_of(token: &TokenKind) -> Option<BinaryOperator> {
    match token {
        TokenKind::Asterisk => Some(BinaryOperator::Multiply),
        TokenKind::Slash => Some(BinaryOperator::Divide),
        TokenKind::Percent => Some(BinaryOperator::Modulo),
        TokenKind::Plus => Some(BinaryOperator::Plus),
        TokenKind::Minus => Some(BinaryOperator::Minus),
        TokenKind::LessThan => Some(BinaryOperator::LessThan),
        TokenKind::GreaterThan => Some(BinaryOperator::GreaterThan),
        TokenKind::LessEqual => Some(BinaryOperator::LessEqual),
        TokenKind::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        TokenKind::Equal => Some(BinaryOperator::Equal),
        TokenKind::NotEqual => Some(BinaryOperator::NotEqual),
        TokenKind::And => Some(BinaryOperator::And),
        TokenKind::Or => Some(BinaryOperator::Or),
        _ => None,
    }
}

pub fn parse_expression(
    parser: &mut Parser,
    precedence: Precedence,
) -> Result<Expression, ParseError> {
    ensure_sufficient_stack(|| parse_operations(parser, precedence))
}

fn parse_operations(
    parser: &mut Parser,
    precedence: Precedence,
) -> Result<Expression, ParseError> {
    let Some(token) = parser.iter.next() else {
        return Err(ParseError::premature_end_expected_expression());
    };
    let mut left_expression = prefix_parsing(token, parser)?;

    loop {
        let Some(next_token) = parser.iter.peek() else {
            break;
        };

        let next_precedence = precedence_of(&next_token.kind);
        if precedence >= next_precedence {
            break;
        }
        let Some(operator) = binary_operator_of(&next_token.kind) else {
            break;
        };
        parser.iter.next();

        // Stopping at operators of equal precedence keeps them left-associative.
        let right_expression = parse_expression(parser, next_precedence)?;
        left_expression = Expression::BinaryOperation(
            operator,
            Box::new(left_expression),
            Box::new(right_expression),
        );
    }

    Ok(left_expression)
}

fn parse_grouped_expression(parser: &mut Parser) -> Result<Expression, ParseError> {
    let expression = parse_expression(parser, Precedence::Lowest)?;
    parser.expect_token(TokenKind::RParen)?;

    Ok(expression)
}

pub(crate) fn parse_sequence<T>(
    parser: &mut Parser,
    parse_element: impl Fn(&mut Parser) -> Result<T, ParseError>,
    separator: TokenKind,
    terminator: TokenKind,
) -> Result<Vec<T>, ParseError> {
    let mut elements = Vec::new();

    loop {
        match parser.iter.peek() {
            Some(next) if next.kind == terminator => {
                parser.iter.next();
                return Ok(elements);
            }
            None => {
                return Err(ParseError::PrematureEndOfInput {
                    expected: error::Expected::Token(terminator),
                })
            }
            _ => {
                elements.push(parse_element(parser)?);
            }
        }

        match parser.iter.next() {
            Some(next) if next.kind == separator => continue,
            Some(next) if next.kind == terminator => return Ok(elements),
            next => return Err(ParseError::unexpected_token(separator, next)),
        }
    }
}

fn parse_integer(token: Token, digits: &str) -> Result<Expression, ParseError> {
    match digits.parse() {
        Ok(value) => Ok(Expression::IntegerLiteral(value)),
        Err(source) => Err(ParseError::InvalidLiteral { token, source }),
    }
}

fn parse_negative_literal(parser: &mut Parser) -> Result<Expression, ParseError> {
    match parser.iter.next() {
        Some(token) => match token.kind.clone() {
            TokenKind::Int(digits) => parse_integer(token, &format!("-{}", digits)),
            _ => Err(ParseError::unexpected_other(
                error::Expected::IntegerLiteral,
                Some(token),
            )),
        },
        None => Err(ParseError::unexpected_other(
            error::Expected::IntegerLiteral,
            None,
        )),
    }
}

fn parse_identifier(
    token: &Token,
    name: std::rc::Rc<str>,
    parser: &mut Parser,
) -> Result<Expression, ParseError> {
    let identifier = Identifier { name };
    if parser
        .iter
        .next_if(|next| next.kind == TokenKind::LParen)
        .is_none()
    {
        return Ok(Expression::Variable {
            identifier,
            line: token.line,
        });
    }

    let arguments = parse_sequence(
        parser,
        |parser| parse_expression(parser, Precedence::Lowest),
        TokenKind::Comma,
        TokenKind::RParen,
    )?;

    Ok(Expression::FunctionCall {
        name: identifier,
        line: token.line,
        arguments,
    })
}

pub fn prefix_parsing(token: Token, parser: &mut Parser) -> Result<Expression, ParseError> {
    match token.kind.clone() {
        TokenKind::Ident(name) => parse_identifier(&token, name, parser),
        TokenKind::Int(digits) => parse_integer(token, &digits),
        TokenKind::Minus => parse_negative_literal(parser),
        TokenKind::LParen => parse_grouped_expression(parser),
        _ => Err(ParseError::NoPrefixFunction(token)),
    }
}
