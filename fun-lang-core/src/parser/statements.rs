use std::rc::Rc;

use crate::ast::{
    Assignment, Block, Expression, FunctionDeclaration, Identifier, IfStatement, ReturnStatement,
    Statement, VariableDeclaration, WhileStatement,
};
use crate::lexer::{Token, TokenKind};
use crate::parser::error::Expected;
use crate::parser::expressions::{parse_expression, parse_sequence, Precedence};
use crate::parser::{ParseError, Parser};
use crate::stack::ensure_sufficient_stack;

pub fn parse_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    ensure_sufficient_stack(|| parse_statement_kind(parser))
}

fn parse_statement_kind(parser: &mut Parser) -> Result<Statement, ParseError> {
    let token = parser.iter.peek();
    match token.map(|t| &t.kind) {
        Some(TokenKind::Function) => Ok(Statement::Function(Rc::new(
            parse_function_declaration(parser)?,
        ))),
        Some(TokenKind::Var) => Ok(Statement::Variable(parse_variable_declaration(parser)?)),
        Some(TokenKind::If) => Ok(Statement::If(parse_if_statement(parser)?)),
        Some(TokenKind::While) => Ok(Statement::While(parse_while_statement(parser)?)),
        Some(TokenKind::Return) => Ok(Statement::Return(parse_return_statement(parser)?)),
        _ => parse_expression_statement(parser),
    }
}

/// Parses the statements of a `{ ... }` block whose opening brace was already
/// consumed, up to and including the closing brace.
pub fn parse_block_statement(parser: &mut Parser) -> Result<Block, ParseError> {
    let mut statements = Vec::new();

    loop {
        match parser.iter.peek() {
            Some(Token {
                kind: TokenKind::RBrace,
                ..
            }) => {
                parser.iter.next();
                return Ok(Block { statements });
            }
            None => {
                return Err(ParseError::PrematureEndOfInput {
                    expected: Expected::Token(TokenKind::RBrace),
                })
            }
            _ => statements.push(parse_statement(parser)?),
        }
        parser.skip_separator();
    }
}

fn parse_braced_block(parser: &mut Parser) -> Result<Block, ParseError> {
    parser.expect_token(TokenKind::LBrace)?;
    parse_block_statement(parser)
}

fn parse_condition(parser: &mut Parser) -> Result<Expression, ParseError> {
    parser.expect_token(TokenKind::LParen)?;
    let condition = parse_expression(parser, Precedence::Lowest)?;
    parser.expect_token(TokenKind::RParen)?;
    Ok(condition)
}

fn parse_function_declaration(parser: &mut Parser) -> Result<FunctionDeclaration, ParseError> {
    let keyword = parser.expect_token(TokenKind::Function)?;
    let name = parser.parse_ident()?;
    parser.expect_token(TokenKind::LParen)?;
    let parameters = parse_sequence(
        parser,
        |parser| parser.parse_ident().map(|name| Identifier { name }),
        TokenKind::Comma,
        TokenKind::RParen,
    )?;
    let body = parse_braced_block(parser)?;

    Ok(FunctionDeclaration {
        line: keyword.line,
        name: Identifier { name },
        parameters,
        body,
    })
}

fn parse_variable_declaration(parser: &mut Parser) -> Result<VariableDeclaration, ParseError> {
    let keyword = parser.expect_token(TokenKind::Var)?;
    let name = parser.parse_ident()?;
    let value = if parser
        .iter
        .next_if(|token| token.kind == TokenKind::Assign)
        .is_some()
    {
        Some(parse_expression(parser, Precedence::Lowest)?)
    } else {
        None
    };

    Ok(VariableDeclaration {
        line: keyword.line,
        identifier: Identifier { name },
        value,
    })
}

fn parse_if_statement(parser: &mut Parser) -> Result<IfStatement, ParseError> {
    parser.expect_token(TokenKind::If)?;
    let condition = parse_condition(parser)?;
    let consequence = parse_braced_block(parser)?;

    let alternative = if parser
        .iter
        .next_if(|token| token.kind == TokenKind::Else)
        .is_some()
    {
        Some(parse_braced_block(parser)?)
    } else {
        None
    };

    Ok(IfStatement {
        condition,
        consequence,
        alternative,
    })
}

fn parse_while_statement(parser: &mut Parser) -> Result<WhileStatement, ParseError> {
    parser.expect_token(TokenKind::While)?;
    let condition = parse_condition(parser)?;
    let body = parse_braced_block(parser)?;

    Ok(WhileStatement { condition, body })
}

fn parse_return_statement(parser: &mut Parser) -> Result<ReturnStatement, ParseError> {
    parser.expect_token(TokenKind::Return)?;
    let value = parse_expression(parser, Precedence::Lowest)?;

    Ok(ReturnStatement { value })
}

fn parse_expression_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let expression = parse_expression(parser, Precedence::Lowest)?;

    let Some(assign) = parser
        .iter
        .next_if(|token| token.kind == TokenKind::Assign)
    else {
        return Ok(Statement::Expression(expression));
    };

    match expression {
        Expression::Variable { identifier, line } => Ok(Statement::Assignment(Assignment {
            line,
            identifier,
            value: parse_expression(parser, Precedence::Lowest)?,
        })),
        _ => Err(ParseError::InvalidAssignmentTarget(assign)),
    }
}
