pub mod error;
pub mod expressions;
pub mod statements;

use crate::ast::{Block, Program};
use crate::lexer::{Token, TokenKind};
pub use error::ParseError;
use statements::parse_statement;

pub struct Parser<'a> {
    pub iter: std::iter::Peekable<crate::lexer::Tokenizer<'a>>,
}

impl<'a> Parser<'a> {
    pub fn new(tokenizer: crate::lexer::Tokenizer<'a>) -> Self {
        let iter = tokenizer.peekable();
        Self { iter }
    }

    pub(crate) fn parse_ident(&mut self) -> Result<std::rc::Rc<str>, ParseError> {
        let token = self.iter.next();
        match token {
            Some(Token {
                kind: TokenKind::Ident(name),
                ..
            }) => Ok(name),
            _ => Err(ParseError::unexpected_other(
                error::Expected::Identifier,
                token,
            )),
        }
    }

    pub(crate) fn expect_token(&mut self, token_kind: TokenKind) -> Result<Token, ParseError> {
        let token = self.iter.next();
        match token {
            Some(token) if token.kind == token_kind => Ok(token),
            _ => Err(ParseError::unexpected_token(token_kind, token)),
        }
    }

    pub(crate) fn skip_separator(&mut self) {
        self.iter.next_if(|token| token.kind == TokenKind::SemiColon);
    }

    pub fn parse_program(&mut self) -> Result<Program, Vec<ParseError>> {
        let mut statements = Vec::new();

        let mut errors = Vec::new();

        while self.iter.peek().is_some() {
            match parse_statement(self) {
                Ok(statement) => {
                    statements.push(statement);
                }
                Err(err) => {
                    errors.push(err);
                    self.synchronize();
                }
            }
            self.skip_separator();
        }
        if errors.is_empty() {
            Ok(Program {
                body: Block { statements },
            })
        } else {
            Err(errors)
        }
    }

    /// Drops tokens until something that can start a fresh statement.
    fn synchronize(&mut self) {
        while let Some(token) = self.iter.peek() {
            match token.kind {
                TokenKind::SemiColon
                | TokenKind::Function
                | TokenKind::Var
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Return => return,
                _ => {
                    self.iter.next();
                }
            }
        }
    }
}

pub fn parse(input: &str) -> Result<Program, Vec<ParseError>> {
    Parser::new(crate::lexer::Tokenizer::new(input)).parse_program()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::error::Expected;
    use super::ParseError;
    use crate::ast::{Expression, Statement};
    use crate::lexer::TokenKind;

    fn test_parsing(tests: Vec<(&str, &str)>) {
        for (input, expected) in tests {
            let program = super::parse(input).unwrap();

            assert_eq!(program.to_string(), expected)
        }
    }

    #[test]
    fn test_operator_precedence() {
        let tests = vec![
            ("a * b", "(a * b)\n"),
            ("a + b + c", "((a + b) + c)\n"),
            ("a + b - c", "((a + b) - c)\n"),
            ("a * b / c % d", "(((a * b) / c) % d)\n"),
            ("a + b / c", "(a + (b / c))\n"),
            (
                "a + b * c + d / e - f",
                "(((a + (b * c)) + (d / e)) - f)\n",
            ),
            ("3 + 4; -5 * 5", "(3 + 4)\n(-5 * 5)\n"),
            ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))\n"),
            ("5 <= 4 != 3 >= 4", "((5 <= 4) != (3 >= 4))\n"),
            ("a || b && c", "(a || (b && c))\n"),
            ("a && b || c && d", "((a && b) || (c && d))\n"),
            ("a == 1 && b != 2", "((a == 1) && (b != 2))\n"),
            ("a - -1", "(a - -1)\n"),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_grouped_expression() {
        let tests = vec![
            ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)\n"),
            ("(5 + 5) * 2", "((5 + 5) * 2)\n"),
            ("2 / (5 + 5)", "(2 / (5 + 5))\n"),
            ("(a || b) && c", "((a || b) && c)\n"),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_call_expression() {
        let tests = vec![
            ("a + add(b * c) + d", "((a + add((b * c))) + d)\n"),
            (
                "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
                "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))\n",
            ),
            ("println()", "println()\n"),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_statements() {
        let tests = vec![
            ("var x", "var x\n"),
            ("var x = 1 + 2", "var x = (1 + 2)\n"),
            ("x = x - 1", "x = (x - 1)\n"),
            ("return 0", "return 0\n"),
            ("var a = 2; var b = a", "var a = 2\nvar b = a\n"),
            ("var a = 2 println(a)", "var a = 2\nprintln(a)\n"),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_control_flow() {
        let tests = vec![
            ("if (x < y) { x }", "if ((x < y)) {x}\n"),
            (
                "if (x < y) { return x } else { y = 1; x }",
                "if ((x < y)) {return x} else {y = 1; x}\n",
            ),
            (
                "while (a >= 0) { println(a); a = a - 1; return 0 }",
                "while ((a >= 0)) {println(a); a = (a - 1); return 0}\n",
            ),
            ("while (1) {}", "while (1) {}\n"),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_function() {
        let tests = vec![
            (
                "fun fib(n) {
                    if (n <= 1) {
                        return 1
                    }
                    return fib(n - 1) + fib(n - 2)
                }",
                "fun fib(n) {if ((n <= 1)) {return 1}; return (fib((n - 1)) + fib((n - 2)))}\n",
            ),
            ("fun nothing() {}", "fun nothing() {}\n"),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_line_numbers() {
        let program = super::parse("var a = 1\n\n  a = b\n").unwrap();

        match &program.body.statements[..] {
            [Statement::Variable(declaration), Statement::Assignment(assignment)] => {
                assert_eq!(declaration.line, 1);
                assert_eq!(assignment.line, 3);
                match &assignment.value {
                    Expression::Variable { line, .. } => assert_eq!(*line, 3),
                    other => panic!("expected a variable, got {:?}", other),
                }
            }
            other => panic!("unexpected statements {:?}", other),
        }
    }

    #[test]
    fn test_errors() {
        let errors = super::parse("var = 1\nvar b = 2 +\n").unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(matches!(
            &errors[0],
            ParseError::UnexpectedToken {
                expected: Expected::Identifier,
                got,
            } if got.kind == TokenKind::Assign && got.line == 1
        ));
        assert_eq!(
            errors[1],
            ParseError::PrematureEndOfInput {
                expected: Expected::Expression
            }
        );

        assert!(matches!(
            &super::parse("1 = 2").unwrap_err()[..],
            [ParseError::InvalidAssignmentTarget(_)]
        ));
        assert!(matches!(
            &super::parse("if (1) { println(1)").unwrap_err()[..],
            [ParseError::PrematureEndOfInput {
                expected: Expected::Token(TokenKind::RBrace)
            }]
        ));
        assert!(matches!(
            &super::parse("var x = 99999999999999999999").unwrap_err()[..],
            [ParseError::InvalidLiteral { .. }]
        ));
    }

    #[test]
    fn test_deep_nesting() {
        let depth = 10_000;
        let source = format!("var x = {}1{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(super::parse(&source).unwrap().to_string(), "var x = 1\n");

        let depth = 2_000;
        let source = format!(
            "{}println(1){}",
            "if (1) { ".repeat(depth),
            " }".repeat(depth)
        );
        let program = super::parse(&source).unwrap();
        assert_eq!(program.body.statements.len(), 1);
    }
}
