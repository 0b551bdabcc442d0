pub mod error;
pub mod expressions;
pub mod statements;

use crate::lexer::{Token, TokenKind};
pub use error::ParseError;
use statements::parse_statement;

pub struct Parser<'a> {
    pub iter: std::iter::Peekable<crate::lexer::Tokenizer<'a>>,
    // Where end-of-input diagnostics point
    pub(crate) end: crate::lexer::Position,
}

impl<'a> Parser<'a> {
    pub fn new(tokenizer: crate::lexer::Tokenizer<'a>) -> Self {
        let end = tokenizer.end_position();
        let iter = tokenizer.peekable();
        Self { iter, end }
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
                self.end,
            )),
        }
    }

    pub(crate) fn expect_token(&mut self, token_kind: TokenKind) -> Result<(), ParseError> {
        let token = self.iter.next();
        match token {
            Some(Token { kind, .. }) if kind == token_kind => Ok(()),
            _ => Err(ParseError::unexpected_token(token_kind, token, self.end)),
        }
    }

    /// Parses until the token stream is exhausted. A malformed statement is
    /// recorded and the parser resynchronizes at the next statement boundary,
    /// so a single pass reports every error it can find. The returned program
    /// holds whatever statements parsed cleanly.
    pub fn parse_program(&mut self) -> (crate::ast::Program, Vec<ParseError>) {
        let mut statements = Vec::new();
        let mut errors = Vec::new();

        while self.iter.peek().is_some() {
            match parse_statement(self) {
                Ok(statement) => {
                    statements.push(statement);
                    // A trailing semicolon is optional
                    self.iter
                        .next_if(|token| token.kind == TokenKind::SemiColon);
                }
                Err(err) => {
                    errors.push(err);
                    self.synchronize();
                }
            }
        }

        (crate::ast::Program { statements }, errors)
    }

    /// Skips to the next statement boundary: just past the next semicolon, or
    /// right before a `let`/`return`, whichever comes first.
    fn synchronize(&mut self) {
        while let Some(token) = self.iter.peek() {
            match token.kind {
                TokenKind::SemiColon => {
                    self.iter.next();
                    return;
                }
                TokenKind::Let | TokenKind::Return => return,
                _ => {
                    self.iter.next();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ParseError;

    fn parse(input: &str) -> (crate::ast::Program, Vec<ParseError>) {
        let tokenizer = crate::lexer::Tokenizer::new(input);
        let mut parser = crate::parser::Parser::new(tokenizer);
        parser.parse_program()
    }

    fn test_parsing(tests: Vec<(&str, &str)>) {
        for (input, expected) in tests {
            let (program, errors) = parse(input);

            assert!(errors.is_empty(), "errors for {:?}: {:?}", input, errors);
            assert_eq!(program.to_string(), expected)
        }
    }

    #[test]
    fn test_operator_precedence() {
        let tests = vec![
            ("-a * b", "((-a) * b);\n"),
            ("!-a", "(!(-a));\n"),
            ("a + b + c", "((a + b) + c);\n"),
            ("a + b - c", "((a + b) - c);\n"),
            ("a * b * c", "((a * b) * c);\n"),
            ("a * b / c", "((a * b) / c);\n"),
            ("a + b / c", "(a + (b / c));\n"),
            ("1 + 2 * 3", "(1 + (2 * 3));\n"),
            ("-1 * 2", "((-1) * 2);\n"),
            ("1 < 2 == true", "((1 < 2) == true);\n"),
            (
                "a + b * c + d / e - f",
                "(((a + (b * c)) + (d / e)) - f);\n",
            ),
            ("3 + 4; -5 * 5", "(3 + 4);\n((-5) * 5);\n"),
            ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4));\n"),
            ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4));\n"),
            (
                "3 + 4 * 5 == 3 * 1 + 4 * 5",
                "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)));\n",
            ),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_grouped_expressions() {
        let tests = vec![
            ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4);\n"),
            ("(5 + 5) * 2", "((5 + 5) * 2);\n"),
            ("2 / (5 + 5)", "(2 / (5 + 5));\n"),
            ("-(5 + 5)", "(-(5 + 5));\n"),
            ("!(true == true)", "(!(true == true));\n"),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_call_expression() {
        let tests = vec![
            ("a + add(b * c) + d", "((a + add((b * c))) + d);\n"),
            (
                "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
                "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)));\n",
            ),
            (
                "add(a + b + c * d / f + g)",
                "add((((a + b) + ((c * d) / f)) + g));\n",
            ),
            ("function(x) { x }(5)", "function(x) {x;}(5);\n"),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_conditional() {
        let tests = vec![
            ("if (x < y) { x }", "if ((x < y)) {x;};\n"),
            (
                "if (x < y) { x } else { y }",
                "if ((x < y)) {x;} else {y;};\n",
            ),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_function_literal() {
        let tests = vec![
            ("function() { 1 }", "function() {1;};\n"),
            (
                "function(x, y) { x + y; }",
                "function(x, y) {(x + y);};\n",
            ),
            (
                "let apply = function(f, x) { f(x) };",
                "let apply = function(f, x) {f(x);};\n",
            ),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_let_statements() {
        let (program, errors) = parse("let x = 5; let y = x;");

        assert!(errors.is_empty());
        assert_eq!(
            program.statements,
            vec![
                crate::ast::Statement::Let(crate::ast::LetStatement {
                    identifier: crate::ast::Identifier { name: "x".into() },
                    value: crate::ast::Expression::IntegerLiteral(5),
                }),
                crate::ast::Statement::Let(crate::ast::LetStatement {
                    identifier: crate::ast::Identifier { name: "y".into() },
                    value: crate::ast::Expression::Identifier(crate::ast::Identifier {
                        name: "x".into()
                    }),
                }),
            ]
        );
    }

    #[test]
    fn test_return_statements() {
        let tests = vec![
            ("return 5;", "return 5;\n"),
            ("return 2 * 3", "return (2 * 3);\n"),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_missing_let_identifier() {
        let (program, errors) = parse("let = 5; let x = 2; x;");

        // The malformed statement is skipped, the rest still parses
        assert_eq!(errors.len(), 1);
        assert_eq!(program.statements.len(), 2);
        assert!(matches!(
            errors[0],
            ParseError::UnexpectedToken {
                expected: super::error::Expected::Identifier,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_assign() {
        let (program, errors) = parse("let x 5;");

        assert!(program.statements.is_empty());
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            ParseError::UnexpectedToken {
                expected: super::error::Expected::Token(crate::lexer::TokenKind::Assign),
                ..
            }
        ));
    }

    #[test]
    fn test_unclosed_paren() {
        let (_, errors) = parse("(1 + 2");

        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            ParseError::PrematureEndOfInput {
                expected: super::error::Expected::Token(crate::lexer::TokenKind::RParen),
                ..
            }
        ));
    }

    #[test]
    fn test_end_of_input_position() {
        // End-of-input errors point one past the last character
        let (_, errors) = parse("let x = (1 + 2");

        assert_eq!(errors.len(), 1);
        match &errors[0] {
            ParseError::PrematureEndOfInput { position, .. } => {
                assert_eq!(position.line, 1);
                assert_eq!(position.column, 15);
            }
            other => panic!("unexpected error: {:?}", other),
        }

        // Multi-line input reports the end of the last line
        let (_, errors) = parse("let a = 1;\nlet b =");

        assert_eq!(errors.len(), 1);
        match &errors[0] {
            ParseError::PrematureEndOfInput { position, .. } => {
                assert_eq!(position.line, 2);
                assert_eq!(position.column, 8);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_multiple_errors_reported() {
        let (program, errors) = parse("let = 1; let = 2; let z = 3;");

        assert_eq!(errors.len(), 2);
        assert_eq!(program.statements.len(), 1);
    }

    #[test]
    fn test_error_position() {
        let (_, errors) = parse("let x = );");

        assert_eq!(errors.len(), 1);
        match &errors[0] {
            ParseError::NoPrefixFunction { token } => {
                assert_eq!(token.position.line, 1);
                assert_eq!(token.position.column, 9);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
