use super::error;
use super::error::ParseError;
use super::statements::parse_statement;
use crate::ast::{BlockStatement, Expression, Identifier};
use crate::lexer::{Token, TokenKind};
use crate::parser::Parser;

/// Binding strength of infix operators, weakest first. Call binds tightest so
/// that `f(x) + g(y)` parses the calls before the sum.
#[derive(PartialOrd, PartialEq, Debug)]
pub enum Precedence {
    Lowest = 0,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
}

pub fn precedence_of(token: &TokenKind) -> Precedence {
    match token {
        TokenKind::Equal => Precedence::Equals,
        TokenKind::NotEqual => Precedence::Equals,
        TokenKind::LessThan => Precedence::LessGreater,
        TokenKind::GreaterThan => Precedence::LessGreater,
        TokenKind::Plus => Precedence::Sum,
        TokenKind::Minus => Precedence::Sum,
        TokenKind::Asterisk => Precedence::Product,
        TokenKind::Slash => Precedence::Product,
        TokenKind::LParen => Precedence::Call,
        _ => Precedence::Lowest,
    }
}

pub fn parse_expression(
    parser: &mut Parser,
    precedence: Precedence,
) -> Result<crate::ast::Expression, ParseError> {
    let Some(token) = parser.iter.next() else {
        return Err(ParseError::premature_end(
            error::Expected::Expression,
            parser.end,
        ));
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

        let Some(next_token) = parser.iter.next() else {
            break;
        };
        let Some(infix_parse_function) = infix_parsing_function(next_token.kind) else {
            break;
        };
        left_expression = infix_parse_function(left_expression, parser)?;
    }

    Ok(left_expression)
}

fn prefix_operation(
    kind: crate::ast::PrefixOperationKind,
) -> impl FnOnce(&mut Parser) -> Result<Expression, ParseError> {
    move |parser| {
        Ok(Expression::PrefixOperation(
            kind,
            Box::new(parse_expression(parser, Precedence::Prefix)?),
        ))
    }
}

fn parse_grouped_expression(parser: &mut Parser) -> Result<Expression, ParseError> {
    let expression = parse_expression(parser, Precedence::Lowest)?;
    parser.expect_token(TokenKind::RParen)?;

    Ok(expression)
}

fn parse_sequence<T>(
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
                return Err(ParseError::premature_end(
                    error::Expected::Token(terminator),
                    parser.end,
                ))
            }
            _ => {
                elements.push(parse_element(parser)?);
            }
        }

        match parser.iter.next() {
            Some(next) if next.kind == separator => continue,
            Some(next) if next.kind == terminator => return Ok(elements),
            next => return Err(ParseError::unexpected_token(separator, next, parser.end)),
        }
    }
}

fn parse_if_expression(parser: &mut Parser) -> Result<Expression, ParseError> {
    parser.expect_token(TokenKind::LParen)?;
    let condition = Box::new(parse_expression(parser, Precedence::Lowest)?);
    parser.expect_token(TokenKind::RParen)?;

    parser.expect_token(TokenKind::LBrace)?;
    let consequence = parse_block_statement(parser)?;

    let alternative = if parser
        .iter
        .next_if(|token| token.kind == TokenKind::Else)
        .is_some()
    {
        parser.expect_token(TokenKind::LBrace)?;
        Some(parse_block_statement(parser)?)
    } else {
        None
    };

    Ok(Expression::IfExpression {
        condition,
        consequence,
        alternative,
    })
}

/// Statements up to the closing brace; semicolons between them are optional,
/// matching the top-level statement list.
fn parse_block_statement(parser: &mut Parser) -> Result<BlockStatement, ParseError> {
    let mut statements = Vec::new();

    loop {
        match parser.iter.peek() {
            Some(next) if next.kind == TokenKind::RBrace => {
                parser.iter.next();
                return Ok(BlockStatement { statements });
            }
            None => {
                return Err(ParseError::premature_end(
                    error::Expected::Token(TokenKind::RBrace),
                    parser.end,
                ))
            }
            _ => {
                statements.push(parse_statement(parser)?);
                parser
                    .iter
                    .next_if(|token| token.kind == TokenKind::SemiColon);
            }
        }
    }
}

fn parse_function_literal(parser: &mut Parser) -> Result<Expression, ParseError> {
    parser.expect_token(TokenKind::LParen)?;
    let parameters = parse_parameters(parser)?;

    parser.expect_token(TokenKind::LBrace)?;
    let body = parse_block_statement(parser)?;

    Ok(Expression::FunctionLiteral { parameters, body })
}

fn parse_parameters(parser: &mut Parser) -> Result<Vec<crate::ast::Identifier>, ParseError> {
    parse_sequence(
        parser,
        |parser| parser.parse_ident().map(|name| Identifier { name }),
        TokenKind::Comma,
        TokenKind::RParen,
    )
}

pub fn prefix_parsing(token: Token, parser: &mut Parser) -> Result<Expression, ParseError> {
    match token.kind {
        TokenKind::Ident(name) => Ok(Expression::Identifier(crate::ast::Identifier { name })),
        TokenKind::Int(literal) => match literal.parse() {
            Ok(value) => Ok(Expression::IntegerLiteral(value)),
            Err(_) => Err(ParseError::InvalidInteger {
                literal,
                position: token.position,
            }),
        },
        TokenKind::True => Ok(Expression::BooleanLiteral(true)),
        TokenKind::False => Ok(Expression::BooleanLiteral(false)),
        TokenKind::Bang => prefix_operation(crate::ast::PrefixOperationKind::Bang)(parser),
        TokenKind::Minus => prefix_operation(crate::ast::PrefixOperationKind::Minus)(parser),
        TokenKind::LParen => parse_grouped_expression(parser),
        TokenKind::If => parse_if_expression(parser),
        TokenKind::Function => parse_function_literal(parser),
        kind => Err(ParseError::NoPrefixFunction {
            token: Token {
                kind,
                position: token.position,
            },
        }),
    }
}

type InfixFunction = Box<dyn FnOnce(Expression, &mut Parser) -> Result<Expression, ParseError>>;

fn infix_operation(token: TokenKind, kind: crate::ast::InfixOperationKind) -> InfixFunction {
    Box::new(
        move |left: Expression, parser: &mut Parser| -> Result<Expression, ParseError> {
            let new_precedence = precedence_of(&token);

            Ok(Expression::InfixOperation(
                kind,
                Box::new(left),
                Box::new(parse_expression(parser, new_precedence)?),
            ))
        },
    )
}

fn parse_call_expression(left: Expression, parser: &mut Parser) -> Result<Expression, ParseError> {
    let arguments = parse_sequence(
        parser,
        |parser| parse_expression(parser, Precedence::Lowest),
        TokenKind::Comma,
        TokenKind::RParen,
    )?;

    Ok(Expression::CallExpression {
        function: Box::new(left),
        arguments,
    })
}

pub fn infix_parsing_function(token: TokenKind) -> Option<InfixFunction> {
    use crate::ast::InfixOperationKind as InfixKind;

    match token {
        TokenKind::Plus => Some(infix_operation(TokenKind::Plus, InfixKind::Plus)),
        TokenKind::Minus => Some(infix_operation(TokenKind::Minus, InfixKind::Minus)),
        TokenKind::LessThan => Some(infix_operation(TokenKind::LessThan, InfixKind::LessThan)),
        TokenKind::GreaterThan => Some(infix_operation(
            TokenKind::GreaterThan,
            InfixKind::GreaterThan,
        )),
        TokenKind::Equal => Some(infix_operation(TokenKind::Equal, InfixKind::Equal)),
        TokenKind::NotEqual => Some(infix_operation(TokenKind::NotEqual, InfixKind::NotEqual)),
        TokenKind::Asterisk => Some(infix_operation(TokenKind::Asterisk, InfixKind::Multiply)),
        TokenKind::Slash => Some(infix_operation(TokenKind::Slash, InfixKind::Divide)),
        TokenKind::LParen => Some(Box::new(parse_call_expression)),
        _ => None,
    }
}
