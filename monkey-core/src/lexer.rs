use std::rc::Rc;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TokenKind {
    Illegal(Rc<str>),
    Ident(Rc<str>),
    Int(Rc<str>),

    // Operators
    Assign,
    Plus,
    Minus,
    Bang,
    Asterisk,
    Slash,

    Equal,
    NotEqual,

    GreaterThan,
    LessThan,

    Comma,
    SemiColon,
    LParen,
    RParen,
    LBrace,
    RBrace,

    // Keywords
    Function,
    Let,
    True,
    False,
    If,
    Else,
    Return,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use TokenKind::*;
        match self {
            Illegal(literal) => write!(f, "illegal token `{}`", literal),
            Ident(name) => write!(f, "identifier `{}`", name),
            Int(literal) => write!(f, "integer `{}`", literal),
            Assign => write!(f, "`=`"),
            Plus => write!(f, "`+`"),
            Minus => write!(f, "`-`"),
            Bang => write!(f, "`!`"),
            Asterisk => write!(f, "`*`"),
            Slash => write!(f, "`/`"),
            Equal => write!(f, "`==`"),
            NotEqual => write!(f, "`!=`"),
            GreaterThan => write!(f, "`>`"),
            LessThan => write!(f, "`<`"),
            Comma => write!(f, "`,`"),
            SemiColon => write!(f, "`;`"),
            LParen => write!(f, "`(`"),
            RParen => write!(f, "`)`"),
            LBrace => write!(f, "`{{`"),
            RBrace => write!(f, "`}}`"),
            Function => write!(f, "`function`"),
            Let => write!(f, "`let`"),
            True => write!(f, "`true`"),
            False => write!(f, "`false`"),
            If => write!(f, "`if`"),
            Else => write!(f, "`else`"),
            Return => write!(f, "`return`"),
        }
    }
}

/// 1-based line/column of a token's first character.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.kind, self.position)
    }
}

fn keywords(ident: &str) -> Option<TokenKind> {
    match ident {
        "function" => Some(TokenKind::Function),
        "let" => Some(TokenKind::Let),
        "true" => Some(TokenKind::True),
        "false" => Some(TokenKind::False),
        "if" => Some(TokenKind::If),
        "else" => Some(TokenKind::Else),
        "return" => Some(TokenKind::Return),
        _ => None,
    }
}

#[derive(Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    iter: std::iter::Peekable<std::str::CharIndices<'a>>,
    line: u32,
    line_start: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        let iter = input.char_indices().peekable();
        Self {
            input,
            iter,
            line: 1,
            line_start: 0,
        }
    }

    fn is_letter(ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_'
    }

    fn read_identifier(&mut self, start: usize) -> TokenKind {
        while self.iter.next_if(|(_, ch)| Self::is_letter(*ch)).is_some() {}

        let end = self.next_idx();
        let ident = &self.input[start..end];
        keywords(ident).unwrap_or_else(|| TokenKind::Ident(ident.into()))
    }

    fn read_number(&mut self, start: usize) -> TokenKind {
        while self.iter.next_if(|(_, ch)| ch.is_ascii_digit()).is_some() {}

        let end = self.next_idx();
        TokenKind::Int(self.input[start..end].into())
    }

    fn next_idx(&mut self) -> usize {
        self.iter
            .peek()
            .map(|(idx, _)| *idx)
            .unwrap_or(self.input.len())
    }

    fn skip_whitespace(&mut self) {
        while let Some((idx, ch)) = self.iter.next_if(|(_, ch)| ch.is_whitespace()) {
            if ch == '\n' {
                self.line += 1;
                self.line_start = idx + 1;
            }
        }
    }

    // Not named `position`: that would be shadowed by `Iterator::position`
    // on the `&mut self` calls inside `next`.
    fn position_at(&self, idx: usize) -> Position {
        Position {
            line: self.line,
            column: (idx - self.line_start + 1) as u32,
        }
    }

    /// Position one past the last character, where end-of-input diagnostics
    /// point.
    pub fn end_position(&self) -> Position {
        let mut line = 1;
        let mut line_start = 0;
        for (idx, ch) in self.input.char_indices() {
            if ch == '\n' {
                line += 1;
                line_start = idx + 1;
            }
        }
        Position {
            line,
            column: (self.input.len() - line_start + 1) as u32,
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.skip_whitespace();

        let (idx, ch) = self.iter.next()?;
        let position = self.position_at(idx);
        let kind = match ch {
            '=' => {
                if self.iter.next_if(|(_, ch)| *ch == '=').is_some() {
                    TokenKind::Equal
                } else {
                    TokenKind::Assign
                }
            }
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '!' => {
                if self.iter.next_if(|(_, ch)| *ch == '=').is_some() {
                    TokenKind::NotEqual
                } else {
                    TokenKind::Bang
                }
            }
            '*' => TokenKind::Asterisk,
            '/' => TokenKind::Slash,
            '<' => TokenKind::LessThan,
            '>' => TokenKind::GreaterThan,
            ',' => TokenKind::Comma,
            ';' => TokenKind::SemiColon,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            c if Tokenizer::is_letter(c) => self.read_identifier(idx),
            c if c.is_ascii_digit() => self.read_number(idx),
            _ => TokenKind::Illegal(ch.to_string().into()),
        };
        Some(Token { kind, position })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Tokenizer::new(input).map(|token| token.kind).collect()
    }

    #[test]
    fn test_symbols() {
        let input = "=+(){},;";
        let output = kinds(input);

        assert_eq!(
            output,
            vec![
                TokenKind::Assign,
                TokenKind::Plus,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Comma,
                TokenKind::SemiColon,
            ]
        );
    }

    #[test]
    fn test_let_and_function() {
        let input = "let five = 5;
    let ten = 10;
    let add = function(x, y) {
    x + y;
    };
    let result = add(five, ten);
    ";
        let expected_output = vec![
            TokenKind::Let,
            TokenKind::Ident("five".into()),
            TokenKind::Assign,
            TokenKind::Int("5".into()),
            TokenKind::SemiColon,
            TokenKind::Let,
            TokenKind::Ident("ten".into()),
            TokenKind::Assign,
            TokenKind::Int("10".into()),
            TokenKind::SemiColon,
            TokenKind::Let,
            TokenKind::Ident("add".into()),
            TokenKind::Assign,
            TokenKind::Function,
            TokenKind::LParen,
            TokenKind::Ident("x".into()),
            TokenKind::Comma,
            TokenKind::Ident("y".into()),
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::Ident("x".into()),
            TokenKind::Plus,
            TokenKind::Ident("y".into()),
            TokenKind::SemiColon,
            TokenKind::RBrace,
            TokenKind::SemiColon,
            TokenKind::Let,
            TokenKind::Ident("result".into()),
            TokenKind::Assign,
            TokenKind::Ident("add".into()),
            TokenKind::LParen,
            TokenKind::Ident("five".into()),
            TokenKind::Comma,
            TokenKind::Ident("ten".into()),
            TokenKind::RParen,
            TokenKind::SemiColon,
        ];

        assert_eq!(kinds(input), expected_output)
    }

    #[test]
    fn test_operators() {
        let input = "
    !-/*5;
    5 < 10 > 5;
    10 == 10;
    10 != 9;
    ";

        let expected_output = vec![
            TokenKind::Bang,
            TokenKind::Minus,
            TokenKind::Slash,
            TokenKind::Asterisk,
            TokenKind::Int("5".into()),
            TokenKind::SemiColon,
            TokenKind::Int("5".into()),
            TokenKind::LessThan,
            TokenKind::Int("10".into()),
            TokenKind::GreaterThan,
            TokenKind::Int("5".into()),
            TokenKind::SemiColon,
            TokenKind::Int("10".into()),
            TokenKind::Equal,
            TokenKind::Int("10".into()),
            TokenKind::SemiColon,
            TokenKind::Int("10".into()),
            TokenKind::NotEqual,
            TokenKind::Int("9".into()),
            TokenKind::SemiColon,
        ];

        assert_eq!(kinds(input), expected_output)
    }

    #[test]
    fn test_keywords() {
        let input = "if (5 < 10) {
    return true;
    } else {
    return false;
    }";

        let expected_output = vec![
            TokenKind::If,
            TokenKind::LParen,
            TokenKind::Int("5".into()),
            TokenKind::LessThan,
            TokenKind::Int("10".into()),
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::Return,
            TokenKind::True,
            TokenKind::SemiColon,
            TokenKind::RBrace,
            TokenKind::Else,
            TokenKind::LBrace,
            TokenKind::Return,
            TokenKind::False,
            TokenKind::SemiColon,
            TokenKind::RBrace,
        ];

        assert_eq!(kinds(input), expected_output)
    }

    #[test]
    fn test_positions() {
        let input = "let x = 5;\nx + 1;";
        let output = Tokenizer::new(input)
            .map(|token| (token.position.line, token.position.column))
            .collect::<Vec<_>>();

        assert_eq!(
            output,
            vec![
                (1, 1),
                (1, 5),
                (1, 7),
                (1, 9),
                (1, 10),
                (2, 1),
                (2, 3),
                (2, 5),
                (2, 6),
            ]
        );
    }

    #[test]
    fn test_illegal() {
        let input = "let a = 5 @ 3;";
        let output = kinds(input);

        assert_eq!(
            output,
            vec![
                TokenKind::Let,
                TokenKind::Ident("a".into()),
                TokenKind::Assign,
                TokenKind::Int("5".into()),
                TokenKind::Illegal("@".into()),
                TokenKind::Int("3".into()),
                TokenKind::SemiColon,
            ]
        );
    }
}
