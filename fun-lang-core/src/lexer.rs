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
    Asterisk,
    Slash,
    Percent,

    Equal,
    NotEqual,

    GreaterThan,
    LessThan,
    GreaterEqual,
    LessEqual,

    And,
    Or,

    Comma,
    SemiColon,
    LParen,
    RParen,
    LBrace,
    RBrace,

    // Keywords
    Function,
    Var,
    If,
    Else,
    While,
    Return,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
    /// 1-based line of the first character of the token.
    pub line: usize,
}

fn keywords(ident: &str) -> Option<TokenKind> {
    match ident {
        "fun" => Some(TokenKind::Function),
        "var" => Some(TokenKind::Var),
        "if" => Some(TokenKind::If),
        "else" => Some(TokenKind::Else),
        "while" => Some(TokenKind::While),
        "return" => Some(TokenKind::Return),
        _ => None,
    }
}

#[derive(Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    iter: std::iter::Peekable<std::str::CharIndices<'a>>,
    line: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        let iter = input.char_indices().peekable();
        Self {
            input,
            iter,
            line: 1,
        }
    }

    fn is_letter(ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_'
    }

    fn read_identifier(&mut self, start: usize) -> Token {
        while self
            .iter
            .next_if(|(_, ch)| Self::is_letter(*ch) || ch.is_ascii_digit())
            .is_some()
        {}

        let end = self.next_idx();
        let ident = &self.input[start..end];
        self.token(
            keywords(ident).unwrap_or_else(|| TokenKind::Ident(ident.into())),
            start,
        )
    }

    fn read_number(&mut self, start: usize) -> Token {
        while self.iter.next_if(|(_, ch)| ch.is_ascii_digit()).is_some() {}

        let end = self.next_idx();
        let digits = &self.input[start..end];
        self.token(TokenKind::Int(digits.into()), start)
    }

    /// Reads the second half of a two character operator, or produces
    /// `single` when the next character does not complete it.
    fn read_pair(
        &mut self,
        start: usize,
        second: char,
        pair: TokenKind,
        single: TokenKind,
    ) -> Token {
        if self.iter.next_if(|(_, ch)| *ch == second).is_some() {
            self.token(pair, start)
        } else {
            self.token(single, start)
        }
    }

    /// Skips whitespace and `//` comments, keeping the line count current.
    fn skip_trivia(&mut self) {
        loop {
            match self.iter.peek() {
                Some(&(_, '\n')) => {
                    self.line += 1;
                    self.iter.next();
                }
                Some(&(_, ch)) if ch.is_whitespace() => {
                    self.iter.next();
                }
                Some(&(idx, '/')) if self.input[idx..].starts_with("//") => {
                    while self.iter.next_if(|(_, ch)| *ch != '\n').is_some() {}
                }
                _ => break,
            }
        }
    }

    fn token(&mut self, kind: TokenKind, start: usize) -> Token {
        Token {
            kind,
            start,
            end: self.next_idx(),
            line: self.line,
        }
    }

    fn next_idx(&mut self) -> usize {
        self.iter
            .peek()
            .map(|(idx, _)| *idx)
            .unwrap_or(self.input.len())
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.skip_trivia();

        let (idx, ch) = self.iter.next()?;
        let tok = match ch {
            '=' => self.read_pair(idx, '=', TokenKind::Equal, TokenKind::Assign),
            '!' => self.read_pair(idx, '=', TokenKind::NotEqual, TokenKind::Illegal("!".into())),
            '<' => self.read_pair(idx, '=', TokenKind::LessEqual, TokenKind::LessThan),
            '>' => self.read_pair(idx, '=', TokenKind::GreaterEqual, TokenKind::GreaterThan),
            '&' => self.read_pair(idx, '&', TokenKind::And, TokenKind::Illegal("&".into())),
            '|' => self.read_pair(idx, '|', TokenKind::Or, TokenKind::Illegal("|".into())),
            '+' => self.token(TokenKind::Plus, idx),
            '-' => self.token(TokenKind::Minus, idx),
            '*' => self.token(TokenKind::Asterisk, idx),
            '/' => self.token(TokenKind::Slash, idx),
            '%' => self.token(TokenKind::Percent, idx),
            ',' => self.token(TokenKind::Comma, idx),
            ';' => self.token(TokenKind::SemiColon, idx),
            '(' => self.token(TokenKind::LParen, idx),
            ')' => self.token(TokenKind::RParen, idx),
            '{' => self.token(TokenKind::LBrace, idx),
            '}' => self.token(TokenKind::RBrace, idx),
            c if Tokenizer::is_letter(c) => self.read_identifier(idx),
            c if c.is_ascii_digit() => self.read_number(idx),
            _ => self.token(TokenKind::Illegal(ch.to_string().into()), idx),
        };
        Some(tok)
    }
}
