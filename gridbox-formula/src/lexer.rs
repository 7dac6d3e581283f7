//! Formula lexer (tokenizer).

use crate::error::FormulaError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Int(i64),
    Ident(String),
    And,
    Or,
    Not,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    LeftParen,
    RightParen,
    Comma,
    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the first character.
    pub offset: usize,
}

pub struct Lexer<'a> {
    bytes: &'a [u8],
    source: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer {
            bytes: source.as_bytes(),
            source,
            pos: 0,
        }
    }

    /// Tokenize the whole input; the last token is always `Eof`.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, FormulaError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, FormulaError> {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }

        let start = self.pos;
        let Some(&b) = self.bytes.get(self.pos) else {
            return Ok(Token { kind: TokenKind::Eof, offset: start });
        };

        if b.is_ascii_digit() {
            return self.scan_int(start);
        }
        if b.is_ascii_alphabetic() || b == b'_' {
            return Ok(self.scan_word(start));
        }

        let next = self.bytes.get(self.pos + 1).copied();
        let (kind, len) = match (b, next) {
            (b'=', Some(b'=')) => (TokenKind::Eq, 2),
            (b'!', Some(b'=')) => (TokenKind::Ne, 2),
            (b'<', Some(b'=')) => (TokenKind::Le, 2),
            (b'>', Some(b'=')) => (TokenKind::Ge, 2),
            (b'&', Some(b'&')) => (TokenKind::And, 2),
            (b'|', Some(b'|')) => (TokenKind::Or, 2),
            (b'=', _) => (TokenKind::Eq, 1),
            (b'!', _) => (TokenKind::Not, 1),
            (b'<', _) => (TokenKind::Lt, 1),
            (b'>', _) => (TokenKind::Gt, 1),
            (b'+', _) => (TokenKind::Plus, 1),
            (b'-', _) => (TokenKind::Minus, 1),
            (b'*', _) => (TokenKind::Star, 1),
            (b'/', _) => (TokenKind::Slash, 1),
            (b'%', _) => (TokenKind::Percent, 1),
            (b'(', _) => (TokenKind::LeftParen, 1),
            (b')', _) => (TokenKind::RightParen, 1),
            (b',', _) => (TokenKind::Comma, 1),
            _ => {
                // Report the full char, not the leading byte of a multi-byte sequence.
                let ch = self.source[start..].chars().next().unwrap_or('\u{fffd}');
                return Err(FormulaError::UnexpectedChar { ch, offset: start });
            }
        };
        self.pos += len;
        Ok(Token { kind, offset: start })
    }

    fn scan_int(&mut self, start: usize) -> Result<Token, FormulaError> {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        let value = self.source[start..self.pos]
            .parse::<i64>()
            .map_err(|_| FormulaError::IntegerOutOfRange { offset: start })?;
        Ok(Token { kind: TokenKind::Int(value), offset: start })
    }

    fn scan_word(&mut self, start: usize) -> Token {
        while self.pos < self.bytes.len()
            && (self.bytes[self.pos].is_ascii_alphanumeric() || self.bytes[self.pos] == b'_')
        {
            self.pos += 1;
        }
        let kind = match &self.source[start..self.pos] {
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "not" => TokenKind::Not,
            word => TokenKind::Ident(word.to_string()),
        };
        Token { kind, offset: start }
    }
}
