//! Tokenizer for the multivector text notation.
//!
//! Works on bytes. Any byte `<= b' '` is whitespace; a newline advances
//! the line counter. Identifiers are resolved against the algebra's basis
//! vector names while lexing.

/// A token of the notation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    /// Basis vector, by index.
    BasisVector(usize),
    Wedge,
    Mul,
    Plus,
    Minus,
    End,
    BadCharacter,
    BadNumber,
    BadIdentifier,
}

/// A token with its 1-based source position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub line: usize,
    pub column: usize,
}

pub struct Lexer<'a> {
    src: &'a [u8],
    names: &'a [String],
    pos: usize,
    line: usize,
    line_start: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str, names: &'a [String]) -> Self {
        Self {
            src: text.as_bytes(),
            names,
            pos: 0,
            line: 1,
            line_start: 0,
        }
    }

    fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.src.get(self.pos + offset).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek_byte(0) {
            if b > b' ' {
                break;
            }
            self.pos += 1;
            if b == b'\n' {
                self.line += 1;
                self.line_start = self.pos;
            }
        }
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.pos;
        while self.peek_byte(0).is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Next token. After `End` every call returns `End` again.
    pub fn next_token(&mut self) -> Spanned {
        self.skip_whitespace();
        let start = self.pos;
        let line = self.line;
        let column = start - self.line_start + 1;
        let token = match self.peek_byte(0) {
            None => Token::End,
            Some(b'^') => {
                self.pos += 1;
                Token::Wedge
            }
            Some(b'*') => {
                self.pos += 1;
                Token::Mul
            }
            Some(b'+') => {
                self.pos += 1;
                Token::Plus
            }
            Some(b'-') => {
                self.pos += 1;
                Token::Minus
            }
            Some(b) if b.is_ascii_digit() || b == b'.' => self.number(),
            Some(b) if b.is_ascii_alphabetic() || b == b'_' => self.identifier(),
            Some(_) => {
                self.pos += 1;
                Token::BadCharacter
            }
        };
        Spanned { token, line, column }
    }

    fn number(&mut self) -> Token {
        let start = self.pos;
        let mut digits = self.skip_digits();
        if self.peek_byte(0) == Some(b'.') {
            self.pos += 1;
            digits += self.skip_digits();
        }
        if digits == 0 {
            return Token::BadNumber;
        }
        if matches!(self.peek_byte(0), Some(b'e' | b'E')) {
            self.pos += 1;
            if matches!(self.peek_byte(0), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.skip_digits() == 0 {
                return Token::BadNumber;
            }
        }
        // the slice only holds ASCII digits, '.', 'e' and signs
        let text = std::str::from_utf8(&self.src[start..self.pos]).unwrap_or("");
        match text.parse::<f64>() {
            Ok(x) => Token::Number(x),
            Err(_) => Token::BadNumber,
        }
    }

    fn identifier(&mut self) -> Token {
        let start = self.pos;
        while self
            .peek_byte(0)
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
        {
            self.pos += 1;
        }
        let ident = &self.src[start..self.pos];
        match self.names.iter().position(|n| n.as_bytes() == ident) {
            Some(i) => Token::BasisVector(i),
            None => Token::BadIdentifier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        ["e1", "e2", "no_ri"].iter().map(|s| s.to_string()).collect()
    }

    fn tokens(text: &str) -> Vec<Token> {
        let names = names();
        let mut lexer = Lexer::new(text, &names);
        let mut out = Vec::new();
        loop {
            let t = lexer.next_token().token;
            out.push(t);
            if t == Token::End {
                return out;
            }
        }
    }

    #[test]
    fn test_simple_expression() {
        assert_eq!(
            tokens("1.5*e1^e2 - no_ri"),
            vec![
                Token::Number(1.5),
                Token::Mul,
                Token::BasisVector(0),
                Token::Wedge,
                Token::BasisVector(1),
                Token::Minus,
                Token::BasisVector(2),
                Token::End,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(tokens("2")[0], Token::Number(2.0));
        assert_eq!(tokens("2.")[0], Token::Number(2.0));
        assert_eq!(tokens(".25")[0], Token::Number(0.25));
        assert_eq!(tokens("1e3")[0], Token::Number(1000.0));
        assert_eq!(tokens("1.5E-2")[0], Token::Number(0.015));
        assert_eq!(tokens("1e")[0], Token::BadNumber);
        assert_eq!(tokens("1e+")[0], Token::BadNumber);
        assert_eq!(tokens(".")[0], Token::BadNumber);
    }

    #[test]
    fn test_bad_tokens() {
        assert_eq!(tokens("e3")[0], Token::BadIdentifier);
        assert_eq!(tokens("e1x")[0], Token::BadIdentifier);
        assert_eq!(tokens("#")[0], Token::BadCharacter);
    }

    #[test]
    fn test_positions() {
        let names = names();
        let mut lexer = Lexer::new("e1\n  + e2", &names);
        let a = lexer.next_token();
        assert_eq!((a.line, a.column), (1, 1));
        let plus = lexer.next_token();
        assert_eq!((plus.token, plus.line, plus.column), (Token::Plus, 2, 3));
        let b = lexer.next_token();
        assert_eq!((b.line, b.column), (2, 5));
        let end = lexer.next_token();
        assert_eq!(end.token, Token::End);
        assert_eq!(lexer.next_token().token, Token::End);
    }

    #[test]
    fn test_control_bytes_are_whitespace() {
        assert_eq!(tokens("\t\r e1\x01"), vec![Token::BasisVector(0), Token::End]);
    }
}
