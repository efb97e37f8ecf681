//! Parser for the multivector text notation.
//!
//! ```text
//! multivector := sign* term (sign+ term)*
//! term        := NUMBER [('*' | '^') blade] | blade
//! blade       := VECTOR ('^' VECTOR)*
//! ```
//!
//! Terms may name the same blade more than once; the coordinates add up.

use tracing::debug;

use grado_clifford::groups;
use grado_clifford::{Algebra, SparseMultivector};
use grado_core::{ParseError, ParseErrorKind};

use crate::lexer::{Lexer, Spanned, Token};

/// Parse `text` in the notation of `alg`. Errors report the source as "string".
pub fn parse(alg: &Algebra, text: &str) -> Result<SparseMultivector, ParseError> {
    parse_named(alg, text, "string")
}

/// Parse `text`, naming the source `source_name` in errors.
pub fn parse_named(alg: &Algebra, text: &str, source_name: &str) -> Result<SparseMultivector, ParseError> {
    let mut parser = Parser {
        alg,
        lexer: Lexer::new(text, alg.vector_names()),
        current: Spanned { token: Token::End, line: 1, column: 1 },
        dense: vec![0.0; alg.grades().dense_size()],
        source_name,
    };
    parser.advance();
    match parser.multivector() {
        Ok(()) => Ok(groups::compress(alg.grades(), &parser.dense, 0.0, alg.grades().full_gu())),
        Err(e) => {
            debug!(kind = %e.kind, line = e.line, column = e.column, source = source_name, "parse failed");
            Err(e)
        }
    }
}

struct Parser<'a> {
    alg: &'a Algebra,
    lexer: Lexer<'a>,
    current: Spanned,
    dense: Vec<f64>,
    source_name: &'a str,
}

impl<'a> Parser<'a> {
    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.current.line, self.current.column, self.source_name)
    }

    /// Error for the current token when something else was expected.
    fn unexpected(&self, fallback: ParseErrorKind) -> ParseError {
        match self.current.token {
            Token::BadCharacter => self.error(ParseErrorKind::BadCharacter),
            Token::BadNumber => self.error(ParseErrorKind::BadNumber),
            Token::BadIdentifier => self.error(ParseErrorKind::BadIdentifier),
            _ => self.error(fallback),
        }
    }

    fn multivector(&mut self) -> Result<(), ParseError> {
        let mut first = true;
        while self.current.token != Token::End {
            let mut sign = 1.0;
            let mut signed = false;
            while matches!(self.current.token, Token::Plus | Token::Minus) {
                if self.current.token == Token::Minus {
                    sign = -sign;
                }
                signed = true;
                self.advance();
            }
            if !first && !signed {
                return Err(self.unexpected(ParseErrorKind::ExpectedSign));
            }
            self.term(sign)?;
            first = false;
        }
        Ok(())
    }

    fn term(&mut self, sign: f64) -> Result<(), ParseError> {
        let mut scale = sign;
        let mut bitmap = 0u32;
        match self.current.token {
            Token::Number(x) => {
                scale *= x;
                self.advance();
                if !matches!(self.current.token, Token::Mul | Token::Wedge) {
                    self.accumulate(bitmap, scale);
                    return Ok(());
                }
                self.advance();
                self.vector(&mut bitmap, &mut scale)?;
            }
            Token::BasisVector(_) => self.vector(&mut bitmap, &mut scale)?,
            _ => return Err(self.unexpected(ParseErrorKind::UnexpectedToken)),
        }
        while self.current.token == Token::Wedge {
            self.advance();
            self.vector(&mut bitmap, &mut scale)?;
        }
        self.accumulate(bitmap, scale);
        Ok(())
    }

    /// Wedge the current basis vector onto the blade being read.
    fn vector(&mut self, bitmap: &mut u32, scale: &mut f64) -> Result<(), ParseError> {
        let Token::BasisVector(i) = self.current.token else {
            return Err(self.unexpected(ParseErrorKind::ExpectedBasisVector));
        };
        let b = 1u32 << i;
        if *bitmap & b != 0 {
            *scale = 0.0;
        } else if (*bitmap >> (i + 1)).count_ones() % 2 == 1 {
            *scale = -*scale;
        }
        *bitmap |= b;
        self.advance();
        Ok(())
    }

    fn accumulate(&mut self, bitmap: u32, scale: f64) {
        let grades = self.alg.grades();
        let idx = grades.blade_index(bitmap);
        self.dense[idx] += scale / grades.basis_sign(idx);
    }
}
