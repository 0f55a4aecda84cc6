//! JSON lexer/tokenizer.
//!
//! Converts raw JSON input bytes into a stream of tokens for the walker.
//! Number tokens keep their literal text: whether a number becomes an `f64`
//! or an exact integer is decided later, once its position is known.

use super::limits::Limits;
use crate::error::{ErrorCode, PrecisionResult};

/// Token types produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Left brace `{`
    LeftBrace,
    /// Right brace `}`
    RightBrace,
    /// Left bracket `[`
    LeftBracket,
    /// Right bracket `]`
    RightBracket,
    /// Colon `:`
    Colon,
    /// Comma `,`
    Comma,
    /// Null literal
    Null,
    /// True literal
    True,
    /// False literal
    False,
    /// String value (unescaped)
    String(String),
    /// Number value as its raw literal text
    Number(String),
    /// End of input
    Eof,
}

/// JSON lexer that tokenizes input.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    token_start: usize,
    limits: Limits,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a [u8], limits: Limits) -> PrecisionResult<Self> {
        if input.len() as u64 > limits.max_input_size {
            return Err(ErrorCode::E110_InputTooLarge(
                input.len() as u64,
                limits.max_input_size,
            ));
        }

        let input = std::str::from_utf8(input).map_err(|_| ErrorCode::E105_InvalidUTF8)?;

        Ok(Self {
            input,
            pos: 0,
            token_start: 0,
            limits,
        })
    }

    /// Get the current position in the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Byte offset where the most recent token started.
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let b = self.peek();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.pos += 1;
        }
    }

    /// Read the next token from the input.
    pub fn next_token(&mut self) -> PrecisionResult<Token> {
        self.skip_whitespace();
        self.token_start = self.pos;

        let token = match self.peek() {
            None => return Ok(Token::Eof),
            Some(b'{') => Token::LeftBrace,
            Some(b'}') => Token::RightBrace,
            Some(b'[') => Token::LeftBracket,
            Some(b']') => Token::RightBracket,
            Some(b':') => Token::Colon,
            Some(b',') => Token::Comma,
            Some(b'"') => return self.read_string(),
            Some(b'-' | b'0'..=b'9') => return self.read_number(),
            Some(b't') => return self.read_literal(b"true", Token::True),
            Some(b'f') => return self.read_literal(b"false", Token::False),
            Some(b'n') => return self.read_literal(b"null", Token::Null),
            Some(_) => return Err(ErrorCode::E100_InvalidJSON),
        };
        self.pos += 1;
        Ok(token)
    }

    /// Read a string token, handling escape sequences.
    fn read_string(&mut self) -> PrecisionResult<Token> {
        // Consume opening quote
        self.advance();

        let mut result = String::new();
        let mut run_start = self.pos;

        loop {
            match self.peek() {
                None => return Err(ErrorCode::E102_UnexpectedEnd),
                Some(b'"') => {
                    result.push_str(&self.input[run_start..self.pos]);
                    self.pos += 1;
                    break;
                }
                Some(b'\\') => {
                    result.push_str(&self.input[run_start..self.pos]);
                    self.pos += 1;
                    let escaped = self.read_escape_sequence()?;
                    result.push(escaped);
                    run_start = self.pos;
                }
                Some(b) if b < 0x20 => {
                    // Control characters are not allowed in strings
                    return Err(ErrorCode::E100_InvalidJSON);
                }
                Some(_) => {
                    // Multi-byte UTF-8 continuation bytes are copied with the run.
                    self.pos += 1;
                }
            }

            let len = (result.len() + self.pos - run_start) as u64;
            if len > self.limits.max_string_length {
                return Err(ErrorCode::E112_StringTooLong(
                    len,
                    self.limits.max_string_length,
                ));
            }
        }

        Ok(Token::String(result))
    }

    /// Read an escape sequence after a backslash.
    fn read_escape_sequence(&mut self) -> PrecisionResult<char> {
        match self.advance() {
            None => Err(ErrorCode::E102_UnexpectedEnd),
            Some(b'"') => Ok('"'),
            Some(b'\\') => Ok('\\'),
            Some(b'/') => Ok('/'),
            Some(b'b') => Ok('\x08'),
            Some(b'f') => Ok('\x0C'),
            Some(b'n') => Ok('\n'),
            Some(b'r') => Ok('\r'),
            Some(b't') => Ok('\t'),
            Some(b'u') => self.read_unicode_escape(),
            Some(_) => Err(ErrorCode::E100_InvalidJSON),
        }
    }

    /// Read a \uXXXX unicode escape sequence, joining surrogate pairs.
    fn read_unicode_escape(&mut self) -> PrecisionResult<char> {
        let codepoint = self.read_hex4()?;

        if (0xD800..=0xDBFF).contains(&codepoint) {
            // Must be followed by \uXXXX low surrogate
            if self.advance() != Some(b'\\') || self.advance() != Some(b'u') {
                return Err(ErrorCode::E105_InvalidUTF8);
            }
            let low = self.read_hex4()?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(ErrorCode::E105_InvalidUTF8);
            }
            let combined =
                0x10000 + ((u32::from(codepoint) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
            return char::from_u32(combined).ok_or(ErrorCode::E105_InvalidUTF8);
        }

        if (0xDC00..=0xDFFF).contains(&codepoint) {
            return Err(ErrorCode::E105_InvalidUTF8);
        }

        char::from_u32(u32::from(codepoint)).ok_or(ErrorCode::E105_InvalidUTF8)
    }

    /// Read 4 hex digits and return the value.
    fn read_hex4(&mut self) -> PrecisionResult<u16> {
        let mut value: u16 = 0;
        for _ in 0..4 {
            let b = self.advance().ok_or(ErrorCode::E102_UnexpectedEnd)?;
            let digit = match b {
                b'0'..=b'9' => b - b'0',
                b'a'..=b'f' => b - b'a' + 10,
                b'A'..=b'F' => b - b'A' + 10,
                _ => return Err(ErrorCode::E100_InvalidJSON),
            };
            value = (value << 4) | u16::from(digit);
        }
        Ok(value)
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.pos;
        while let Some(b'0'..=b'9') = self.peek() {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Read a number token: `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`.
    fn read_number(&mut self) -> PrecisionResult<Token> {
        let start = self.pos;

        if self.peek() == Some(b'-') {
            self.advance();
        }

        match self.peek() {
            Some(b'0') => {
                self.advance();
                // After leading zero, must not have more digits
                if let Some(b'0'..=b'9') = self.peek() {
                    return Err(ErrorCode::E106_InvalidNumber);
                }
            }
            Some(b'1'..=b'9') => {
                self.skip_digits();
            }
            _ => return Err(ErrorCode::E106_InvalidNumber),
        }

        if self.peek() == Some(b'.') {
            self.advance();
            if self.skip_digits() == 0 {
                return Err(ErrorCode::E106_InvalidNumber);
            }
        }

        if let Some(b'e' | b'E') = self.peek() {
            self.advance();
            if let Some(b'+' | b'-') = self.peek() {
                self.advance();
            }
            if self.skip_digits() == 0 {
                return Err(ErrorCode::E106_InvalidNumber);
            }
        }

        Ok(Token::Number(self.input[start..self.pos].to_string()))
    }

    fn read_literal(&mut self, expected: &[u8], token: Token) -> PrecisionResult<Token> {
        for &b in expected {
            if self.advance() != Some(b) {
                return Err(ErrorCode::E100_InvalidJSON);
            }
        }
        Ok(token)
    }
}
