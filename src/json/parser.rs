//! Recursive descent walker.
//!
//! Parses JSON text and decides, for every number it meets, whether the
//! number decodes exactly. The decision uses the number's canonical path,
//! which the walker never spells out: a [`PathCursor`] carries the running
//! fingerprints down the tree and is dropped as soon as no compiled pattern
//! can match below the current position.
//!
//! # Errors
//!
//! - E100/E102/E103: malformed text
//! - E101: duplicate keys (only when the limits ask for it)
//! - E111: Nesting depth limit
//! - E113: Object field count limit
//! - E114: Array length limit

use std::collections::BTreeMap;
use std::sync::Arc;

use super::lexer::{Lexer, Token};
use super::limits::Limits;
use super::types::JsonValue;
use crate::error::{ErrorCode, ParseError, PrecisionResult};
use crate::pointer::{LevelIndex, PathCursor};
use crate::precision::{
    decode_numeric_with, DecodeOptions, OverrideFields, OverrideScope, OverrideSet,
};

/// Where the walker currently is.
struct Position<'k> {
    depth: usize,
    cursor: PathCursor,
    member: Option<&'k str>,
    forced: bool,
}

/// JSON walker with precision-aware number decoding.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    limits: Limits,
    nesting: u64,
    index: Option<&'a LevelIndex>,
    overrides: Arc<OverrideSet>,
    options: DecodeOptions,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given input.
    ///
    /// The parser starts without a pointer index, with default options and
    /// with a snapshot of the process-wide override fields.
    pub fn new(input: &'a [u8], limits: Limits) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(input, limits).map_err(|code| ParseError::new(code, 0))?;
        let current = lexer
            .next_token()
            .map_err(|code| ParseError::new(code, lexer.token_start()))?;
        Ok(Self {
            lexer,
            current,
            limits,
            nesting: 0,
            index: None,
            overrides: OverrideFields::global().snapshot(),
            options: DecodeOptions::default(),
        })
    }

    /// Decode numbers matched by `index` exactly.
    pub fn with_pointer(mut self, index: &'a LevelIndex) -> Self {
        self.index = Some(index);
        self
    }

    /// Use an explicit override set instead of the process-wide one.
    pub fn with_overrides(mut self, overrides: Arc<OverrideSet>) -> Self {
        self.overrides = overrides;
        self
    }

    /// Set decode options.
    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Parse the input and return a JsonValue.
    pub fn parse(mut self) -> Result<JsonValue, ParseError> {
        tracing::trace!(
            pointer = self.index.is_some(),
            overrides = self.overrides.len(),
            "parsing document"
        );
        self.parse_document()
            .map_err(|code| ParseError::new(code, self.lexer.token_start()))
    }

    fn parse_document(&mut self) -> PrecisionResult<JsonValue> {
        let cursor = match self.index {
            Some(index) => PathCursor::root(index),
            None => PathCursor::dead(),
        };
        let root = Position {
            depth: 0,
            cursor,
            member: None,
            forced: false,
        };
        let value = self.parse_value(&root)?;

        // Ensure no trailing content
        if self.current != Token::Eof {
            return Err(ErrorCode::E103_TrailingContent);
        }

        Ok(value)
    }

    /// Advance to the next token.
    fn advance(&mut self) -> PrecisionResult<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn is_flagged(&self, at: &Position<'_>) -> bool {
        if at.forced || at.member.is_some_and(|name| self.overrides.contains(name)) {
            return true;
        }
        match self.index {
            Some(index) => at.cursor.matches(index, at.depth),
            None => false,
        }
    }

    fn parse_value(&mut self, at: &Position<'_>) -> PrecisionResult<JsonValue> {
        match &self.current {
            Token::Null => {
                self.advance()?;
                Ok(JsonValue::Null)
            }
            Token::True => {
                self.advance()?;
                Ok(JsonValue::Bool(true))
            }
            Token::False => {
                self.advance()?;
                Ok(JsonValue::Bool(false))
            }
            Token::String(s) => {
                let value = JsonValue::String(s.clone());
                self.advance()?;
                Ok(value)
            }
            Token::Number(literal) => {
                let value =
                    decode_numeric_with(literal, self.is_flagged(at), self.options.number_mode);
                self.advance()?;
                Ok(value)
            }
            Token::LeftBrace => self.parse_object(at),
            Token::LeftBracket => self.parse_array(at),
            Token::Eof => Err(ErrorCode::E102_UnexpectedEnd),
            _ => Err(ErrorCode::E100_InvalidJSON),
        }
    }

    fn enter(&mut self) -> PrecisionResult<()> {
        self.nesting += 1;
        if self.nesting > self.limits.max_nesting_depth {
            return Err(ErrorCode::E111_NestingTooDeep(
                self.nesting,
                self.limits.max_nesting_depth,
            ));
        }
        Ok(())
    }

    fn child_cursor(&self, at: &Position<'_>, key: Option<&str>) -> PathCursor {
        let Some(index) = self.index else {
            return PathCursor::dead();
        };
        match key {
            Some(key) => at.cursor.member(index, at.depth + 1, key, self.options.wildcard),
            None => at.cursor.element(index, at.depth + 1),
        }
    }

    /// Parse a JSON object.
    fn parse_object(&mut self, at: &Position<'_>) -> PrecisionResult<JsonValue> {
        self.enter()?;

        // Consume opening brace
        self.advance()?;

        let mut map = BTreeMap::new();
        let mut field_count: u64 = 0;

        if self.current == Token::RightBrace {
            self.advance()?;
            self.nesting -= 1;
            return Ok(JsonValue::Object(map));
        }

        loop {
            let key = match &self.current {
                Token::String(s) => s.clone(),
                Token::Eof => return Err(ErrorCode::E102_UnexpectedEnd),
                _ => return Err(ErrorCode::E100_InvalidJSON),
            };
            self.advance()?;

            if self.limits.reject_duplicate_keys && map.contains_key(&key) {
                return Err(ErrorCode::E101_DuplicateKey(key));
            }

            if self.current != Token::Colon {
                return Err(ErrorCode::E100_InvalidJSON);
            }
            self.advance()?;

            let forced = at.forced
                || (self.options.override_scope == OverrideScope::Subtree
                    && self.overrides.contains(&key));
            let value = {
                let child = Position {
                    depth: at.depth + 1,
                    cursor: self.child_cursor(at, Some(&key)),
                    member: Some(&key),
                    forced,
                };
                self.parse_value(&child)?
            };
            map.insert(key, value);
            field_count += 1;

            if field_count > self.limits.max_object_fields {
                return Err(ErrorCode::E113_TooManyFields(
                    field_count,
                    self.limits.max_object_fields,
                ));
            }

            match &self.current {
                Token::Comma => {
                    self.advance()?;
                    // Trailing comma is not allowed in JSON
                    if self.current == Token::RightBrace {
                        return Err(ErrorCode::E100_InvalidJSON);
                    }
                }
                Token::RightBrace => {
                    self.advance()?;
                    break;
                }
                Token::Eof => return Err(ErrorCode::E102_UnexpectedEnd),
                _ => return Err(ErrorCode::E100_InvalidJSON),
            }
        }

        self.nesting -= 1;
        Ok(JsonValue::Object(map))
    }

    /// Parse a JSON array.
    fn parse_array(&mut self, at: &Position<'_>) -> PrecisionResult<JsonValue> {
        self.enter()?;

        // Consume opening bracket
        self.advance()?;

        let mut arr = Vec::new();

        if self.current == Token::RightBracket {
            self.advance()?;
            self.nesting -= 1;
            return Ok(JsonValue::Array(arr));
        }

        // Every element shares one canonical path.
        let child = Position {
            depth: at.depth + 1,
            cursor: self.child_cursor(at, None),
            member: None,
            forced: at.forced,
        };

        loop {
            let value = self.parse_value(&child)?;
            arr.push(value);

            if arr.len() as u64 > self.limits.max_array_length {
                return Err(ErrorCode::E114_ArrayTooLong(
                    arr.len() as u64,
                    self.limits.max_array_length,
                ));
            }

            match &self.current {
                Token::Comma => {
                    self.advance()?;
                    // Trailing comma is not allowed in JSON
                    if self.current == Token::RightBracket {
                        return Err(ErrorCode::E100_InvalidJSON);
                    }
                }
                Token::RightBracket => {
                    self.advance()?;
                    break;
                }
                Token::Eof => return Err(ErrorCode::E102_UnexpectedEnd),
                _ => return Err(ErrorCode::E100_InvalidJSON),
            }
        }

        self.nesting -= 1;
        Ok(JsonValue::Array(arr))
    }
}

/// Parse with default limits and no pointer.
pub fn parse(input: &[u8]) -> Result<JsonValue, ParseError> {
    parse_with_limits(input, Limits::default())
}

/// Parse with custom limits and no pointer.
pub fn parse_with_limits(input: &[u8], limits: Limits) -> Result<JsonValue, ParseError> {
    Parser::new(input, limits)?.parse()
}

/// Parse with default limits, decoding numbers matched by `index` exactly.
pub fn parse_with_pointer(input: &[u8], index: &LevelIndex) -> Result<JsonValue, ParseError> {
    Parser::new(input, Limits::default())?
        .with_pointer(index)
        .parse()
}
