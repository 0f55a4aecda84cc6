//! Error handling for json-precision.
//!
//! Every failure the crate can report is a numbered [`ErrorCode`]. Parse
//! failures additionally carry the byte offset where the walker stopped, see
//! [`ParseError`].
//!
//! Only pattern compilation and document parsing can fail. Matching and
//! encoding are total. [`ErrorCode::E201_DecodeDegraded`] is produced while
//! decoding a flagged number that has no exact integer value and is always
//! absorbed by the caller.

use thiserror::Error;

/// All error codes reported by the crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[allow(non_camel_case_types)]
pub enum ErrorCode {
    /// Malformed JSON text (code 100)
    #[error("E100_InvalidJSON")]
    E100_InvalidJSON,

    /// Object key appears twice (code 101)
    #[error("E101_DuplicateKey({0})")]
    E101_DuplicateKey(String),

    /// Input ended inside a value (code 102)
    #[error("E102_UnexpectedEnd")]
    E102_UnexpectedEnd,

    /// Non-whitespace content after the root value (code 103)
    #[error("E103_TrailingContent")]
    E103_TrailingContent,

    /// Input is not valid UTF-8 or holds an unpaired surrogate (code 105)
    #[error("E105_InvalidUTF8")]
    E105_InvalidUTF8,

    /// Numeric literal does not follow the JSON number grammar (code 106)
    #[error("E106_InvalidNumber")]
    E106_InvalidNumber,

    /// Input larger than the configured limit (code 110)
    #[error("E110_InputTooLarge({0}, {1})")]
    E110_InputTooLarge(u64, u64),

    /// Arrays/objects nested deeper than the configured limit (code 111)
    #[error("E111_NestingTooDeep({0}, {1})")]
    E111_NestingTooDeep(u64, u64),

    /// String longer than the configured limit (code 112)
    #[error("E112_StringTooLong({0}, {1})")]
    E112_StringTooLong(u64, u64),

    /// Object with more members than the configured limit (code 113)
    #[error("E113_TooManyFields({0}, {1})")]
    E113_TooManyFields(u64, u64),

    /// Array with more elements than the configured limit (code 114)
    #[error("E114_ArrayTooLong({0}, {1})")]
    E114_ArrayTooLong(u64, u64),

    /// Pattern set is malformed (code 200)
    #[error("E200_InvalidPatternSet({0})")]
    E200_InvalidPatternSet(String),

    /// Flagged number has no exact integer value (code 201)
    #[error("E201_DecodeDegraded({0})")]
    E201_DecodeDegraded(String),

    /// Configuration file could not be loaded (code 300)
    #[error("E300_InvalidConfig({0})")]
    E300_InvalidConfig(String),
}

impl ErrorCode {
    /// Get the numeric error code.
    pub fn code(&self) -> u32 {
        match self {
            ErrorCode::E100_InvalidJSON => 100,
            ErrorCode::E101_DuplicateKey(_) => 101,
            ErrorCode::E102_UnexpectedEnd => 102,
            ErrorCode::E103_TrailingContent => 103,
            ErrorCode::E105_InvalidUTF8 => 105,
            ErrorCode::E106_InvalidNumber => 106,
            ErrorCode::E110_InputTooLarge(_, _) => 110,
            ErrorCode::E111_NestingTooDeep(_, _) => 111,
            ErrorCode::E112_StringTooLong(_, _) => 112,
            ErrorCode::E113_TooManyFields(_, _) => 113,
            ErrorCode::E114_ArrayTooLong(_, _) => 114,
            ErrorCode::E200_InvalidPatternSet(_) => 200,
            ErrorCode::E201_DecodeDegraded(_) => 201,
            ErrorCode::E300_InvalidConfig(_) => 300,
        }
    }

    /// Get the error name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorCode::E100_InvalidJSON => "E100_InvalidJSON",
            ErrorCode::E101_DuplicateKey(_) => "E101_DuplicateKey",
            ErrorCode::E102_UnexpectedEnd => "E102_UnexpectedEnd",
            ErrorCode::E103_TrailingContent => "E103_TrailingContent",
            ErrorCode::E105_InvalidUTF8 => "E105_InvalidUTF8",
            ErrorCode::E106_InvalidNumber => "E106_InvalidNumber",
            ErrorCode::E110_InputTooLarge(_, _) => "E110_InputTooLarge",
            ErrorCode::E111_NestingTooDeep(_, _) => "E111_NestingTooDeep",
            ErrorCode::E112_StringTooLong(_, _) => "E112_StringTooLong",
            ErrorCode::E113_TooManyFields(_, _) => "E113_TooManyFields",
            ErrorCode::E114_ArrayTooLong(_, _) => "E114_ArrayTooLong",
            ErrorCode::E200_InvalidPatternSet(_) => "E200_InvalidPatternSet",
            ErrorCode::E201_DecodeDegraded(_) => "E201_DecodeDegraded",
            ErrorCode::E300_InvalidConfig(_) => "E300_InvalidConfig",
        }
    }

    /// Human readable description, used for parse diagnostics.
    pub fn description(&self) -> String {
        match self {
            ErrorCode::E100_InvalidJSON => "Invalid value.".to_string(),
            ErrorCode::E101_DuplicateKey(key) => format!("Duplicate object key '{key}'."),
            ErrorCode::E102_UnexpectedEnd => "Unexpected end of input.".to_string(),
            ErrorCode::E103_TrailingContent => {
                "The document root must not be followed by other values.".to_string()
            }
            ErrorCode::E105_InvalidUTF8 => "Invalid encoding in string.".to_string(),
            ErrorCode::E106_InvalidNumber => "Invalid number literal.".to_string(),
            ErrorCode::E110_InputTooLarge(got, limit) => {
                format!("Input of {got} bytes exceeds limit of {limit}.")
            }
            ErrorCode::E111_NestingTooDeep(got, limit) => {
                format!("Nesting depth {got} exceeds limit of {limit}.")
            }
            ErrorCode::E112_StringTooLong(got, limit) => {
                format!("String of {got} bytes exceeds limit of {limit}.")
            }
            ErrorCode::E113_TooManyFields(got, limit) => {
                format!("Object with {got} members exceeds limit of {limit}.")
            }
            ErrorCode::E114_ArrayTooLong(got, limit) => {
                format!("Array with {got} elements exceeds limit of {limit}.")
            }
            ErrorCode::E200_InvalidPatternSet(reason) => format!("Invalid pattern set: {reason}."),
            ErrorCode::E201_DecodeDegraded(literal) => {
                format!("Number '{literal}' has no exact integer value.")
            }
            ErrorCode::E300_InvalidConfig(reason) => format!("Invalid configuration: {reason}."),
        }
    }
}

/// A parse failure with the byte offset at which the walker stopped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error at offset {offset}: {}", .code.description())]
pub struct ParseError {
    /// What went wrong
    pub code: ErrorCode,
    /// Byte offset into the input
    pub offset: usize,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(code: ErrorCode, offset: usize) -> Self {
        Self { code, offset }
    }
}

/// Result type for crate operations.
pub type PrecisionResult<T> = Result<T, ErrorCode>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_names_agree() {
        let all = [
            ErrorCode::E100_InvalidJSON,
            ErrorCode::E101_DuplicateKey("k".to_string()),
            ErrorCode::E106_InvalidNumber,
            ErrorCode::E111_NestingTooDeep(3, 2),
            ErrorCode::E200_InvalidPatternSet("x".to_string()),
            ErrorCode::E201_DecodeDegraded("1.5".to_string()),
        ];
        for err in all {
            assert!(err.name().starts_with(&format!("E{}_", err.code())));
        }
    }

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new(ErrorCode::E100_InvalidJSON, 7);
        assert_eq!(err.to_string(), "Error at offset 7: Invalid value.");
    }

    #[test]
    fn test_display_uses_name() {
        assert_eq!(
            ErrorCode::E200_InvalidPatternSet("empty segment".to_string()).to_string(),
            "E200_InvalidPatternSet(empty segment)"
        );
    }
}
