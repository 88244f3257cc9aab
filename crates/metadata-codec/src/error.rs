use thiserror::Error;

use crate::schema::RecordKind;

/// Schema codec errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// The buffer ran out (or held invalid UTF-8) before every declared field
    /// was read.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The record kind has no entry in the registry in use.
    #[error("no schema registered for {0}")]
    SchemaLookup(RecordKind),

    /// A value handed to the encoder does not fit the declared wire type.
    #[error("invalid field `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// Strict decoding found bytes after the last declared field.
    #[error("{0} trailing bytes after the last field")]
    TrailingBytes(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_malformed_input() {
        let err = CodecError::MalformedInput("need 4 bytes, have 1".into());
        assert_eq!(err.to_string(), "malformed input: need 4 bytes, have 1");
    }

    #[test]
    fn display_schema_lookup() {
        let err = CodecError::SchemaLookup(RecordKind::Metadata);
        assert_eq!(err.to_string(), "no schema registered for Metadata");
    }

    #[test]
    fn display_invalid_field() {
        let err = CodecError::InvalidField {
            field: "mint",
            reason: "expected 32 bytes, got 31".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid field `mint`: expected 32 bytes, got 31"
        );
    }

    #[test]
    fn display_trailing_bytes() {
        let err = CodecError::TrailingBytes(3);
        assert_eq!(err.to_string(), "3 trailing bytes after the last field");
    }
}
