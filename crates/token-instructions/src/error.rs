use metadata_codec::CodecError;
use thiserror::Error;

/// Instruction-building errors.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("address derivation failed: {0}")]
    Derivation(String),

    #[error("account allocation refused: {0}")]
    ResourceAllocation(String),

    #[error("{field} is {len} bytes, max is {max}")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("account read failed: {0}")]
    AccountRead(String),

    #[error(transparent)]
    Codec(#[from] CodecError),
}
