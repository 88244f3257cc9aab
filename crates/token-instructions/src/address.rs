//! Base58 handling for 32-byte account identifiers.
//!
//! Solana addresses are the Base58 encoding of 32 raw bytes, either an
//! Ed25519 public key or a program-derived address.

use crate::error::TokenError;

/// Decode an address string to its 32-byte representation.
pub fn address_to_bytes(address: &str) -> Result<[u8; 32], TokenError> {
    let bytes = bs58::decode(address)
        .into_vec()
        .map_err(|e| TokenError::InvalidAddress(format!("base58 decode failed: {e}")))?;

    let arr: [u8; 32] = bytes.try_into().map_err(|v: Vec<u8>| {
        TokenError::InvalidAddress(format!("expected 32 bytes, got {}", v.len()))
    })?;

    Ok(arr)
}

/// Encode 32 bytes as an address string.
pub fn bytes_to_address(bytes: &[u8; 32]) -> String {
    bs58::encode(bytes).into_string()
}

/// Check that an address string decodes to exactly 32 bytes.
pub fn validate_address(address: &str) -> Result<(), TokenError> {
    address_to_bytes(address).map(|_| ())
}

/// Serde adapter that writes `[u8; 32]` fields as Base58 strings.
pub mod base58 {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::bytes_to_address(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 32], D::Error> {
        let s = String::deserialize(deserializer)?;
        super::address_to_bytes(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_program_address() {
        assert_eq!(bytes_to_address(&[0u8; 32]), "11111111111111111111111111111111");
    }

    #[test]
    fn roundtrip_known_program() {
        let address = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
        let bytes = address_to_bytes(address).unwrap();
        assert_eq!(bytes_to_address(&bytes), address);
    }

    #[test]
    fn validate_garbage_returns_error() {
        assert!(validate_address("not-a-valid-address!!!").is_err());
    }

    #[test]
    fn validate_too_short_returns_error() {
        // "1" decodes to a single zero byte.
        let err = validate_address("1").unwrap_err();
        assert_eq!(err.to_string(), "invalid address: expected 32 bytes, got 1");
    }

    #[test]
    fn validate_rent_sysvar() {
        assert!(validate_address("SysvarRent111111111111111111111111111111111").is_ok());
    }
}
