//! Well-known program and sysvar identifiers, and the [`ProgramIds`]
//! configuration every builder takes.

use serde::{Deserialize, Serialize};

use crate::address::base58;

/// System Program: 32 zero bytes, `11111111111111111111111111111111`.
pub const SYSTEM_PROGRAM_ID: [u8; 32] = [0u8; 32];

/// SPL Token Program: `TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA`
pub const TOKEN_PROGRAM_ID: [u8; 32] = [
    0x06, 0xdd, 0xf6, 0xe1, 0xd7, 0x65, 0xa1, 0x93, 0xd9, 0xcb, 0xe1, 0x46, 0xce, 0xeb, 0x79, 0xac,
    0x1c, 0xb4, 0x85, 0xed, 0x5f, 0x5b, 0x37, 0x91, 0x3a, 0x8c, 0xf5, 0x85, 0x7e, 0xff, 0x00, 0xa9,
];

/// Associated Token Account Program: `ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL`
pub const ASSOCIATED_TOKEN_PROGRAM_ID: [u8; 32] = [
    0x8c, 0x97, 0x25, 0x8f, 0x4e, 0x24, 0x89, 0xf1, 0xbb, 0x3d, 0x10, 0x29, 0x14, 0x8e, 0x0d, 0x83,
    0x0b, 0x5a, 0x13, 0x99, 0xda, 0xff, 0x10, 0x84, 0x04, 0x8e, 0x7b, 0xd8, 0xdb, 0xe9, 0xf8, 0x59,
];

/// Metadata Program: `metaTMm9vFU2h7m97KYJA9k2JQUG21rfb434rWUQBiH`
pub const METADATA_PROGRAM_ID: [u8; 32] = [
    0x0b, 0x70, 0x65, 0xa9, 0x71, 0x06, 0x88, 0x2a, 0x37, 0xda, 0x24, 0x1d, 0x93, 0x2d, 0xfc, 0x73,
    0x8e, 0x2d, 0xa2, 0xf3, 0xd2, 0x7b, 0x08, 0x3c, 0x74, 0xe3, 0x91, 0x2c, 0x20, 0x58, 0xe3, 0xea,
];

/// Rent sysvar: `SysvarRent111111111111111111111111111111111`
pub const RENT_SYSVAR_ID: [u8; 32] = [
    0x06, 0xa7, 0xd5, 0x17, 0x19, 0x2c, 0x5c, 0x51, 0x21, 0x8c, 0xc9, 0x4c, 0x3d, 0x4a, 0xf1, 0x7f,
    0x58, 0xda, 0xee, 0x08, 0x9b, 0xa1, 0xfd, 0x44, 0xe3, 0xdb, 0xd9, 0x8a, 0x00, 0x00, 0x00, 0x00,
];

/// Wrapped SOL mint: `So11111111111111111111111111111111111111112`
pub const WRAPPED_SOL_MINT: [u8; 32] = [
    0x06, 0x9b, 0x88, 0x57, 0xfe, 0xab, 0x81, 0x84, 0xfb, 0x68, 0x7f, 0x63, 0x46, 0x18, 0xc0, 0x35,
    0xda, 0xc4, 0x39, 0xdc, 0x1a, 0xeb, 0x3b, 0x55, 0x98, 0xa0, 0xf0, 0x00, 0x00, 0x00, 0x00, 0x01,
];

/// The program identifiers a deployment targets. Serialized with every
/// address as a Base58 string, so it can live in a JSON config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramIds {
    #[serde(with = "base58")]
    pub system: [u8; 32],
    #[serde(with = "base58")]
    pub token: [u8; 32],
    #[serde(with = "base58")]
    pub associated_token: [u8; 32],
    #[serde(with = "base58")]
    pub metadata: [u8; 32],
    #[serde(with = "base58")]
    pub rent_sysvar: [u8; 32],
    #[serde(with = "base58")]
    pub wrapped_sol_mint: [u8; 32],
}

impl Default for ProgramIds {
    fn default() -> Self {
        Self {
            system: SYSTEM_PROGRAM_ID,
            token: TOKEN_PROGRAM_ID,
            associated_token: ASSOCIATED_TOKEN_PROGRAM_ID,
            metadata: METADATA_PROGRAM_ID,
            rent_sysvar: RENT_SYSVAR_ID,
            wrapped_sol_mint: WRAPPED_SOL_MINT,
        }
    }
}
