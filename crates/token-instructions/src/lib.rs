//! Instruction builders for SPL tokens and token metadata.
//!
//! Builders append unsigned instruction descriptors to a caller-owned
//! [`InstructionBatch`]; assembling, signing and broadcasting the transaction
//! is left to the caller. Program-derived addresses are computed in-crate
//! with `sha2` and `curve25519-dalek`, and new accounts come from an
//! [`AccountAllocator`], so there is no dependency on `solana-sdk`.
//!
//! Metadata payloads and account data are encoded with [`metadata_codec`].

pub mod address;
pub mod associated;
pub mod cache;
pub mod error;
pub mod instruction;
pub mod metadata;
pub mod pda;
pub mod program_ids;
pub mod resolve;
pub mod spl_token;
pub mod system;

// Re-export key public types for ergonomic imports.
pub use address::{address_to_bytes, bytes_to_address, validate_address};
pub use associated::{
    create_associated_token_account, create_associated_token_account_instruction,
    derive_associated_token_address,
};
pub use cache::{
    AccountCache, AccountReader, CachedAccount, MemoryAccountCache, TokenAccountFilter,
};
pub use error::TokenError;
pub use instruction::{InstructionBatch, SolAccountMeta, SolInstruction};
pub use metadata::{
    check_metadata_lengths, create_metadata, decode_metadata, decode_name_symbol_tuple,
    fetch_metadata, fetch_name_symbol_tuple, find_metadata_address, find_metadata_owner_address,
    update_metadata,
};
pub use pda::{create_program_address, find_program_address};
pub use program_ids::{
    ProgramIds, ASSOCIATED_TOKEN_PROGRAM_ID, METADATA_PROGRAM_ID, RENT_SYSVAR_ID,
    SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID, WRAPPED_SOL_MINT,
};
pub use resolve::find_or_create_account;
pub use spl_token::{
    close_account, create_mint, create_token_account, create_uninitialized_account,
    initialize_account, initialize_mint, TokenAccount, MINT_LEN, TOKEN_ACCOUNT_LEN,
};
pub use system::{create_account, AccountAllocator, KeypairAllocator, NewAccount};
