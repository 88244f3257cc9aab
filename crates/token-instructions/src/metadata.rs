//! Metadata program instructions and account decoding.
//!
//! Two program-derived accounts back every token's metadata:
//!
//! ```text
//! metadata        ["metadata", metadata_program_id, mint]
//! metadata owner  ["metadata", metadata_program_id, name, symbol]
//! ```
//!
//! The owner account holds a [`NameSymbolTuple`] (update authority plus a
//! pointer back to the metadata account) and reserves the name/symbol pair.

use metadata_codec::{
    decode, encode, CreateMetadataArgs, Metadata, NameSymbolTuple, SchemaRegistry,
    UpdateMetadataArgs, NAME_LENGTH, SYMBOL_LENGTH, URI_LENGTH,
};
use tracing::debug;

use crate::address::bytes_to_address;
use crate::cache::AccountReader;
use crate::error::TokenError;
use crate::instruction::{InstructionBatch, SolAccountMeta, SolInstruction};
use crate::pda::find_program_address;
use crate::program_ids::ProgramIds;

/// Leading seed of both metadata PDAs.
pub const METADATA_PREFIX: &[u8] = b"metadata";

// ---------------------------------------------------------------------------
// Address derivation
// ---------------------------------------------------------------------------

/// Derive the metadata account for `mint`.
pub fn find_metadata_address(ids: &ProgramIds, mint: &[u8; 32]) -> Result<[u8; 32], TokenError> {
    find_program_address(
        &[METADATA_PREFIX, ids.metadata.as_ref(), mint.as_ref()],
        &ids.metadata,
    )
    .map(|(address, _)| address)
}

/// Derive the metadata-owner account for a name/symbol pair.
pub fn find_metadata_owner_address(
    ids: &ProgramIds,
    name: &str,
    symbol: &str,
) -> Result<[u8; 32], TokenError> {
    find_program_address(
        &[
            METADATA_PREFIX,
            ids.metadata.as_ref(),
            name.as_bytes(),
            symbol.as_bytes(),
        ],
        &ids.metadata,
    )
    .map(|(address, _)| address)
}

/// Enforce the metadata program's length limits. The codec itself accepts
/// any length.
pub fn check_metadata_lengths(name: &str, symbol: &str, uri: &str) -> Result<(), TokenError> {
    for (field, len, max) in [
        ("name", name.len(), NAME_LENGTH),
        ("symbol", symbol.len(), SYMBOL_LENGTH),
        ("uri", uri.len(), URI_LENGTH),
    ] {
        if len > max {
            return Err(TokenError::FieldTooLong { field, len, max });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Instructions
// ---------------------------------------------------------------------------

/// Append a create-metadata instruction. Returns the metadata account.
///
/// Keys:
///
/// ```text
/// 0. [writable] metadata owner
/// 1. [writable] metadata
/// 2. []         mint
/// 3. [signer]   mint authority
/// 4. [signer]   payer
/// 5. [signer]   update authority
/// 6. []         system program
/// 7. []         rent sysvar
/// ```
#[allow(clippy::too_many_arguments)]
pub fn create_metadata(
    batch: &mut InstructionBatch,
    registry: &SchemaRegistry,
    ids: &ProgramIds,
    name: &str,
    symbol: &str,
    uri: &str,
    mint: &[u8; 32],
    mint_authority: &[u8; 32],
    payer: &[u8; 32],
    update_authority: &[u8; 32],
) -> Result<[u8; 32], TokenError> {
    check_metadata_lengths(name, symbol, uri)?;

    let metadata_account = find_metadata_address(ids, mint)?;
    let owner_account = find_metadata_owner_address(ids, name, symbol)?;
    let data = encode(registry, &CreateMetadataArgs::new(name, symbol, uri))?;

    batch.instructions.push(SolInstruction {
        program_id: ids.metadata,
        accounts: vec![
            SolAccountMeta::writable(owner_account, false),
            SolAccountMeta::writable(metadata_account, false),
            SolAccountMeta::readonly(*mint, false),
            SolAccountMeta::readonly(*mint_authority, true),
            SolAccountMeta::readonly(*payer, true),
            SolAccountMeta::readonly(*update_authority, true),
            SolAccountMeta::readonly(ids.system, false),
            SolAccountMeta::readonly(ids.rent_sysvar, false),
        ],
        data,
    });

    debug!(
        metadata = %bytes_to_address(&metadata_account),
        owner = %bytes_to_address(&owner_account),
        name,
        symbol,
        "create metadata"
    );
    Ok(metadata_account)
}

/// Append an update-metadata instruction pointing the record at a new uri.
/// Returns the metadata account.
///
/// Keys: `[writable] metadata`, `[signer] update authority`,
/// `[] metadata owner`.
#[allow(clippy::too_many_arguments)]
pub fn update_metadata(
    batch: &mut InstructionBatch,
    registry: &SchemaRegistry,
    ids: &ProgramIds,
    name: &str,
    symbol: &str,
    uri: &str,
    mint: &[u8; 32],
    update_authority: &[u8; 32],
) -> Result<[u8; 32], TokenError> {
    check_metadata_lengths(name, symbol, uri)?;

    let metadata_account = find_metadata_address(ids, mint)?;
    let owner_account = find_metadata_owner_address(ids, name, symbol)?;
    let data = encode(registry, &UpdateMetadataArgs::new(uri))?;

    batch.instructions.push(SolInstruction {
        program_id: ids.metadata,
        accounts: vec![
            SolAccountMeta::writable(metadata_account, false),
            SolAccountMeta::readonly(*update_authority, true),
            SolAccountMeta::readonly(owner_account, false),
        ],
        data,
    });

    debug!(metadata = %bytes_to_address(&metadata_account), uri, "update metadata");
    Ok(metadata_account)
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode raw metadata account data. Space reserved past the record is
/// ignored.
pub fn decode_metadata(registry: &SchemaRegistry, data: &[u8]) -> Result<Metadata, TokenError> {
    Ok(decode(registry, data)?)
}

/// Decode raw metadata-owner account data.
pub fn decode_name_symbol_tuple(
    registry: &SchemaRegistry,
    data: &[u8],
) -> Result<NameSymbolTuple, TokenError> {
    Ok(decode(registry, data)?)
}

/// Derive, read and decode the metadata account for `mint`.
pub fn fetch_metadata<R: AccountReader + ?Sized>(
    reader: &R,
    registry: &SchemaRegistry,
    ids: &ProgramIds,
    mint: &[u8; 32],
) -> Result<Metadata, TokenError> {
    let address = find_metadata_address(ids, mint)?;
    let data = reader.read(&address)?;
    decode_metadata(registry, &data)
}

/// Derive, read and decode the owner record for a name/symbol pair.
pub fn fetch_name_symbol_tuple<R: AccountReader + ?Sized>(
    reader: &R,
    registry: &SchemaRegistry,
    ids: &ProgramIds,
    name: &str,
    symbol: &str,
) -> Result<NameSymbolTuple, TokenError> {
    let address = find_metadata_owner_address(ids, name, symbol)?;
    let data = reader.read(&address)?;
    decode_name_symbol_tuple(registry, &data)
}
