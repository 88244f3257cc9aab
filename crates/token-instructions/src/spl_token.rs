//! SPL Token instructions and account builders.
//!
//! Implements the mint / token-account creation flows and the handful of
//! token-program instructions they need, without pulling in the
//! `spl-token` crate.

use tracing::debug;

use crate::address::bytes_to_address;
use crate::error::TokenError;
use crate::instruction::{InstructionBatch, SolAccountMeta, SolInstruction};
use crate::program_ids::ProgramIds;
use crate::system::AccountAllocator;

/// Size of a mint account.
pub const MINT_LEN: u64 = 82;

/// Size of a token account.
pub const TOKEN_ACCOUNT_LEN: u64 = 165;

const INITIALIZE_MINT_IX: u8 = 0;
const INITIALIZE_ACCOUNT_IX: u8 = 1;
const CLOSE_ACCOUNT_IX: u8 = 9;

// ---------------------------------------------------------------------------
// Token program instructions
// ---------------------------------------------------------------------------

/// Build an `InitializeMint` instruction.
///
/// # Wire format
///
/// `[0, decimals, mint_authority(32), freeze_tag]` followed by the freeze
/// authority when `freeze_tag` is 1.
pub fn initialize_mint(
    ids: &ProgramIds,
    mint: &[u8; 32],
    decimals: u8,
    mint_authority: &[u8; 32],
    freeze_authority: Option<&[u8; 32]>,
) -> SolInstruction {
    let mut data = Vec::with_capacity(67);
    data.push(INITIALIZE_MINT_IX);
    data.push(decimals);
    data.extend_from_slice(mint_authority);
    match freeze_authority {
        Some(key) => {
            data.push(1);
            data.extend_from_slice(key);
        }
        None => data.push(0),
    }

    SolInstruction {
        program_id: ids.token,
        accounts: vec![
            SolAccountMeta::writable(*mint, false),
            SolAccountMeta::readonly(ids.rent_sysvar, false),
        ],
        data,
    }
}

/// Build an `InitializeAccount` instruction binding `account` to `mint`
/// and `owner`.
pub fn initialize_account(
    ids: &ProgramIds,
    account: &[u8; 32],
    mint: &[u8; 32],
    owner: &[u8; 32],
) -> SolInstruction {
    SolInstruction {
        program_id: ids.token,
        accounts: vec![
            SolAccountMeta::writable(*account, false),
            SolAccountMeta::readonly(*mint, false),
            SolAccountMeta::readonly(*owner, false),
            SolAccountMeta::readonly(ids.rent_sysvar, false),
        ],
        data: vec![INITIALIZE_ACCOUNT_IX],
    }
}

/// Build a `CloseAccount` instruction returning the account's lamports to
/// `destination`.
pub fn close_account(
    ids: &ProgramIds,
    account: &[u8; 32],
    destination: &[u8; 32],
    owner: &[u8; 32],
) -> SolInstruction {
    SolInstruction {
        program_id: ids.token,
        accounts: vec![
            SolAccountMeta::writable(*account, false),
            SolAccountMeta::writable(*destination, false),
            SolAccountMeta::readonly(*owner, true),
        ],
        data: vec![CLOSE_ACCOUNT_IX],
    }
}

// ---------------------------------------------------------------------------
// Account creation flows
// ---------------------------------------------------------------------------

/// Allocate a mint account and initialize it. Returns the mint address.
///
/// `lamports` may be zero or the rent-exempt minimum for [`MINT_LEN`]
/// bytes; it is passed to the allocator unchanged.
#[allow(clippy::too_many_arguments)]
pub fn create_mint<A: AccountAllocator + ?Sized>(
    batch: &mut InstructionBatch,
    allocator: &mut A,
    ids: &ProgramIds,
    payer: &[u8; 32],
    lamports: u64,
    decimals: u8,
    mint_authority: &[u8; 32],
    freeze_authority: Option<&[u8; 32]>,
) -> Result<[u8; 32], TokenError> {
    let account = allocator.new_account()?;
    let mint = account.pubkey();

    let create = allocator.allocate(payer, &mint, lamports, MINT_LEN, &ids.token)?;
    batch.instructions.push(create);
    batch.instructions.push(initialize_mint(
        ids,
        &mint,
        decimals,
        mint_authority,
        freeze_authority,
    ));
    batch.signers.push(account);

    debug!(mint = %bytes_to_address(&mint), decimals, "created mint");
    Ok(mint)
}

/// Allocate a token-program-owned account of [`TOKEN_ACCOUNT_LEN`] bytes
/// without initializing it. Returns the new account address.
pub fn create_uninitialized_account<A: AccountAllocator + ?Sized>(
    batch: &mut InstructionBatch,
    allocator: &mut A,
    ids: &ProgramIds,
    payer: &[u8; 32],
    lamports: u64,
) -> Result<[u8; 32], TokenError> {
    let account = allocator.new_account()?;
    let address = account.pubkey();

    let create = allocator.allocate(payer, &address, lamports, TOKEN_ACCOUNT_LEN, &ids.token)?;
    batch.instructions.push(create);
    batch.signers.push(account);

    Ok(address)
}

/// Allocate a token account and bind it to `mint` and `owner`.
pub fn create_token_account<A: AccountAllocator + ?Sized>(
    batch: &mut InstructionBatch,
    allocator: &mut A,
    ids: &ProgramIds,
    payer: &[u8; 32],
    lamports: u64,
    mint: &[u8; 32],
    owner: &[u8; 32],
) -> Result<[u8; 32], TokenError> {
    let account = create_uninitialized_account(batch, allocator, ids, payer, lamports)?;
    batch
        .instructions
        .push(initialize_account(ids, &account, mint, owner));

    debug!(
        account = %bytes_to_address(&account),
        mint = %bytes_to_address(mint),
        "created token account"
    );
    Ok(account)
}

// ---------------------------------------------------------------------------
// Token account layout
// ---------------------------------------------------------------------------

/// The leading fields of a token account, as stored on chain.
///
/// ```text
/// mint      0..32
/// owner     32..64
/// amount    64..72   u64 LE
/// delegate  72..108  (skipped)
/// state     108      0 = uninitialized
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenAccount {
    pub mint: [u8; 32],
    pub owner: [u8; 32],
    pub amount: u64,
    pub is_initialized: bool,
}

impl TokenAccount {
    /// Parse raw account data. Returns `None` for anything that is not an
    /// initialized token account.
    pub fn unpack(data: &[u8]) -> Option<Self> {
        if data.len() != TOKEN_ACCOUNT_LEN as usize {
            return None;
        }

        let mut mint = [0u8; 32];
        mint.copy_from_slice(&data[0..32]);
        let mut owner = [0u8; 32];
        owner.copy_from_slice(&data[32..64]);
        let mut amount = [0u8; 8];
        amount.copy_from_slice(&data[64..72]);

        let account = Self {
            mint,
            owner,
            amount: u64::from_le_bytes(amount),
            is_initialized: data[108] != 0,
        };
        account.is_initialized.then_some(account)
    }

    /// Encode into a fresh token-account-sized buffer. Fields not modelled
    /// here are left zeroed.
    pub fn pack(&self) -> Vec<u8> {
        let mut data = vec![0u8; TOKEN_ACCOUNT_LEN as usize];
        data[0..32].copy_from_slice(&self.mint);
        data[32..64].copy_from_slice(&self.owner);
        data[64..72].copy_from_slice(&self.amount.to_le_bytes());
        data[108] = u8::from(self.is_initialized);
        data
    }
}
