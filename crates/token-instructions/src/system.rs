//! Account allocation through the System Program.
//!
//! Builders never generate keys or decide funding themselves; they go
//! through an [`AccountAllocator`]. [`KeypairAllocator`] is the stock
//! implementation: fresh Ed25519 keypairs plus a System Program
//! `CreateAccount` instruction, with an optional lamport budget.

use std::fmt;

use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::debug;
use zeroize::Zeroize;

use crate::address::bytes_to_address;
use crate::error::TokenError;
use crate::instruction::{SolAccountMeta, SolInstruction};
use crate::program_ids::SYSTEM_PROGRAM_ID;

/// System Program `CreateAccount` instruction index (little-endian u32).
const SYSTEM_CREATE_ACCOUNT_IX_INDEX: u32 = 0;

/// Largest account the runtime will allocate: 10 MiB.
pub const MAX_ACCOUNT_DATA_LEN: u64 = 10 * 1024 * 1024;

// ---------------------------------------------------------------------------
// New accounts
// ---------------------------------------------------------------------------

/// A freshly generated account keypair. Its key must co-sign the
/// transaction that creates it.
pub struct NewAccount {
    signing_key: SigningKey,
}

impl NewAccount {
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self {
            signing_key: SigningKey::generate(rng),
        }
    }

    /// Build from a 32-byte Ed25519 seed. The caller's copy is wiped.
    pub fn from_secret(secret: &mut [u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(secret);
        secret.zeroize();
        Self { signing_key }
    }

    pub fn pubkey(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    pub fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("pubkey", &bytes_to_address(&self.pubkey()))
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Allocation
// ---------------------------------------------------------------------------

/// Key generation and funded account creation.
pub trait AccountAllocator {
    fn new_account(&mut self) -> Result<NewAccount, TokenError>;

    /// Instruction that creates `new_account` with `lamports` and `space`
    /// bytes, owned by `owner`, paid for by `payer`.
    fn allocate(
        &mut self,
        payer: &[u8; 32],
        new_account: &[u8; 32],
        lamports: u64,
        space: u64,
        owner: &[u8; 32],
    ) -> Result<SolInstruction, TokenError>;
}

/// Generates keypairs from `R` and funds them through the System Program.
pub struct KeypairAllocator<R = OsRng> {
    rng: R,
    budget: Option<u64>,
}

impl KeypairAllocator<OsRng> {
    pub fn new() -> Self {
        Self::with_rng(OsRng)
    }
}

impl Default for KeypairAllocator<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + CryptoRng> KeypairAllocator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng, budget: None }
    }

    /// Refuse allocations once `lamports` in total have been handed out.
    pub fn with_budget(mut self, lamports: u64) -> Self {
        self.budget = Some(lamports);
        self
    }

    pub fn remaining_budget(&self) -> Option<u64> {
        self.budget
    }
}

impl<R: RngCore + CryptoRng> AccountAllocator for KeypairAllocator<R> {
    fn new_account(&mut self) -> Result<NewAccount, TokenError> {
        Ok(NewAccount::generate(&mut self.rng))
    }

    fn allocate(
        &mut self,
        payer: &[u8; 32],
        new_account: &[u8; 32],
        lamports: u64,
        space: u64,
        owner: &[u8; 32],
    ) -> Result<SolInstruction, TokenError> {
        if space > MAX_ACCOUNT_DATA_LEN {
            return Err(TokenError::ResourceAllocation(format!(
                "{space} bytes exceeds the {MAX_ACCOUNT_DATA_LEN} byte account limit"
            )));
        }

        if let Some(remaining) = self.budget {
            let left = remaining.checked_sub(lamports).ok_or_else(|| {
                TokenError::ResourceAllocation(format!(
                    "need {lamports} lamports, {remaining} left in budget"
                ))
            })?;
            self.budget = Some(left);
        }

        debug!(
            account = %bytes_to_address(new_account),
            lamports,
            space,
            "allocating account"
        );
        Ok(create_account(payer, new_account, lamports, space, owner))
    }
}

/// Build a System Program `CreateAccount` instruction.
pub fn create_account(
    payer: &[u8; 32],
    new_account: &[u8; 32],
    lamports: u64,
    space: u64,
    owner: &[u8; 32],
) -> SolInstruction {
    // u32 LE index + u64 LE lamports + u64 LE space + owner = 52 bytes.
    let mut data = Vec::with_capacity(52);
    data.extend_from_slice(&SYSTEM_CREATE_ACCOUNT_IX_INDEX.to_le_bytes());
    data.extend_from_slice(&lamports.to_le_bytes());
    data.extend_from_slice(&space.to_le_bytes());
    data.extend_from_slice(owner);

    SolInstruction {
        program_id: SYSTEM_PROGRAM_ID,
        accounts: vec![
            SolAccountMeta::writable(*payer, true),
            SolAccountMeta::writable(*new_account, true),
        ],
        data,
    }
}
