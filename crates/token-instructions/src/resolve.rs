//! Reuse-or-create resolution of token accounts.

use std::collections::HashSet;

use tracing::debug;

use crate::address::bytes_to_address;
use crate::cache::{AccountCache, CachedAccount, TokenAccountFilter};
use crate::error::TokenError;
use crate::instruction::InstructionBatch;
use crate::program_ids::ProgramIds;
use crate::spl_token::{close_account, create_token_account};
use crate::system::AccountAllocator;

/// Find a token account of `mint` owned by `owner`, or append the
/// instructions that create one.
///
/// The first cached match in the cache's enumeration order wins. Accounts in
/// `excluded` are never picked. For the wrapped-native mint a fresh account
/// is always created, and a close back to `payer` is queued in
/// `batch.cleanup`.
#[allow(clippy::too_many_arguments)]
pub fn find_or_create_account<A, C>(
    batch: &mut InstructionBatch,
    allocator: &mut A,
    cache: &C,
    ids: &ProgramIds,
    payer: &[u8; 32],
    owner: &[u8; 32],
    mint: &[u8; 32],
    rent_exempt_lamports: u64,
    excluded: &HashSet<[u8; 32]>,
) -> Result<[u8; 32], TokenError>
where
    A: AccountAllocator + ?Sized,
    C: AccountCache + ?Sized,
{
    let filter = TokenAccountFilter {
        mint,
        owner,
        excluded,
    };
    let found = cache
        .query(&|account: &CachedAccount| filter.matches(account))
        .first()
        .map(|account| account.pubkey);

    if *mint == ids.wrapped_sol_mint {
        let account =
            create_token_account(batch, allocator, ids, payer, rent_exempt_lamports, mint, owner)?;
        batch
            .cleanup
            .push(close_account(ids, &account, payer, owner));
        debug!(
            account = %bytes_to_address(&account),
            skipped = found.is_some(),
            "created single-use wrapped SOL account"
        );
        return Ok(account);
    }

    match found {
        Some(account) => {
            debug!(account = %bytes_to_address(&account), "reusing cached token account");
            Ok(account)
        }
        None => create_token_account(batch, allocator, ids, payer, rent_exempt_lamports, mint, owner),
    }
}
