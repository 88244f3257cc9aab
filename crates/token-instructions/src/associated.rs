//! Associated token accounts (ATA).
//!
//! An ATA is the canonical token account for a wallet + mint pair: a PDA
//! with seeds `[wallet, token_program_id, mint]` under the associated token
//! account program.

use tracing::debug;

use crate::address::bytes_to_address;
use crate::error::TokenError;
use crate::instruction::{InstructionBatch, SolAccountMeta, SolInstruction};
use crate::pda::find_program_address;
use crate::program_ids::ProgramIds;

/// Derive the associated token account address for a wallet + mint pair.
pub fn derive_associated_token_address(
    ids: &ProgramIds,
    wallet: &[u8; 32],
    mint: &[u8; 32],
) -> Result<[u8; 32], TokenError> {
    find_program_address(
        &[wallet.as_ref(), &ids.token, mint.as_ref()],
        &ids.associated_token,
    )
    .map(|(address, _bump)| address)
}

/// Build the `Create` instruction of the associated token account program.
///
/// The payload is empty; the program is driven entirely by its 7 keys:
///
/// ```text
/// 0. [signer, writable] payer
/// 1. [writable]         associated account
/// 2. []                 wallet
/// 3. []                 mint
/// 4. []                 system program
/// 5. []                 token program
/// 6. []                 rent sysvar
/// ```
pub fn create_associated_token_account_instruction(
    ids: &ProgramIds,
    payer: &[u8; 32],
    associated_account: &[u8; 32],
    wallet: &[u8; 32],
    mint: &[u8; 32],
) -> SolInstruction {
    SolInstruction {
        program_id: ids.associated_token,
        accounts: vec![
            SolAccountMeta::writable(*payer, true),
            SolAccountMeta::writable(*associated_account, false),
            SolAccountMeta::readonly(*wallet, false),
            SolAccountMeta::readonly(*mint, false),
            SolAccountMeta::readonly(ids.system, false),
            SolAccountMeta::readonly(ids.token, false),
            SolAccountMeta::readonly(ids.rent_sysvar, false),
        ],
        data: Vec::new(),
    }
}

/// Derive the ATA for `wallet` + `mint` and append its creation. Returns the
/// derived address.
pub fn create_associated_token_account(
    batch: &mut InstructionBatch,
    ids: &ProgramIds,
    payer: &[u8; 32],
    wallet: &[u8; 32],
    mint: &[u8; 32],
) -> Result<[u8; 32], TokenError> {
    let associated = derive_associated_token_address(ids, wallet, mint)?;
    batch
        .instructions
        .push(create_associated_token_account_instruction(
            ids,
            payer,
            &associated,
            wallet,
            mint,
        ));

    debug!(
        account = %bytes_to_address(&associated),
        wallet = %bytes_to_address(wallet),
        "created associated token account"
    );
    Ok(associated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::address_to_bytes;
    use crate::pda::is_on_curve;
    use crate::program_ids::{
        ASSOCIATED_TOKEN_PROGRAM_ID, RENT_SYSVAR_ID, SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID,
    };

    #[test]
    fn ata_is_off_curve_and_deterministic() {
        let ids = ProgramIds::default();
        let a = derive_associated_token_address(&ids, &[0xAA; 32], &[0xBB; 32]).unwrap();
        let b = derive_associated_token_address(&ids, &[0xAA; 32], &[0xBB; 32]).unwrap();
        assert_eq!(a, b);
        assert!(!is_on_curve(&a));
    }

    #[test]
    fn different_wallets_give_different_atas() {
        let ids = ProgramIds::default();
        let a = derive_associated_token_address(&ids, &[1; 32], &[0xFF; 32]).unwrap();
        let b = derive_associated_token_address(&ids, &[2; 32], &[0xFF; 32]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn derive_ata_for_usdc_mint() {
        let usdc = address_to_bytes("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v").unwrap();
        let ata = derive_associated_token_address(&ProgramIds::default(), &[0x42; 32], &usdc)
            .unwrap();
        assert!(!is_on_curve(&ata));
    }

    #[test]
    fn instruction_has_seven_keys_and_no_data() {
        let ix = create_associated_token_account_instruction(
            &ProgramIds::default(),
            &[1; 32],
            &[2; 32],
            &[3; 32],
            &[4; 32],
        );
        assert_eq!(ix.program_id, ASSOCIATED_TOKEN_PROGRAM_ID);
        assert!(ix.data.is_empty());

        let keys: Vec<_> = ix.accounts.iter().map(|m| m.pubkey).collect();
        assert_eq!(
            keys,
            vec![
                [1; 32],
                [2; 32],
                [3; 32],
                [4; 32],
                SYSTEM_PROGRAM_ID,
                TOKEN_PROGRAM_ID,
                RENT_SYSVAR_ID
            ]
        );
        assert!(ix.accounts[0].is_signer && ix.accounts[0].is_writable);
        assert!(!ix.accounts[1].is_signer && ix.accounts[1].is_writable);
        assert!(ix.accounts[2..].iter().all(|m| !m.is_signer && !m.is_writable));
    }

    #[test]
    fn create_appends_instruction_for_derived_address() {
        let ids = ProgramIds::default();
        let mut batch = InstructionBatch::new();
        let ata =
            create_associated_token_account(&mut batch, &ids, &[1; 32], &[3; 32], &[4; 32])
                .unwrap();
        assert_eq!(ata, derive_associated_token_address(&ids, &[3; 32], &[4; 32]).unwrap());
        assert_eq!(batch.instructions.len(), 1);
        assert_eq!(batch.instructions[0].accounts[1].pubkey, ata);
    }
}
