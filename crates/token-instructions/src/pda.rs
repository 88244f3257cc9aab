//! Program-derived address (PDA) derivation.
//!
//! A PDA is `SHA-256(seed_0 || ... || seed_n || bump || program_id ||
//! "ProgramDerivedAddress")` for the highest bump (255 down to 0) whose
//! hash is NOT a valid Ed25519 point, so no private key can exist for it.

use sha2::{Digest, Sha256};
use tracing::trace;

use crate::error::TokenError;

/// Max length of a single seed.
pub const MAX_SEED_LEN: usize = 32;

/// Max number of seeds, the bump included.
pub const MAX_SEEDS: usize = 16;

/// The string appended to PDA derivation: "ProgramDerivedAddress".
const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Find a valid program-derived address and its bump seed.
pub fn find_program_address(
    seeds: &[&[u8]],
    program_id: &[u8; 32],
) -> Result<([u8; 32], u8), TokenError> {
    check_seeds(seeds)?;

    for bump in (0u8..=255).rev() {
        if let Some(address) = try_create_program_address(seeds, &[bump], program_id) {
            trace!(bump, "found program address");
            return Ok((address, bump));
        }
    }

    Err(TokenError::Derivation(
        "could not find valid PDA bump seed".into(),
    ))
}

/// Derive the address for an explicit bump. Fails if that bump lands on the
/// curve.
pub fn create_program_address(
    seeds: &[&[u8]],
    bump: u8,
    program_id: &[u8; 32],
) -> Result<[u8; 32], TokenError> {
    check_seeds(seeds)?;
    try_create_program_address(seeds, &[bump], program_id).ok_or_else(|| {
        TokenError::Derivation(format!("bump {bump} yields an on-curve address"))
    })
}

fn check_seeds(seeds: &[&[u8]]) -> Result<(), TokenError> {
    // one slot is reserved for the bump
    if seeds.len() >= MAX_SEEDS {
        return Err(TokenError::Derivation(format!(
            "{} seeds given, at most {} allowed",
            seeds.len(),
            MAX_SEEDS - 1
        )));
    }
    if let Some(seed) = seeds.iter().find(|s| s.len() > MAX_SEED_LEN) {
        return Err(TokenError::Derivation(format!(
            "seed of {} bytes exceeds {MAX_SEED_LEN}",
            seed.len()
        )));
    }
    Ok(())
}

/// Returns `Some(address)` if the derived point is OFF the Ed25519 curve,
/// `None` if it falls on the curve.
fn try_create_program_address(
    seeds: &[&[u8]],
    bump_seed: &[u8],
    program_id: &[u8; 32],
) -> Option<[u8; 32]> {
    let mut hasher = Sha256::new();

    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update(bump_seed);
    hasher.update(program_id);
    hasher.update(PDA_MARKER);

    let hash: [u8; 32] = hasher.finalize().into();

    if is_on_curve(&hash) {
        return None;
    }

    Some(hash)
}

/// Check if 32 bytes decompress to an Ed25519 curve point.
pub fn is_on_curve(bytes: &[u8; 32]) -> bool {
    curve25519_dalek::edwards::CompressedEdwardsY(*bytes)
        .decompress()
        .is_some()
}
