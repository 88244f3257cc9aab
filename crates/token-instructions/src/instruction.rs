//! Instruction descriptors and the append-only batch builders write into.

use crate::system::NewAccount;

/// A single account reference in an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolAccountMeta {
    pub pubkey: [u8; 32],
    pub is_signer: bool,
    pub is_writable: bool,
}

impl SolAccountMeta {
    pub fn writable(pubkey: [u8; 32], is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: true,
        }
    }

    pub fn readonly(pubkey: [u8; 32], is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: false,
        }
    }
}

/// An unsigned instruction: program, ordered account keys, opaque payload.
///
/// Key order is part of the wire contract; programs index accounts
/// positionally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolInstruction {
    pub program_id: [u8; 32],
    pub accounts: Vec<SolAccountMeta>,
    pub data: Vec<u8>,
}

impl SolInstruction {
    /// Keys that must sign, in key order.
    pub fn signer_keys(&self) -> impl Iterator<Item = &[u8; 32]> {
        self.accounts
            .iter()
            .filter(|m| m.is_signer)
            .map(|m| &m.pubkey)
    }
}

/// Instructions under construction for one transaction.
///
/// Builders only ever push onto these lists. `instructions` run first,
/// `cleanup` runs after them (closing temporary wrapped-SOL accounts), and
/// `signers` collects the freshly generated accounts whose keys must sign.
#[derive(Debug, Default)]
pub struct InstructionBatch {
    pub instructions: Vec<SolInstruction>,
    pub cleanup: Vec<SolInstruction>,
    pub signers: Vec<NewAccount>,
}

impl InstructionBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty() && self.cleanup.is_empty()
    }

    /// Primary instructions followed by cleanup instructions, the order they
    /// must appear in the transaction.
    pub fn ordered(&self) -> impl Iterator<Item = &SolInstruction> {
        self.instructions.iter().chain(self.cleanup.iter())
    }

    /// Consume the batch into the final instruction sequence and the new
    /// accounts that must co-sign it.
    pub fn into_parts(self) -> (Vec<SolInstruction>, Vec<NewAccount>) {
        let mut all = self.instructions;
        all.extend(self.cleanup);
        (all, self.signers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ix(tag: u8) -> SolInstruction {
        SolInstruction {
            program_id: [tag; 32],
            accounts: vec![
                SolAccountMeta::writable([1; 32], true),
                SolAccountMeta::readonly([2; 32], false),
                SolAccountMeta::readonly([3; 32], true),
            ],
            data: vec![tag],
        }
    }

    #[test]
    fn meta_constructors() {
        let w = SolAccountMeta::writable([9; 32], false);
        assert!(w.is_writable && !w.is_signer);
        let r = SolAccountMeta::readonly([9; 32], true);
        assert!(!r.is_writable && r.is_signer);
    }

    #[test]
    fn signer_keys_keep_order() {
        let keys: Vec<_> = ix(0).signer_keys().copied().collect();
        assert_eq!(keys, vec![[1; 32], [3; 32]]);
    }

    #[test]
    fn cleanup_runs_after_primary() {
        let mut batch = InstructionBatch::new();
        assert!(batch.is_empty());
        batch.cleanup.push(ix(9));
        batch.instructions.push(ix(1));
        batch.instructions.push(ix(2));

        let order: Vec<u8> = batch.ordered().map(|i| i.data[0]).collect();
        assert_eq!(order, vec![1, 2, 9]);

        let (all, signers) = batch.into_parts();
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].data, vec![9]);
        assert!(signers.is_empty());
    }
}
