//! Known-account lookup used by account resolution, and the raw
//! account-data reader used by metadata fetches.

use std::collections::HashSet;

use crate::address::bytes_to_address;
use crate::error::TokenError;
use crate::spl_token::TokenAccount;

/// An account as seen by the cache: raw data plus its token-account view
/// when the data parses as one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedAccount {
    pub pubkey: [u8; 32],
    pub data: Vec<u8>,
    pub token: Option<TokenAccount>,
}

impl CachedAccount {
    pub fn new(pubkey: [u8; 32], data: Vec<u8>) -> Self {
        let token = TokenAccount::unpack(&data);
        Self {
            pubkey,
            data,
            token,
        }
    }
}

/// Query interface over known accounts. Results come back in the cache's
/// enumeration order.
pub trait AccountCache {
    fn query(&self, predicate: &dyn Fn(&CachedAccount) -> bool) -> Vec<&CachedAccount>;
}

/// Raw account-data fetch.
pub trait AccountReader {
    fn read(&self, address: &[u8; 32]) -> Result<Vec<u8>, TokenError>;
}

/// Predicate for "a token account of `mint` owned by `owner`, not in
/// `excluded`".
#[derive(Debug, Clone, Copy)]
pub struct TokenAccountFilter<'a> {
    pub mint: &'a [u8; 32],
    pub owner: &'a [u8; 32],
    pub excluded: &'a HashSet<[u8; 32]>,
}

impl TokenAccountFilter<'_> {
    pub fn matches(&self, account: &CachedAccount) -> bool {
        match &account.token {
            Some(token) => {
                token.mint == *self.mint
                    && token.owner == *self.owner
                    && !self.excluded.contains(&account.pubkey)
            }
            None => false,
        }
    }
}

/// In-memory cache that enumerates accounts in first-insertion order.
#[derive(Debug, Default, Clone)]
pub struct MemoryAccountCache {
    accounts: Vec<CachedAccount>,
}

impl MemoryAccountCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or refresh an account. A refreshed account keeps its original
    /// position in enumeration order.
    pub fn insert(&mut self, pubkey: [u8; 32], data: Vec<u8>) {
        let account = CachedAccount::new(pubkey, data);
        match self.accounts.iter_mut().find(|a| a.pubkey == pubkey) {
            Some(existing) => *existing = account,
            None => self.accounts.push(account),
        }
    }

    pub fn remove(&mut self, pubkey: &[u8; 32]) -> Option<CachedAccount> {
        let idx = self.accounts.iter().position(|a| a.pubkey == *pubkey)?;
        Some(self.accounts.remove(idx))
    }

    pub fn get(&self, pubkey: &[u8; 32]) -> Option<&CachedAccount> {
        self.accounts.iter().find(|a| a.pubkey == *pubkey)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl AccountCache for MemoryAccountCache {
    fn query(&self, predicate: &dyn Fn(&CachedAccount) -> bool) -> Vec<&CachedAccount> {
        self.accounts.iter().filter(|&a| predicate(a)).collect()
    }
}

impl AccountReader for MemoryAccountCache {
    fn read(&self, address: &[u8; 32]) -> Result<Vec<u8>, TokenError> {
        self.get(address).map(|a| a.data.clone()).ok_or_else(|| {
            TokenError::AccountRead(format!("{} not found", bytes_to_address(address)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_data(mint: u8, owner: u8) -> Vec<u8> {
        TokenAccount {
            mint: [mint; 32],
            owner: [owner; 32],
            amount: 0,
            is_initialized: true,
        }
        .pack()
    }

    #[test]
    fn non_token_data_has_no_token_view() {
        let account = CachedAccount::new([1; 32], vec![0; 82]);
        assert!(account.token.is_none());
    }

    #[test]
    fn query_preserves_insertion_order() {
        let mut cache = MemoryAccountCache::new();
        cache.insert([3; 32], token_data(1, 2));
        cache.insert([1; 32], token_data(1, 2));
        cache.insert([2; 32], token_data(1, 2));

        let found: Vec<_> = cache
            .query(&|_: &CachedAccount| true)
            .iter()
            .map(|a| a.pubkey)
            .collect();
        assert_eq!(found, vec![[3; 32], [1; 32], [2; 32]]);
    }

    #[test]
    fn refresh_keeps_position() {
        let mut cache = MemoryAccountCache::new();
        cache.insert([1; 32], token_data(1, 2));
        cache.insert([2; 32], token_data(1, 2));
        cache.insert([1; 32], token_data(5, 2));

        assert_eq!(cache.len(), 2);
        let first = cache.query(&|_: &CachedAccount| true)[0];
        assert_eq!(first.pubkey, [1; 32]);
        assert_eq!(first.token.unwrap().mint, [5; 32]);
    }

    #[test]
    fn filter_checks_mint_owner_and_exclusions() {
        let mut excluded = HashSet::new();
        excluded.insert([9; 32]);
        let filter = TokenAccountFilter {
            mint: &[1; 32],
            owner: &[2; 32],
            excluded: &excluded,
        };

        assert!(filter.matches(&CachedAccount::new([8; 32], token_data(1, 2))));
        assert!(!filter.matches(&CachedAccount::new([9; 32], token_data(1, 2))));
        assert!(!filter.matches(&CachedAccount::new([8; 32], token_data(1, 3))));
        assert!(!filter.matches(&CachedAccount::new([8; 32], token_data(4, 2))));
        assert!(!filter.matches(&CachedAccount::new([8; 32], vec![1; 100])));
    }

    #[test]
    fn reader_returns_raw_data_or_error() {
        let mut cache = MemoryAccountCache::new();
        cache.insert([1; 32], vec![1, 2, 3]);
        assert_eq!(cache.read(&[1; 32]).unwrap(), vec![1, 2, 3]);
        assert!(matches!(cache.read(&[2; 32]), Err(TokenError::AccountRead(_))));
    }

    #[test]
    fn remove_drops_account() {
        let mut cache = MemoryAccountCache::new();
        cache.insert([1; 32], vec![]);
        assert!(cache.remove(&[1; 32]).is_some());
        assert!(cache.is_empty());
        assert!(cache.remove(&[1; 32]).is_none());
    }
}
