//! Entity Store Trait
//!
//! This module defines the `EntityStore` trait, the snapshot capability the
//! rest of the engine reads from. Hierarchy building, ranking, aggregation,
//! and projection all take the snapshot through this seam, so tests inject
//! synthetic fixtures and nothing in the engine holds implicit global state.

use std::collections::HashMap;

use tracing::warn;

use crate::domain::entities::account::Account;
use crate::domain::entities::strategy::Strategy;

/// Read access to one in-memory snapshot of accounts and strategies.
///
/// Lookup by id is expected to be O(1) average; iteration preserves the
/// snapshot's original record order.
pub trait EntityStore {
    fn account(&self, id: &str) -> Option<&Account>;
    fn accounts(&self) -> &[Account];
    fn strategy(&self, id: &str) -> Option<&Strategy>;
    fn strategies(&self) -> &[Strategy];
}

/// Snapshot-backed store over two flat record collections.
#[derive(Debug, Default)]
pub struct InMemoryEntityStore {
    accounts: Vec<Account>,
    strategies: Vec<Strategy>,
    account_index: HashMap<String, usize>,
    strategy_index: HashMap<String, usize>,
}

impl InMemoryEntityStore {
    /// Build a store from flat record collections.
    ///
    /// Duplicate ids keep the first occurrence; later duplicates are dropped
    /// with a warning so the index stays unambiguous.
    pub fn new(accounts: Vec<Account>, strategies: Vec<Strategy>) -> Self {
        let mut deduped_accounts: Vec<Account> = Vec::with_capacity(accounts.len());
        let mut account_index = HashMap::with_capacity(accounts.len());
        for account in accounts {
            if account_index.contains_key(&account.id) {
                warn!(account_id = %account.id, "Duplicate account id in snapshot, keeping first occurrence");
                continue;
            }
            account_index.insert(account.id.clone(), deduped_accounts.len());
            deduped_accounts.push(account);
        }

        let mut deduped_strategies: Vec<Strategy> = Vec::with_capacity(strategies.len());
        let mut strategy_index = HashMap::with_capacity(strategies.len());
        for strategy in strategies {
            if strategy_index.contains_key(&strategy.id) {
                warn!(strategy_id = %strategy.id, "Duplicate strategy id in snapshot, keeping first occurrence");
                continue;
            }
            strategy_index.insert(strategy.id.clone(), deduped_strategies.len());
            deduped_strategies.push(strategy);
        }

        InMemoryEntityStore {
            accounts: deduped_accounts,
            strategies: deduped_strategies,
            account_index,
            strategy_index,
        }
    }
}

impl EntityStore for InMemoryEntityStore {
    fn account(&self, id: &str) -> Option<&Account> {
        self.account_index.get(id).map(|&i| &self.accounts[i])
    }

    fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    fn strategy(&self, id: &str) -> Option<&Strategy> {
        self.strategy_index.get(id).map(|&i| &self.strategies[i])
    }

    fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }
}
