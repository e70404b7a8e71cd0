//! Ranking & Filtering Service
//!
//! Ordering and filtering for account and strategy lists. Sorts are stable:
//! entities with equal keys keep their relative input order, which also makes
//! top-N truncation deterministic when ties straddle the cutoff.

use std::cmp::Ordering;

use tracing::debug;

use crate::domain::entities::account::{Account, AccountKind, Platform, TestStatus};
use crate::domain::entities::strategy::Strategy;
use crate::domain::value_objects::metric_key::{AccountMetricKey, StrategyMetricKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(&self) -> SortDirection {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Current sort key and direction, held by the caller between invocations.
///
/// Re-toggling the same key flips the direction; switching to a new key
/// resets to descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<K> {
    pub key: K,
    pub direction: SortDirection,
}

impl<K: PartialEq + Copy> SortState<K> {
    pub fn new(key: K) -> Self {
        SortState {
            key,
            direction: SortDirection::Descending,
        }
    }

    pub fn toggle(&mut self, key: K) -> SortDirection {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key;
            self.direction = SortDirection::Descending;
        }
        self.direction
    }
}

/// Sortable key for account lists: any declared metric, or an identity field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountSortKey {
    Metric(AccountMetricKey),
    Name,
    Platform,
    Kind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategySortKey {
    Metric(StrategyMetricKey),
    Name,
    AccountCount,
}

/// AND-composed predicate set for account lists. Unset fields match
/// everything.
#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    pub platform: Option<Platform>,
    pub kind: Option<AccountKind>,
    pub status: Option<TestStatus>,
    pub query: Option<String>,
}

impl AccountFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn with_kind(mut self, kind: AccountKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_status(mut self, status: TestStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn matches(&self, account: &Account) -> bool {
        if let Some(platform) = self.platform {
            if account.platform != platform {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if account.kind != kind {
                return false;
            }
        }
        if let Some(status) = self.status {
            if account.test_status != Some(status) {
                return false;
            }
        }
        if let Some(query) = &self.query {
            if !query.trim().is_empty() && !account.matches_query(query.trim()) {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, accounts: &[&'a Account]) -> Vec<&'a Account> {
        let filtered: Vec<&Account> = accounts
            .iter()
            .copied()
            .filter(|a| self.matches(a))
            .collect();
        debug!(
            input_count = accounts.len(),
            output_count = filtered.len(),
            "Applied account filter"
        );
        filtered
    }
}

pub struct RankingEngine;

impl RankingEngine {
    /// Stable sort of an account list. Equal keys keep input order.
    pub fn sort_accounts<'a>(
        accounts: &[&'a Account],
        key: AccountSortKey,
        direction: SortDirection,
    ) -> Vec<&'a Account> {
        let mut sorted: Vec<&Account> = accounts.to_vec();
        sorted.sort_by(|a, b| {
            let ordering = Self::compare_accounts(a, b, key);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        sorted
    }

    /// Stable sort of a strategy list. Equal keys keep input order.
    pub fn sort_strategies<'a>(
        strategies: &[&'a Strategy],
        key: StrategySortKey,
        direction: SortDirection,
    ) -> Vec<&'a Strategy> {
        let mut sorted: Vec<&Strategy> = strategies.to_vec();
        sorted.sort_by(|a, b| {
            let ordering = match key {
                StrategySortKey::Metric(metric) => a.metric(metric).total_cmp(&b.metric(metric)),
                StrategySortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                StrategySortKey::AccountCount => a.account_count.cmp(&b.account_count),
            };
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        sorted
    }

    /// The `n` best accounts for a metric, descending. When ties straddle
    /// the cutoff, the entity appearing first in input order is kept.
    pub fn top_n<'a>(accounts: &[&'a Account], key: AccountMetricKey, n: usize) -> Vec<&'a Account> {
        let mut top = Self::sort_accounts(
            accounts,
            AccountSortKey::Metric(key),
            SortDirection::Descending,
        );
        top.truncate(n);
        top
    }

    fn compare_accounts(a: &Account, b: &Account, key: AccountSortKey) -> Ordering {
        match key {
            AccountSortKey::Metric(metric) => a.metric(metric).total_cmp(&b.metric(metric)),
            AccountSortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            AccountSortKey::Platform => a.platform.name().cmp(b.platform.name()),
            AccountSortKey::Kind => Self::kind_rank(a.kind).cmp(&Self::kind_rank(b.kind)),
        }
    }

    fn kind_rank(kind: AccountKind) -> u8 {
        match kind {
            AccountKind::Main => 0,
            AccountKind::Sub => 1,
            AccountKind::Test => 2,
        }
    }
}
