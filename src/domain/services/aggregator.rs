//! Metric Aggregation Service
//!
//! Group-level rollups over arbitrary entity sets: sums, means, top
//! performers, and the 0–100 normalization that comparison views are built
//! on. Every function is a pure function of its inputs; degenerate input
//! (an empty set, or a metric whose maximum is 0) degrades to zeroed
//! results so downstream projections never need null checks.

use tracing::debug;

use crate::domain::entities::account::{Account, Platform};
use crate::domain::entities::content_post::ContentPost;
use crate::domain::services::hierarchy::AccountHierarchy;
use crate::domain::value_objects::metric_key::{AccountMetricKey, PostMetricKey};

/// Sum and mean for one metric over one entity group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupRollup {
    pub sum: f64,
    pub mean: f64,
}

/// Per-platform rollup of one metric, platforms in first-appearance order.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformRollup {
    pub platform: Platform,
    pub account_count: usize,
    pub rollup: GroupRollup,
}

pub struct MetricAggregator;

impl MetricAggregator {
    /// Sum and mean of raw values; the mean of an empty set is 0.
    pub fn rollup(values: &[f64]) -> GroupRollup {
        let sum: f64 = values.iter().sum();
        let mean = if values.is_empty() {
            0.0
        } else {
            sum / values.len() as f64
        };
        GroupRollup { sum, mean }
    }

    pub fn rollup_accounts(accounts: &[&Account], key: AccountMetricKey) -> GroupRollup {
        let values: Vec<f64> = accounts.iter().map(|a| a.metric(key)).collect();
        Self::rollup(&values)
    }

    pub fn rollup_posts(posts: &[&ContentPost], key: PostMetricKey) -> GroupRollup {
        let values: Vec<f64> = posts.iter().map(|p| p.metric(key)).collect();
        Self::rollup(&values)
    }

    /// The `count` highest-value accounts for a metric. Ties break on id,
    /// lexicographic, so the result is deterministic across runs.
    pub fn top_accounts<'a>(
        accounts: &[&'a Account],
        key: AccountMetricKey,
        count: usize,
    ) -> Vec<&'a Account> {
        let mut ranked: Vec<&Account> = accounts.to_vec();
        ranked.sort_by(|a, b| {
            b.metric(key)
                .total_cmp(&a.metric(key))
                .then_with(|| a.id.cmp(&b.id))
        });
        ranked.truncate(count);
        debug!(
            metric = key.name(),
            requested = count,
            returned = ranked.len(),
            "Selected top accounts"
        );
        ranked
    }

    /// The `count` highest-value posts for a metric, ties broken by id.
    pub fn top_posts<'a>(
        posts: &[&'a ContentPost],
        key: PostMetricKey,
        count: usize,
    ) -> Vec<&'a ContentPost> {
        let mut ranked: Vec<&ContentPost> = posts.to_vec();
        ranked.sort_by(|a, b| {
            b.metric(key)
                .total_cmp(&a.metric(key))
                .then_with(|| a.id.cmp(&b.id))
        });
        ranked.truncate(count);
        ranked
    }

    /// Express every value as a percentage of the set's maximum, in [0, 100].
    /// A zero maximum clamps the whole column to 0 instead of dividing by it.
    pub fn normalize_against_max(values: &[f64]) -> Vec<f64> {
        let max = values.iter().cloned().fold(0.0_f64, f64::max);
        if max <= 0.0 {
            return vec![0.0; values.len()];
        }
        values
            .iter()
            .map(|v| ((v / max) * 100.0).clamp(0.0, 100.0))
            .collect()
    }

    /// Per-platform sum/mean of one metric over an account set, platforms in
    /// first-appearance order.
    pub fn platform_rollups(accounts: &[&Account], key: AccountMetricKey) -> Vec<PlatformRollup> {
        let mut order: Vec<Platform> = Vec::new();
        for account in accounts {
            if !order.contains(&account.platform) {
                order.push(account.platform);
            }
        }
        order
            .into_iter()
            .map(|platform| {
                let values: Vec<f64> = accounts
                    .iter()
                    .filter(|a| a.platform == platform)
                    .map(|a| a.metric(key))
                    .collect();
                PlatformRollup {
                    platform,
                    account_count: values.len(),
                    rollup: Self::rollup(&values),
                }
            })
            .collect()
    }

    /// Sum a metric over an account and all of its descendants.
    /// Unknown ids roll up to 0.
    pub fn subtree_rollup(
        hierarchy: &AccountHierarchy,
        accounts: &[Account],
        id: &str,
        key: AccountMetricKey,
    ) -> GroupRollup {
        let ids = hierarchy.subtree_ids(id);
        let values: Vec<f64> = accounts
            .iter()
            .filter(|a| ids.contains(&a.id))
            .map(|a| a.metric(key))
            .collect();
        Self::rollup(&values)
    }
}
