//! Account Entity
//!
//! This module defines the `Account` entity, one marketing identity on one
//! platform. Accounts form a forest: a main account owns sub accounts, which
//! own test accounts used to trial content before promotion.
//!
//! ## Key Features
//! - Fixed performance metric record with typed key access
//! - Trend deltas versus the prior period
//! - Owned content posts feeding the promotion pipeline
//! - Test metadata for accounts of kind `Test`

use serde::{Deserialize, Serialize};

use crate::domain::entities::content_post::ContentPost;
use crate::domain::errors::ValidationError;
use crate::domain::value_objects::metric_key::AccountMetricKey;
use crate::domain::value_objects::metric_value::MetricValue;
use crate::domain::value_objects::percent::Percent;

/// Supported marketing channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Instagram,
    TikTok,
    YouTube,
    Facebook,
    LinkedIn,
    X,
}

impl Platform {
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::TikTok => "tiktok",
            Platform::YouTube => "youtube",
            Platform::Facebook => "facebook",
            Platform::LinkedIn => "linkedin",
            Platform::X => "x",
        }
    }
}

/// Position of an account in the main → sub → test hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Main,
    Sub,
    Test,
}

/// Lifecycle status of a test account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Active,
    Paused,
    Completed,
    Winner,
}

impl TestStatus {
    pub fn name(&self) -> &'static str {
        match self {
            TestStatus::Active => "active",
            TestStatus::Paused => "paused",
            TestStatus::Completed => "completed",
            TestStatus::Winner => "winner",
        }
    }
}

/// Fixed record of performance measures for one account.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMetrics {
    pub reach: MetricValue,
    pub impressions: MetricValue,
    pub engagement: MetricValue,
    pub engagement_rate: MetricValue,
    pub clicks: MetricValue,
    pub conversions: MetricValue,
    pub roi: MetricValue,
    pub ctr: MetricValue,
    pub cpc: MetricValue,
    pub cost_per_conversion: MetricValue,
}

impl AccountMetrics {
    /// Read one measure by typed key.
    pub fn get(&self, key: AccountMetricKey) -> f64 {
        match key {
            AccountMetricKey::Reach => self.reach.value(),
            AccountMetricKey::Impressions => self.impressions.value(),
            AccountMetricKey::Engagement => self.engagement.value(),
            AccountMetricKey::EngagementRate => self.engagement_rate.value(),
            AccountMetricKey::Clicks => self.clicks.value(),
            AccountMetricKey::Conversions => self.conversions.value(),
            AccountMetricKey::Roi => self.roi.value(),
            AccountMetricKey::Ctr => self.ctr.value(),
            AccountMetricKey::Cpc => self.cpc.value(),
            AccountMetricKey::CostPerConversion => self.cost_per_conversion.value(),
        }
    }
}

/// Percentage deltas versus the prior reporting period.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MetricTrend {
    pub reach: Percent,
    pub engagement: Percent,
    pub conversions: Percent,
    pub roi: Percent,
}

/// One marketing identity on one platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique identifier for the account
    pub id: String,
    /// Display name shown in account lists
    pub name: String,
    /// Platform handle (e.g. "@brand.main")
    pub handle: String,
    pub platform: Platform,
    pub kind: AccountKind,
    /// Owning account id; `None` marks a root
    pub parent_id: Option<String>,
    pub metrics: AccountMetrics,
    pub trend: MetricTrend,
    /// Content published by this account, in publication order
    pub posts: Vec<ContentPost>,
    /// Only meaningful when `kind` is `Test`
    pub test_status: Option<TestStatus>,
    pub win_rate: Percent,
    pub promotion_count: u32,
}

impl Account {
    /// Create a new account with an empty metric record.
    ///
    /// # Errors
    /// Returns an error if the id is empty or longer than 100 characters.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        handle: impl Into<String>,
        platform: Platform,
        kind: AccountKind,
        parent_id: Option<String>,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidId(
                "account id cannot be empty".to_string(),
            ));
        }
        if trimmed.len() > 100 {
            return Err(ValidationError::InvalidId(
                "account id too long (max 100 characters)".to_string(),
            ));
        }

        Ok(Account {
            id: trimmed.to_string(),
            name: name.into(),
            handle: handle.into(),
            platform,
            kind,
            parent_id,
            metrics: AccountMetrics::default(),
            trend: MetricTrend::default(),
            posts: Vec::new(),
            test_status: if kind == AccountKind::Test {
                Some(TestStatus::Active)
            } else {
                None
            },
            win_rate: Percent::zero(),
            promotion_count: 0,
        })
    }

    /// Read one measure by typed key.
    pub fn metric(&self, key: AccountMetricKey) -> f64 {
        self.metrics.get(key)
    }

    /// Case-insensitive match against name and handle, used by free-text
    /// filtering.
    pub fn matches_query(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.name.to_lowercase().contains(&q) || self.handle.to_lowercase().contains(&q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_new() {
        let account = Account::new(
            "acc-main-1",
            "Brand HQ",
            "@brand.main",
            Platform::Instagram,
            AccountKind::Main,
            None,
        );
        assert!(account.is_ok());
        let account = account.unwrap();
        assert_eq!(account.id, "acc-main-1");
        assert!(account.parent_id.is_none());
        assert!(account.test_status.is_none());
    }

    #[test]
    fn test_account_new_empty_id() {
        let account = Account::new(
            "  ",
            "Brand HQ",
            "@brand.main",
            Platform::Instagram,
            AccountKind::Main,
            None,
        );
        assert!(account.is_err());
    }

    #[test]
    fn test_test_account_starts_active() {
        let account = Account::new(
            "acc-test-1",
            "Hook Test A",
            "@brand.test.a",
            Platform::TikTok,
            AccountKind::Test,
            Some("acc-sub-1".to_string()),
        )
        .unwrap();
        assert_eq!(account.test_status, Some(TestStatus::Active));
    }

    #[test]
    fn test_metric_lookup_by_key() {
        let mut account = Account::new(
            "acc-1",
            "Brand HQ",
            "@brand.main",
            Platform::Instagram,
            AccountKind::Main,
            None,
        )
        .unwrap();
        account.metrics.reach = MetricValue::new(125_000.0).unwrap();
        account.metrics.roi = MetricValue::new(3.4).unwrap();

        assert_eq!(account.metric(AccountMetricKey::Reach), 125_000.0);
        assert_eq!(account.metric(AccountMetricKey::Roi), 3.4);
        assert_eq!(account.metric(AccountMetricKey::Clicks), 0.0);
    }

    #[test]
    fn test_matches_query() {
        let account = Account::new(
            "acc-1",
            "Brand HQ",
            "@brand.main",
            Platform::Instagram,
            AccountKind::Main,
            None,
        )
        .unwrap();
        assert!(account.matches_query("brand"));
        assert!(account.matches_query("HQ"));
        assert!(account.matches_query("@BRAND.main"));
        assert!(!account.matches_query("competitor"));
    }
}
