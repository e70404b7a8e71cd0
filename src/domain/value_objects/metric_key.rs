//! Typed metric keys and the string catalog that resolves caller-supplied
//! key names. All dynamic metric access goes through one table validated
//! here, so a misspelled key fails with `UnknownMetric` instead of falling
//! through a string match.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::errors::EngineError;

/// Performance measure carried by every account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccountMetricKey {
    Reach,
    Impressions,
    Engagement,
    EngagementRate,
    Clicks,
    Conversions,
    Roi,
    Ctr,
    Cpc,
    CostPerConversion,
}

impl AccountMetricKey {
    pub const ALL: [AccountMetricKey; 10] = [
        AccountMetricKey::Reach,
        AccountMetricKey::Impressions,
        AccountMetricKey::Engagement,
        AccountMetricKey::EngagementRate,
        AccountMetricKey::Clicks,
        AccountMetricKey::Conversions,
        AccountMetricKey::Roi,
        AccountMetricKey::Ctr,
        AccountMetricKey::Cpc,
        AccountMetricKey::CostPerConversion,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AccountMetricKey::Reach => "reach",
            AccountMetricKey::Impressions => "impressions",
            AccountMetricKey::Engagement => "engagement",
            AccountMetricKey::EngagementRate => "engagementRate",
            AccountMetricKey::Clicks => "clicks",
            AccountMetricKey::Conversions => "conversions",
            AccountMetricKey::Roi => "roi",
            AccountMetricKey::Ctr => "ctr",
            AccountMetricKey::Cpc => "cpc",
            AccountMetricKey::CostPerConversion => "costPerConversion",
        }
    }

    /// Resolve a caller-supplied key name through the catalog.
    pub fn parse(key: &str) -> Result<Self, EngineError> {
        ACCOUNT_METRIC_CATALOG
            .get(key)
            .copied()
            .ok_or_else(|| EngineError::UnknownMetric {
                key: key.to_string(),
            })
    }
}

/// Aggregate measure carried by every strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StrategyMetricKey {
    AvgReach,
    AvgEngagementRate,
    TotalConversions,
    AvgRoi,
    AvgCtr,
    CostPerLead,
}

impl StrategyMetricKey {
    pub const ALL: [StrategyMetricKey; 6] = [
        StrategyMetricKey::AvgReach,
        StrategyMetricKey::AvgEngagementRate,
        StrategyMetricKey::TotalConversions,
        StrategyMetricKey::AvgRoi,
        StrategyMetricKey::AvgCtr,
        StrategyMetricKey::CostPerLead,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StrategyMetricKey::AvgReach => "avgReach",
            StrategyMetricKey::AvgEngagementRate => "avgEngagementRate",
            StrategyMetricKey::TotalConversions => "totalConversions",
            StrategyMetricKey::AvgRoi => "avgRoi",
            StrategyMetricKey::AvgCtr => "avgCtr",
            StrategyMetricKey::CostPerLead => "costPerLead",
        }
    }

    pub fn parse(key: &str) -> Result<Self, EngineError> {
        STRATEGY_METRIC_CATALOG
            .get(key)
            .copied()
            .ok_or_else(|| EngineError::UnknownMetric {
                key: key.to_string(),
            })
    }
}

/// Measure carried by every content post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PostMetricKey {
    Engagement,
    Reach,
}

impl PostMetricKey {
    pub fn name(&self) -> &'static str {
        match self {
            PostMetricKey::Engagement => "engagement",
            PostMetricKey::Reach => "reach",
        }
    }
}

static ACCOUNT_METRIC_CATALOG: Lazy<HashMap<&'static str, AccountMetricKey>> = Lazy::new(|| {
    AccountMetricKey::ALL.iter().map(|k| (k.name(), *k)).collect()
});

static STRATEGY_METRIC_CATALOG: Lazy<HashMap<&'static str, StrategyMetricKey>> = Lazy::new(|| {
    StrategyMetricKey::ALL.iter().map(|k| (k.name(), *k)).collect()
});
