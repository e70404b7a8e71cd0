use serde::{Deserialize, Serialize};

use crate::domain::errors::ValidationError;
use crate::domain::value_objects::metric_key::StrategyMetricKey;
use crate::domain::value_objects::metric_value::MetricValue;
use crate::domain::value_objects::percent::Percent;

/// Aggregate rollups carried by one strategy, averaged or totalled across
/// its cohort of accounts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyMetrics {
    pub avg_reach: MetricValue,
    pub avg_engagement_rate: MetricValue,
    pub total_conversions: MetricValue,
    pub avg_roi: MetricValue,
    pub avg_ctr: MetricValue,
    pub cost_per_lead: MetricValue,
}

impl StrategyMetrics {
    pub fn get(&self, key: StrategyMetricKey) -> f64 {
        match key {
            StrategyMetricKey::AvgReach => self.avg_reach.value(),
            StrategyMetricKey::AvgEngagementRate => self.avg_engagement_rate.value(),
            StrategyMetricKey::TotalConversions => self.total_conversions.value(),
            StrategyMetricKey::AvgRoi => self.avg_roi.value(),
            StrategyMetricKey::AvgCtr => self.avg_ctr.value(),
            StrategyMetricKey::CostPerLead => self.cost_per_lead.value(),
        }
    }
}

/// Percentage deltas versus the prior reporting period.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StrategyTrend {
    pub reach: Percent,
    pub engagement: Percent,
    pub conversions: Percent,
    pub roi: Percent,
}

/// A named content approach shared across a cohort of accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub id: String,
    pub name: String,
    /// Number of accounts following this strategy
    pub account_count: u32,
    pub metrics: StrategyMetrics,
    pub trend: StrategyTrend,
}

impl Strategy {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        account_count: u32,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::InvalidId(
                "strategy id cannot be empty".to_string(),
            ));
        }
        Ok(Strategy {
            id,
            name: name.into(),
            account_count,
            metrics: StrategyMetrics::default(),
            trend: StrategyTrend::default(),
        })
    }

    pub fn metric(&self, key: StrategyMetricKey) -> f64 {
        self.metrics.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_new() {
        let strategy = Strategy::new("strat-1", "Hook-first shorts", 12);
        assert!(strategy.is_ok());
        let strategy = strategy.unwrap();
        assert_eq!(strategy.id, "strat-1");
        assert_eq!(strategy.account_count, 12);
    }

    #[test]
    fn test_strategy_new_empty_id() {
        assert!(Strategy::new("", "Hook-first shorts", 12).is_err());
    }

    #[test]
    fn test_metric_lookup_by_key() {
        let mut strategy = Strategy::new("strat-1", "Hook-first shorts", 12).unwrap();
        strategy.metrics.avg_roi = MetricValue::new(2.8).unwrap();
        assert_eq!(strategy.metric(StrategyMetricKey::AvgRoi), 2.8);
        assert_eq!(strategy.metric(StrategyMetricKey::CostPerLead), 0.0);
    }
}
