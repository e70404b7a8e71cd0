//! Comparison Projection Service
//!
//! Transforms selected entities and selected metrics into chart-agnostic
//! data series. Two presentation modes:
//!
//! - **Per-entity**: one row per entity carrying raw values for each
//!   selected metric (bar/line comparison)
//! - **Per-metric**: one row per metric carrying each entity's value
//!   normalized 0–100 against the metric's maximum across the selection
//!   (radar/multi-axis comparison)
//!
//! Caller-specified entity and metric ordering is preserved, and row counts
//! are exact even for empty or all-zero selections.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::entities::account::Account;
use crate::domain::entities::strategy::Strategy;
use crate::domain::services::aggregator::MetricAggregator;
use crate::domain::value_objects::metric_key::{AccountMetricKey, StrategyMetricKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectionMode {
    PerEntity,
    PerMetric,
}

/// One labelled value inside a series row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Metric name in per-entity mode, entity id in per-metric mode
    pub key: String,
    pub value: f64,
}

/// One output row. The discriminator is an entity id in per-entity mode and
/// a metric name in per-metric mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRow {
    pub key: String,
    pub points: Vec<SeriesPoint>,
}

pub struct ComparisonProjector;

impl ComparisonProjector {
    /// Project selected accounts over selected metrics.
    pub fn project_accounts(
        accounts: &[&Account],
        metrics: &[AccountMetricKey],
        mode: ProjectionMode,
    ) -> Vec<SeriesRow> {
        let entity_ids: Vec<String> = accounts.iter().map(|a| a.id.clone()).collect();
        let metric_names: Vec<String> = metrics.iter().map(|m| m.name().to_string()).collect();
        let matrix: Vec<Vec<f64>> = accounts
            .iter()
            .map(|a| metrics.iter().map(|m| a.metric(*m)).collect())
            .collect();
        Self::project(entity_ids, metric_names, matrix, mode)
    }

    /// Project selected strategies over selected metrics.
    pub fn project_strategies(
        strategies: &[&Strategy],
        metrics: &[StrategyMetricKey],
        mode: ProjectionMode,
    ) -> Vec<SeriesRow> {
        let entity_ids: Vec<String> = strategies.iter().map(|s| s.id.clone()).collect();
        let metric_names: Vec<String> = metrics.iter().map(|m| m.name().to_string()).collect();
        let matrix: Vec<Vec<f64>> = strategies
            .iter()
            .map(|s| metrics.iter().map(|m| s.metric(*m)).collect())
            .collect();
        Self::project(entity_ids, metric_names, matrix, mode)
    }

    // matrix is entity-major: matrix[e][m] is entity e's value on metric m.
    fn project(
        entity_ids: Vec<String>,
        metric_names: Vec<String>,
        matrix: Vec<Vec<f64>>,
        mode: ProjectionMode,
    ) -> Vec<SeriesRow> {
        let rows = match mode {
            ProjectionMode::PerEntity => entity_ids
                .iter()
                .zip(&matrix)
                .map(|(id, values)| SeriesRow {
                    key: id.clone(),
                    points: metric_names
                        .iter()
                        .zip(values)
                        .map(|(name, &value)| SeriesPoint {
                            key: name.clone(),
                            value,
                        })
                        .collect(),
                })
                .collect(),
            ProjectionMode::PerMetric => metric_names
                .iter()
                .enumerate()
                .map(|(m, name)| {
                    let column: Vec<f64> = matrix.iter().map(|row| row[m]).collect();
                    let normalized = MetricAggregator::normalize_against_max(&column);
                    SeriesRow {
                        key: name.clone(),
                        points: entity_ids
                            .iter()
                            .zip(&normalized)
                            .map(|(id, &value)| SeriesPoint {
                                key: id.clone(),
                                value,
                            })
                            .collect(),
                    }
                })
                .collect(),
        };
        debug!(
            mode = ?mode,
            entity_count = entity_ids.len(),
            metric_count = metric_names.len(),
            "Projected comparison series"
        );
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::account::{AccountKind, Platform};
    use crate::domain::value_objects::metric_value::MetricValue;

    fn account(id: &str, reach: f64, roi: f64) -> Account {
        let mut account = Account::new(
            id,
            format!("Account {}", id),
            format!("@{}", id),
            Platform::Instagram,
            AccountKind::Sub,
            None,
        )
        .unwrap();
        account.metrics.reach = MetricValue::new(reach).unwrap();
        account.metrics.roi = MetricValue::new(roi).unwrap();
        account
    }

    #[test]
    fn test_per_entity_rows_carry_raw_values() {
        let a = account("a", 1000.0, 2.0);
        let b = account("b", 4000.0, 1.0);
        let refs: Vec<&Account> = vec![&a, &b];
        let metrics = [AccountMetricKey::Reach, AccountMetricKey::Roi];

        let rows =
            ComparisonProjector::project_accounts(&refs, &metrics, ProjectionMode::PerEntity);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key, "a");
        assert_eq!(rows[0].points[0].key, "reach");
        assert_eq!(rows[0].points[0].value, 1000.0);
        assert_eq!(rows[0].points[1].value, 2.0);
        assert_eq!(rows[1].points[0].value, 4000.0);
    }

    #[test]
    fn test_per_metric_rows_normalize_to_100() {
        let a = account("a", 1000.0, 2.0);
        let b = account("b", 4000.0, 1.0);
        let refs: Vec<&Account> = vec![&a, &b];
        let metrics = [AccountMetricKey::Reach, AccountMetricKey::Roi];

        let rows =
            ComparisonProjector::project_accounts(&refs, &metrics, ProjectionMode::PerMetric);
        assert_eq!(rows.len(), 2);

        let reach = &rows[0];
        assert_eq!(reach.key, "reach");
        assert_eq!(reach.points[0].value, 25.0);
        assert_eq!(reach.points[1].value, 100.0);

        let roi = &rows[1];
        assert_eq!(roi.points[0].value, 100.0);
        assert_eq!(roi.points[1].value, 50.0);
    }

    #[test]
    fn test_row_counts_are_exact() {
        let accounts: Vec<Account> = (0..3)
            .map(|i| account(&format!("a{}", i), 100.0 * i as f64, 0.0))
            .collect();
        let refs: Vec<&Account> = accounts.iter().collect();
        let metrics = [
            AccountMetricKey::Reach,
            AccountMetricKey::Engagement,
            AccountMetricKey::Clicks,
            AccountMetricKey::Roi,
        ];

        let rows =
            ComparisonProjector::project_accounts(&refs, &metrics, ProjectionMode::PerMetric);
        assert_eq!(rows.len(), 4);
        for row in &rows {
            assert_eq!(row.points.len(), 3);
        }
    }

    #[test]
    fn test_ordering_follows_caller_selection() {
        let a = account("a", 1.0, 1.0);
        let b = account("b", 2.0, 2.0);
        let refs: Vec<&Account> = vec![&b, &a];
        let metrics = [AccountMetricKey::Roi, AccountMetricKey::Reach];

        let rows =
            ComparisonProjector::project_accounts(&refs, &metrics, ProjectionMode::PerEntity);
        assert_eq!(rows[0].key, "b");
        assert_eq!(rows[1].key, "a");
        assert_eq!(rows[0].points[0].key, "roi");
        assert_eq!(rows[0].points[1].key, "reach");
    }

    #[test]
    fn test_all_zero_metric_projects_zeros() {
        let a = account("a", 0.0, 0.0);
        let b = account("b", 0.0, 0.0);
        let refs: Vec<&Account> = vec![&a, &b];
        let metrics = [AccountMetricKey::Clicks];

        let rows =
            ComparisonProjector::project_accounts(&refs, &metrics, ProjectionMode::PerMetric);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].points.iter().all(|p| p.value == 0.0));
    }

    #[test]
    fn test_empty_entity_selection() {
        let refs: Vec<&Account> = Vec::new();
        let metrics = [AccountMetricKey::Reach];

        let per_entity =
            ComparisonProjector::project_accounts(&refs, &metrics, ProjectionMode::PerEntity);
        assert!(per_entity.is_empty());

        let per_metric =
            ComparisonProjector::project_accounts(&refs, &metrics, ProjectionMode::PerMetric);
        assert_eq!(per_metric.len(), 1);
        assert!(per_metric[0].points.is_empty());
    }

    #[test]
    fn test_strategy_projection() {
        let mut s1 = Strategy::new("s1", "Shorts", 5).unwrap();
        s1.metrics.avg_roi = MetricValue::new(4.0).unwrap();
        let mut s2 = Strategy::new("s2", "Carousels", 8).unwrap();
        s2.metrics.avg_roi = MetricValue::new(2.0).unwrap();
        let refs: Vec<&Strategy> = vec![&s1, &s2];

        let rows = ComparisonProjector::project_strategies(
            &refs,
            &[StrategyMetricKey::AvgRoi],
            ProjectionMode::PerMetric,
        );
        assert_eq!(rows[0].key, "avgRoi");
        assert_eq!(rows[0].points[0].value, 100.0);
        assert_eq!(rows[0].points[1].value, 50.0);
    }
}
