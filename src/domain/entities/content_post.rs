use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::ValidationError;
use crate::domain::value_objects::metric_key::PostMetricKey;
use crate::domain::value_objects::metric_value::MetricValue;

/// One piece of content published by an account.
///
/// The lifecycle flags are independent monotonic booleans set by the
/// promotion pipeline: a post can be a winner AND promoted AND running as an
/// ad at the same time. Precedence (`is_winner` before `promoted_to_main`
/// before `became_ad`) is enforced by the pipeline service, and flags are
/// never cleared once set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPost {
    pub id: String,
    pub engagement: MetricValue,
    pub reach: MetricValue,
    pub date: DateTime<Utc>,
    pub is_winner: bool,
    pub promoted_to_main: bool,
    pub became_ad: bool,
}

impl ContentPost {
    pub fn new(
        id: impl Into<String>,
        engagement: MetricValue,
        reach: MetricValue,
        date: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::InvalidId(
                "post id cannot be empty".to_string(),
            ));
        }
        Ok(ContentPost {
            id,
            engagement,
            reach,
            date,
            is_winner: false,
            promoted_to_main: false,
            became_ad: false,
        })
    }

    /// Read one measure by typed key.
    pub fn metric(&self, key: PostMetricKey) -> f64 {
        match key {
            PostMetricKey::Engagement => self.engagement.value(),
            PostMetricKey::Reach => self.reach.value(),
        }
    }
}
