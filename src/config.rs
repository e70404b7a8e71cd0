use tracing::warn;

/// Tunable thresholds for the performance engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Win rate (percentage) a completed test account must exceed to become a winner
    pub win_rate_threshold: f64,
    /// Default badge count for "top performer" selections
    pub top_performer_count: usize,
    /// K for the default top-K-by-engagement winner policy
    pub winner_top_k: usize,
    /// Optional reach floor for the default winner policy
    pub winner_min_reach: Option<f64>,
}

impl Default for EngineConfig {
    fn default() -> EngineConfig {
        EngineConfig {
            win_rate_threshold: 50.0,
            top_performer_count: 3,
            winner_top_k: 3,
            winner_min_reach: None,
        }
    }
}

impl EngineConfig {
    /// Build a configuration from environment variables, falling back to
    /// defaults and warning on values that do not parse or are out of range.
    pub fn from_env() -> EngineConfig {
        let mut config = EngineConfig::default();

        if let Ok(threshold) = std::env::var("WIN_RATE_THRESHOLD") {
            match threshold.parse::<f64>() {
                Ok(value) if (0.0..=100.0).contains(&value) => {
                    config.win_rate_threshold = value;
                }
                Ok(value) => {
                    warn!(
                        "Invalid WIN_RATE_THRESHOLD value: {} (must be between 0 and 100), using default: {}",
                        value, config.win_rate_threshold
                    );
                }
                Err(e) => {
                    warn!(
                        "Failed to parse WIN_RATE_THRESHOLD '{}': {}, using default: {}",
                        threshold, e, config.win_rate_threshold
                    );
                }
            }
        }

        if let Ok(count) = std::env::var("TOP_PERFORMER_COUNT") {
            match count.parse::<usize>() {
                Ok(value) if value > 0 => {
                    config.top_performer_count = value;
                }
                Ok(value) => {
                    warn!(
                        "Invalid TOP_PERFORMER_COUNT value: {} (must be positive), using default: {}",
                        value, config.top_performer_count
                    );
                }
                Err(e) => {
                    warn!(
                        "Failed to parse TOP_PERFORMER_COUNT '{}': {}, using default: {}",
                        count, e, config.top_performer_count
                    );
                }
            }
        }

        if let Ok(k) = std::env::var("WINNER_TOP_K") {
            match k.parse::<usize>() {
                Ok(value) if value > 0 => {
                    config.winner_top_k = value;
                }
                Ok(value) => {
                    warn!(
                        "Invalid WINNER_TOP_K value: {} (must be positive), using default: {}",
                        value, config.winner_top_k
                    );
                }
                Err(e) => {
                    warn!(
                        "Failed to parse WINNER_TOP_K '{}': {}, using default: {}",
                        k, e, config.winner_top_k
                    );
                }
            }
        }

        if let Ok(floor) = std::env::var("WINNER_MIN_REACH") {
            match floor.parse::<f64>() {
                Ok(value) if value >= 0.0 => {
                    config.winner_min_reach = Some(value);
                }
                Ok(value) => {
                    warn!(
                        "Invalid WINNER_MIN_REACH value: {} (must be non-negative), leaving reach floor unset",
                        value
                    );
                }
                Err(e) => {
                    warn!(
                        "Failed to parse WINNER_MIN_REACH '{}': {}, leaving reach floor unset",
                        floor, e
                    );
                }
            }
        }

        config
    }
}
