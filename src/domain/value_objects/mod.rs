pub mod metric_key;
pub mod metric_value;
pub mod percent;
