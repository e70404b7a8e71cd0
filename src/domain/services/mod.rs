pub mod aggregator;
pub mod hierarchy;
pub mod projector;
pub mod promotion;
pub mod ranking;
