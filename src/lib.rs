//! Amplify Performance Engine Library
//!
//! This library provides the account hierarchy, metric aggregation, ranking,
//! promotion pipeline, and comparison projection that back the multi-account
//! manager, strategy hub, and analytics views.

pub mod config;
pub mod domain;
