pub mod account;
pub mod content_post;
pub mod strategy;
