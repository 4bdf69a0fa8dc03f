//! API handlers grouped by route module

pub mod advisory;
pub mod auth;
pub mod health;
pub mod trades;
pub mod wallet;
