//! Common conventions shared by every AfriSwap service
//!
//! All services speak the same JSON dialect: amounts are plain JSON numbers,
//! timestamps are ISO-8601 strings with millisecond precision and failures
//! travel in a `{"error": {"message", "code"}}` envelope.

pub mod constants;
pub mod errors;
pub mod serde_helpers;

pub use constants::*;
pub use errors::*;
