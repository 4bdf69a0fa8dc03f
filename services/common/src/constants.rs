//! Common constants used across all services

// Time constants
pub const SECS_PER_MIN: u64 = 60;
pub const MINS_PER_HOUR: u64 = 60;
pub const HOURS_PER_DAY: u64 = 24;
pub const SECS_PER_HOUR: u64 = SECS_PER_MIN * MINS_PER_HOUR;
pub const SECS_PER_DAY: u64 = SECS_PER_HOUR * HOURS_PER_DAY;

// Size constants
pub const BYTES_PER_KB: usize = 1024;
pub const BYTES_PER_MB: usize = BYTES_PER_KB * 1024;

/// Port the backend listens on when nothing else is configured
pub const DEFAULT_HTTP_PORT: u16 = 3001;

/// Lifetime of an issued access token
pub const DEFAULT_TOKEN_EXPIRY_SECS: u64 = SECS_PER_DAY;

// Error codes shared by more than one service
pub const CODE_MISSING_FIELDS: &str = "MISSING_FIELDS";
pub const CODE_NOT_FOUND: &str = "NOT_FOUND";
pub const CODE_SERVER_ERROR: &str = "SERVER_ERROR";
