//! Shared defaults

use std::time::Duration;

/// Samples kept per sensor when nothing else is configured
pub const DEFAULT_BUFFER_LENGTH: usize = 150;

/// Refresh period in milliseconds
pub const DEFAULT_UPDATE_INTERVAL_MS: u64 = 2000;

pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_millis(DEFAULT_UPDATE_INTERVAL_MS);
