//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave,
//! such as backend timeouts and query limits.

use promptlab_domain::DEFAULT_MAX_QUERY_CHARS;
use std::time::Duration;

/// Default bound on a comparison, in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 120;

/// Application behavior configuration.
///
/// Controls runtime behavior of use cases like the timeout applied to each
/// backend call and the longest query the render engine accepts.
#[derive(Debug, Clone)]
pub struct BehaviorConfig {
    /// Maximum time to wait for a backend response before marking the side as timed out.
    pub timeout: Option<Duration>,
    /// Maximum query length in characters.
    pub max_query_chars: usize,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECONDS)),
            max_query_chars: DEFAULT_MAX_QUERY_CHARS,
        }
    }
}

impl BehaviorConfig {
    /// Creates a BehaviorConfig with a timeout specified in seconds.
    pub fn with_timeout_seconds(seconds: u64) -> Self {
        Self {
            timeout: Some(Duration::from_secs(seconds)),
            ..Self::default()
        }
    }

    /// Replace the timeout with an explicit duration (or none).
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_query_chars(mut self, max_query_chars: usize) -> Self {
        self.max_query_chars = max_query_chars;
        self
    }
}
