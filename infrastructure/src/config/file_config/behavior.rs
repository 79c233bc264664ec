//! Behavior configuration from TOML (`[behavior]` section)

use promptlab_application::BehaviorConfig;
use promptlab_application::config::DEFAULT_TIMEOUT_SECONDS;
use promptlab_domain::DEFAULT_MAX_QUERY_CHARS;
use serde::{Deserialize, Serialize};

/// Raw behavior configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBehaviorConfig {
    /// Per-side timeout in seconds for backend calls
    pub timeout_seconds: u64,
    /// Maximum query length in characters
    pub max_query_chars: usize,
}

impl Default for FileBehaviorConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            max_query_chars: DEFAULT_MAX_QUERY_CHARS,
        }
    }
}

impl FileBehaviorConfig {
    /// Convert to the application-layer config.
    pub fn to_behavior_config(&self) -> BehaviorConfig {
        BehaviorConfig::with_timeout_seconds(self.timeout_seconds)
            .with_max_query_chars(self.max_query_chars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_to_behavior_config() {
        let file = FileBehaviorConfig {
            timeout_seconds: 30,
            max_query_chars: 200,
        };
        let config = file.to_behavior_config();
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.max_query_chars, 200);
    }
}
