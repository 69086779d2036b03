//! Conversation lifecycle configuration

use chrono::Duration;
use serde::Deserialize;

use super::error::ValidationError;

/// Conversation lifecycle configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Inactivity window in hours before a conversation is reclaimed
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: u64,

    /// Cadence of the background expiry sweep, in seconds
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl ChatConfig {
    /// Get the session TTL as a chrono Duration
    pub fn session_ttl(&self) -> Duration {
        Duration::hours(self.session_ttl_hours as i64)
    }

    /// Get the sweep interval as a std Duration
    pub fn sweep_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.sweep_interval_secs)
    }

    /// Validate lifecycle configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.session_ttl_hours == 0 {
            return Err(ValidationError::InvalidSessionTtl);
        }
        if self.sweep_interval_secs == 0 {
            return Err(ValidationError::InvalidSweepInterval);
        }
        Ok(())
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            session_ttl_hours: default_session_ttl_hours(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

fn default_session_ttl_hours() -> u64 {
    24
}

fn default_sweep_interval_secs() -> u64 {
    3600
}
