//! # Pool Configuration
//!
//! [`PoolConfig`] carries the values a pool starts with. `max` and the timeout can be
//! changed later through the client (`set_max`, `set_timeout`); `buffer_size` is fixed
//! once the actor's inbox exists.
//!
//! The struct derives serde traits so it can sit inside an application's own settings
//! file. Missing fields fall back to [`PoolConfig::default`].

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Initial settings for a pool actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Capacity of the actor's inbox. When it is full, client calls wait for space.
    pub buffer_size: usize,

    /// Maximum number of instances the factory may create. `0` means unlimited.
    pub max: usize,

    /// Wait applied to each queued borrow request, in milliseconds. `0` means forever.
    pub timeout_ms: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            buffer_size: 32,
            max: 0,
            timeout_ms: 0,
        }
    }
}

impl PoolConfig {
    pub fn with_max(mut self, max: usize) -> Self {
        self.max = max;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// The configured wait, or `None` when requests wait indefinitely.
    pub fn timeout(&self) -> Option<Duration> {
        normalize_timeout(Duration::from_millis(self.timeout_ms))
    }
}

/// Maps a zero duration to "no timeout".
pub(crate) fn normalize_timeout(timeout: Duration) -> Option<Duration> {
    (!timeout.is_zero()).then_some(timeout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unlimited_and_untimed() {
        let config = PoolConfig::default();
        assert_eq!(config.max, 0);
        assert_eq!(config.timeout(), None);
        assert!(config.buffer_size > 0);
    }

    #[test]
    fn zero_timeout_means_forever() {
        let config = PoolConfig::default().with_timeout(Duration::ZERO);
        assert_eq!(config.timeout(), None);

        let config = config.with_timeout(Duration::from_millis(250));
        assert_eq!(config.timeout(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn partial_settings_fall_back_to_defaults() {
        let config: PoolConfig = serde_json::from_str(r#"{ "max": 4 }"#).unwrap();
        assert_eq!(config.max, 4);
        assert_eq!(config.timeout_ms, 0);
        assert_eq!(config.buffer_size, PoolConfig::default().buffer_size);
    }
}
