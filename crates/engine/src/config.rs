//! Engine configuration read from environment variables.
//!
//! Missing or unparsable values fall back to defaults; empty strings count as unset.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::core::{ClearPolicy, GameConfig};
use crate::types::{DEFAULT_GRAVITY_MS, DEFAULT_QUEUE_DEPTH};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },
    #[error("command queue depth must be at least 1")]
    ZeroQueueDepth,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub game: GameConfig,
    /// Interval between synthetic `down` commands; 0 disables gravity
    pub gravity_ms: u64,
    pub seed: u32,
    /// JSON-lines event journal, if any
    pub log_path: Option<String>,
    pub queue_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            gravity_ms: DEFAULT_GRAVITY_MS,
            seed: 1,
            log_path: None,
            queue_depth: DEFAULT_QUEUE_DEPTH,
        }
    }
}

impl EngineConfig {
    /// Create from `BLOCKFALL_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup (environment, test fixtures)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };
        let defaults = Self::default();

        let width = get("BLOCKFALL_WIDTH")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.game.width);
        let height = get("BLOCKFALL_HEIGHT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.game.height);
        let clear_policy = get("BLOCKFALL_CLEAR_POLICY")
            .and_then(|s| ClearPolicy::from_str(&s))
            .unwrap_or_default();

        let gravity_ms = get("BLOCKFALL_GRAVITY_MS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.gravity_ms);
        let seed = get("BLOCKFALL_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(clock_seed);
        let log_path = get("BLOCKFALL_LOG_PATH");
        let queue_depth = get("BLOCKFALL_QUEUE_DEPTH")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.queue_depth);

        Self {
            game: GameConfig {
                width,
                height,
                clear_policy,
            },
            gravity_ms,
            seed,
            log_path,
            queue_depth,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.width == 0 || self.game.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.game.width,
                height: self.game.height,
            });
        }
        if self.queue_depth == 0 {
            return Err(ConfigError::ZeroQueueDepth);
        }
        Ok(())
    }

    /// Gravity period, `None` when disabled
    pub fn gravity_interval(&self) -> Option<Duration> {
        (self.gravity_ms > 0).then(|| Duration::from_millis(self.gravity_ms))
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = EngineConfig::from_lookup(lookup(&[("BLOCKFALL_SEED", "9")]));
        assert_eq!(cfg.game, GameConfig::default());
        assert_eq!(cfg.gravity_ms, DEFAULT_GRAVITY_MS);
        assert_eq!(cfg.seed, 9);
        assert_eq!(cfg.log_path, None);
        assert_eq!(cfg.queue_depth, DEFAULT_QUEUE_DEPTH);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn reads_every_variable() {
        let cfg = EngineConfig::from_lookup(lookup(&[
            ("BLOCKFALL_WIDTH", "12"),
            ("BLOCKFALL_HEIGHT", "20"),
            ("BLOCKFALL_CLEAR_POLICY", "all"),
            ("BLOCKFALL_GRAVITY_MS", "0"),
            ("BLOCKFALL_SEED", "77"),
            ("BLOCKFALL_LOG_PATH", " /tmp/blockfall.jsonl "),
            ("BLOCKFALL_QUEUE_DEPTH", "4"),
        ]));
        assert_eq!(cfg.game.width, 12);
        assert_eq!(cfg.game.height, 20);
        assert_eq!(cfg.game.clear_policy, ClearPolicy::AllFull);
        assert_eq!(cfg.gravity_interval(), None);
        assert_eq!(cfg.seed, 77);
        assert_eq!(cfg.log_path.as_deref(), Some("/tmp/blockfall.jsonl"));
        assert_eq!(cfg.queue_depth, 4);
    }

    #[test]
    fn unparsable_and_empty_values_fall_back() {
        let cfg = EngineConfig::from_lookup(lookup(&[
            ("BLOCKFALL_WIDTH", "wide"),
            ("BLOCKFALL_GRAVITY_MS", "-5"),
            ("BLOCKFALL_LOG_PATH", "   "),
        ]));
        assert_eq!(cfg.game.width, 10);
        assert_eq!(cfg.gravity_interval(), Some(Duration::from_millis(1000)));
        assert_eq!(cfg.log_path, None);
    }

    #[test]
    fn validate_rejects_zero_sizes() {
        let mut cfg = EngineConfig::default();
        cfg.game.height = 0;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::ZeroDimension {
                width: 10,
                height: 0
            })
        );

        let cfg = EngineConfig {
            queue_depth: 0,
            ..EngineConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroQueueDepth));
    }
}
