//! TOML-based session configuration.
//!
//! A [`SessionConfig`] is the immutable record of four values that
//! parameterizes a whole session: prepare/work/rest durations (seconds)
//! and the number of work intervals. It is selected once before engine
//! construction (normal or debug variant) and never mutated mid-session.
//!
//! Configuration is stored at `~/.config/tabata/config.toml`.
//! Set TABATA_ENV=dev to use `~/.config/tabata-dev/` instead.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::timer::Phase;

/// Session parameters, all positive integers.
///
/// Serialized to/from TOML; missing fields fall back to the standard
/// Tabata protocol values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Prepare phase duration in seconds.
    #[serde(default = "default_prepare_duration")]
    pub prepare_duration: u32,
    /// Work phase duration in seconds.
    #[serde(default = "default_work_duration")]
    pub work_duration: u32,
    /// Rest phase duration in seconds.
    #[serde(default = "default_rest_duration")]
    pub rest_duration: u32,
    /// Number of work intervals in the session.
    #[serde(default = "default_total_intervals")]
    pub total_intervals: u32,
}

impl SessionConfig {
    /// The classic Tabata protocol: 10s prepare, then 8 rounds of
    /// 20s work / 10s rest.
    pub fn standard() -> Self {
        Self {
            prepare_duration: 10,
            work_duration: 20,
            rest_duration: 10,
            total_intervals: 8,
        }
    }

    /// Fast variant for debugging: a full session finishes in under
    /// twenty seconds of wall-clock time.
    pub fn debug() -> Self {
        Self {
            prepare_duration: 3,
            work_duration: 3,
            rest_duration: 2,
            total_intervals: 3,
        }
    }

    /// Duration in seconds of the given phase under this configuration.
    pub fn duration_of(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Prepare => self.prepare_duration,
            Phase::Work => self.work_duration,
            Phase::Rest => self.rest_duration,
        }
    }

    /// Total session length in seconds: one prepare, `total_intervals`
    /// work phases and `total_intervals - 1` rest phases.
    pub fn total_session_secs(&self) -> u64 {
        let n = self.total_intervals as u64;
        self.prepare_duration as u64
            + n * self.work_duration as u64
            + n.saturating_sub(1) * self.rest_duration as u64
    }

    /// Number of entries in the flattened session timeline.
    pub fn timeline_len(&self) -> usize {
        (2 * self.total_intervals) as usize
    }

    /// Reject zero durations and zero interval counts.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("prepare_duration", self.prepare_duration),
            ("work_duration", self.work_duration),
            ("rest_duration", self.rest_duration),
            ("total_intervals", self.total_intervals),
        ];
        for (key, value) in fields {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "must be a positive integer".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Load and validate a configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config: Self =
            toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration from [`config_path`], falling back to the
    /// standard protocol when no file exists.
    pub fn load_or_default() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::standard())
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Returns `~/.config/tabata[-dev]/config.toml` based on TABATA_ENV.
pub fn config_path() -> PathBuf {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TABATA_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("tabata-dev")
    } else {
        base_dir.join("tabata")
    };

    dir.join("config.toml")
}

fn default_prepare_duration() -> u32 {
    10
}
fn default_work_duration() -> u32 {
    20
}
fn default_rest_duration() -> u32 {
    10
}
fn default_total_intervals() -> u32 {
    8
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn standard_is_default() {
        assert_eq!(SessionConfig::default(), SessionConfig::standard());
    }

    #[test]
    fn standard_session_length() {
        let c = SessionConfig::standard();
        assert_eq!(c.total_session_secs(), 10 + 8 * 20 + 7 * 10);
        assert_eq!(c.timeline_len(), 16);
    }

    #[test]
    fn validate_rejects_zero_duration() {
        let mut c = SessionConfig::standard();
        c.work_duration = 0;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::InvalidValue { key, .. }) if key == "work_duration"
        ));
    }

    #[test]
    fn load_merges_partial_toml_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "work_duration = 30\ntotal_intervals = 4").unwrap();
        let c = SessionConfig::load(file.path()).unwrap();
        assert_eq!(c.work_duration, 30);
        assert_eq!(c.total_intervals, 4);
        assert_eq!(c.prepare_duration, 10);
        assert_eq!(c.rest_duration, 10);
    }

    #[test]
    fn load_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "total_intervals = 0").unwrap();
        assert!(SessionConfig::load(file.path()).is_err());
    }
}
