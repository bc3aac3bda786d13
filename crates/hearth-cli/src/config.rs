//! Configuration loading and management.

use std::path::{Path, PathBuf};

use chrono::Duration;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use hearth_core::TimeScale;
use hearth_core::position::NOW_REFRESH_SECS;
use serde::{Deserialize, Serialize};

use crate::TimelineKind;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Events file read when `--events` is not given.
    pub events_path: PathBuf,
    pub week_hour_height: f32,
    pub week_min_height: f32,
    pub day_hour_height: f32,
    pub day_min_height: f32,
    /// Seconds between current-time marker refreshes.
    pub refresh_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            events_path: data_dir.join("events.json"),
            week_hour_height: TimeScale::WEEK.hour_height,
            week_min_height: TimeScale::WEEK.min_height,
            day_hour_height: TimeScale::DAY.hour_height,
            day_min_height: TimeScale::DAY.min_height,
            refresh_secs: NOW_REFRESH_SECS.unsigned_abs(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // HEARTH_EVENTS_PATH, HEARTH_REFRESH_SECS, ...
        figment = figment.merge(Env::prefixed("HEARTH_"));

        figment.extract()
    }

    pub const fn week_scale(&self) -> TimeScale {
        TimeScale::new(self.week_hour_height, self.week_min_height)
    }

    pub const fn day_scale(&self) -> TimeScale {
        TimeScale::new(self.day_hour_height, self.day_min_height)
    }

    pub const fn timeline_scale(&self, kind: TimelineKind) -> TimeScale {
        match kind {
            TimelineKind::Week => self.week_scale(),
            TimelineKind::Day => self.day_scale(),
        }
    }

    /// Refresh period of the current-time marker, never below one second.
    pub fn refresh_period(&self) -> Duration {
        let secs = i64::try_from(self.refresh_secs.max(1)).unwrap_or(NOW_REFRESH_SECS);
        Duration::seconds(secs)
    }
}

/// Returns the platform-specific config directory for hearth.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("hearth"))
}

/// Returns the platform-specific data directory for hearth.
///
/// On Linux: `~/.local/share/hearth`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("hearth"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_data_path_ends_with_hearth() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "hearth");
    }

    #[test]
    fn test_default_config_uses_data_dir_for_events() {
        let config = Config::default();
        let data_dir = dirs_data_path().unwrap();
        assert_eq!(config.events_path, data_dir.join("events.json"));
    }

    #[test]
    fn test_default_scales_match_engine_defaults() {
        let config = Config::default();
        assert_eq!(config.week_scale(), TimeScale::WEEK);
        assert_eq!(config.day_scale(), TimeScale::DAY);
        assert_eq!(config.timeline_scale(TimelineKind::Week), TimeScale::WEEK);
        assert_eq!(config.refresh_period(), Duration::seconds(60));
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hearth.toml");
        std::fs::write(
            &path,
            "events_path = \"/tmp/family.json\"\nday_hour_height = 80.0\nrefresh_secs = 5\n",
        )
        .unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.events_path, PathBuf::from("/tmp/family.json"));
        assert_eq!(config.day_scale(), TimeScale::new(80.0, 40.0));
        assert_eq!(config.week_scale(), TimeScale::WEEK);
        assert_eq!(config.refresh_period(), Duration::seconds(5));
    }

    #[test]
    fn test_zero_refresh_is_raised_to_one_second() {
        let config = Config {
            refresh_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.refresh_period(), Duration::seconds(1));
    }
}
