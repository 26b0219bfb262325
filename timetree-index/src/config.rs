use std::env;
use std::str::FromStr;

use chrono::Weekday;

use timetree_core::errors::ConfigError;

use crate::level::Level;

/// Configuration for a time-tree builder.
///
/// Each granularity level is enabled independently. The defaults keep every
/// level from Year down to Minute on and Second off, with weeks anchored on
/// Sunday.
#[derive(Debug, Clone)]
pub struct TimeTreeConfig {
    pub first_day_of_week: Weekday,
    pub include_year: bool,
    pub include_quarter: bool,
    pub include_month: bool,
    pub include_week: bool,
    pub include_day: bool,
    pub include_hour: bool,
    pub include_minute: bool,
    pub include_second: bool,
}

impl Default for TimeTreeConfig {
    fn default() -> Self {
        Self::up_to(Level::Minute)
    }
}

impl TimeTreeConfig {
    /// Configuration enabling every level from Year down to `finest`.
    pub fn up_to(finest: Level) -> Self {
        let mut config = Self {
            first_day_of_week: Weekday::Sun,
            include_year: false,
            include_quarter: false,
            include_month: false,
            include_week: false,
            include_day: false,
            include_hour: false,
            include_minute: false,
            include_second: false,
        };
        for level in Level::ALL {
            if level <= finest {
                config.set_enabled(level, true);
            }
        }
        config
    }

    /// Loads configuration from the process environment, falling back to
    /// defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        if let Ok(raw) = env::var("TIMETREE_FIRST_DAY_OF_WEEK") {
            config.first_day_of_week =
                Weekday::from_str(&raw).map_err(|_| ConfigError::InvalidWeekday(raw))?;
        }

        for (key, level) in [
            ("TIMETREE_INCLUDE_YEAR", Level::Year),
            ("TIMETREE_INCLUDE_QUARTER", Level::Quarter),
            ("TIMETREE_INCLUDE_MONTH", Level::Month),
            ("TIMETREE_INCLUDE_WEEK", Level::Week),
            ("TIMETREE_INCLUDE_DAY", Level::Day),
            ("TIMETREE_INCLUDE_HOUR", Level::Hour),
            ("TIMETREE_INCLUDE_MINUTE", Level::Minute),
            ("TIMETREE_INCLUDE_SECOND", Level::Second),
        ] {
            if let Ok(raw) = env::var(key) {
                config.set_enabled(level, parse_flag(key, &raw)?);
            }
        }

        Ok(config)
    }

    pub fn is_enabled(&self, level: Level) -> bool {
        match level {
            Level::Year => self.include_year,
            Level::Quarter => self.include_quarter,
            Level::Month => self.include_month,
            Level::Week => self.include_week,
            Level::Day => self.include_day,
            Level::Hour => self.include_hour,
            Level::Minute => self.include_minute,
            Level::Second => self.include_second,
        }
    }

    pub fn set_enabled(&mut self, level: Level, enabled: bool) {
        match level {
            Level::Year => self.include_year = enabled,
            Level::Quarter => self.include_quarter = enabled,
            Level::Month => self.include_month = enabled,
            Level::Week => self.include_week = enabled,
            Level::Day => self.include_day = enabled,
            Level::Hour => self.include_hour = enabled,
            Level::Minute => self.include_minute = enabled,
            Level::Second => self.include_second = enabled,
        }
    }

    /// Enabled levels, coarsest first.
    pub fn enabled_levels(&self) -> Vec<Level> {
        Level::ALL
            .into_iter()
            .filter(|level| self.is_enabled(*level))
            .collect()
    }

    /// Rejects configurations that cannot build a tree at all.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled_levels().is_empty() {
            return Err(ConfigError::NoLevelsEnabled);
        }
        Ok(())
    }
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key,
            value: raw.to_string(),
        }),
    }
}
