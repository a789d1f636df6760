//! Admin settings.

use std::env;

use chrono::{FixedOffset, Offset, TimeDelta, Utc};
use citizen_survey::{ConfigError, TrendBucketing, config::try_load};

pub const DEFAULT_SESSION_TTL_MINUTES: u32 = 480;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminConfig {
    /// How long an admin session stays valid after login.
    pub session_ttl_minutes: u32,

    pub trend_bucketing: TrendBucketing,

    /// Zone the dashboard takes calendar dates in.
    pub utc_offset: FixedOffset,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            session_ttl_minutes: DEFAULT_SESSION_TTL_MINUTES,
            trend_bucketing: TrendBucketing::default(),
            utc_offset: Utc.fix(),
        }
    }
}

impl AdminConfig {
    /// Load from `ADMIN_SESSION_TTL_MINUTES`, `SURVEY_TREND_BUCKETING` and
    /// `SURVEY_UTC_OFFSET`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let session_ttl_minutes: u32 = try_load(&lookup, "ADMIN_SESSION_TTL_MINUTES", "480")?;
        if session_ttl_minutes == 0 {
            return Err(ConfigError::invalid(
                "ADMIN_SESSION_TTL_MINUTES",
                "must be at least one minute",
            ));
        }

        Ok(Self {
            session_ttl_minutes,
            trend_bucketing: try_load(&lookup, "SURVEY_TREND_BUCKETING", "calendar")?,
            utc_offset: try_load(&lookup, "SURVEY_UTC_OFFSET", "+00:00")?,
        })
    }

    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    pub fn session_ttl(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.session_ttl_minutes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AdminConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, AdminConfig::default());
        assert_eq!(config.session_ttl(), TimeDelta::hours(8));
        assert_eq!(config.utc_offset.local_minus_utc(), 0);
    }

    #[test]
    fn reads_every_key() {
        let config = AdminConfig::from_lookup(|key: &str| match key {
            "ADMIN_SESSION_TTL_MINUTES" => Some("30".into()),
            "SURVEY_TREND_BUCKETING" => Some("rolling".into()),
            "SURVEY_UTC_OFFSET" => Some("+07:00".into()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.session_ttl(), TimeDelta::minutes(30));
        assert_eq!(config.trend_bucketing, TrendBucketing::RollingOffset);
        assert_eq!(config.utc_offset.local_minus_utc(), 7 * 3600);
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let err = AdminConfig::from_lookup(|key: &str| {
            (key == "ADMIN_SESSION_TTL_MINUTES").then(|| "0".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains("ADMIN_SESSION_TTL_MINUTES"));
    }

    #[test]
    fn malformed_offset_is_rejected() {
        let err = AdminConfig::from_lookup(|key: &str| {
            (key == "SURVEY_UTC_OFFSET").then(|| "Asia/Jakarta".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains("SURVEY_UTC_OFFSET"));
    }
}
