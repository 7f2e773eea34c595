// Settings module
// User configuration loaded from config.toml

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::locale::Locale;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost/Innovatech/Config/getCalendarData.php";

/// How a project's start/end span is expanded into index entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanPolicy {
    /// Only the start day and the end day get an event.
    #[default]
    Point,
    /// Every day from start to end (inclusive) gets an event.
    Range,
}

impl fmt::Display for SpanPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point => write!(f, "point"),
            Self::Range => write!(f, "range"),
        }
    }
}

impl FromStr for SpanPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "point" => Ok(Self::Point),
            "range" => Ok(Self::Range),
            other => Err(format!("Unknown span policy '{}' (expected point or range)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub backend_url: String,
    pub span_policy: SpanPolicy,
    pub locale: Locale,
    /// Leftmost column of month grids: 0 = Sunday, 1 = Monday, ...
    pub first_day_of_week: u8,
    pub request_timeout_secs: u64,
    pub max_retries: usize,
    pub retry_delay_ms: u64,
    pub max_response_bytes: usize,
    /// Longest project span expanded under the range policy.
    pub max_range_days: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            span_policy: SpanPolicy::Point,
            locale: Locale::PtBr,
            first_day_of_week: 0, // Sunday
            request_timeout_secs: 20,
            max_retries: 2,
            retry_delay_ms: 400,
            max_response_bytes: 5 * 1024 * 1024,
            max_range_days: 1830,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), String> {
        let url = self.backend_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err("Backend URL must start with http:// or https://".to_string());
        }

        if self.first_day_of_week > 6 {
            return Err("First day of week must be between 0 (Sunday) and 6 (Saturday)".to_string());
        }

        if self.request_timeout_secs == 0 {
            return Err("Request timeout must be greater than 0 seconds".to_string());
        }

        if self.max_response_bytes == 0 {
            return Err("Maximum response size must be greater than 0 bytes".to_string());
        }

        if self.max_range_days == 0 {
            return Err("Maximum range length must be at least 1 day".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.span_policy, SpanPolicy::Point);
        assert_eq!(settings.locale, Locale::PtBr);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            span_policy = "range"
            locale = "en"
            "#,
        )
        .unwrap();

        assert_eq!(settings.span_policy, SpanPolicy::Range);
        assert_eq!(settings.locale, Locale::En);
        assert_eq!(settings.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(settings.max_retries, 2);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.backend_url = "ftp://example.com".to_string();
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.first_day_of_week = 7;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.request_timeout_secs = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_span_policy_from_str() {
        assert_eq!("RANGE".parse::<SpanPolicy>().unwrap(), SpanPolicy::Range);
        assert!("both".parse::<SpanPolicy>().is_err());
    }
}
