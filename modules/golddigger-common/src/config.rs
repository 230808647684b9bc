use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use tracing::info;

use crate::error::ConfigError;

pub const DEFAULT_MODEL: &str = "claude-haiku-4-5-20251001";
pub const DEFAULT_MAX_COMMENTS: u32 = 100;
pub const DEFAULT_EXTRACTION_TIMEOUT_SECS: u64 = 30;

/// Which keyword set decides whether a comment counts as high-value.
///
/// One variant per deployment; the two sets are never combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoringVariant {
    /// Praise, gratitude and actionable feedback.
    #[default]
    HighValue,
    /// Remedy and medication stories, plus close-family mentions.
    HealthSignal,
}

impl FromStr for ScoringVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high_value" | "high-value" => Ok(ScoringVariant::HighValue),
            "health_signal" | "health-signal" | "health" => Ok(ScoringVariant::HealthSignal),
            other => Err(ConfigError::Invalid {
                key: "SCORING_VARIANT",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ScoringVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringVariant::HighValue => write!(f, "high_value"),
            ScoringVariant::HealthSignal => write!(f, "health_signal"),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    // YouTube Data API
    pub youtube_api_key: String,

    // Extraction model. `None` disables the model pass entirely.
    pub anthropic_api_key: Option<String>,
    pub anthropic_model: String,
    pub extraction_timeout: Duration,

    // Scoring
    pub scoring_variant: ScoringVariant,
    pub max_comments: u32,

    // Web server
    pub web_host: String,
    pub web_port: u16,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("youtube_api_key", &"<redacted>")
            .field(
                "anthropic_api_key",
                &self.anthropic_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("anthropic_model", &self.anthropic_model)
            .field("extraction_timeout", &self.extraction_timeout)
            .field("scoring_variant", &self.scoring_variant)
            .field("max_comments", &self.max_comments)
            .field("web_host", &self.web_host)
            .field("web_port", &self.web_port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let youtube_api_key =
            get("YOUTUBE_API_KEY").ok_or(ConfigError::Missing("YOUTUBE_API_KEY"))?;

        let scoring_variant = match get("SCORING_VARIANT") {
            Some(raw) => raw.parse()?,
            None => ScoringVariant::default(),
        };

        let extraction_timeout_secs: u64 =
            parse_or(
                "EXTRACTION_TIMEOUT_SECS",
                get("EXTRACTION_TIMEOUT_SECS"),
                DEFAULT_EXTRACTION_TIMEOUT_SECS,
            )?;
        let max_comments: u32 =
            parse_or("MAX_COMMENTS", get("MAX_COMMENTS"), DEFAULT_MAX_COMMENTS)?;
        let web_port: u16 = parse_or("WEB_PORT", get("WEB_PORT"), 3000)?;

        Ok(Self {
            youtube_api_key,
            anthropic_api_key: get("ANTHROPIC_API_KEY"),
            anthropic_model: get("ANTHROPIC_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            extraction_timeout: Duration::from_secs(extraction_timeout_secs.max(1)),
            scoring_variant,
            max_comments: max_comments.clamp(1, DEFAULT_MAX_COMMENTS),
            web_host: get("WEB_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            web_port,
        })
    }

    pub fn extraction_enabled(&self) -> bool {
        self.anthropic_api_key.is_some()
    }

    /// Log the effective configuration without secrets.
    pub fn log_redacted(&self) {
        info!(
            extraction_enabled = self.extraction_enabled(),
            model = self.anthropic_model.as_str(),
            timeout_secs = self.extraction_timeout.as_secs(),
            scoring_variant = %self.scoring_variant,
            max_comments = self.max_comments,
            "Configuration loaded"
        );
    }
}

fn parse_or<T: FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
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
    fn minimal_config_uses_defaults() {
        let config = Config::from_lookup(lookup(&[("YOUTUBE_API_KEY", "yt")])).unwrap();
        assert_eq!(config.youtube_api_key, "yt");
        assert!(!config.extraction_enabled());
        assert_eq!(config.anthropic_model, DEFAULT_MODEL);
        assert_eq!(config.scoring_variant, ScoringVariant::HighValue);
        assert_eq!(config.max_comments, 100);
        assert_eq!(config.extraction_timeout, Duration::from_secs(30));
        assert_eq!(config.web_host, "0.0.0.0");
        assert_eq!(config.web_port, 3000);
    }

    #[test]
    fn missing_youtube_key_is_an_error() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("YOUTUBE_API_KEY"));
    }

    #[test]
    fn blank_anthropic_key_disables_extraction() {
        let config = Config::from_lookup(lookup(&[
            ("YOUTUBE_API_KEY", "yt"),
            ("ANTHROPIC_API_KEY", "  "),
        ]))
        .unwrap();
        assert!(!config.extraction_enabled());
    }

    #[test]
    fn health_variant_and_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("YOUTUBE_API_KEY", "yt"),
            ("ANTHROPIC_API_KEY", "sk-ant"),
            ("SCORING_VARIANT", "health_signal"),
            ("MAX_COMMENTS", "500"),
            ("EXTRACTION_TIMEOUT_SECS", "5"),
            ("WEB_PORT", "8080"),
        ]))
        .unwrap();
        assert!(config.extraction_enabled());
        assert_eq!(config.scoring_variant, ScoringVariant::HealthSignal);
        assert_eq!(config.max_comments, 100);
        assert_eq!(config.extraction_timeout, Duration::from_secs(5));
        assert_eq!(config.web_port, 8080);
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let err = Config::from_lookup(lookup(&[("YOUTUBE_API_KEY", "yt"), ("WEB_PORT", "http")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "WEB_PORT",
                value: "http".into()
            }
        );
    }

    #[test]
    fn unknown_variant_is_rejected() {
        let err = "sentiment".parse::<ScoringVariant>().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "SCORING_VARIANT", .. }));
    }

    #[test]
    fn debug_output_redacts_keys() {
        let config = Config::from_lookup(lookup(&[
            ("YOUTUBE_API_KEY", "secret-yt"),
            ("ANTHROPIC_API_KEY", "secret-ant"),
        ]))
        .unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-yt"));
        assert!(!debug.contains("secret-ant"));
    }
}
