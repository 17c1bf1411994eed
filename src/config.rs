//! Runtime configuration from environment variables
//!
//! Recognized variables:
//!   QUOTE_RATE_TABLE, QUOTE_OUTPUT_DIR, QUOTE_CSV_DELIMITER,
//!   QUOTE_NO_MATCH_POLICY (last-band | reject),
//!   QUOTE_UNKNOWN_PRICE_POLICY (zero | reject)

use crate::pricing::{NoMatchPolicy, PricingPolicy, UnknownPricePolicy};
use crate::rates::DEFAULT_RATE_TABLE_PATH;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_OUTPUT_DIR: &str = "output";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var}: {message}")]
    InvalidValue { var: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuoteConfig {
    pub rate_table_path: PathBuf,
    pub output_dir: PathBuf,
    pub csv_delimiter: u8,
    pub policy: PricingPolicy,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            rate_table_path: PathBuf::from(DEFAULT_RATE_TABLE_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            csv_delimiter: b',',
            policy: PricingPolicy::default(),
        }
    }
}

impl QuoteConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("QUOTE_RATE_TABLE") {
            config.rate_table_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup("QUOTE_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(delim) = lookup("QUOTE_CSV_DELIMITER") {
            config.csv_delimiter = parse_delimiter(&delim).map_err(|message| ConfigError::InvalidValue {
                var: "QUOTE_CSV_DELIMITER",
                message,
            })?;
        }
        if let Some(policy) = lookup("QUOTE_NO_MATCH_POLICY") {
            config.policy.no_match = policy
                .parse::<NoMatchPolicy>()
                .map_err(|message| ConfigError::InvalidValue {
                    var: "QUOTE_NO_MATCH_POLICY",
                    message,
                })?;
        }
        if let Some(policy) = lookup("QUOTE_UNKNOWN_PRICE_POLICY") {
            config.policy.unknown_price = policy
                .parse::<UnknownPricePolicy>()
                .map_err(|message| ConfigError::InvalidValue {
                    var: "QUOTE_UNKNOWN_PRICE_POLICY",
                    message,
                })?;
        }

        Ok(config)
    }
}

/// Single ASCII delimiter; `tab` and `\t` name the tab character
pub fn parse_delimiter(text: &str) -> Result<u8, String> {
    match text {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        s if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        other => Err(format!("delimiter must be a single ASCII character, got '{}'", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = QuoteConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, QuoteConfig::default());
        assert_eq!(config.policy.no_match, NoMatchPolicy::LastBand);
        assert_eq!(config.policy.unknown_price, UnknownPricePolicy::Zero);
    }

    #[test]
    fn test_overrides() {
        let config = QuoteConfig::from_lookup(lookup_from(&[
            ("QUOTE_RATE_TABLE", "/data/tabela.csv"),
            ("QUOTE_CSV_DELIMITER", ";"),
            ("QUOTE_NO_MATCH_POLICY", "reject"),
        ]))
        .unwrap();

        assert_eq!(config.rate_table_path, PathBuf::from("/data/tabela.csv"));
        assert_eq!(config.csv_delimiter, b';');
        assert_eq!(config.policy.no_match, NoMatchPolicy::Reject);
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
    }

    #[test]
    fn test_invalid_values() {
        let err = QuoteConfig::from_lookup(lookup_from(&[("QUOTE_CSV_DELIMITER", ";;")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var: "QUOTE_CSV_DELIMITER", .. }));

        let err = QuoteConfig::from_lookup(lookup_from(&[("QUOTE_UNKNOWN_PRICE_POLICY", "guess")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var: "QUOTE_UNKNOWN_PRICE_POLICY", .. }));
    }

    #[test]
    fn test_tab_delimiter() {
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert_eq!(parse_delimiter(","), Ok(b','));
        assert!(parse_delimiter("é").is_err());
    }
}
