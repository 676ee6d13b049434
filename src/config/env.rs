use std::env;
use crate::error::{Result, ExplorerError};

/// Environment variable configuration constants
pub struct EnvVars;

impl EnvVars {
    pub const PREFIX: &'static str = "LYRICS_EXPLORER_";

    pub const GENIUS_TOKEN: &'static str = "GENIUS_TOKEN";
    pub const PREFIXED_GENIUS_TOKEN: &'static str = "LYRICS_EXPLORER_GENIUS_TOKEN";
    pub const API_BASE_URL: &'static str = "LYRICS_EXPLORER_API_BASE_URL";
    pub const ARTIST: &'static str = "LYRICS_EXPLORER_ARTIST";
    pub const DEFAULT_TITLE: &'static str = "LYRICS_EXPLORER_DEFAULT_TITLE";
    pub const EXCLUDED_TERMS: &'static str = "LYRICS_EXPLORER_EXCLUDED_TERMS";
    pub const TIMEOUT_SECS: &'static str = "LYRICS_EXPLORER_TIMEOUT_SECS";
    pub const MAX_RETRIES: &'static str = "LYRICS_EXPLORER_MAX_RETRIES";
    pub const RETRY_DELAY_MS: &'static str = "LYRICS_EXPLORER_RETRY_DELAY_MS";
    pub const USER_AGENT: &'static str = "LYRICS_EXPLORER_USER_AGENT";
    pub const MAX_WORDS: &'static str = "LYRICS_EXPLORER_MAX_WORDS";
    pub const BACKGROUND_COLOR: &'static str = "LYRICS_EXPLORER_BACKGROUND_COLOR";
    pub const COLORMAP: &'static str = "LYRICS_EXPLORER_COLORMAP";
    pub const CACHE_ENABLED: &'static str = "LYRICS_EXPLORER_CACHE_ENABLED";
    pub const CACHE_MAX_AGE_HOURS: &'static str = "LYRICS_EXPLORER_CACHE_MAX_AGE_HOURS";

    // Special environment variables
    pub const CI: &'static str = "CI";
    pub const FORCE_TERMINAL_UI: &'static str = "LYRICS_EXPLORER_FORCE_TERMINAL_UI";
}

/// Environment variable parsing utilities with validation
pub struct EnvParser;

impl EnvParser {
    /// Parse environment variable as string with validation
    pub fn parse_string(var_name: &str, validator: Option<fn(&str) -> Result<()>>) -> Result<Option<String>> {
        match env::var(var_name) {
            Ok(value) => {
                let trimmed = value.trim().to_string();
                if trimmed.is_empty() {
                    return Ok(None);
                }

                if let Some(validate_fn) = validator {
                    validate_fn(&trimmed)?;
                }

                Ok(Some(trimmed))
            }
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => {
                Err(ExplorerError::Validation(format!(
                    "Environment variable {} contains invalid UTF-8",
                    var_name
                )))
            }
        }
    }

    /// Parse environment variable as boolean with validation
    pub fn parse_bool(var_name: &str) -> Result<Option<bool>> {
        if let Some(value_str) = Self::parse_string(var_name, None)? {
            match parse_bool_str(&value_str) {
                Some(value) => Ok(Some(value)),
                None => Err(ExplorerError::Validation(format!(
                    "Invalid boolean value in {}: '{}'. Use: true/false, 1/0, yes/no, on/off",
                    var_name, value_str
                ))),
            }
        } else {
            Ok(None)
        }
    }

    /// Parse environment variable as u64 with range validation
    pub fn parse_u64(var_name: &str, min: u64, max: u64) -> Result<Option<u64>> {
        if let Some(value_str) = Self::parse_string(var_name, None)? {
            let value = value_str.parse::<u64>().map_err(|_| {
                ExplorerError::Validation(format!(
                    "Invalid number in {}: '{}'. Must be a positive integer",
                    var_name, value_str
                ))
            })?;

            if value < min || value > max {
                return Err(ExplorerError::Validation(format!(
                    "Value in {} must be between {} and {}, got {}",
                    var_name, min, max, value
                )));
            }

            Ok(Some(value))
        } else {
            Ok(None)
        }
    }

    /// Parse a comma-separated list, dropping empty items
    pub fn parse_list(var_name: &str) -> Result<Option<Vec<String>>> {
        Ok(Self::parse_string(var_name, None)?.map(|value| {
            value
                .split(',')
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect()
        }))
    }

    /// Get all prefixed environment variables for display, secrets masked
    pub fn get_all_vars() -> Vec<(String, String)> {
        let mut vars: Vec<(String, String)> = env::vars()
            .filter(|(key, _)| key.starts_with(EnvVars::PREFIX) || key == EnvVars::GENIUS_TOKEN)
            .map(|(key, value)| {
                if key.ends_with("GENIUS_TOKEN") {
                    (key, mask_secret(&value))
                } else {
                    (key, value)
                }
            })
            .collect();
        vars.sort();
        vars
    }
}

pub fn parse_bool_str(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Keep only the last four characters of a secret
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_parse_bool() {
        env::set_var("LE_TEST_BOOL_TRUE", "yes");
        env::set_var("LE_TEST_BOOL_FALSE", "0");
        env::set_var("LE_TEST_BOOL_INVALID", "maybe");

        assert_eq!(EnvParser::parse_bool("LE_TEST_BOOL_TRUE").unwrap(), Some(true));
        assert_eq!(EnvParser::parse_bool("LE_TEST_BOOL_FALSE").unwrap(), Some(false));
        assert!(EnvParser::parse_bool("LE_TEST_BOOL_INVALID").is_err());
        assert_eq!(EnvParser::parse_bool("LE_TEST_BOOL_NOT_SET").unwrap(), None);

        env::remove_var("LE_TEST_BOOL_TRUE");
        env::remove_var("LE_TEST_BOOL_FALSE");
        env::remove_var("LE_TEST_BOOL_INVALID");
    }

    #[test]
    fn test_parse_u64() {
        env::set_var("LE_TEST_U64_VALID", "42");
        env::set_var("LE_TEST_U64_OUT_OF_RANGE", "150");
        env::set_var("LE_TEST_U64_INVALID", "not_a_number");

        assert_eq!(EnvParser::parse_u64("LE_TEST_U64_VALID", 1, 100).unwrap(), Some(42));
        assert!(EnvParser::parse_u64("LE_TEST_U64_OUT_OF_RANGE", 1, 100).is_err());
        assert!(EnvParser::parse_u64("LE_TEST_U64_INVALID", 1, 100).is_err());
        assert_eq!(EnvParser::parse_u64("LE_TEST_U64_NOT_SET", 1, 100).unwrap(), None);

        env::remove_var("LE_TEST_U64_VALID");
        env::remove_var("LE_TEST_U64_OUT_OF_RANGE");
        env::remove_var("LE_TEST_U64_INVALID");
    }

    #[test]
    fn test_parse_list() {
        env::set_var("LE_TEST_LIST", "(Remix), (Live),, (Demo) ");
        assert_eq!(
            EnvParser::parse_list("LE_TEST_LIST").unwrap(),
            Some(vec!["(Remix)".to_string(), "(Live)".to_string(), "(Demo)".to_string()])
        );
        env::remove_var("LE_TEST_LIST");
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("abcdefgh"), "****efgh");
        assert_eq!(mask_secret("abc"), "***");
    }
}
