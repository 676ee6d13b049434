use url::Url;
use crate::error::{Result, ExplorerError};
use crate::core::wordcloud::colormap::{Colormap, Rgb};

/// Centralized configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a URL string
    pub fn validate_url(url: &str, field_name: &str) -> Result<()> {
        let parsed = Url::parse(url).map_err(|e| {
            ExplorerError::Validation(format!("Invalid {} URL '{}': {}", field_name, url, e))
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ExplorerError::Validation(format!(
                "{} URL must use http or https, got: {}",
                field_name, url
            )));
        }
        Ok(())
    }

    /// Validate numeric range
    pub fn validate_range<T>(value: T, min: T, max: T, field_name: &str) -> Result<()>
    where
        T: PartialOrd + std::fmt::Display + Copy,
    {
        if value < min || value > max {
            return Err(ExplorerError::Validation(format!(
                "{} must be between {} and {}, got {}",
                field_name, min, max, value
            )));
        }
        Ok(())
    }

    /// Validate a `#rgb` or `#rrggbb` colour
    pub fn validate_hex_color(value: &str, field_name: &str) -> Result<()> {
        Rgb::parse_hex(value).map(|_| ()).ok_or_else(|| {
            ExplorerError::Validation(format!(
                "{} must be a hex colour like #ffffff, got: {}",
                field_name, value
            ))
        })
    }

    /// Validate a colour scheme name
    pub fn validate_colormap(value: &str) -> Result<Colormap> {
        value.parse::<Colormap>().map_err(|_| {
            ExplorerError::Validation(format!(
                "Unknown color scheme '{}'. Use one of: {}",
                value,
                Colormap::ALL.iter().map(|c| c.name()).collect::<Vec<_>>().join(", ")
            ))
        })
    }

    pub fn validate_not_blank(value: &str, field_name: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(ExplorerError::Validation(format!("{} must not be empty", field_name)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(ConfigValidator::validate_url("https://api.genius.com", "Genius API").is_ok());
        assert!(ConfigValidator::validate_url("not-a-url", "Genius API").is_err());
        assert!(ConfigValidator::validate_url("ftp://api.genius.com", "Genius API").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(ConfigValidator::validate_range(150usize, 50, 300, "max words").is_ok());
        assert!(ConfigValidator::validate_range(301usize, 50, 300, "max words").is_err());
        assert!(ConfigValidator::validate_range(49usize, 50, 300, "max words").is_err());
    }

    #[test]
    fn test_validate_hex_color() {
        assert!(ConfigValidator::validate_hex_color("#ffffff", "background").is_ok());
        assert!(ConfigValidator::validate_hex_color("#fff", "background").is_ok());
        assert!(ConfigValidator::validate_hex_color("white", "background").is_err());
        assert!(ConfigValidator::validate_hex_color("#ggg", "background").is_err());
    }

    #[test]
    fn test_validate_colormap() {
        assert_eq!(ConfigValidator::validate_colormap("Plasma").unwrap(), Colormap::Plasma);
        assert!(ConfigValidator::validate_colormap("rainbow").is_err());
    }
}
