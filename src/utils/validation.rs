use crate::utils::error::{HomeScoreError, Result};
use std::collections::BTreeMap;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(HomeScoreError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(HomeScoreError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(HomeScoreError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(HomeScoreError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(HomeScoreError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Region codes must be ASCII digits, all of the same width.
pub fn validate_region_codes(field_name: &str, codes: &BTreeMap<String, String>) -> Result<()> {
    let mut width = None;

    for (name, code) in codes {
        validate_non_empty_string(field_name, name)?;

        if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(HomeScoreError::InvalidConfigValue {
                field: format!("{}.{}", field_name, name),
                value: code.clone(),
                reason: "Region code must be numeric".to_string(),
            });
        }

        match width {
            None => width = Some(code.len()),
            Some(w) if w != code.len() => {
                return Err(HomeScoreError::InvalidConfigValue {
                    field: format!("{}.{}", field_name, name),
                    value: code.clone(),
                    reason: format!("Region codes must all be {} digits wide", w),
                });
            }
            Some(_) => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("service.base_url", "https://api.census.gov/data").is_ok());
        assert!(validate_url("service.base_url", "http://localhost:8080").is_ok());
        assert!(validate_url("service.base_url", "").is_err());
        assert!(validate_url("service.base_url", "invalid-url").is_err());
        assert!(validate_url("service.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("service.timeout_seconds", 5, 1, 120).is_ok());
        assert!(validate_range("service.timeout_seconds", 0, 1, 120).is_err());
    }

    #[test]
    fn test_validate_region_codes() {
        let mut codes = BTreeMap::new();
        codes.insert("Alabama".to_string(), "01".to_string());
        codes.insert("California".to_string(), "06".to_string());
        assert!(validate_region_codes("regions", &codes).is_ok());

        codes.insert("Texas".to_string(), "4".to_string());
        assert!(validate_region_codes("regions", &codes).is_err());

        codes.insert("Texas".to_string(), "4x".to_string());
        assert!(validate_region_codes("regions", &codes).is_err());
    }
}
