use crate::utils::error::{EtlError, Result};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| EtlError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty<T>(field_name: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(EtlError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

/// Property names are matched as whole tokens, so they must look like one:
/// ASCII letters, digits and underscores.
pub fn validate_property_name(field_name: &str, name: &str) -> Result<()> {
    let well_formed = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');

    if !well_formed {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Property names may only contain ASCII letters, digits and '_'".to_string(),
        });
    }
    Ok(())
}

pub fn validate_properties(field_name: &str, properties: &[String]) -> Result<()> {
    validate_non_empty(field_name, properties)?;

    let mut seen = HashSet::new();
    for property in properties {
        validate_property_name(field_name, property)?;
        if !seen.insert(property.as_str()) {
            return Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: property.clone(),
                reason: "Property listed more than once".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("source_url", "https://www.unicode.org/Public/UCD/latest/ucd/DerivedCoreProperties.txt").is_ok());
        assert!(validate_url("source_url", "http://localhost:8080/ucd.txt").is_ok());
        assert!(validate_url("source_url", "").is_err());
        assert!(validate_url("source_url", "invalid-url").is_err());
        assert!(validate_url("source_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output_dir", "./out").is_ok());
        assert!(validate_path("output_dir", "").is_err());
        assert!(validate_path("output_dir", "a\0b").is_err());
    }

    #[test]
    fn test_validate_properties() {
        let ok = vec!["XID_Start".to_string(), "XID_Continue".to_string()];
        assert!(validate_properties("properties", &ok).is_ok());

        assert!(validate_properties("properties", &[]).is_err());

        let spaced = vec!["XID Start".to_string()];
        assert!(validate_properties("properties", &spaced).is_err());

        let duplicated = vec!["XID_Start".to_string(), "XID_Start".to_string()];
        assert!(validate_properties("properties", &duplicated).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("out".to_string());
        assert_eq!(validate_required_field("output_dir", &present).unwrap(), "out");

        let absent: Option<String> = None;
        assert!(matches!(
            validate_required_field("output_dir", &absent),
            Err(EtlError::MissingConfigError { .. })
        ));
    }
}
