use crate::utils::error::{AirlinkError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AirlinkError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// SSID 最長 32 bytes (802.11)
pub fn validate_ssid(field_name: &str, ssid: &str) -> Result<()> {
    validate_non_empty_string(field_name, ssid)?;

    if ssid.len() > 32 {
        return Err(AirlinkError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: ssid.to_string(),
            reason: format!("SSID is {} bytes long, the limit is 32", ssid.len()),
        });
    }
    Ok(())
}

pub fn validate_interface_name(field_name: &str, name: &str) -> Result<()> {
    validate_non_empty_string(field_name, name)?;

    if name.chars().any(|c| c.is_whitespace() || c == '\0') {
        return Err(AirlinkError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Interface name cannot contain whitespace or null bytes".to_string(),
        });
    }
    Ok(())
}

pub fn validate_host(field_name: &str, host: &str) -> Result<()> {
    validate_non_empty_string(field_name, host)?;

    if host.starts_with('-') {
        return Err(AirlinkError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: host.to_string(),
            reason: "Host cannot start with '-'".to_string(),
        });
    }

    let valid = host
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':' | '_'));
    if !valid {
        return Err(AirlinkError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: host.to_string(),
            reason: "Host must be an IP address or a DNS name".to_string(),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(AirlinkError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(AirlinkError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| AirlinkError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(AirlinkError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
