use crate::utils::error::{ReportError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> ReportError {
    ReportError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_file_name(field_name: &str, file_name: &str, extension: &str) -> Result<()> {
    validate_path(field_name, file_name)?;

    if file_name.contains('/') || file_name.contains('\\') {
        return Err(invalid(
            field_name,
            file_name,
            "File name must not contain path separators",
        ));
    }

    match std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(ext) if ext == extension => Ok(()),
        Some(ext) => Err(invalid(
            field_name,
            file_name,
            format!("Unsupported file extension: {}. Expected: {}", ext, extension),
        )),
        None => Err(invalid(
            field_name,
            file_name,
            "File has no extension or invalid filename",
        )),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
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
        return Err(invalid(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

/// Resources drawn per type: `min <= max <= MAX_RESOURCES_PER_TYPE`.
pub const MAX_RESOURCES_PER_TYPE: usize = 1000;

pub fn validate_per_type_bounds(min: usize, max: usize) -> Result<()> {
    validate_range("max_per_type", max, 0, MAX_RESOURCES_PER_TYPE)?;
    if min > max {
        return Err(invalid(
            "min_per_type",
            min,
            format!("Value must not exceed max_per_type ({})", max),
        ));
    }
    Ok(())
}

pub fn validate_account_id(field_name: &str, account_id: &str) -> Result<()> {
    if account_id.len() != 12 || !account_id.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid(
            field_name,
            account_id,
            "Account ID must be exactly 12 digits",
        ));
    }
    Ok(())
}

pub fn validate_accounts(field_name: &str, accounts: &[(String, String)]) -> Result<()> {
    if accounts.is_empty() {
        return Err(ReportError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    let mut seen = HashSet::new();
    for (id, name) in accounts {
        validate_account_id(&format!("{}.id", field_name), id)?;
        validate_non_empty_string(&format!("{}.name", field_name), name)?;
        if !seen.insert(id.as_str()) {
            return Err(invalid(field_name, id, "Duplicate account ID"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output_path", "./output").is_ok());
        assert!(validate_path("output_path", "").is_err());
        assert!(validate_path("output_path", "out\0put").is_err());
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("file_name", "scan.json", "json").is_ok());
        assert!(validate_file_name("file_name", "scan.txt", "json").is_err());
        assert!(validate_file_name("file_name", "scan", "json").is_err());
        assert!(validate_file_name("file_name", "nested/scan.json", "json").is_err());
    }

    #[test]
    fn test_validate_per_type_bounds() {
        assert!(validate_per_type_bounds(5, 15).is_ok());
        assert!(validate_per_type_bounds(0, 0).is_ok());
        assert!(validate_per_type_bounds(16, 15).is_err());
        assert!(validate_per_type_bounds(1, 5000).is_err());
    }

    #[test]
    fn test_validate_accounts() {
        let accounts = vec![
            ("123456789012".to_string(), "Production".to_string()),
            ("234567890123".to_string(), "Staging".to_string()),
        ];
        assert!(validate_accounts("accounts", &accounts).is_ok());
        assert!(validate_accounts("accounts", &[]).is_err());

        let duplicated = vec![
            ("123456789012".to_string(), "Production".to_string()),
            ("123456789012".to_string(), "Again".to_string()),
        ];
        assert!(validate_accounts("accounts", &duplicated).is_err());

        let short_id = vec![("1234".to_string(), "Short".to_string())];
        assert!(validate_accounts("accounts", &short_id).is_err());

        let blank_name = vec![("123456789012".to_string(), "  ".to_string())];
        assert!(validate_accounts("accounts", &blank_name).is_err());
    }
}
