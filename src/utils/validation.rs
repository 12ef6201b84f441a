use crate::utils::error::{ExpenseError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ExpenseError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_list<T>(field_name: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(ExpenseError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

/// 比對時不分大小寫，所以重複判斷也不分
pub fn validate_unique_keywords(field_name: &str, values: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value.trim().to_lowercase()) {
            return Err(ExpenseError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.clone(),
                reason: "Duplicate keyword".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[String]) -> Result<()> {
    let needle = value.trim().to_lowercase();
    if !allowed.iter().any(|a| a.trim().to_lowercase() == needle) {
        return Err(ExpenseError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be one of: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

pub fn validate_log_level(field_name: &str, level: &str) -> Result<()> {
    match level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ExpenseError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: level.to_string(),
            reason: "Valid levels: trace, debug, info, warn, error".to_string(),
        }),
    }
}
