use crate::utils::error::{Result, SkillError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| SkillError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SkillError::InvalidConfigValueError {
            field: field_name.to_string(),
            // never echo secrets back, only their shape
            value: format!("<{} chars>", value.len()),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
