//! Field rules shared by servicio and subservicio writers.

use crate::errors::ModelError;

pub const MAX_NAME_LEN: usize = 128;

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(ModelError::Validation(format!("name too long (<= {MAX_NAME_LEN})")));
    }
    Ok(())
}

pub fn validate_price(price_cents: i64) -> Result<(), ModelError> {
    if price_cents < 0 {
        return Err(ModelError::Validation("price must be >= 0".into()));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ModelError::Validation("invalid email".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_rejected() {
        let err = validate_name("   ").unwrap_err();
        assert!(matches!(err, ModelError::Validation(ref m) if m == "name required"));
    }

    #[test]
    fn long_name_rejected() {
        assert!(validate_name(&"x".repeat(MAX_NAME_LEN + 1)).is_err());
        assert!(validate_name(&"x".repeat(MAX_NAME_LEN)).is_ok());
    }

    #[test]
    fn negative_price_rejected() {
        assert!(validate_price(-1).is_err());
        assert!(validate_price(0).is_ok());
    }

    #[test]
    fn email_needs_both_sides() {
        assert!(validate_email("a@b.cl").is_ok());
        assert!(validate_email("@b.cl").is_err());
        assert!(validate_email("ab.cl").is_err());
    }
}
