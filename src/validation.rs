use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult = Result<(), ValidationError>;

pub fn validate_required(field: &'static str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }

    Ok(())
}

pub fn validate_min_len(field: &'static str, value: &str, min_len: usize) -> ValidationResult {
    if value.trim().len() < min_len {
        return Err(ValidationError::new(
            field,
            format!("must be at least {} characters", min_len),
        ));
    }

    Ok(())
}

pub fn validate_email(field: &'static str, value: &str) -> ValidationResult {
    let valid = match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    };

    if !valid {
        return Err(ValidationError::new(field, "must be a valid email address"));
    }

    Ok(())
}

pub fn validate_at_least(field: &'static str, value: i32, min: i32) -> ValidationResult {
    if value < min {
        return Err(ValidationError::new(field, format!("must be at least {}", min)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_rejects_blank() {
        assert!(validate_required("address", "   ").is_err());
        assert!(validate_required("address", "Calle 100 #8-60").is_ok());
    }

    #[test]
    fn test_validate_min_len() {
        assert!(validate_min_len("name", "J", 2).is_err());
        assert!(validate_min_len("name", "Juan", 2).is_ok());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("email", "juan@example.com").is_ok());
        assert!(validate_email("email", "not-an-email").is_err());
        assert!(validate_email("email", "@example.com").is_err());
        assert!(validate_email("email", "juan@nodot").is_err());
    }

    #[test]
    fn test_validate_at_least() {
        assert!(validate_at_least("quantity", 0, 1).is_err());
        assert!(validate_at_least("quantity", 1, 1).is_ok());
    }

    #[test]
    fn test_error_message_includes_field() {
        let err = validate_required("city", "").unwrap_err();
        assert_eq!(err.to_string(), "city: must not be empty");
    }
}
