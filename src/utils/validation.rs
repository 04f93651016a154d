use crate::utils::error::{AnalyticsError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(AnalyticsError::ConfigError {
            message: format!("{} cannot be empty", field_name),
        });
    }

    if path.contains('\0') {
        return Err(AnalyticsError::ConfigError {
            message: format!("{} contains null bytes", field_name),
        });
    }

    Ok(())
}

pub fn validate_port(field_name: &str, port: u16) -> Result<()> {
    if port == 0 {
        return Err(AnalyticsError::ConfigError {
            message: format!("{} must be a non-zero port number", field_name),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_is_rejected() {
        assert!(validate_path("db_path", "").is_err());
        assert!(validate_path("db_path", "./analytics.db").is_ok());
    }

    #[test]
    fn zero_port_is_rejected() {
        assert!(validate_port("port", 0).is_err());
        assert!(validate_port("port", 8080).is_ok());
    }
}
