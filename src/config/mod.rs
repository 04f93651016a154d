use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_port, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "vendor-analytics")]
#[command(about = "REST backend for vendor CRM collections and analytics")]
pub struct ServerConfig {
    #[arg(long, default_value = "8080")]
    pub port: u16,

    #[arg(long, default_value = "./analytics.db")]
    pub db_path: String,

    #[arg(long, help = "Keep documents in memory instead of SQLite")]
    pub in_memory: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        validate_port("port", self.port)?;
        if !self.in_memory {
            validate_path("db_path", &self.db_path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ServerConfig {
        ServerConfig {
            port: 8080,
            db_path: "./analytics.db".to_string(),
            in_memory: false,
            verbose: false,
        }
    }

    #[test]
    fn default_shape_validates() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn empty_db_path_fails_unless_in_memory() {
        let mut cfg = config();
        cfg.db_path = String::new();
        assert!(cfg.validate().is_err());

        cfg.in_memory = true;
        assert!(cfg.validate().is_ok());
    }
}
