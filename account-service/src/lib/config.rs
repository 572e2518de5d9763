use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::account::deadline::StoreDeadline;

const RECOMMENDED_SECRET_LENGTH: usize = 32;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub jwt: JwtConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StoreConfig {
    pub timeout_ms: Option<u64>,
}

impl StoreConfig {
    pub fn deadline(&self) -> StoreDeadline {
        match self.timeout_ms {
            Some(ms) => StoreDeadline::after(Duration::from_millis(ms)),
            None => StoreDeadline::none(),
        }
    }
}

/// Administrator account created by the initial setup.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BootstrapConfig {
    pub admin_username: String,
    pub admin_password: String,
    pub admin_first_name: String,
    pub admin_last_name: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            admin_username: "admin".to_string(),
            admin_password: "Admin1!".to_string(),
            admin_first_name: "Default".to_string(),
            admin_last_name: "Administrator".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, STORE__TIMEOUT_MS, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Unprefixed, `__` separates levels: JWT__SECRET=... sets jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the services cannot run with.
    ///
    /// # Errors
    /// * `Message` - Signing secret is empty or whitespace
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must not be empty".to_string(),
            ));
        }

        if self.jwt.secret.len() < RECOMMENDED_SECRET_LENGTH {
            tracing::warn!(
                length = self.jwt.secret.len(),
                recommended = RECOMMENDED_SECRET_LENGTH,
                "jwt.secret is shorter than recommended"
            );
        }

        Ok(())
    }
}
