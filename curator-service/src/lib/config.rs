use std::env;

use auth::HashScheme;
use auth::PasswordError;
use auth::PasswordHasher;
use auth::TokenSettings;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Token signing and password hashing settings.
///
/// An empty `secret_key` is accepted here and rejected when the token codec
/// is built, so a missing secret fails startup with a precise error.
#[derive(Deserialize, Clone)]
pub struct AuthConfig {
    #[serde(default)]
    pub secret_key: String,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_access_token_ttl_minutes")]
    pub access_token_ttl_minutes: i64,
    #[serde(default = "default_password_scheme")]
    pub password_scheme: String,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

fn default_max_connections() -> u32 {
    5
}

fn default_algorithm() -> String {
    auth::jwt::settings::DEFAULT_ALGORITHM.to_string()
}

fn default_access_token_ttl_minutes() -> i64 {
    auth::jwt::settings::DEFAULT_ACCESS_TOKEN_TTL_MINUTES
}

fn default_password_scheme() -> String {
    "bcrypt".to_string()
}

fn default_bcrypt_cost() -> u32 {
    12
}

impl AuthConfig {
    pub fn token_settings(&self) -> TokenSettings {
        TokenSettings::new(self.secret_key.clone())
            .with_algorithm(self.algorithm.clone())
            .with_access_token_ttl(chrono::Duration::minutes(self.access_token_ttl_minutes))
    }

    pub fn password_hasher(&self) -> Result<PasswordHasher, PasswordError> {
        let scheme: HashScheme = self.password_scheme.parse()?;
        PasswordHasher::with_scheme(scheme, self.bcrypt_cost)
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret_key", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("access_token_ttl_minutes", &self.access_token_ttl_minutes)
            .field("password_scheme", &self.password_scheme)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Bare SECRET_KEY, ALGORITHM, ACCESS_TOKEN_EXPIRE_MINUTES variables
    /// 2. Environment variables (DATABASE__URL, AUTH__SECRET_KEY, etc.)
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__"))
            .set_override_option("auth.secret_key", env::var("SECRET_KEY").ok())?
            .set_override_option("auth.algorithm", env::var("ALGORITHM").ok())?
            .set_override_option(
                "auth.access_token_ttl_minutes",
                env::var("ACCESS_TOKEN_EXPIRE_MINUTES").ok(),
            )?
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}
