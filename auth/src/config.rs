use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use secrecy::SecretString;
use serde::Deserialize;

use crate::jwt::DEFAULT_ACCESS_TOKEN_TTL;
use crate::renewal::DEFAULT_RENEWAL_TOKEN_TTL_DAYS;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub jwt: JwtConfig,
    #[serde(default)]
    pub renewal: RenewalConfig,
    #[serde(default)]
    pub password: PasswordConfig,
    #[serde(default)]
    pub api_key: ApiKeyConfig,
}

#[derive(Debug, Deserialize)]
pub struct JwtConfig {
    pub secret: SecretString,
    #[serde(default = "default_access_token_ttl_seconds")]
    pub access_token_ttl_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RenewalConfig {
    pub ttl_days: i64,
}

/// Argon2id cost parameters.
#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

/// Key expected from trusted callers such as the billing webhook.
#[derive(Debug, Deserialize, Default)]
pub struct ApiKeyConfig {
    pub key: Option<SecretString>,
}

fn default_access_token_ttl_seconds() -> u64 {
    DEFAULT_ACCESS_TOKEN_TTL.as_secs()
}

impl Default for RenewalConfig {
    fn default() -> Self {
        Self {
            ttl_days: DEFAULT_RENEWAL_TOKEN_TTL_DAYS,
        }
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: argon2::Params::DEFAULT_M_COST,
            iterations: argon2::Params::DEFAULT_T_COST,
            parallelism: argon2::Params::DEFAULT_P_COST,
        }
    }
}

impl Config {
    /// Configuration with defaults everywhere except the signing secret.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt: JwtConfig {
                secret: SecretString::from(secret.into()),
                access_token_ttl_seconds: default_access_token_ttl_seconds(),
            },
            renewal: RenewalConfig::default(),
            password: PasswordConfig::default(),
            api_key: ApiKeyConfig::default(),
        }
    }

    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (CHIRPY__JWT__SECRET, CHIRPY__RENEWAL__TTL_DAYS, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: CHIRPY__JWT__SECRET=... overrides jwt.secret
            .add_source(
                Environment::with_prefix("CHIRPY")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("CHIRPY__JWT__SECRET", Some("env_secret")),
                ("CHIRPY__JWT__ACCESS_TOKEN_TTL_SECONDS", Some("900")),
                ("CHIRPY__RENEWAL__TTL_DAYS", Some("7")),
                ("CHIRPY__API_KEY__KEY", Some("webhook-key")),
            ],
            || {
                let config = Config::load().expect("Failed to load config");

                assert_eq!(config.jwt.secret.expose_secret(), "env_secret");
                assert_eq!(config.jwt.access_token_ttl_seconds, 900);
                assert_eq!(config.renewal.ttl_days, 7);
                assert_eq!(
                    config.api_key.key.as_ref().map(|key| key.expose_secret()),
                    Some("webhook-key")
                );
            },
        );
    }

    #[test]
    fn test_defaults_apply() {
        temp_env::with_vars(
            [
                ("CHIRPY__JWT__SECRET", Some("env_secret")),
                ("CHIRPY__JWT__ACCESS_TOKEN_TTL_SECONDS", None),
                ("CHIRPY__RENEWAL__TTL_DAYS", None),
                ("CHIRPY__API_KEY__KEY", None),
            ],
            || {
                let config = Config::load().expect("Failed to load config");

                assert_eq!(config.jwt.access_token_ttl_seconds, 3600);
                assert_eq!(config.renewal.ttl_days, 60);
                assert_eq!(config.password.iterations, argon2::Params::DEFAULT_T_COST);
                assert!(config.api_key.key.is_none());
            },
        );
    }

    #[test]
    fn test_secret_is_required() {
        temp_env::with_vars([("CHIRPY__JWT__SECRET", None::<&str>)], || {
            assert!(Config::load().is_err());
        });
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = Config::with_secret("super_secret_value");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super_secret_value"));
    }
}
