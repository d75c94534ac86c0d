//! Layered configuration loading
//!
//! Precedence, lowest first:
//! 1. built-in defaults overlaid with the flat environment variables read by
//!    [`AppConfig::from_env`] (`DATABASE_URL`, `REDIS_URL`, `JWT_*`, ...)
//! 2. the optional per-environment file (`config.<environment>.toml`)
//! 3. nested `AUTH__` variables, e.g. `AUTH__SERVER__PORT=9000`

use ::config::{Config, ConfigError, Environment as EnvSource, File};

use auth_shared::config::AppConfig;

/// Prefix of the nested environment overrides
pub const ENV_PREFIX: &str = "AUTH";

/// Load the application configuration
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let base = AppConfig::from_env();
    let file = base.environment.config_file().to_string();

    Config::builder()
        .add_source(Config::try_from(&base)?)
        .add_source(File::with_name(&file).required(false))
        .add_source(
            EnvSource::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_survive_the_round_trip() {
        let config = load_config().unwrap();
        let base = AppConfig::from_env();

        assert_eq!(config.server.port, base.server.port);
        assert_eq!(config.auth.token.refresh_max_uses, base.auth.token.refresh_max_uses);
        assert_eq!(config.auth.keys.private_key_path, base.auth.keys.private_key_path);
    }
}
