use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::{env, str::FromStr};

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub api_prefix: String,

    // Rate limiting, 0 disables the limiter
    pub rate_api_per_min: u32,

    pub log_dir: String,
    /// Seed the store with the demo employees and projects on startup
    pub seed_sample_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "0.0.0.0:5000".to_string(),
            api_prefix: "/api".to_string(),
            rate_api_per_min: 1000,
            log_dir: "logs".to_string(),
            seed_sample_data: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let defaults = Self::default();

        Ok(Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or(defaults.server_addr),
            api_prefix: env::var("API_PREFIX").unwrap_or(defaults.api_prefix),
            rate_api_per_min: parse_var("RATE_API_PER_MIN", defaults.rate_api_per_min)?,
            log_dir: env::var("LOG_DIR").unwrap_or(defaults.log_dir),
            seed_sample_data: parse_var("SEED_SAMPLE_DATA", defaults.seed_sample_data)?,
        })
    }
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_local_dev_setup() {
        let config = Config::default();
        assert_eq!(config.server_addr, "0.0.0.0:5000");
        assert_eq!(config.api_prefix, "/api");
        assert!(config.seed_sample_data);
    }

    #[test]
    fn parse_var_falls_back_when_unset() {
        let value: u32 = parse_var("SG_WORKFORCE_TEST_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }
}
