mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::debug;

/// Environment variable consulted when the config file leaves the API key
/// empty.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    debug!("Loading configuration from: {}", config_path);

    let mut config: Config = match tokio::fs::read_to_string(&config_path).await {
        Ok(config_str) => serde_yaml::from_str(&config_str)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No config file at {}, using defaults", config_path);
            Config::default()
        }
        Err(e) => return Err(e.into()),
    };

    if config.llm.api_key.is_empty() {
        config.llm.api_key = env::var(API_KEY_ENV).map_err(|_| {
            Error::config(format!(
                "LLM API key is required: set llm.api_key in {config_path} or export {API_KEY_ENV}"
            ))
        })?;
    }

    Ok(config)
}
