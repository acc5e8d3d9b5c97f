mod args;
mod chain;
mod error;
mod log;

pub use args::{Args, CallInput, CallTarget, Command};
pub use chain::{ChainConfig, MAX_DECIMALS};
pub use error::ConfigError;
pub use log::LogConfig;

use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuilderConfig {
    pub log: LogConfig,
    pub chain: ChainConfig,
}

/// Flat view of the `PCB_` environment; envy cannot fill nested structs.
#[derive(Debug, Deserialize)]
struct EnvConfig {
    #[serde(default = "log::default_level")]
    log_level: String,
    #[serde(default)]
    log_json: bool,
    #[serde(default)]
    log_strip_ansi: bool,
    #[serde(default)]
    log_write: bool,
    #[serde(default = "log::default_write_path")]
    log_write_path: String,
    #[serde(default = "log::default_write_max_file_size")]
    log_write_max_file_size: u64,
    #[serde(default = "log::default_write_max_files")]
    log_write_max_files: usize,

    #[serde(default = "chain::default_symbol")]
    chain_symbol: String,
    #[serde(default = "chain::default_decimals")]
    chain_decimals: u32,
    #[serde(default)]
    chain_ss58_prefix: u16,
    #[serde(default)]
    chain_metadata_path: Option<PathBuf>,
}

impl From<EnvConfig> for BuilderConfig {
    fn from(env: EnvConfig) -> Self {
        Self {
            log: LogConfig {
                level: env.log_level,
                json: env.log_json,
                strip_ansi: env.log_strip_ansi,
                write: env.log_write,
                write_path: env.log_write_path,
                write_max_file_size: env.log_write_max_file_size,
                write_max_files: env.log_write_max_files,
            },
            chain: ChainConfig {
                symbol: env.chain_symbol,
                decimals: env.chain_decimals,
                ss58_prefix: env.chain_ss58_prefix,
                metadata_path: env.chain_metadata_path,
            },
        }
    }
}

impl BuilderConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Build from explicit `(key, value)` pairs, e.g. in tests.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let env = envy::prefixed("PCB_").from_iter::<_, EnvConfig>(vars)?;
        let config = Self::from(env);
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.log.validate()?;
        self.chain.validate()?;
        Ok(())
    }
}

/// Load variables from an env file into the process environment.
///
/// A missing file is not an error; variables already set are not overridden.
/// Returns whether a file was loaded.
pub fn load_env_file(path: impl AsRef<Path>) -> Result<bool, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(false);
    }
    dotenv::from_path(path).map_err(|source| ConfigError::EnvFileError {
        path: path.display().to_string(),
        source,
    })?;
    Ok(true)
}
