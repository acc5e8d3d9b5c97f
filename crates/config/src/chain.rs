use crate::ConfigError;
use std::path::PathBuf;

/// Largest token precision whose unit still fits in a `u128` planck amount.
pub const MAX_DECIMALS: u32 = 38;

#[derive(Debug, Clone, PartialEq)]
pub struct ChainConfig {
    /// Token symbol, used as the label of the main denomination
    ///
    /// Env: PCB_CHAIN_SYMBOL
    /// Default: DOT
    pub symbol: String,

    /// Token decimals
    ///
    /// Env: PCB_CHAIN_DECIMALS
    /// Valid values: 0..=38
    /// Default: 10
    pub decimals: u32,

    /// SS58 prefix used when displaying account ids
    ///
    /// Env: PCB_CHAIN_SS58_PREFIX
    /// Default: 0
    pub ss58_prefix: u16,

    /// Runtime metadata file, as saved from `state_getMetadata`
    ///
    /// Env: PCB_CHAIN_METADATA_PATH
    /// Default: none
    pub metadata_path: Option<PathBuf>,
}

pub(crate) fn default_symbol() -> String {
    "DOT".to_string()
}

pub(crate) fn default_decimals() -> u32 {
    10
}

impl ChainConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.symbol.trim().is_empty() {
            return Err(ConfigError::ValidateError(
                "Chain symbol cannot be empty".to_string(),
            ));
        }

        if self.decimals > MAX_DECIMALS {
            return Err(ConfigError::ValidateError(format!(
                "Chain decimals must be at most {MAX_DECIMALS}, got {}",
                self.decimals
            )));
        }

        Ok(())
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            decimals: default_decimals(),
            ss58_prefix: 0,
            metadata_path: None,
        }
    }
}
