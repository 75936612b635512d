//! # Pool Configuration
//!
//! Per-pool tuning resolved once when the pool is created.
//!
//! ```toml
//! reserve = 1024
//! page_size = 4096
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{PoolError, PoolResult};

/// Default length of one sparse page.
pub const DEFAULT_PAGE_SIZE: usize = 4096;

/// Construction-time settings for a pool and its storage.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoolConfig {
    /// Initial capacity of the packed arrays.
    pub reserve: usize,
    /// Number of sparse slots allocated at a time. Must be a power of two.
    pub page_size: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            reserve: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PoolConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] if the text is not valid TOML for
    /// this structure or fails [`PoolConfig::validate`].
    pub fn from_toml_str(text: &str) -> PoolResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|err| PoolError::InvalidConfig(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`PoolConfig::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> PoolResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|err| PoolError::Io(format!("{}: {err}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Checks the values for consistency.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] if `page_size` is zero or not a
    /// power of two.
    pub fn validate(&self) -> PoolResult<()> {
        if !self.page_size.is_power_of_two() {
            return Err(PoolError::InvalidConfig(format!(
                "page_size must be a non-zero power of two, got {}",
                self.page_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PoolConfig::default();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = PoolConfig::from_toml_str("reserve = 64").unwrap();
        assert_eq!(config.reserve, 64);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_rejects_bad_page_size() {
        let err = PoolConfig::from_toml_str("page_size = 1000").unwrap_err();
        assert!(matches!(err, PoolError::InvalidConfig(_)));

        let err = PoolConfig::from_toml_str("page_size = 0").unwrap_err();
        assert!(matches!(err, PoolError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_unknown_field() {
        let err = PoolConfig::from_toml_str("capacity = 10").unwrap_err();
        assert!(matches!(err, PoolError::InvalidConfig(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = PoolConfig::from_toml_file("/nonexistent/entpool/pool.toml").unwrap_err();
        assert!(matches!(err, PoolError::Io(_)));
    }
}
