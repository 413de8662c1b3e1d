use serde::{Deserialize, Serialize};
use std::path::Path;
use anyhow::{bail, Result};

use crate::codec::MAX_PREFIX_BITS;

pub const DEFAULT_CONFIG_FILE: &str = "prefixint.toml";
pub const DEFAULT_PREFIX_BITS: u8 = 7;
pub const DEFAULT_MAX_STREAM_VALUES: usize = 1_000_000;

/// How a bare encoding (no prefix width given) is decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DecodeMode {
    /// Reconstruct from the bit pattern without validation
    #[default]
    Lenient,
    /// Reject malformed continuation bits, padding and overflow
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub prefix_bits: u8,
    pub decode_mode: DecodeMode,
    pub max_stream_values: usize,
    pub log_filter: String,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            prefix_bits: DEFAULT_PREFIX_BITS,
            decode_mode: DecodeMode::Lenient,
            max_stream_values: DEFAULT_MAX_STREAM_VALUES,
            log_filter: "prefixint=info".to_string(),
        }
    }
}

impl CodecConfig {
    /// Read the config file if present, otherwise fall back to defaults
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let config_file = config_path.unwrap_or(DEFAULT_CONFIG_FILE);

        if Path::new(config_file).exists() {
            let content = std::fs::read_to_string(config_file)?;
            let config: CodecConfig = toml::from_str(&content)?;
            config.validate()?;
            tracing::debug!("Loaded config from {}", config_file);
            Ok(config)
        } else if config_path.is_some() {
            bail!("config file not found: {}", config_file)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, config_path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path.as_ref(), content)?;
        tracing::info!("Wrote config to {:?}", config_path.as_ref());
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.prefix_bits > MAX_PREFIX_BITS {
            bail!("prefix_bits must be at most {}, got {}", MAX_PREFIX_BITS, self.prefix_bits);
        }
        if self.max_stream_values == 0 {
            bail!("max_stream_values must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefixint.toml");

        let config = CodecConfig {
            prefix_bits: 5,
            decode_mode: DecodeMode::Strict,
            ..CodecConfig::default()
        };
        config.save(&path).unwrap();

        let loaded = CodecConfig::load(path.to_str()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config: CodecConfig = toml::from_str("decode_mode = \"strict\"").unwrap();
        assert_eq!(config.decode_mode, DecodeMode::Strict);
        assert_eq!(config.prefix_bits, DEFAULT_PREFIX_BITS);
        assert_eq!(config.max_stream_values, DEFAULT_MAX_STREAM_VALUES);
    }

    #[test]
    fn rejects_wide_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "prefix_bits = 8\n").unwrap();
        assert!(CodecConfig::load(path.to_str()).is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(CodecConfig::load(path.to_str()).is_err());
    }

    #[test]
    fn rejects_zero_stream_limit() {
        let config = CodecConfig {
            max_stream_values: 0,
            ..CodecConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
