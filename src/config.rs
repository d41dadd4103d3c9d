//! Application configuration, loaded from an optional JSON file and
//! overridden by command line flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest board that still leaves room for the piece sprites
const MIN_BOARD_SIZE: f32 = 160.0;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(&'static str),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GameConfig {
    /// Pause before the opponent answers, in milliseconds
    pub reply_delay_ms: u64,

    /// Edge length of the board in pixels
    pub board_size: f32,

    /// Extra directory searched first for assets
    pub asset_root: Option<PathBuf>,

    /// Directory (relative to an asset root) holding the piece sprites
    pub sprite_dir: String,

    /// Seed for the opponent's move picker; random when unset
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: 500,
            board_size: 320.0,
            asset_root: None,
            sprite_dir: "sprites".to_string(),
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size.is_nan() || self.board_size < MIN_BOARD_SIZE {
            return Err(ConfigError::Invalid("board_size must be at least 160"));
        }
        if self.sprite_dir.trim().is_empty() {
            return Err(ConfigError::Invalid("sprite_dir must not be empty"));
        }
        Ok(())
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    /// JSON schema of the config file, pretty printed
    pub fn json_schema() -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(&schema_for!(GameConfig))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.reply_delay(), Duration::from_millis(500));
        assert_eq!(config.board_size, 320.0);
        assert_eq!(config.sprite_dir, "sprites");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "reply_delay_ms": 50, "seed": 9 }"#).unwrap();
        assert_eq!(
            config,
            GameConfig {
                reply_delay_ms: 50,
                seed: Some(9),
                ..GameConfig::default()
            }
        );
    }

    #[test]
    fn test_rejects_tiny_board() {
        let err = GameConfig::from_json(r#"{ "board_size": 40 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = GameConfig::from_json("{ reply_delay_ms: }").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = GameConfig::load(Path::new("/nonexistent/chess-config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/chess-config.json"));
    }

    #[test]
    fn test_schema_lists_fields() {
        let schema = GameConfig::json_schema().unwrap();
        for field in ["reply_delay_ms", "board_size", "asset_root", "sprite_dir", "seed"] {
            assert!(schema.contains(field), "schema is missing {field}");
        }
    }
}
