//! Generator parameters

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{
    CORRIDOR_LEVEL_DIFF_BLOCK, DEFAULT_CORRIDOR_WIDTH, DEFAULT_HEIGHT, DEFAULT_MIN_ROOM_SIZE,
    DEFAULT_SPLITS, DEFAULT_WIDTH,
};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Map dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: i32, height: i32 },

    #[error("Map of {width}x{height} cells is too large")]
    TooLarge { width: i32, height: i32 },

    #[error("Minimum room size {min_room_size} does not fit twice in a {width}x{height} map")]
    RoomTooLarge {
        min_room_size: i32,
        width: i32,
        height: i32,
    },

    #[error("Corridor width must not be negative, got {0}")]
    NegativeCorridor(i32),

    #[cfg(feature = "std")]
    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parameters for one level
///
/// Missing fields take the game's defaults when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub width: i32,
    pub height: i32,
    /// Number of corridor-reserving split iterations
    pub splits: u32,
    pub min_room_size: i32,
    pub corridor_width: i32,
    /// Street ends facing a node more than this many levels away are capped
    pub corridor_level_diff_block: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            splits: DEFAULT_SPLITS,
            min_room_size: DEFAULT_MIN_ROOM_SIZE,
            corridor_width: DEFAULT_CORRIDOR_WIDTH,
            corridor_level_diff_block: CORRIDOR_LEVEL_DIFF_BLOCK,
        }
    }
}

impl GeneratorConfig {
    /// Config for a map of the given size, everything else default
    pub fn with_size(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Parse a JSON document, filling absent fields with defaults
    #[cfg(feature = "std")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Strict parameter check
    ///
    /// Generation accepts any config and degrades to a minimal map; callers
    /// that would rather reject odd parameters up front can use this.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(ConfigError::TooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if self.corridor_width < 0 {
            return Err(ConfigError::NegativeCorridor(self.corridor_width));
        }
        if self.min_room_size <= 0
            || self.min_room_size.saturating_mul(2) > self.width.max(self.height)
        {
            return Err(ConfigError::RoomTooLarge {
                min_room_size: self.min_room_size,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.width, 150);
        assert_eq!(config.height, 40);
        assert_eq!(config.splits, 3);
        assert_eq!(config.min_room_size, 15);
        assert_eq!(config.corridor_width, 3);
        assert_eq!(config.corridor_level_diff_block, 1);
        assert!(config.validate().is_ok());
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_from_json_partial() {
        let config = GeneratorConfig::from_json(r#"{ "width": 80, "splits": 2 }"#).unwrap();
        assert_eq!(config.width, 80);
        assert_eq!(config.splits, 2);
        assert_eq!(config.height, 40);
        assert_eq!(config.min_room_size, 15);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_from_json_rejects_garbage() {
        let err = GeneratorConfig::from_json("{ width: ").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_validate() {
        let zero = GeneratorConfig::with_size(0, 40);
        assert!(matches!(
            zero.validate(),
            Err(ConfigError::ZeroDimension { width: 0, height: 40 })
        ));

        let big_rooms = GeneratorConfig {
            min_room_size: 50,
            ..GeneratorConfig::with_size(60, 20)
        };
        assert!(matches!(
            big_rooms.validate(),
            Err(ConfigError::RoomTooLarge { min_room_size: 50, .. })
        ));

        let corridor = GeneratorConfig {
            corridor_width: -1,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            corridor.validate(),
            Err(ConfigError::NegativeCorridor(-1))
        ));
    }

    #[test]
    fn test_validate_extreme_values() {
        let huge_rooms = GeneratorConfig {
            min_room_size: i32::MAX,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            huge_rooms.validate(),
            Err(ConfigError::RoomTooLarge { .. })
        ));

        let huge_map = GeneratorConfig::with_size(i32::MAX, i32::MAX);
        assert!(matches!(
            huge_map.validate(),
            Err(ConfigError::TooLarge { .. })
        ));
        assert!(GeneratorConfig::with_size(46340, 46340).validate().is_ok());
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::ZeroDimension { width: 0, height: 3 };
        assert_eq!(err.to_string(), "Map dimensions must be positive, got 0x3");
    }
}
