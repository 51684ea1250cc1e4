use crate::world::{default_rooms, Room, DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH, DEFAULT_NEARBY_RADIUS};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// Complete VibeTown configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VibeTownConfig {
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

/// Simulated space: bounds, proximity range and the static room layout
#[derive(Debug, Clone, Deserialize)]
pub struct WorldConfig {
    #[serde(default = "default_map_width")]
    pub map_width: f64,
    #[serde(default = "default_map_height")]
    pub map_height: f64,
    /// Radius for proximity queries that do not specify one
    #[serde(default = "default_nearby_radius")]
    pub nearby_radius: f64,
    /// Replaces the default layout entirely when present
    #[serde(default = "default_rooms")]
    pub rooms: Vec<Room>,
}

fn default_map_width() -> f64 {
    DEFAULT_MAP_WIDTH
}

fn default_map_height() -> f64 {
    DEFAULT_MAP_HEIGHT
}

fn default_nearby_radius() -> f64 {
    DEFAULT_NEARBY_RADIUS
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            map_width: default_map_width(),
            map_height: default_map_height(),
            nearby_radius: default_nearby_radius(),
            rooms: default_rooms(),
        }
    }
}

/// HTTP API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:2567".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// Rejected configuration values
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidMapBounds { width: f64, height: f64 },
    InvalidNearbyRadius(f64),
    EmptyRoomId,
    DuplicateRoomId(String),
    InvalidRoomSize { id: String, width: f64, height: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidMapBounds { width, height } => {
                write!(f, "map bounds must be positive, got {}x{}", width, height)
            }
            ConfigError::InvalidNearbyRadius(r) => {
                write!(f, "nearby_radius must be a non-negative number, got {}", r)
            }
            ConfigError::EmptyRoomId => write!(f, "room id is required"),
            ConfigError::DuplicateRoomId(id) => write!(f, "duplicate room id '{}'", id),
            ConfigError::InvalidRoomSize { id, width, height } => {
                write!(
                    f,
                    "room '{}' must have positive width and height, got {}x{}",
                    id, width, height
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl WorldConfig {
    /// Validation rules:
    /// - Map width and height: finite and > 0
    /// - Nearby radius: finite and >= 0
    /// - Room ids: non-empty and unique
    /// - Room width and height: finite and > 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.map_width) || !is_positive(self.map_height) {
            return Err(ConfigError::InvalidMapBounds {
                width: self.map_width,
                height: self.map_height,
            });
        }

        if !self.nearby_radius.is_finite() || self.nearby_radius < 0.0 {
            return Err(ConfigError::InvalidNearbyRadius(self.nearby_radius));
        }

        let mut seen = HashSet::new();
        for room in &self.rooms {
            if room.id.is_empty() {
                return Err(ConfigError::EmptyRoomId);
            }
            if !seen.insert(room.id.as_str()) {
                return Err(ConfigError::DuplicateRoomId(room.id.clone()));
            }
            if !is_positive(room.bounds.width) || !is_positive(room.bounds.height) {
                return Err(ConfigError::InvalidRoomSize {
                    id: room.id.clone(),
                    width: room.bounds.width,
                    height: room.bounds.height,
                });
            }
        }

        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Load and validate configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> Result<VibeTownConfig> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: VibeTownConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    config.world.validate()?;
    Ok(config)
}
