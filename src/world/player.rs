use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A connected player and its last reported position
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Session/connection identifier assigned by the connection layer
    pub id: String,

    pub x: f64,
    pub y: f64,

    /// Set on every position update; `None` until the first one
    pub last_update_time: Option<DateTime<Utc>>,
}

impl Player {
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            last_update_time: None,
        }
    }

    /// Euclidean distance from this player to `(x, y)`
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        let dx = self.x - x;
        let dy = self.y - y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A neighbour returned by a proximity query around another player
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NearbyPlayer {
    pub player: Player,
    pub distance: f64,
}
