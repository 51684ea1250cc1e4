use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Axis-aligned rectangle in map coordinates
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Closed containment: points on any of the four edges are inside.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Static named region of the map, seeded at world construction
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,

    /// Display name (e.g., "Main Meeting Room")
    pub name: String,

    #[serde(flatten)]
    pub bounds: Rect,

    /// Classification tag (e.g., "meeting_room")
    pub room_type: String,

    /// Room-specific metadata (e.g., capacity)
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

impl Room {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        bounds: Rect,
        room_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            bounds,
            room_type: room_type.into(),
            properties: HashMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.bounds.contains(x, y)
    }
}

/// The office layout every world starts with unless configured otherwise.
pub fn default_rooms() -> Vec<Room> {
    vec![
        Room::new(
            "meeting1",
            "Main Meeting Room",
            Rect::new(100.0, 100.0, 200.0, 150.0),
            "meeting_room",
        )
        .with_property("capacity", "8"),
        Room::new(
            "break1",
            "Break Area",
            Rect::new(400.0, 400.0, 150.0, 150.0),
            "break_room",
        )
        .with_property("hasWaterCooler", "true"),
    ]
}
