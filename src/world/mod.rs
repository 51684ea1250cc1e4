// Authoritative room/player state for one simulated space

mod engine;
mod event;
mod metrics;
mod player;
mod room;
pub mod spatial;

pub use engine::{RoomWorldState, DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH, DEFAULT_NEARBY_RADIUS};
pub use event::WorldEvent;
pub use metrics::{MetricsSnapshot, WorldMetrics};
pub use player::{NearbyPlayer, Player};
pub use room::{default_rooms, Rect, Room};
pub use spatial::{LinearScan, PlayerTable, SpatialQuery};
