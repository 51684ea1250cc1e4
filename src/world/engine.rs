use crate::config::WorldConfig;
use crate::world::event::WorldEvent;
use crate::world::metrics::WorldMetrics;
use crate::world::player::{NearbyPlayer, Player};
use crate::world::room::{default_rooms, Room};
use crate::world::spatial::{LinearScan, PlayerTable, SpatialQuery};
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use std::collections::HashMap;
use std::sync::RwLock;
use tokio::sync::broadcast;
use tracing::{debug, info};

pub const DEFAULT_MAP_WIDTH: f64 = 800.0;
pub const DEFAULT_MAP_HEIGHT: f64 = 800.0;

/// Proximity voice chat range in map units
pub const DEFAULT_NEARBY_RADIUS: f64 = 50.0;

/// In-memory owner of every player and room in one simulated space.
///
/// Construct one per space and share it by `Arc`. Each call is atomic with
/// respect to the player it touches; nothing is atomic across calls.
pub struct RoomWorldState<Q: SpatialQuery = LinearScan> {
    /// Identity -> Player
    players: PlayerTable,

    /// Seeded once, never mutated afterwards
    rooms: HashMap<String, Room>,

    map_width: f64,
    map_height: f64,
    nearby_radius: f64,

    /// Most recent position update anywhere in the world
    last_update_time: RwLock<Option<DateTime<Utc>>>,

    events_tx: broadcast::Sender<WorldEvent>,

    query: Q,

    pub metrics: WorldMetrics,
}

impl RoomWorldState<LinearScan> {
    /// 800x800 world with the default office layout
    pub fn new() -> Self {
        Self::with_query(
            DEFAULT_MAP_WIDTH,
            DEFAULT_MAP_HEIGHT,
            DEFAULT_NEARBY_RADIUS,
            default_rooms(),
            LinearScan,
        )
    }

    pub fn from_config(config: &WorldConfig) -> Self {
        Self::with_query(
            config.map_width,
            config.map_height,
            config.nearby_radius,
            config.rooms.clone(),
            LinearScan,
        )
    }
}

impl Default for RoomWorldState<LinearScan> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Q: SpatialQuery> RoomWorldState<Q> {
    pub fn with_query(
        map_width: f64,
        map_height: f64,
        nearby_radius: f64,
        rooms: impl IntoIterator<Item = Room>,
        query: Q,
    ) -> Self {
        let (events_tx, _) = broadcast::channel(1000);
        let rooms: HashMap<String, Room> = rooms
            .into_iter()
            .map(|room| (room.id.clone(), room))
            .collect();

        info!(
            map_width = map_width,
            map_height = map_height,
            rooms = rooms.len(),
            "World initialized"
        );

        Self {
            players: PlayerTable::new(),
            rooms,
            map_width,
            map_height,
            nearby_radius,
            last_update_time: RwLock::new(None),
            events_tx,
            query,
            metrics: WorldMetrics::new(),
        }
    }

    pub fn map_width(&self) -> f64 {
        self.map_width
    }

    pub fn map_height(&self) -> f64 {
        self.map_height
    }

    /// Radius used when a proximity query does not name one
    pub fn nearby_radius(&self) -> f64 {
        self.nearby_radius
    }

    pub fn map_center(&self) -> (f64, f64) {
        (self.map_width / 2.0, self.map_height / 2.0)
    }

    /// Add a player at the map center
    pub fn add_player(&self, player_id: &str) -> Player {
        let (x, y) = self.map_center();
        self.add_player_at(player_id, x, y)
    }

    /// Add a player at `(x, y)`.
    ///
    /// An existing record with the same identity is replaced outright
    /// (last writer wins, `last_update_time` reset). Replacing a record with
    /// an identical one changes nothing: no event, no join counted.
    /// Events are sent while the entry is locked, so the feed orders them
    /// the same way the table applied them.
    pub fn add_player_at(&self, player_id: &str, x: f64, y: f64) -> Player {
        let player = Player::new(player_id, x, y);

        match self.players.entry(player_id.to_string()) {
            Entry::Occupied(mut entry) => {
                if *entry.get() == player {
                    debug!(player_id = %player_id, "Repeated join with identical state ignored");
                    return player;
                }
                entry.insert(player.clone());
                self.record_join(&player, true);
            }
            Entry::Vacant(entry) => {
                let _guard = entry.insert(player.clone());
                self.record_join(&player, false);
            }
        }

        player
    }

    fn record_join(&self, player: &Player, replaced: bool) {
        self.metrics.record_join();
        info!(
            player_id = %player.id,
            x = player.x,
            y = player.y,
            replaced = replaced,
            "Player joined"
        );

        let _ = self.events_tx.send(WorldEvent::PlayerJoined {
            player: player.clone(),
        });
    }

    /// Remove a player. Absent identities are a no-op returning `None`.
    pub fn remove_player(&self, player_id: &str) -> Option<Player> {
        let Entry::Occupied(entry) = self.players.entry(player_id.to_string()) else {
            return None;
        };

        self.metrics.record_leave();
        info!(player_id = %player_id, "Player left");

        // Sent before the entry lock is released by the removal
        let _ = self.events_tx.send(WorldEvent::PlayerLeft {
            player_id: player_id.to_string(),
        });

        let (_, player) = entry.remove_entry();
        Some(player)
    }

    /// Move a player and stamp `last_update_time`.
    ///
    /// Unknown identities are ignored: updates can arrive before the join or
    /// after the leave. Coordinates are stored as given, without clamping.
    pub fn update_player_position(&self, player_id: &str, x: f64, y: f64) -> Option<Player> {
        let Some(mut player) = self.players.get_mut(player_id) else {
            self.metrics.record_dropped_move();
            debug!(player_id = %player_id, "Position update for unknown player ignored");
            return None;
        };

        let now = Utc::now();
        let stamp = match player.last_update_time {
            Some(previous) if previous > now => previous,
            _ => now,
        };
        player.x = x;
        player.y = y;
        player.last_update_time = Some(stamp);
        let updated = player.clone();

        self.touch(stamp);
        self.metrics.record_move();
        debug!(player_id = %player_id, x = x, y = y, "Player moved");

        let _ = self.events_tx.send(WorldEvent::PlayerMoved {
            player: updated.clone(),
        });

        Some(updated)
    }

    fn touch(&self, stamp: DateTime<Utc>) {
        let mut last = self
            .last_update_time
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if last.map_or(true, |previous| stamp > previous) {
            *last = Some(stamp);
        }
    }

    /// Time of the most recent position update, if any
    pub fn last_update_time(&self) -> Option<DateTime<Utc>> {
        *self
            .last_update_time
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get_player(&self, player_id: &str) -> Option<Player> {
        self.players.get(player_id).map(|p| p.clone())
    }

    /// All players, in no particular order
    pub fn players(&self) -> Vec<Player> {
        self.players.iter().map(|p| p.value().clone()).collect()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn get_room(&self, room_id: &str) -> Option<Room> {
        self.rooms.get(room_id).cloned()
    }

    /// All rooms, in no particular order
    pub fn rooms(&self) -> Vec<Room> {
        self.rooms.values().cloned().collect()
    }

    /// Every room containing `(x, y)`. Rooms may overlap.
    pub fn rooms_at(&self, x: f64, y: f64) -> Vec<Room> {
        self.rooms
            .values()
            .filter(|room| room.contains(x, y))
            .cloned()
            .collect()
    }

    /// Players inside the room's rectangle, edges included.
    ///
    /// Unknown rooms yield an empty list. Order is unspecified.
    pub fn get_players_in_room(&self, room_id: &str) -> Vec<Player> {
        match self.rooms.get(room_id) {
            Some(room) => self.query.players_in_rect(&self.players, &room.bounds),
            None => Vec::new(),
        }
    }

    /// Players within `radius` of `(x, y)`, boundary included.
    ///
    /// Nobody is excluded; callers drop their own identity if they need to.
    pub fn get_nearby_players(&self, x: f64, y: f64, radius: f64) -> Vec<Player> {
        self.query.players_within(&self.players, x, y, radius)
    }

    /// Neighbours of a known player within `radius`, excluding the player itself.
    ///
    /// Unknown identities yield an empty list.
    pub fn nearby_players_of(&self, player_id: &str, radius: f64) -> Vec<NearbyPlayer> {
        let Some(origin) = self.get_player(player_id) else {
            return Vec::new();
        };

        self.query
            .players_within(&self.players, origin.x, origin.y, radius)
            .into_iter()
            .filter(|p| p.id != origin.id)
            .map(|player| NearbyPlayer {
                distance: player.distance_to(origin.x, origin.y),
                player,
            })
            .collect()
    }

    /// Subscribe to lifecycle events
    pub fn subscribe(&self) -> broadcast::Receiver<WorldEvent> {
        self.events_tx.subscribe()
    }
}
