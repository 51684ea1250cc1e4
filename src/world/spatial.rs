//! Spatial queries over the player table.
//!
//! Lifecycle operations on [`RoomWorldState`](super::RoomWorldState) never call
//! into this module, so a grid or tree index can replace [`LinearScan`] by
//! implementing [`SpatialQuery`] alone.

use super::player::Player;
use super::room::Rect;
use dashmap::DashMap;

/// Identity -> Player, the only index the world keeps
pub type PlayerTable = DashMap<String, Player>;

/// Membership and proximity queries. Result order is unspecified.
pub trait SpatialQuery: Send + Sync {
    /// Every player inside `rect` (boundary inclusive)
    fn players_in_rect(&self, players: &PlayerTable, rect: &Rect) -> Vec<Player>;

    /// Every player whose distance to `(x, y)` is at most `radius`
    fn players_within(&self, players: &PlayerTable, x: f64, y: f64, radius: f64) -> Vec<Player>;
}

/// O(n) scan of the whole table. Fine for a few dozen players.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearScan;

impl SpatialQuery for LinearScan {
    fn players_in_rect(&self, players: &PlayerTable, rect: &Rect) -> Vec<Player> {
        players
            .iter()
            .filter(|p| rect.contains(p.x, p.y))
            .map(|p| p.value().clone())
            .collect()
    }

    fn players_within(&self, players: &PlayerTable, x: f64, y: f64, radius: f64) -> Vec<Player> {
        players
            .iter()
            .filter(|p| p.distance_to(x, y) <= radius)
            .map(|p| p.value().clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(points: &[(&str, f64, f64)]) -> PlayerTable {
        let table = PlayerTable::new();
        for (id, x, y) in points {
            table.insert(id.to_string(), Player::new(*id, *x, *y));
        }
        table
    }

    #[test]
    fn rect_query_includes_all_four_edges() {
        let players = table(&[
            ("left", 10.0, 15.0),
            ("right", 30.0, 15.0),
            ("top", 20.0, 10.0),
            ("bottom", 20.0, 30.0),
            ("outside", 30.5, 15.0),
        ]);
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);

        let mut ids: Vec<String> = LinearScan
            .players_in_rect(&players, &rect)
            .into_iter()
            .map(|p| p.id)
            .collect();
        ids.sort();

        assert_eq!(ids, vec!["bottom", "left", "right", "top"]);
    }

    #[test]
    fn radius_query_is_inclusive() {
        let players = table(&[("on_edge", 3.0, 4.0), ("beyond", 3.0, 4.1)]);

        let found = LinearScan.players_within(&players, 0.0, 0.0, 5.0);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "on_edge");
    }

    #[test]
    fn empty_table_yields_nothing() {
        let players = PlayerTable::new();
        assert!(LinearScan
            .players_in_rect(&players, &Rect::new(0.0, 0.0, 800.0, 800.0))
            .is_empty());
        assert!(LinearScan.players_within(&players, 0.0, 0.0, 1000.0).is_empty());
    }
}
