use super::player::Player;
use serde::Serialize;

/// Lifecycle change broadcast to in-process subscribers.
///
/// Emitted only when the player table actually changed: leaving an absent
/// identity and moves for unknown identities produce nothing.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorldEvent {
    PlayerJoined { player: Player },
    PlayerLeft { player_id: String },
    PlayerMoved { player: Player },
}
