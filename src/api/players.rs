use super::error::{require_finite, resolve_radius, ApiError};
use super::WorldAppState;
use crate::world::{NearbyPlayer, Player};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Join request; omitted coordinates default to the map center
#[derive(Deserialize)]
pub struct JoinRequest {
    pub id: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

/// Position report body
#[derive(Deserialize)]
pub struct MoveRequest {
    pub x: f64,
    pub y: f64,
}

#[derive(Deserialize)]
pub struct RadiusParams {
    pub radius: Option<f64>,
}

/// Player response
#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerResponse {
    pub id: String,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "lastUpdateTime")]
    pub last_update_time: Option<String>,
}

impl From<Player> for PlayerResponse {
    fn from(player: Player) -> Self {
        Self {
            id: player.id,
            x: player.x,
            y: player.y,
            last_update_time: player.last_update_time.map(|t| t.to_rfc3339()),
        }
    }
}

/// Neighbour of a player, with its distance from that player
#[derive(Debug, Serialize, Deserialize)]
pub struct NearbyPlayerResponse {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub distance: f64,
}

impl From<NearbyPlayer> for NearbyPlayerResponse {
    fn from(nearby: NearbyPlayer) -> Self {
        Self {
            id: nearby.player.id,
            x: nearby.player.x,
            y: nearby.player.y,
            distance: nearby.distance,
        }
    }
}

/// Create player lifecycle router
pub fn create_player_router(state: Arc<WorldAppState>) -> Router {
    Router::new()
        .route("/api/players", post(join).get(list_players))
        .route("/api/players/:id", get(get_player).delete(leave))
        .route("/api/players/:id/position", put(move_player))
        .route("/api/players/:id/nearby", get(nearby_of))
        .with_state(state)
}

/// POST /api/players - Add (or replace) a player
async fn join(
    State(state): State<Arc<WorldAppState>>,
    Json(req): Json<JoinRequest>,
) -> Result<Json<PlayerResponse>, ApiError> {
    if req.id.is_empty() {
        return Err(ApiError::ValidationError("id is required".to_string()));
    }

    let (center_x, center_y) = state.world.map_center();
    let x = require_finite("x", req.x.unwrap_or(center_x))?;
    let y = require_finite("y", req.y.unwrap_or(center_y))?;

    let player = state.world.add_player_at(&req.id, x, y);

    Ok(Json(player.into()))
}

/// DELETE /api/players/:id - Remove a player (idempotent)
async fn leave(State(state): State<Arc<WorldAppState>>, Path(id): Path<String>) -> StatusCode {
    state.world.remove_player(&id);
    StatusCode::NO_CONTENT
}

/// PUT /api/players/:id/position - Report a position
///
/// Reports for unknown players are accepted and dropped.
async fn move_player(
    State(state): State<Arc<WorldAppState>>,
    Path(id): Path<String>,
    Json(req): Json<MoveRequest>,
) -> Result<StatusCode, ApiError> {
    let x = require_finite("x", req.x)?;
    let y = require_finite("y", req.y)?;

    state.world.update_player_position(&id, x, y);

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/players - List all players
async fn list_players(State(state): State<Arc<WorldAppState>>) -> Json<Vec<PlayerResponse>> {
    Json(state.world.players().into_iter().map(Into::into).collect())
}

/// GET /api/players/:id - Get specific player
async fn get_player(
    State(state): State<Arc<WorldAppState>>,
    Path(id): Path<String>,
) -> Result<Json<PlayerResponse>, ApiError> {
    let player = state.world.get_player(&id).ok_or(ApiError::PlayerNotFound)?;
    Ok(Json(player.into()))
}

/// GET /api/players/:id/nearby - Players near this one, excluding itself
///
/// Query parameters:
/// - `radius`: search radius (defaults to the configured proximity radius)
async fn nearby_of(
    State(state): State<Arc<WorldAppState>>,
    Path(id): Path<String>,
    Query(params): Query<RadiusParams>,
) -> Result<Json<Vec<NearbyPlayerResponse>>, ApiError> {
    let radius = resolve_radius(params.radius, state.world.nearby_radius())?;

    let nearby = state.world.nearby_players_of(&id, radius);

    info!(player_id = %id, radius = radius, count = nearby.len(), "Nearby players requested");

    Ok(Json(nearby.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::RoomWorldState;

    fn create_test_state() -> Arc<WorldAppState> {
        Arc::new(WorldAppState {
            world: Arc::new(RoomWorldState::new()),
        })
    }

    #[tokio::test]
    async fn test_join_defaults_to_center() {
        let state = create_test_state();

        let req = JoinRequest {
            id: "alice".to_string(),
            x: None,
            y: None,
        };
        let result = join(State(state.clone()), Json(req)).await.unwrap();

        assert_eq!(result.0.id, "alice");
        assert_eq!((result.0.x, result.0.y), (400.0, 400.0));
        assert!(result.0.last_update_time.is_none());
        assert_eq!(state.world.player_count(), 1);
    }

    #[tokio::test]
    async fn test_join_rejects_empty_id() {
        let state = create_test_state();

        let req = JoinRequest {
            id: String::new(),
            x: Some(1.0),
            y: Some(1.0),
        };
        let result = join(State(state.clone()), Json(req)).await;

        assert!(matches!(result, Err(ApiError::ValidationError(_))));
        assert_eq!(state.world.player_count(), 0);
    }

    #[tokio::test]
    async fn test_move_unknown_player_is_accepted() {
        let state = create_test_state();

        let req = MoveRequest { x: 10.0, y: 10.0 };
        let status = move_player(State(state.clone()), Path("ghost".to_string()), Json(req))
            .await
            .unwrap();

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(state.world.get_player("ghost").is_none());
    }

    #[tokio::test]
    async fn test_move_rejects_non_finite() {
        let state = create_test_state();
        state.world.add_player("alice");

        let req = MoveRequest {
            x: f64::INFINITY,
            y: 10.0,
        };
        let result = move_player(State(state.clone()), Path("alice".to_string()), Json(req)).await;

        assert!(matches!(result, Err(ApiError::ValidationError(_))));
        assert_eq!(state.world.get_player("alice").unwrap().x, 400.0);
    }

    #[tokio::test]
    async fn test_nearby_of_uses_default_radius() {
        let state = create_test_state();
        state.world.add_player_at("alice", 400.0, 400.0);
        state.world.add_player_at("bob", 440.0, 400.0);
        state.world.add_player_at("carol", 460.0, 400.0);

        let params = RadiusParams { radius: None };
        let result = nearby_of(State(state), Path("alice".to_string()), Query(params))
            .await
            .unwrap();

        assert_eq!(result.0.len(), 1);
        assert_eq!(result.0[0].id, "bob");
        assert_eq!(result.0[0].distance, 40.0);
    }

    #[tokio::test]
    async fn test_nearby_of_rejects_negative_radius() {
        let state = create_test_state();
        state.world.add_player("alice");

        let params = RadiusParams { radius: Some(-1.0) };
        let result = nearby_of(State(state), Path("alice".to_string()), Query(params)).await;

        assert!(matches!(result, Err(ApiError::ValidationError(_))));
    }
}
