use super::error::{require_finite, resolve_radius, ApiError};
use super::players::PlayerResponse;
use super::WorldAppState;
use crate::world::{MetricsSnapshot, Room};
use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Query parameters for proximity search
#[derive(Deserialize)]
pub struct NearbyParams {
    pub x: f64,
    pub y: f64,
    pub radius: Option<f64>,
}

/// Room response
#[derive(Debug, Serialize, Deserialize)]
pub struct RoomResponse {
    pub id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(rename = "roomType")]
    pub room_type: String,
    pub properties: HashMap<String, String>,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        Self {
            id: room.id,
            name: room.name,
            x: room.bounds.x,
            y: room.bounds.y,
            width: room.bounds.width,
            height: room.bounds.height,
            room_type: room.room_type,
            properties: room.properties,
        }
    }
}

/// World summary response
#[derive(Serialize)]
pub struct WorldResponse {
    #[serde(rename = "mapWidth")]
    pub map_width: f64,
    #[serde(rename = "mapHeight")]
    pub map_height: f64,
    #[serde(rename = "nearbyRadius")]
    pub nearby_radius: f64,
    #[serde(rename = "playerCount")]
    pub player_count: usize,
    #[serde(rename = "roomCount")]
    pub room_count: usize,
    #[serde(rename = "lastUpdateTime")]
    pub last_update_time: Option<String>,
    pub metrics: MetricsSnapshot,
}

/// Create room and spatial query router
pub fn create_room_router(state: Arc<WorldAppState>) -> Router {
    Router::new()
        .route("/api/rooms", get(list_rooms))
        .route("/api/rooms/:id", get(get_room))
        .route("/api/rooms/:id/players", get(room_members))
        .route("/api/nearby", get(nearby))
        .route("/api/world", get(world_summary))
        .with_state(state)
}

/// GET /api/rooms - List all rooms
async fn list_rooms(State(state): State<Arc<WorldAppState>>) -> Json<Vec<RoomResponse>> {
    Json(state.world.rooms().into_iter().map(Into::into).collect())
}

/// GET /api/rooms/:id - Get specific room
async fn get_room(
    State(state): State<Arc<WorldAppState>>,
    Path(id): Path<String>,
) -> Result<Json<RoomResponse>, ApiError> {
    let room = state.world.get_room(&id).ok_or(ApiError::RoomNotFound)?;
    Ok(Json(room.into()))
}

/// GET /api/rooms/:id/players - Players inside the room
///
/// Unknown rooms return an empty list rather than 404.
async fn room_members(
    State(state): State<Arc<WorldAppState>>,
    Path(id): Path<String>,
) -> Json<Vec<PlayerResponse>> {
    Json(
        state
            .world
            .get_players_in_room(&id)
            .into_iter()
            .map(Into::into)
            .collect(),
    )
}

/// GET /api/nearby - Players within a radius of a point
///
/// Query parameters:
/// - `x`, `y`: query point (required)
/// - `radius`: search radius (defaults to the configured proximity radius)
async fn nearby(
    State(state): State<Arc<WorldAppState>>,
    Query(params): Query<NearbyParams>,
) -> Result<Json<Vec<PlayerResponse>>, ApiError> {
    let x = require_finite("x", params.x)?;
    let y = require_finite("y", params.y)?;
    let radius = resolve_radius(params.radius, state.world.nearby_radius())?;

    Ok(Json(
        state
            .world
            .get_nearby_players(x, y, radius)
            .into_iter()
            .map(Into::into)
            .collect(),
    ))
}

/// GET /api/world - Bounds, counts and lifecycle metrics
async fn world_summary(State(state): State<Arc<WorldAppState>>) -> Json<WorldResponse> {
    let world = &state.world;

    Json(WorldResponse {
        map_width: world.map_width(),
        map_height: world.map_height(),
        nearby_radius: world.nearby_radius(),
        player_count: world.player_count(),
        room_count: world.rooms().len(),
        last_update_time: world.last_update_time().map(|t| t.to_rfc3339()),
        metrics: world.metrics.snapshot(),
    })
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
    async fn test_list_rooms() {
        let state = create_test_state();

        let result = list_rooms(State(state)).await;

        let mut ids: Vec<String> = result.0.iter().map(|r| r.id.clone()).collect();
        ids.sort();
        assert_eq!(ids, vec!["break1", "meeting1"]);
    }

    #[tokio::test]
    async fn test_get_unknown_room() {
        let state = create_test_state();

        let result = get_room(State(state), Path("nonexistent".to_string())).await;

        assert!(matches!(result, Err(ApiError::RoomNotFound)));
    }

    #[tokio::test]
    async fn test_room_members_unknown_room_is_empty() {
        let state = create_test_state();
        state.world.add_player("alice");

        let result = room_members(State(state), Path("nonexistent".to_string())).await;

        assert!(result.0.is_empty());
    }

    #[tokio::test]
    async fn test_nearby_default_radius() {
        let state = create_test_state();
        state.world.add_player_at("first", 400.0, 400.0);
        state.world.add_player_at("second", 430.0, 400.0);
        state.world.add_player_at("far", 600.0, 600.0);

        let params = NearbyParams {
            x: 400.0,
            y: 400.0,
            radius: None,
        };
        let result = nearby(State(state), Query(params)).await.unwrap();

        let mut ids: Vec<String> = result.0.iter().map(|p| p.id.clone()).collect();
        ids.sort();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_world_summary() {
        let state = create_test_state();
        state.world.add_player("alice");
        state.world.update_player_position("alice", 100.0, 100.0);
        state.world.update_player_position("ghost", 100.0, 100.0);

        let result = world_summary(State(state)).await;

        assert_eq!(result.0.map_width, 800.0);
        assert_eq!(result.0.player_count, 1);
        assert_eq!(result.0.room_count, 2);
        assert!(result.0.last_update_time.is_some());
        assert_eq!(result.0.metrics.moves_dropped, 1);
    }
}
