// HTTP adapter over the room world (join/leave/move and spatial queries)

mod error;
pub mod players;
pub mod rooms;

pub use error::ApiError;
pub use players::{create_player_router, PlayerResponse};
pub use rooms::{create_room_router, RoomResponse};

use crate::world::RoomWorldState;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared state for every world router
#[derive(Clone)]
pub struct WorldAppState {
    pub world: Arc<RoomWorldState>,
}

/// Full API: player, room and world routes with permissive CORS for the browser client
pub fn create_api_router(world: Arc<RoomWorldState>) -> Router {
    let state = Arc::new(WorldAppState { world });

    Router::new()
        .merge(create_player_router(state.clone()))
        .merge(create_room_router(state))
        .layer(CorsLayer::permissive())
}
