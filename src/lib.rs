// Room/player world state and spatial queries
pub mod world;

// TOML configuration
pub mod config;

// HTTP APIs
pub mod api;
