//! Application state shared across routes

use std::sync::Arc;

use crate::config::Config;
use crate::game::{ConnectionRegistry, GameRoom, RoomHandle};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub connections: Arc<ConnectionRegistry>,
    pub room: RoomHandle,
}

impl AppState {
    /// Build the state and the room task it feeds. The caller spawns the
    /// returned room.
    pub fn new(config: Config) -> (Self, GameRoom) {
        let config = Arc::new(config);

        let connections = Arc::new(ConnectionRegistry::new());
        let (room, room_handle) = GameRoom::new(connections.clone());

        (
            Self {
                config,
                connections,
                room: room_handle,
            },
            room,
        )
    }
}
