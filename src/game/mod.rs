//! Game simulation modules

pub mod combat;
pub mod room;
pub mod snapshot;
pub mod spawn;

pub use room::{Audience, ConnectionRegistry, GameRoom, RoomEvent, RoomHandle};

/// Canvas dimensions shared with the client (pixels)
pub const CANVAS_WIDTH: f32 = 800.0;
pub const CANVAS_HEIGHT: f32 = 400.0;

/// Tank sprite footprint (pixels)
pub const TANK_WIDTH: f32 = 40.0;
pub const TANK_HEIGHT: f32 = 20.0;
