//! WebSocket protocol message definitions
//! These are the wire types for client-server communication
//!
//! Message names are kebab-case via the `type` tag; record fields are
//! camelCase to match the browser client's JSON.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::{TANK_HEIGHT, TANK_WIDTH};

/// A player's full record: aim state plus the embedded tank.
/// Replaced wholesale on every `update-player` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Turret angle in degrees (0 = up, -90 = left, 90 = right)
    pub angle: f32,
    /// Shot power
    pub power: f32,
    pub tank: Tank,
}

impl Player {
    /// Fresh player at the given spawn x. Clients settle the tank onto
    /// their locally-computed ground, so y starts at 0.
    pub fn spawn(x: f32, color: String) -> Self {
        Self {
            angle: 45.0,
            power: 50.0,
            tank: Tank {
                x,
                y: 0.0,
                width: TANK_WIDTH,
                height: TANK_HEIGHT,
                color,
                health: 100,
                destroyed: false,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tank {
    /// Position in canvas pixels
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// RGB hex string, e.g. "#1a2b3c"
    pub color: String,
    /// 0..=100; 0 implies destroyed
    pub health: i32,
    pub destroyed: bool,
}

/// In-flight projectile. No entity id: identity is positional within the
/// live list for a given tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Connection id of the firer. Weak reference: the player may have
    /// disconnected while the shot is still in the air.
    pub player_id: Uuid,
}

/// Explosion animation state. Authored client-side; the server only
/// advances the radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explosion {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub current_radius: f32,
    pub max_radius: f32,
    #[serde(default = "default_growing")]
    pub growing: bool,
}

fn default_growing() -> bool {
    true
}

/// Messages sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMsg {
    /// Full replacement of the sender's player record
    UpdatePlayer { data: Player },

    /// A shot leaving the sender's barrel
    PlayerFired { x: f32, y: f32, vx: f32, vy: f32 },

    /// Wholesale replacement of the shared terrain payload. The server
    /// never inspects its shape.
    TerrainUpdated { terrain: serde_json::Value },

    /// Client-resolved terrain damage, relayed untouched
    TerrainDamaged { data: serde_json::Value },

    /// Client-authored explosion animation
    ExplosionCreated { explosion: Explosion },

    /// Client-resolved hit on a tank
    TankDamaged {
        #[serde(rename = "targetId")]
        target_id: Uuid,
        damage: i32,
    },
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMsg {
    /// Snapshot handed to a newly-joined connection
    Init {
        id: Uuid,
        players: HashMap<Uuid, Player>,
        projectiles: Vec<Projectile>,
        explosions: Vec<Explosion>,
        #[serde(rename = "terrainState")]
        terrain_state: Option<serde_json::Value>,
    },

    PlayerJoined { id: Uuid, data: Player },

    PlayerLeft { id: Uuid },

    PlayerUpdated { id: Uuid, data: Player },

    ProjectileAdded { projectile: Projectile },

    TerrainUpdated { terrain: serde_json::Value },

    TerrainDamaged { data: serde_json::Value },

    ExplosionCreated { explosion: Explosion },

    /// Authoritative health after a `tank-damaged` resolution
    TankHealthUpdate {
        id: Uuid,
        health: i32,
        destroyed: bool,
    },

    /// Full transient-effect state, broadcast each simulation tick while
    /// anything is live
    GameStateUpdate {
        projectiles: Vec<Projectile>,
        explosions: Vec<Explosion>,
    },
}
