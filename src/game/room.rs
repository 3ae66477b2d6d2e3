//! Room state and authoritative event loop
//!
//! One task owns all game state and processes one event at a time: an
//! inbound client message, a connect/disconnect, or a simulation tick.

use dashmap::DashMap;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, info};
use uuid::Uuid;

use crate::util::time::TICK_DURATION_MICROS;
use crate::ws::protocol::{ClientMsg, Explosion, Player, Projectile, ServerMsg};

use super::combat;
use super::snapshot;
use super::spawn::place_spawn;

/// Which connections an outgoing message is delivered to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// Every connected client
    All,
    /// Every connected client except the given one
    AllExcept(Uuid),
    /// A single client
    One(Uuid),
}

/// Per-connection outboxes, shared between the room task (fan-out) and the
/// connection tasks (registration).
pub struct ConnectionRegistry {
    connections: DashMap<Uuid, mpsc::UnboundedSender<ServerMsg>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    pub fn register(&self, conn_id: Uuid, outbox: mpsc::UnboundedSender<ServerMsg>) {
        self.connections.insert(conn_id, outbox);
    }

    pub fn unregister(&self, conn_id: Uuid) {
        self.connections.remove(&conn_id);
    }

    pub fn count(&self) -> usize {
        self.connections.len()
    }

    /// Deliver a message to the given audience. Send failures mean the
    /// connection task already went away; teardown handles the rest.
    pub fn broadcast(&self, msg: ServerMsg, audience: Audience) {
        match audience {
            Audience::One(target) => {
                if let Some(outbox) = self.connections.get(&target) {
                    let _ = outbox.send(msg);
                }
            }
            Audience::All => {
                for entry in self.connections.iter() {
                    let _ = entry.value().send(msg.clone());
                }
            }
            Audience::AllExcept(sender) => {
                for entry in self.connections.iter() {
                    if *entry.key() != sender {
                        let _ = entry.value().send(msg.clone());
                    }
                }
            }
        }
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Events fed into the room task by connection handlers
#[derive(Debug)]
pub enum RoomEvent {
    Connected { conn_id: Uuid },
    Disconnected { conn_id: Uuid },
    Message { conn_id: Uuid, msg: ClientMsg },
}

/// Room state (owned by the room task)
pub struct RoomState {
    pub players: HashMap<Uuid, Player>,
    pub projectiles: Vec<Projectile>,
    pub explosions: Vec<Explosion>,
    /// Opaque client-maintained terrain payload; None until first report
    pub terrain: Option<serde_json::Value>,
    pub rng: ChaCha8Rng,
}

impl RoomState {
    pub fn new(rng: ChaCha8Rng) -> Self {
        Self {
            players: HashMap::new(),
            projectiles: Vec::new(),
            explosions: Vec::new(),
            terrain: None,
            rng,
        }
    }
}

/// Handle for feeding events into a running room
#[derive(Clone)]
pub struct RoomHandle {
    pub event_tx: mpsc::Sender<RoomEvent>,
}

/// The authoritative game room
pub struct GameRoom {
    state: RoomState,
    event_rx: mpsc::Receiver<RoomEvent>,
    connections: Arc<ConnectionRegistry>,
}

impl GameRoom {
    pub fn new(connections: Arc<ConnectionRegistry>) -> (Self, RoomHandle) {
        let (event_tx, event_rx) = mpsc::channel(256);

        let room = Self {
            state: RoomState::new(ChaCha8Rng::from_entropy()),
            event_rx,
            connections,
        };

        (room, RoomHandle { event_tx })
    }

    /// Run the room: interleave inbound events with the fixed-rate
    /// simulation tick until every handle is dropped.
    pub async fn run(mut self) {
        info!("Game room started");

        let mut tick_interval = interval(Duration::from_micros(TICK_DURATION_MICROS));
        tick_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = tick_interval.tick() => {
                    self.step_simulation();
                }
                event = self.event_rx.recv() => {
                    match event {
                        Some(event) => self.handle_event(event),
                        None => break,
                    }
                }
            }
        }

        info!("Game room stopped");
    }

    /// Dispatch a single room event
    pub fn handle_event(&mut self, event: RoomEvent) {
        match event {
            RoomEvent::Connected { conn_id } => self.handle_connect(conn_id),
            RoomEvent::Disconnected { conn_id } => self.handle_disconnect(conn_id),
            RoomEvent::Message { conn_id, msg } => self.handle_message(conn_id, msg),
        }
    }

    /// Place a tank for the new connection, hand it the full snapshot, and
    /// announce it to everyone else.
    fn handle_connect(&mut self, conn_id: Uuid) {
        let tank_xs: Vec<f32> = self.state.players.values().map(|p| p.tank.x).collect();
        let spawn_x = place_spawn(&tank_xs, &mut self.state.rng);
        let color = format!("#{:06x}", self.state.rng.gen_range(0..=0xFFFFFFu32));

        let player = Player::spawn(spawn_x, color);

        info!(conn_id = %conn_id, spawn_x, "Player connected");

        self.state.players.insert(conn_id, player.clone());

        self.connections
            .broadcast(snapshot::init(conn_id, &self.state), Audience::One(conn_id));

        self.connections.broadcast(
            ServerMsg::PlayerJoined {
                id: conn_id,
                data: player,
            },
            Audience::AllExcept(conn_id),
        );
    }

    fn handle_disconnect(&mut self, conn_id: Uuid) {
        if self.state.players.remove(&conn_id).is_none() {
            return;
        }

        info!(conn_id = %conn_id, "Player disconnected");

        // The leaver's outbox is already unregistered, so All is the
        // remaining clients.
        self.connections
            .broadcast(ServerMsg::PlayerLeft { id: conn_id }, Audience::All);
    }

    fn handle_message(&mut self, conn_id: Uuid, msg: ClientMsg) {
        match msg {
            ClientMsg::UpdatePlayer { data } => self.handle_update_player(conn_id, data),
            ClientMsg::PlayerFired { x, y, vx, vy } => {
                self.handle_player_fired(conn_id, x, y, vx, vy)
            }
            ClientMsg::TerrainUpdated { terrain } => self.handle_terrain_updated(conn_id, terrain),
            ClientMsg::TerrainDamaged { data } => {
                // The server does not model terrain geometry; relay only
                self.connections.broadcast(
                    ServerMsg::TerrainDamaged { data },
                    Audience::AllExcept(conn_id),
                );
            }
            ClientMsg::ExplosionCreated { explosion } => {
                self.handle_explosion_created(conn_id, explosion)
            }
            ClientMsg::TankDamaged { target_id, damage } => {
                self.handle_tank_damaged(target_id, damage)
            }
        }
    }

    /// Full overwrite of the sender's record; no field diffing.
    fn handle_update_player(&mut self, conn_id: Uuid, data: Player) {
        if !self.state.players.contains_key(&conn_id) {
            debug!(conn_id = %conn_id, "update-player for unknown connection, dropping");
            return;
        }

        self.state.players.insert(conn_id, data.clone());

        self.connections.broadcast(
            ServerMsg::PlayerUpdated { id: conn_id, data },
            Audience::AllExcept(conn_id),
        );
    }

    /// Append a projectile tagged with the firer; everyone, firer included,
    /// gets the authoritative confirmation.
    fn handle_player_fired(&mut self, conn_id: Uuid, x: f32, y: f32, vx: f32, vy: f32) {
        let Some(player) = self.state.players.get(&conn_id) else {
            debug!(conn_id = %conn_id, "player-fired from unknown connection, dropping");
            return;
        };

        if player.tank.destroyed {
            debug!(conn_id = %conn_id, "player-fired from destroyed tank, dropping");
            return;
        }

        let projectile = Projectile {
            x,
            y,
            vx,
            vy,
            player_id: conn_id,
        };
        self.state.projectiles.push(projectile.clone());

        self.connections
            .broadcast(ServerMsg::ProjectileAdded { projectile }, Audience::All);
    }

    fn handle_terrain_updated(&mut self, conn_id: Uuid, terrain: serde_json::Value) {
        self.state.terrain = Some(terrain.clone());

        self.connections.broadcast(
            ServerMsg::TerrainUpdated { terrain },
            Audience::AllExcept(conn_id),
        );
    }

    fn handle_explosion_created(&mut self, conn_id: Uuid, explosion: Explosion) {
        self.state.explosions.push(explosion.clone());

        self.connections.broadcast(
            ServerMsg::ExplosionCreated { explosion },
            Audience::AllExcept(conn_id),
        );
    }

    /// Clamp the target's health, flag destruction, and confirm to everyone
    /// including the reporter.
    fn handle_tank_damaged(&mut self, target_id: Uuid, damage: i32) {
        let Some(target) = self.state.players.get_mut(&target_id) else {
            debug!(target_id = %target_id, "tank-damaged for unknown target, dropping");
            return;
        };

        combat::apply_damage(&mut target.tank, damage);

        let msg = ServerMsg::TankHealthUpdate {
            id: target_id,
            health: target.tank.health,
            destroyed: target.tank.destroyed,
        };
        self.connections.broadcast(msg, Audience::All);
    }

    /// One simulation tick. Quiet ticks (nothing in flight) neither mutate
    /// nor broadcast.
    pub fn step_simulation(&mut self) {
        if self.state.projectiles.is_empty() && self.state.explosions.is_empty() {
            return;
        }

        combat::step(&mut self.state.projectiles, &mut self.state.explosions);

        self.connections
            .broadcast(snapshot::game_state_update(&self.state), Audience::All);
    }
}
