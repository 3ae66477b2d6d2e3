//! Snapshot building for joins and tick broadcasts

use uuid::Uuid;

use crate::ws::protocol::ServerMsg;

use super::room::RoomState;

/// Full room snapshot handed to a newly-joined connection, its own id
/// included so the client knows which tank is local.
pub fn init(conn_id: Uuid, state: &RoomState) -> ServerMsg {
    ServerMsg::Init {
        id: conn_id,
        players: state.players.clone(),
        projectiles: state.projectiles.clone(),
        explosions: state.explosions.clone(),
        terrain_state: state.terrain.clone(),
    }
}

/// Transient-effect state broadcast after each live simulation tick
pub fn game_state_update(state: &RoomState) -> ServerMsg {
    ServerMsg::GameStateUpdate {
        projectiles: state.projectiles.clone(),
        explosions: state.explosions.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ws::protocol::{Player, Projectile};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn init_carries_the_whole_room() {
        let mut state = RoomState::new(ChaCha8Rng::seed_from_u64(1));
        let id = Uuid::new_v4();
        state
            .players
            .insert(id, Player::spawn(150.0, "#abcdef".to_string()));
        state.projectiles.push(Projectile {
            x: 10.0,
            y: 20.0,
            vx: 1.0,
            vy: -2.0,
            player_id: id,
        });
        state.terrain = Some(serde_json::json!([1, 2, 3]));

        match init(id, &state) {
            ServerMsg::Init {
                id: own_id,
                players,
                projectiles,
                explosions,
                terrain_state,
            } => {
                assert_eq!(own_id, id);
                assert_eq!(players.len(), 1);
                assert_eq!(projectiles.len(), 1);
                assert!(explosions.is_empty());
                assert!(terrain_state.is_some());
            }
            other => panic!("expected init, got {other:?}"),
        }
    }
}
