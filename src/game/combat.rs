//! Combat simulation - projectile flight, explosion animation, tank damage
//!
//! The room's tick loop is the only caller that removes projectiles and
//! explosions; message handlers only append.

use crate::ws::protocol::{Explosion, Projectile, Tank};

use super::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Downward acceleration per tick (pixels/tick^2)
pub const GRAVITY: f32 = 0.2;
/// Explosion radius growth per tick (pixels)
pub const EXPLOSION_GROWTH_STEP: f32 = 2.0;
/// Explosion radius shrink per tick (pixels)
pub const EXPLOSION_SHRINK_STEP: f32 = 1.0;

/// Advance a projectile one tick, returns false once it leaves the canvas.
/// Flying above the top edge is allowed; shots arc back down.
pub fn step_projectile(p: &mut Projectile) -> bool {
    p.vy += GRAVITY;
    p.x += p.vx;
    p.y += p.vy;
    !(p.x < 0.0 || p.x > CANVAS_WIDTH || p.y > CANVAS_HEIGHT)
}

/// Advance an explosion's radius one tick, returns false once it has
/// shrunk away.
pub fn step_explosion(e: &mut Explosion) -> bool {
    if e.growing {
        e.current_radius += EXPLOSION_GROWTH_STEP;
        if e.current_radius >= e.max_radius {
            e.growing = false;
        }
        true
    } else {
        e.current_radius -= EXPLOSION_SHRINK_STEP;
        e.current_radius > 0.0
    }
}

/// Advance every live projectile and explosion one tick, dropping the
/// finished ones.
pub fn step(projectiles: &mut Vec<Projectile>, explosions: &mut Vec<Explosion>) {
    projectiles.retain_mut(step_projectile);
    explosions.retain_mut(step_explosion);
}

/// Apply client-reported damage to a tank. Health stays in 0..=100 and the
/// tank is marked destroyed when it reaches 0.
pub fn apply_damage(tank: &mut Tank, damage: i32) {
    tank.health = (tank.health - damage).clamp(0, 100);
    if tank.health == 0 {
        tank.destroyed = true;
    }
}
