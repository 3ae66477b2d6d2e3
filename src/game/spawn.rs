//! Spawn placement - finding a clear slot for a new tank
//!
//! The canvas is split at its midpoint; new tanks go to the emptier side,
//! into a slot that keeps a buffer's distance from every existing tank.

use rand::Rng;

use super::{CANVAS_WIDTH, TANK_WIDTH};

/// Exclusion distance either side of an existing tank (pixels)
pub const SPAWN_BUFFER: f32 = 50.0;
/// Keep-out padding at the canvas edges (pixels)
const EDGE_PADDING: f32 = 20.0;
/// Candidate scan granularity (pixels)
const SCAN_STEP: f32 = 10.0;

/// Pick an x-coordinate for a new tank that does not overlap any existing
/// tank's exclusion zone. `tank_xs` holds the current tanks' x positions.
///
/// Falls back to a random x on the chosen side when the map is too crowded
/// for a clear slot; that position may overlap.
pub fn place_spawn<R: Rng + ?Sized>(tank_xs: &[f32], rng: &mut R) -> f32 {
    let midpoint = CANVAS_WIDTH / 2.0;

    let left_side_tanks = tank_xs.iter().filter(|&&x| x < midpoint).count();
    let right_side_tanks = tank_xs.len() - left_side_tanks;

    // Exclusion zone per existing tank, wider than the tank itself
    let occupied: Vec<(f32, f32)> = tank_xs
        .iter()
        .map(|&x| (x - SPAWN_BUFFER, x + TANK_WIDTH + SPAWN_BUFFER))
        .collect();

    // Ties favor the left side
    let spawn_on_left = left_side_tanks <= right_side_tanks;

    let (start_x, end_x) = if spawn_on_left {
        (EDGE_PADDING, midpoint - TANK_WIDTH)
    } else {
        (midpoint, CANVAS_WIDTH - TANK_WIDTH - EDGE_PADDING)
    };

    let mut valid_positions = Vec::new();
    let mut x = start_x;
    while x <= end_x {
        let clear = occupied
            .iter()
            .all(|&(start, end)| !(x < end && x + TANK_WIDTH + SPAWN_BUFFER > start));
        if clear {
            valid_positions.push(x);
        }
        x += SCAN_STEP;
    }

    if !valid_positions.is_empty() {
        return valid_positions[rng.gen_range(0..valid_positions.len())];
    }

    // Crowded map: best-effort random slot on the chosen side, overlap allowed
    start_x + rng.gen_range(0.0..(end_x - start_x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn in_left_range(x: f32) -> bool {
        (EDGE_PADDING..=CANVAS_WIDTH / 2.0 - TANK_WIDTH).contains(&x)
    }

    fn in_right_range(x: f32) -> bool {
        (CANVAS_WIDTH / 2.0..=CANVAS_WIDTH - TANK_WIDTH - EDGE_PADDING).contains(&x)
    }

    #[test]
    fn empty_map_spawns_on_left() {
        let mut rng = rng();
        for _ in 0..50 {
            let x = place_spawn(&[], &mut rng);
            assert!(in_left_range(x), "spawn {x} outside left range");
        }
    }

    #[test]
    fn chooses_emptier_side() {
        let mut rng = rng();
        // Two on the left, one on the right: must spawn right
        let x = place_spawn(&[100.0, 200.0, 500.0], &mut rng);
        assert!(in_right_range(x), "spawn {x} should be on the right");

        // Balanced counts tie-break to the left
        let x = place_spawn(&[100.0, 500.0], &mut rng);
        assert!(in_left_range(x), "spawn {x} should tie-break left");
    }

    #[test]
    fn respects_exclusion_zones() {
        let mut rng = rng();
        let tanks = [60.0, 200.0, 500.0, 650.0];
        for _ in 0..100 {
            let x = place_spawn(&tanks, &mut rng);
            for &t in &tanks {
                let no_overlap =
                    x + TANK_WIDTH + SPAWN_BUFFER <= t - SPAWN_BUFFER || x >= t + TANK_WIDTH + SPAWN_BUFFER;
                assert!(
                    no_overlap,
                    "spawn {x} violates exclusion zone of tank at {t}"
                );
            }
        }
    }

    #[test]
    fn crowded_side_falls_back_to_random_in_range() {
        let mut rng = rng();
        // Equal counts tie-break to the left, whose two tanks' exclusion
        // zones cover every scan candidate, forcing the fallback path.
        let tanks = [100.0, 280.0, 500.0, 600.0];
        for _ in 0..50 {
            let x = place_spawn(&tanks, &mut rng);
            assert!(in_left_range(x), "fallback spawn {x} left the left range");
        }
    }
}
