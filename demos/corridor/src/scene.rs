//! Corridor scene: two long walls, a round pillar, and a simple ray sensor.
//!
//! The engine never touches world geometry; this module plays the host's
//! part and turns the scene into the `RayHit`/`Obstacle` slices the pilot
//! consumes.

use std::f32::consts::TAU;

use cbs_core::{Obstacle, RayHit, Vec2};

/// Corridor half-height; the walls run at `y = ±WALL_Y`.
pub const WALL_Y: f32 = 10.0;

/// Wall span along the corridor axis.
pub const WALL_X_MIN: f32 = -5.0;
pub const WALL_X_MAX: f32 = 125.0;

/// The pillar blocking the middle of the corridor.
pub const PILLAR_CENTER: Vec2 = Vec2 { x: 60.0, y: 0.0 };
pub const PILLAR_RADIUS: f32 = 4.0;

/// Static corridor geometry plus a fixed fan of ray directions.
pub struct CorridorScene {
    directions: Vec<Vec2>,
    obstacles:  Vec<Obstacle>,
}

impl CorridorScene {
    /// Build the scene with `ray_count` evenly spaced sensor rays.
    pub fn new(ray_count: usize) -> Self {
        let step = TAU / ray_count as f32;
        let directions = (0..ray_count)
            .map(|i| Vec2::from_angle(i as f32 * step))
            .collect();
        let obstacles = vec![Obstacle::fixed(PILLAR_CENTER, PILLAR_RADIUS)];
        Self { directions, obstacles }
    }

    /// The scene's proximity obstacles (just the pillar; walls are only
    /// visible to rays).
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Cast one ray per direction from `position`; hits at or beyond `range`
    /// are dropped, matching a sensor with finite reach.
    pub fn sense(&self, position: Vec2, range: f32) -> Vec<RayHit> {
        self.directions
            .iter()
            .filter_map(|&dir| {
                let mut nearest = f32::INFINITY;
                let candidates = [
                    wall_hit(position, dir, WALL_Y),
                    wall_hit(position, dir, -WALL_Y),
                    circle_hit(position, dir, PILLAR_CENTER, PILLAR_RADIUS),
                ];
                for hit in candidates.into_iter().flatten() {
                    nearest = nearest.min(hit);
                }
                (nearest < range).then(|| RayHit::new(dir, nearest))
            })
            .collect()
    }
}

/// Distance along `dir` (unit) to the horizontal wall at `wall_y`, if the
/// ray reaches it within the wall's span.
fn wall_hit(origin: Vec2, dir: Vec2, wall_y: f32) -> Option<f32> {
    if dir.y.abs() < 1e-6 {
        return None;
    }
    let t = (wall_y - origin.y) / dir.y;
    if t <= 0.0 {
        return None;
    }
    let x = origin.x + dir.x * t;
    (WALL_X_MIN..=WALL_X_MAX).contains(&x).then_some(t)
}

/// Distance along `dir` (unit) to the circle's near surface.
fn circle_hit(origin: Vec2, dir: Vec2, center: Vec2, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.length_sq() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t > 0.0).then_some(t)
}
