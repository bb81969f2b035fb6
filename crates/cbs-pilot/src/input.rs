//! Per-tick inputs assembled by the host before steering.

use cbs_behavior::{BehaviorName, ParamPatch};
use cbs_core::{Obstacle, RayHit, Vec2};

/// Everything the pilot may read for one agent's evaluation, as plain data.
///
/// The borrowed slices point into host-owned storage; the pilot never
/// queries a physical world. Fields the active behavior doesn't need may be
/// left at their defaults (empty slices, `None`).
///
/// # Example
///
/// ```rust,ignore
/// let input = SteerInput::new(position, BehaviorName::Pathfind, dt)
///     .rays(&hits)
///     .obstacles(&nearby)
///     .waypoints(&route);
/// let velocity = pilot.steer(&mut state, &input, &mut NoopObserver);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SteerInput<'a> {
    /// Agent position in world space.
    pub position: Vec2,

    /// Simulated seconds covered by this tick.
    pub dt: f32,

    /// Behavior the AI policy wants this tick. A change from the previous
    /// tick starts a blend.
    pub behavior: BehaviorName,

    /// Per-agent parameter overrides, merged over the named defaults.
    pub patch: Option<&'a ParamPatch>,

    /// Ray sensor hits, misses omitted.
    pub rays: &'a [RayHit],

    /// Nearby obstacle descriptors (may include the agent's own body; it is
    /// filtered out by identity).
    pub obstacles: &'a [Obstacle],

    /// Waypoint route for pathfind, paired with `SteerState::path_index`.
    pub waypoints: &'a [Vec2],

    /// Target position for flee (the threat) and strafe (the orbit center).
    pub target: Option<Vec2>,
}

impl<'a> SteerInput<'a> {
    /// A minimal input: position, behavior, and tick duration; everything
    /// else empty.
    pub fn new(position: Vec2, behavior: BehaviorName, dt: f32) -> Self {
        Self {
            position,
            dt,
            behavior,
            patch: None,
            rays: &[],
            obstacles: &[],
            waypoints: &[],
            target: None,
        }
    }

    /// Attach ray sensor hits.
    pub fn rays(mut self, rays: &'a [RayHit]) -> Self {
        self.rays = rays;
        self
    }

    /// Attach proximity obstacles.
    pub fn obstacles(mut self, obstacles: &'a [Obstacle]) -> Self {
        self.obstacles = obstacles;
        self
    }

    /// Attach the waypoint route.
    pub fn waypoints(mut self, waypoints: &'a [Vec2]) -> Self {
        self.waypoints = waypoints;
        self
    }

    /// Attach the flee/strafe target.
    pub fn target(mut self, target: Vec2) -> Self {
        self.target = Some(target);
        self
    }

    /// Attach per-agent parameter overrides.
    pub fn patch(mut self, patch: &'a ParamPatch) -> Self {
        self.patch = Some(patch);
        self
    }
}
