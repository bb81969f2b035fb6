//! Sensor-to-danger mapping: ray hits, proximity obstacles, and dilation.

use cbs_core::{AgentId, Obstacle, RayHit, Vec2};

use crate::context::SteeringContext;

/// How danger spills from the slot it lands on to its angular neighbors.
///
/// Dilation approximates the clearance a physical agent needs: a wall dead
/// ahead also makes the slots just beside it risky. Falloff is linear in slot
/// distance — a neighbor `d` slots away receives `value * (1 - d / (spread + 1))`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DilationOptions {
    /// Neighbor slots on each side that receive spilled danger.
    pub spread: usize,

    /// Minimum danger a slot must hold before it spreads at all, so
    /// negligible readings don't smear across the field.
    pub floor: f32,
}

impl Default for DilationOptions {
    fn default() -> Self {
        Self { spread: 2, floor: 0.05 }
    }
}

/// Register ray sensor hits as danger.
///
/// Each hit raises the slot nearest its direction to at least
/// `1 - hit_distance / look_ahead`; a hit at or beyond `look_ahead` or
/// with a near-zero direction contributes nothing. Misses simply don't
/// appear in `rays`. Call [`dilate_danger`] once after all sources have
/// been applied.
pub fn apply_ray_danger(ctx: &mut SteeringContext<'_>, rays: &[RayHit], look_ahead: f32) {
    if look_ahead <= 0.0 {
        return;
    }
    for ray in rays {
        if ray.distance >= look_ahead || ray.direction.is_near_zero() {
            continue;
        }
        let slot = ctx.slots.slot_toward(ray.direction);
        ctx.raise_danger(slot, 1.0 - ray.distance / look_ahead);
    }
}

/// Register nearby obstacles as danger by bearing from `position`.
///
/// Obstacles owned by `this_agent` are skipped so an agent never fears its
/// own body. Contribution falls off with surface distance:
/// `1 - (center_distance - radius) / danger_radius`. An obstacle overlapping
/// `position` lands at full strength on the slot of its (possibly zero)
/// bearing.
pub fn apply_proximity_danger(
    ctx:           &mut SteeringContext<'_>,
    position:      Vec2,
    obstacles:     &[Obstacle],
    danger_radius: f32,
    this_agent:    AgentId,
) {
    if danger_radius <= 0.0 {
        return;
    }
    for obstacle in obstacles {
        if obstacle.owner != AgentId::INVALID && obstacle.owner == this_agent {
            continue;
        }
        let offset = obstacle.position - position;
        let gap = (offset.length() - obstacle.radius).max(0.0);
        if gap >= danger_radius {
            continue;
        }
        let slot = ctx.slots.slot_toward(offset);
        ctx.raise_danger(slot, 1.0 - gap / danger_radius);
    }
}

/// Spread registered danger to angular neighbors.
///
/// Works from a snapshot of the field so spilled danger never compounds
/// through repeated spreading. Slots below `options.floor` stay put.
pub fn dilate_danger(ctx: &mut SteeringContext<'_>, options: DilationOptions) {
    if options.spread == 0 {
        return;
    }
    let snapshot = ctx.danger.clone();
    for (slot, &value) in snapshot.iter().enumerate() {
        if value < options.floor {
            continue;
        }
        for d in 1..=options.spread {
            let spilled = value * (1.0 - d as f32 / (options.spread as f32 + 1.0));
            let ccw = ctx.slots.wrap(slot, d as isize);
            let cw  = ctx.slots.wrap(slot, -(d as isize));
            ctx.raise_danger(ccw, spilled);
            ctx.raise_danger(cw, spilled);
        }
    }
}
