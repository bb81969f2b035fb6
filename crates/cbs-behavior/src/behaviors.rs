//! The behavior painters: pure transformations from a semantic desire to
//! per-slot interest.
//!
//! Every function here only ever ADDS interest, so behaviors compose
//! additively within one tick — a handler can run seek, wander, and tether on
//! the same context and the field accumulates all three. Degenerate inputs
//! (zero directions, zero ranges) paint nothing rather than failing.

use cbs_core::{NoiseField, Vec2};
use cbs_context::SteeringContext;

use crate::params::BehaviorParams;

/// Fraction of the leash radius where the tether pull starts ramping in.
const TETHER_SOFT_ZONE: f32 = 0.7;

/// Spin tie-break bonus between a strafe's two perpendicular lobes.
const STRAFE_SPIN_BIAS: f32 = 0.05;

/// Paint interest toward `target_direction`.
///
/// Each slot gains `max(0, dot(slot, target)) * weight`: full weight dead
/// ahead, fading to zero at 90° off. A zero-length direction paints nothing.
pub fn seek(ctx: &mut SteeringContext<'_>, target_direction: Vec2, weight: f32) {
    let target = target_direction.normalized_or_zero();
    if target.is_near_zero() {
        return;
    }
    for slot in 0..ctx.resolution() {
        let alignment = ctx.slots.direction(slot).dot(target);
        if alignment > 0.0 {
            ctx.add_interest(slot, alignment * weight);
        }
    }
}

/// Paint interest away from `threat_direction`; exactly [`seek`] negated.
#[inline]
pub fn flee(ctx: &mut SteeringContext<'_>, threat_direction: Vec2, weight: f32) {
    seek(ctx, -threat_direction, weight);
}

/// Paint orbit interest around a target at `distance`.
///
/// Outside `params.max_range` this degenerates to [`seek`], inside
/// `params.min_range` to [`flee`]. In between, perpendicular slots are
/// favored (`1 - |dot|`), blended with a radial correction that pulls the
/// agent back toward the middle of the band. `params.strafe_direction`
/// breaks the tie between the two perpendicular lobes.
pub fn strafe(
    ctx:              &mut SteeringContext<'_>,
    target_direction: Vec2,
    distance:         f32,
    params:           &BehaviorParams,
) {
    let target = target_direction.normalized_or_zero();
    if target.is_near_zero() {
        return;
    }
    if distance >= params.max_range {
        return seek(ctx, target, 1.0);
    }
    if distance <= params.min_range {
        return flee(ctx, target, 1.0);
    }

    let band = (params.max_range - params.min_range).max(f32::EPSILON);
    // -1 at the inner edge, +1 at the outer edge, 0 mid-band.
    let radial = (((distance - params.min_range) / band) - 0.5) * 2.0;
    let spin_side = target.perp();

    for slot in 0..ctx.resolution() {
        let dir = ctx.slots.direction(slot);
        let alignment = dir.dot(target);
        let orbit = 1.0 - alignment.abs();

        let mut score = orbit * (1.0 - radial.abs());
        score += alignment.max(0.0) * radial.max(0.0);
        score += (-alignment).max(0.0) * (-radial).max(0.0);
        if dir.dot(spin_side) * params.strafe_direction > 0.0 {
            score += orbit * STRAFE_SPIN_BIAS;
        }
        ctx.add_interest(slot, score);
    }
}

/// Paint noise-deflected interest around `forward` and return the wander
/// direction actually used.
///
/// The cursor is read, never advanced — call [`advance_cursor`] separately so
/// evaluation order and advancement timing stay in the caller's hands (a
/// blend evaluates two handlers against the same cursor, then advances once).
pub fn wander(
    ctx:     &mut SteeringContext<'_>,
    forward: Vec2,
    noise:   &NoiseField,
    cursor:  f32,
    params:  &BehaviorParams,
) -> Vec2 {
    let deflection = noise.sample(cursor) * params.wander_angle_range;
    let direction = forward.normalized_or(Vec2::UNIT_X).rotated(deflection);
    seek(ctx, direction, params.wander_weight);
    direction
}

/// The explicit cursor-advancement step paired with [`wander`].
#[inline]
pub fn advance_cursor(cursor: f32, dt: f32, rate: f32) -> f32 {
    cursor + dt * rate
}

/// Paint a homeward pull once the agent strays near its leash.
///
/// Quiet inside `TETHER_SOFT_ZONE * leash_radius`; past that the pull ramps
/// linearly and saturates at `weight` once the leash itself is crossed, so a
/// far-flung agent turns around instead of drifting further.
pub fn tether(
    ctx:          &mut SteeringContext<'_>,
    position:     Vec2,
    anchor:       Vec2,
    leash_radius: f32,
    weight:       f32,
) {
    if leash_radius <= 0.0 {
        return;
    }
    let offset = anchor - position;
    let distance = offset.length();
    let soft = leash_radius * TETHER_SOFT_ZONE;
    if distance <= soft {
        return;
    }
    let pull = ((distance - soft) / (leash_radius - soft)).min(1.0) * weight;
    seek(ctx, offset, pull);
}
