//! Masking, slot selection, and sub-slot interpolation.

use cbs_core::Vec2;

use crate::context::SteeringContext;

/// Field strength below which a solve is treated as empty.
pub const MIN_SIGNAL: f32 = 1e-6;

// ── Steering ─────────────────────────────────────────────────────────────────

/// A solved steering decision: where to go and how strongly the field wants it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Steering {
    /// Unit direction to steer toward.
    pub direction: Vec2,

    /// Field strength at the chosen slot, in `[0, 1]`.
    pub magnitude: f32,
}

impl Steering {
    /// The no-signal result: `fallback` direction, zero magnitude.
    ///
    /// `fallback` is normalized; a zero fallback becomes +X so the direction
    /// is always safe to rotate toward.
    #[inline]
    pub fn idle(fallback: Vec2) -> Self {
        Self {
            direction: fallback.normalized_or(Vec2::UNIT_X),
            magnitude: 0.0,
        }
    }
}

// ── Masking ──────────────────────────────────────────────────────────────────

/// Interest left in a slot once danger has had its say.
///
/// Danger above `hard_mask_threshold` zeroes the slot outright, no matter how
/// high its interest; below the threshold, interest is scaled by `1 - danger`.
#[inline]
pub fn masked_value(interest: f32, danger: f32, hard_mask_threshold: f32) -> f32 {
    let danger = danger.clamp(0.0, 1.0);
    if danger > hard_mask_threshold {
        0.0
    } else {
        interest * (1.0 - danger)
    }
}

/// Per-slot masked values paired with their slot directions.
///
/// Diagnostic view for visualization; carries no behavioral effect.
pub fn masked_values(ctx: &SteeringContext<'_>, hard_mask_threshold: f32) -> Vec<(Vec2, f32)> {
    (0..ctx.resolution())
        .map(|i| {
            let value = masked_value(ctx.interest[i], ctx.danger[i], hard_mask_threshold);
            (ctx.slots.direction(i), value)
        })
        .collect()
}

// ── Solving ──────────────────────────────────────────────────────────────────

/// Solve the field with parabolic sub-slot interpolation.
///
/// Selects the best masked slot (ties go to the lowest index), then fits a
/// parabola through it and its two circular neighbors to recover a continuous
/// angle: `offset = (L - R) / (2 * (L - 2C + R))` slot widths, applied only
/// when the denominator is well-conditioned and `|offset| <= 1`. An empty
/// field yields [`Steering::idle`] with the caller's `fallback` direction —
/// never a NaN or a zero-length vector.
pub fn solve(ctx: &SteeringContext<'_>, hard_mask_threshold: f32, fallback: Vec2) -> Steering {
    let Some((best, peak)) = best_slot(ctx, hard_mask_threshold) else {
        return Steering::idle(fallback);
    };

    let at = |slot: usize| masked_value(ctx.interest[slot], ctx.danger[slot], hard_mask_threshold);
    let left  = at(ctx.slots.wrap(best, -1));
    let right = at(ctx.slots.wrap(best, 1));

    let mut offset = 0.0;
    let denominator = 2.0 * (left - 2.0 * peak + right);
    if denominator.abs() > f32::EPSILON {
        let candidate = (left - right) / denominator;
        if candidate.is_finite() && candidate.abs() <= 1.0 {
            offset = candidate;
        }
    }

    let angle = ctx.slots.angle(best) + offset * ctx.slots.slot_step();
    Steering {
        direction: Vec2::from_angle(angle),
        magnitude: peak.clamp(0.0, 1.0),
    }
}

/// Solve without interpolation, returning the discrete slot direction.
///
/// Cheaper and visibly snappier than [`solve`]; meant for distant or
/// low-priority agents.
pub fn solve_simple(ctx: &SteeringContext<'_>, hard_mask_threshold: f32, fallback: Vec2) -> Steering {
    let Some((best, peak)) = best_slot(ctx, hard_mask_threshold) else {
        return Steering::idle(fallback);
    };
    Steering {
        direction: ctx.slots.direction(best),
        magnitude: peak.clamp(0.0, 1.0),
    }
}

/// Best masked slot and its value, or `None` when the whole field is ~0.
fn best_slot(ctx: &SteeringContext<'_>, hard_mask_threshold: f32) -> Option<(usize, f32)> {
    let mut best = 0usize;
    let mut peak = 0.0f32;
    for i in 0..ctx.resolution() {
        let value = masked_value(ctx.interest[i], ctx.danger[i], hard_mask_threshold);
        if value > peak {
            best = i;
            peak = value;
        }
    }
    (peak > MIN_SIGNAL).then_some((best, peak))
}
