//! Maneuver heuristics layered over the plain behaviors: path-locking and
//! deadlock resolution.

use cbs_core::{AgentId, Obstacle, Vec2};
use cbs_context::SteeringContext;

use crate::behaviors::seek;
use crate::params::BehaviorParams;

/// Interest weight added along a locked path, large enough to drown the
/// wander contribution.
pub const LOCK_BOOST: f32 = 3.0;

// ── Path-locking ─────────────────────────────────────────────────────────────

/// Outcome of a path-lock attempt.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathLock {
    /// Corridor is clear; interest was boosted along the target direction.
    Locked,
    /// An obstacle intersects the corridor; nothing was painted.
    Blocked,
    /// Target is inside `min_range` (or the direction degenerate); locking
    /// would fight the arrival logic.
    TooClose,
}

impl PathLock {
    /// `true` when the boost was actually applied.
    #[inline]
    pub fn engaged(self) -> bool {
        matches!(self, PathLock::Locked)
    }

    /// Human-readable label, useful for trace column values.
    pub fn as_str(self) -> &'static str {
        match self {
            PathLock::Locked   => "locked",
            PathLock::Blocked  => "blocked",
            PathLock::TooClose => "too_close",
        }
    }
}

impl std::fmt::Display for PathLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Commit hard to a straight corridor toward the target when it is provably
/// clear.
///
/// Sweeps a corridor `params.path_lock_width` wide along `target_direction`,
/// out to the nearer of `params.path_lock_range` and `distance_to_target`.
/// If no obstacle (other than the agent's own body) intersects it and the
/// target is farther than `params.min_range`, seeks along the corridor with
/// [`LOCK_BOOST`] weight. The returned reason code is diagnostic only.
pub fn try_path_locking(
    ctx:                &mut SteeringContext<'_>,
    position:           Vec2,
    target_direction:   Vec2,
    distance_to_target: f32,
    obstacles:          &[Obstacle],
    this_agent:         AgentId,
    params:             &BehaviorParams,
) -> PathLock {
    let direction = target_direction.normalized_or_zero();
    if direction.is_near_zero() || distance_to_target <= params.min_range {
        return PathLock::TooClose;
    }

    let reach = distance_to_target.min(params.path_lock_range);
    let half_width = params.path_lock_width * 0.5;
    let lateral_axis = direction.perp();

    for obstacle in obstacles {
        if obstacle.owner != AgentId::INVALID && obstacle.owner == this_agent {
            continue;
        }
        let offset = obstacle.position - position;
        let along = offset.dot(direction);
        if along < -obstacle.radius || along > reach + obstacle.radius {
            continue;
        }
        if offset.dot(lateral_axis).abs() <= half_width + obstacle.radius {
            return PathLock::Blocked;
        }
    }

    seek(ctx, direction, LOCK_BOOST);
    PathLock::Locked
}

// ── Deadlock resolution ──────────────────────────────────────────────────────

/// Which side an agent committed to while squeezing past a deadlock.
///
/// Persisted in agent state across ticks; [`resolve_deadlocks`] returns
/// [`None`][DeadlockSide::None] the moment the deadlock clears so the next
/// one picks a side fresh.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeadlockSide {
    /// Not deadlocked.
    #[default]
    None,
    /// Counter-clockwise of the desired direction.
    Left,
    /// Clockwise of the desired direction.
    Right,
}

impl DeadlockSide {
    /// Human-readable label, useful for trace column values.
    pub fn as_str(self) -> &'static str {
        match self {
            DeadlockSide::None  => "none",
            DeadlockSide::Left  => "left",
            DeadlockSide::Right => "right",
        }
    }
}

impl std::fmt::Display for DeadlockSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Break head-on stalemates with a persistent sideways nudge.
///
/// A deadlock holds while `forward` and `desired` are opposed within
/// `params.deadlock_threshold` (`dot <= threshold - 1`) or the desired slot
/// is hard-masked. The first deadlocked tick picks the side whose quarter
/// circle carries less danger (ties go left); subsequent ticks keep
/// `persisted` so the agent never oscillates left-right in front of a wall.
/// Returns the side to store back into agent state.
pub fn resolve_deadlocks(
    ctx:       &mut SteeringContext<'_>,
    forward:   Vec2,
    desired:   Vec2,
    params:    &BehaviorParams,
    persisted: DeadlockSide,
) -> DeadlockSide {
    let forward = forward.normalized_or_zero();
    let desired = desired.normalized_or_zero();
    if forward.is_near_zero() || desired.is_near_zero() {
        return DeadlockSide::None;
    }

    let desired_slot = ctx.slots.slot_toward(desired);
    let opposed = forward.dot(desired) <= params.deadlock_threshold - 1.0;
    let masked = ctx.danger[desired_slot] > params.hard_mask_threshold;
    if !opposed && !masked {
        return DeadlockSide::None;
    }

    let side = if persisted == DeadlockSide::None {
        clearer_side(ctx, desired_slot)
    } else {
        persisted
    };
    let lateral = if side == DeadlockSide::Left {
        desired.perp()
    } else {
        -desired.perp()
    };
    seek(ctx, lateral, params.deadlock_bias);
    side
}

/// The side of `desired_slot` whose quarter circle holds less danger.
fn clearer_side(ctx: &SteeringContext<'_>, desired_slot: usize) -> DeadlockSide {
    let quarter = (ctx.resolution() / 4).max(1);
    let mut left = 0.0;
    let mut right = 0.0;
    for d in 1..=quarter {
        left += ctx.danger[ctx.slots.wrap(desired_slot, d as isize)];
        right += ctx.danger[ctx.slots.wrap(desired_slot, -(d as isize))];
    }
    if left <= right {
        DeadlockSide::Left
    } else {
        DeadlockSide::Right
    }
}
