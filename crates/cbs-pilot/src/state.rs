//! Per-agent steering state persisted by the caller across ticks.

use cbs_behavior::{BehaviorName, DeadlockSide};
use cbs_core::{AgentId, Vec2};

/// Which behavior an agent is running, with transitions made explicit.
///
/// A blend always knows what it is blending *from*; there is no way to
/// represent "blending, origin unknown".
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BehaviorMode {
    /// Running a single behavior.
    Steady(BehaviorName),

    /// Cross-fading `from` out while `to` takes over. `progress` runs 0 → 1
    /// over the configured blend duration.
    Blending {
        from:     BehaviorName,
        to:       BehaviorName,
        progress: f32,
    },
}

impl BehaviorMode {
    /// The behavior of record: the steady behavior, or the blend target.
    #[inline]
    pub fn active(self) -> BehaviorName {
        match self {
            BehaviorMode::Steady(name) => name,
            BehaviorMode::Blending { to, .. } => to,
        }
    }

    /// `true` while a transition is in flight.
    #[inline]
    pub fn is_blending(self) -> bool {
        matches!(self, BehaviorMode::Blending { .. })
    }
}

/// Everything the orchestrator persists for one agent between ticks.
///
/// Created once at spawn (via [`Pilot::spawn`][crate::Pilot::spawn]), mutated
/// every tick by `steer`, never shared across agents. The caller owns it and
/// hands it back each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SteerState {
    /// The agent this state belongs to.
    pub agent: AgentId,

    /// Current behavior, steady or mid-blend.
    pub mode: BehaviorMode,

    /// Per-agent noise seed, derived from the global seed at spawn.
    pub seed: u64,

    /// Noise cursor: monotonically advanced, never rewound.
    pub cursor: f32,

    /// Smoothed forward heading (unit vector).
    pub heading: Vec2,

    /// Smoothed current speed, world units per second.
    pub speed: f32,

    /// Persisted deadlock tie-break side.
    pub deadlock_side: DeadlockSide,

    /// Spawn/home position, the tether anchor.
    pub home: Vec2,

    /// Tether leash radius; `0.0` disables the tether entirely.
    pub leash_radius: f32,

    /// Cursor into the caller-supplied waypoint sequence.
    pub path_index: usize,
}

impl SteerState {
    /// Fresh state for a newly spawned agent: idle, facing +X, standing
    /// still, with the noise cursor at zero.
    pub fn spawn(agent: AgentId, seed: u64, home: Vec2, leash_radius: f32) -> Self {
        Self {
            agent,
            mode: BehaviorMode::Steady(BehaviorName::Idle),
            seed,
            cursor: 0.0,
            heading: Vec2::UNIT_X,
            speed: 0.0,
            deadlock_side: DeadlockSide::None,
            home,
            leash_radius,
            path_index: 0,
        }
    }

    /// Current velocity implied by the smoothed heading and speed.
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.heading * self.speed
    }
}
