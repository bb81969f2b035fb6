//! Named behavior identifiers shared between the AI policy layer and the
//! orchestrator.
//!
//! The set is open-ended: downstream crates match with a wildcard arm and
//! treat anything they don't recognize as [`BehaviorName::Idle`], so adding a
//! variant never crashes a running simulation.

use std::str::FromStr;

use crate::error::BehaviorError;

/// The behavior an agent is asked to run this tick.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum BehaviorName {
    /// Do nothing: zero velocity, no state changes (default state).
    #[default]
    Idle,
    /// Noise-driven roaming around the home position.
    Wander,
    /// Follow waypoints toward a goal.
    Pathfind,
    /// Run from a threat position.
    Flee,
    /// Orbit a target at a preferred range.
    Strafe,
}

impl BehaviorName {
    /// Every built-in behavior, in declaration order.
    pub const ALL: [BehaviorName; 5] = [
        BehaviorName::Idle,
        BehaviorName::Wander,
        BehaviorName::Pathfind,
        BehaviorName::Flee,
        BehaviorName::Strafe,
    ];

    /// `true` for any behavior that produces movement.
    #[inline]
    pub fn is_active(self) -> bool {
        !matches!(self, BehaviorName::Idle)
    }

    /// Human-readable label, useful for trace column values.
    pub fn as_str(self) -> &'static str {
        match self {
            BehaviorName::Idle     => "idle",
            BehaviorName::Wander   => "wander",
            BehaviorName::Pathfind => "pathfind",
            BehaviorName::Flee     => "flee",
            BehaviorName::Strafe   => "strafe",
        }
    }

    /// Parse a label, falling back to [`Idle`][Self::Idle] when it is not
    /// recognized. The forgiving runtime counterpart of [`FromStr`].
    pub fn parse_or_idle(name: &str) -> Self {
        name.parse().unwrap_or(BehaviorName::Idle)
    }
}

impl std::fmt::Display for BehaviorName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BehaviorName {
    type Err = BehaviorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle"     => Ok(BehaviorName::Idle),
            "wander"   => Ok(BehaviorName::Wander),
            "pathfind" => Ok(BehaviorName::Pathfind),
            "flee"     => Ok(BehaviorName::Flee),
            "strafe"   => Ok(BehaviorName::Strafe),
            other      => Err(BehaviorError::UnknownBehavior(other.to_owned())),
        }
    }
}
