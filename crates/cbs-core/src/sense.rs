//! Plain sensor data consumed by the danger mapping.
//!
//! The steering engine never queries a physical world: the host casts
//! rays and gathers nearby obstacles itself, then hands the results over
//! as the value types below.

use crate::{AgentId, Vec2};

/// One ray-cast result from the host's collision layer.
///
/// `direction` should be a unit vector in world space; `distance` is the
/// hit distance along it. A ray that hit nothing may either be omitted or
/// reported with `distance` at or beyond the look-ahead — both contribute
/// zero danger.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RayHit {
    pub direction: Vec2,
    pub distance:  f32,
}

impl RayHit {
    #[inline]
    pub fn new(direction: Vec2, distance: f32) -> Self {
        Self { direction, distance }
    }
}

/// A nearby circular obstacle reported by the host.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub position: Vec2,
    pub radius:   f32,
    /// The entity this obstacle belongs to, used to exclude the querying
    /// agent's own body from its danger field. [`AgentId::INVALID`] for
    /// world geometry that belongs to no agent.
    pub owner:    AgentId,
}

impl Obstacle {
    #[inline]
    pub fn new(position: Vec2, radius: f32, owner: AgentId) -> Self {
        Self { position, radius, owner }
    }

    /// An obstacle owned by no agent (wall segment, prop, debris).
    #[inline]
    pub fn fixed(position: Vec2, radius: f32) -> Self {
        Self { position, radius, owner: AgentId::INVALID }
    }
}
