//! Diagnostic field snapshots for visualization.

use cbs_behavior::BehaviorName;
use cbs_context::{SteeringContext, masked_value};
use cbs_core::{AgentId, Vec2};

/// One slot's view of the field after a solve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotSample {
    /// The slot's unit direction.
    pub direction: Vec2,

    /// Accumulated interest before masking.
    pub interest: f32,

    /// Accumulated danger after dilation.
    pub danger: f32,

    /// `interest * (1 - danger)`, zeroed where the hard mask applies — the
    /// value the solver actually compared.
    pub masked: f32,
}

/// A full-field snapshot of one agent's evaluation.
///
/// Built only when [`PilotConfig::debug_field`][crate::PilotConfig] is set;
/// purely observational, never fed back into steering.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldSnapshot {
    /// The agent evaluated.
    pub agent: AgentId,

    /// The behavior of record (the blend target while blending).
    pub behavior: BehaviorName,

    /// One entry per slot, in slot order.
    pub slots: Vec<SlotSample>,
}

impl FieldSnapshot {
    /// Capture the context as it stood when the solver ran.
    pub fn capture(
        agent:               AgentId,
        behavior:            BehaviorName,
        ctx:                 &SteeringContext<'_>,
        hard_mask_threshold: f32,
    ) -> Self {
        let slots = (0..ctx.resolution())
            .map(|i| SlotSample {
                direction: ctx.slots.direction(i),
                interest:  ctx.interest[i],
                danger:    ctx.danger[i],
                masked:    masked_value(ctx.interest[i], ctx.danger[i], hard_mask_threshold),
            })
            .collect();
        Self { agent, behavior, slots }
    }
}
