//! Steering observer trait for diagnostics and trace collection.

use cbs_behavior::{BehaviorName, DeadlockSide, PathLock};
use cbs_context::Steering;
use cbs_core::AgentId;

use crate::debug::FieldSnapshot;

/// Callbacks invoked by [`Pilot::steer`][crate::Pilot::steer] and
/// [`Pilot::steer_all`][crate::Pilot::steer_all] after each evaluation.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about. Under the `parallel` feature,
/// `steer_all` computes agents concurrently but replays these callbacks
/// sequentially in slice order, so implementations never need to be
/// thread-safe.
///
/// # Example — deadlock counter
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct DeadlockCounter { engaged: usize }
///
/// impl SteerObserver for DeadlockCounter {
///     fn on_deadlock(&mut self, _agent: AgentId, _side: DeadlockSide) {
///         self.engaged += 1;
///     }
/// }
/// ```
pub trait SteerObserver {
    /// Called once per active evaluation with the raw pre-smoothing steering
    /// (the blended result while blending). Idle ticks don't solve and don't
    /// report.
    fn on_solve(&mut self, _agent: AgentId, _steering: &Steering) {}

    /// Called whenever a path-lock attempt resolves, with its reason code.
    fn on_path_lock(&mut self, _agent: AgentId, _report: PathLock) {}

    /// Called on the tick deadlock resolution first picks a side (not on the
    /// ticks that merely keep it).
    fn on_deadlock(&mut self, _agent: AgentId, _side: DeadlockSide) {}

    /// Called when a blend finishes and the mode returns to steady.
    fn on_blend_complete(&mut self, _agent: AgentId, _behavior: BehaviorName) {}

    /// Called on the tick the last waypoint is reached and the path clears.
    fn on_path_complete(&mut self, _agent: AgentId) {}

    /// Called with a full-field snapshot when `PilotConfig::debug_field` is
    /// set.
    fn on_field(&mut self, _agent: AgentId, _snapshot: &FieldSnapshot) {}
}

/// A [`SteerObserver`] that does nothing. Use when you need to call `steer`
/// but don't want callbacks.
pub struct NoopObserver;

impl SteerObserver for NoopObserver {}
