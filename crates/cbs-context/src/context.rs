//! The discretized angular field: slot direction table and per-agent context.

use std::f32::consts::TAU;

use cbs_core::Vec2;

use crate::error::{ContextError, ContextResult};

// ── SlotTable ────────────────────────────────────────────────────────────────

/// Precomputed unit directions for a fixed angular resolution.
///
/// Slot `i` points at angle `i * 2π/N`, measured counter-clockwise from +X.
/// Built once per resolution and shared read-only across every agent and
/// worker thread; nothing mutates it after construction.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotTable {
    angles:     Vec<f32>,
    directions: Vec<Vec2>,
}

impl SlotTable {
    /// Coarse 8-slot resolution: cheap, visibly snappy steering.
    pub const COARSE: usize = 8;
    /// Default 16-slot resolution, a good cost/smoothness trade.
    pub const STANDARD: usize = 16;
    /// Fine 32-slot resolution for agents under close scrutiny.
    pub const FINE: usize = 32;
    /// Smallest resolution with distinct forward/back/left/right.
    pub const MIN_RESOLUTION: usize = 4;

    /// Build a table with `resolution` slots.
    ///
    /// Fails with [`ContextError::InvalidResolution`] below
    /// [`MIN_RESOLUTION`][Self::MIN_RESOLUTION] — a setup mistake, not a
    /// per-tick condition.
    pub fn new(resolution: usize) -> ContextResult<Self> {
        if resolution < Self::MIN_RESOLUTION {
            return Err(ContextError::InvalidResolution(resolution));
        }
        Ok(Self::build(resolution))
    }

    /// An 8-slot table.
    pub fn coarse() -> Self {
        Self::build(Self::COARSE)
    }

    /// A 16-slot table.
    pub fn standard() -> Self {
        Self::build(Self::STANDARD)
    }

    /// A 32-slot table.
    pub fn fine() -> Self {
        Self::build(Self::FINE)
    }

    fn build(resolution: usize) -> Self {
        let step = TAU / resolution as f32;
        let angles: Vec<f32> = (0..resolution).map(|i| i as f32 * step).collect();
        let directions = angles.iter().map(|&a| Vec2::from_angle(a)).collect();
        Self { angles, directions }
    }

    /// Number of slots.
    #[inline]
    pub fn resolution(&self) -> usize {
        self.angles.len()
    }

    /// Angular width of one slot, `2π/N`.
    #[inline]
    pub fn slot_step(&self) -> f32 {
        TAU / self.resolution() as f32
    }

    /// Angle of `slot` in radians.
    #[inline]
    pub fn angle(&self, slot: usize) -> f32 {
        self.angles[slot]
    }

    /// Unit direction of `slot`.
    #[inline]
    pub fn direction(&self, slot: usize) -> Vec2 {
        self.directions[slot]
    }

    /// Index of the slot whose direction is nearest `direction`'s bearing.
    ///
    /// A zero vector has bearing 0 and maps to slot 0.
    #[inline]
    pub fn slot_toward(&self, direction: Vec2) -> usize {
        let idx = (direction.angle() / self.slot_step()).round() as isize;
        idx.rem_euclid(self.resolution() as isize) as usize
    }

    /// Circular neighbor `offset` slots counter-clockwise from `slot`
    /// (negative offsets go clockwise).
    #[inline]
    pub fn wrap(&self, slot: usize, offset: isize) -> usize {
        let n = self.resolution() as isize;
        (slot as isize + offset).rem_euclid(n) as usize
    }
}

// ── SteeringContext ──────────────────────────────────────────────────────────

/// The per-agent working field for one steering evaluation.
///
/// `interest` accumulates additively across behavior calls and is never
/// overwritten by a single call; `danger` combines by per-slot maximum and is
/// kept in `[0, 1]`. Both arrays always hold exactly one entry per slot of
/// the borrowed table.
///
/// # Lifetimes
///
/// Borrows the shared [`SlotTable`] for the duration of one evaluation. Each
/// concurrent evaluation gets its own context; only the table is shared, and
/// it is read-only.
pub struct SteeringContext<'a> {
    /// Shared slot direction table.
    pub slots: &'a SlotTable,

    /// Per-slot desirability, non-negative and unbounded.
    pub interest: Vec<f32>,

    /// Per-slot obstruction in `[0, 1]`.
    pub danger: Vec<f32>,
}

impl<'a> SteeringContext<'a> {
    /// Build a zeroed context over `slots`.
    pub fn new(slots: &'a SlotTable) -> Self {
        let n = slots.resolution();
        Self {
            slots,
            interest: vec![0.0; n],
            danger: vec![0.0; n],
        }
    }

    /// Zero both fields in place, keeping the allocations.
    pub fn reset(&mut self) {
        self.interest.fill(0.0);
        self.danger.fill(0.0);
    }

    /// Number of slots.
    #[inline]
    pub fn resolution(&self) -> usize {
        self.slots.resolution()
    }

    /// Accumulate interest into `slot`. Negative contributions are dropped so
    /// the field stays non-negative.
    #[inline]
    pub fn add_interest(&mut self, slot: usize, amount: f32) {
        self.interest[slot] += amount.max(0.0);
    }

    /// Raise `slot`'s danger to at least `amount`, clamped to `[0, 1]`.
    #[inline]
    pub fn raise_danger(&mut self, slot: usize, amount: f32) {
        let amount = amount.clamp(0.0, 1.0);
        if amount > self.danger[slot] {
            self.danger[slot] = amount;
        }
    }
}
