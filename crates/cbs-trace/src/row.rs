//! Plain data row types written by trace backends.

use cbs_behavior::BehaviorName;

/// One agent's steering outcome for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteerSampleRow {
    pub agent_id: u32,
    pub tick:     u64,

    /// The behavior of record (the blend target while blending).
    pub behavior: BehaviorName,
    pub blending: bool,

    pub pos_x: f32,
    pub pos_y: f32,
    pub vel_x: f32,
    pub vel_y: f32,

    /// Smoothed speed, world units per second.
    pub speed: f32,

    /// Raw pre-smoothing steering direction; the smoothed heading chases it.
    pub raw_dir_x: f32,
    pub raw_dir_y: f32,

    /// Raw solved field strength in `[0, 1]`; `0` on idle-equivalent ticks.
    pub raw_magnitude: f32,
}

/// A discrete steering event: a path-lock verdict, a deadlock side pick, a
/// blend completion, or a path completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SteerEventRow {
    pub agent_id: u32,
    pub tick:     u64,

    /// Event kind label (`path_lock`, `deadlock`, `blend_complete`,
    /// `path_complete`).
    pub event: &'static str,

    /// Kind-specific detail (lock verdict, side, target behavior); empty for
    /// `path_complete`.
    pub detail: &'static str,
}

/// One slot of a captured steering field.
///
/// Only produced when the pilot runs with `debug_field` set; a full snapshot
/// becomes one row per slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSlotRow {
    pub agent_id: u32,
    pub tick:     u64,
    pub slot:     u32,
    pub dir_x:    f32,
    pub dir_y:    f32,
    pub interest: f32,
    pub danger:   f32,

    /// `interest * (1 - danger)`, zeroed under the hard mask — the value the
    /// solver compared.
    pub masked: f32,
}
