//! Behavior parameter sets: named defaults plus per-agent overrides.
//!
//! Parameters resolve in two layers: a [`ParamTable`] holds one
//! [`BehaviorParams`] per behavior name, and an optional per-agent
//! [`ParamPatch`] shallow-merges over that — the patch wins on every field it
//! sets. Resolution happens once per tick outside the hot loop; the hot path
//! only ever sees a flat `BehaviorParams` value.

use std::f32::consts::FRAC_PI_3;

use rustc_hash::FxHashMap;

use crate::name::BehaviorName;

/// A fully resolved parameter set for one behavior evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BehaviorParams {
    /// Base movement speed in world units per second.
    pub speed: f32,

    /// Weight of the wander contribution to interest.
    pub wander_weight: f32,

    /// How fast the noise cursor advances, in cursor units per second.
    pub wander_rate: f32,

    /// Maximum wander deflection from the current heading, radians.
    pub wander_angle_range: f32,

    /// Look-ahead for ray danger and radius for proximity danger.
    pub danger_range: f32,

    /// Dilation: neighbor slots on each side that receive spilled danger.
    pub danger_spread: usize,

    /// Dilation: minimum danger a slot must hold before it spreads.
    pub danger_floor: f32,

    /// Inner range: strafe flees inside it, path-locking refuses to engage
    /// below it.
    pub min_range: f32,

    /// Outer range: strafe seeks beyond it.
    pub max_range: f32,

    /// Which perpendicular lobe strafe favors when both tie: `+1.0` is the
    /// lobe 90° counter-clockwise from the target bearing, `-1.0` the
    /// clockwise one.
    pub strafe_direction: f32,

    /// Saturation weight of the tether pull toward home.
    pub tether_weight: f32,

    /// Exponential rate at which the heading turns toward the solved
    /// direction, per second.
    pub turn_smoothing: f32,

    /// Exponential rate at which speed approaches its target, per second.
    pub velocity_smoothing: f32,

    /// Fraction of `speed` kept even at minimum solver magnitude, so a moving
    /// agent never crawls to a dead stop mid-decision.
    pub min_speed_bias: f32,

    /// Danger above this excludes a slot outright, whatever its interest.
    pub hard_mask_threshold: f32,

    /// How far ahead the path-lock corridor reaches.
    pub path_lock_range: f32,

    /// Full width of the path-lock corridor.
    pub path_lock_width: f32,

    /// How close to exactly-opposed forward/desired headings must be before
    /// deadlock resolution kicks in (`dot <= threshold - 1`).
    pub deadlock_threshold: f32,

    /// Weight of the sideways nudge applied while deadlocked.
    pub deadlock_bias: f32,

    /// Distance at which a waypoint counts as reached.
    pub arrive_radius: f32,
}

impl Default for BehaviorParams {
    fn default() -> Self {
        Self {
            speed:               50.0,
            wander_weight:       1.0,
            wander_rate:         0.8,
            wander_angle_range:  FRAC_PI_3,
            danger_range:        40.0,
            danger_spread:       2,
            danger_floor:        0.05,
            min_range:           8.0,
            max_range:           30.0,
            strafe_direction:    1.0,
            tether_weight:       2.0,
            turn_smoothing:      8.0,
            velocity_smoothing:  2.0,
            min_speed_bias:      0.15,
            hard_mask_threshold: 0.9,
            path_lock_range:     50.0,
            path_lock_width:     4.0,
            deadlock_threshold:  0.12,
            deadlock_bias:       0.6,
            arrive_radius:       2.0,
        }
    }
}

/// A sparse per-agent override; every set field replaces the named default.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParamPatch {
    pub speed:               Option<f32>,
    pub wander_weight:       Option<f32>,
    pub wander_rate:         Option<f32>,
    pub wander_angle_range:  Option<f32>,
    pub danger_range:        Option<f32>,
    pub danger_spread:       Option<usize>,
    pub danger_floor:        Option<f32>,
    pub min_range:           Option<f32>,
    pub max_range:           Option<f32>,
    pub strafe_direction:    Option<f32>,
    pub tether_weight:       Option<f32>,
    pub turn_smoothing:      Option<f32>,
    pub velocity_smoothing:  Option<f32>,
    pub min_speed_bias:      Option<f32>,
    pub hard_mask_threshold: Option<f32>,
    pub path_lock_range:     Option<f32>,
    pub path_lock_width:     Option<f32>,
    pub deadlock_threshold:  Option<f32>,
    pub deadlock_bias:       Option<f32>,
    pub arrive_radius:       Option<f32>,
}

impl ParamPatch {
    /// Shallow-merge this patch over `base`; the patch wins on collisions.
    pub fn apply(&self, base: BehaviorParams) -> BehaviorParams {
        BehaviorParams {
            speed:               self.speed.unwrap_or(base.speed),
            wander_weight:       self.wander_weight.unwrap_or(base.wander_weight),
            wander_rate:         self.wander_rate.unwrap_or(base.wander_rate),
            wander_angle_range:  self.wander_angle_range.unwrap_or(base.wander_angle_range),
            danger_range:        self.danger_range.unwrap_or(base.danger_range),
            danger_spread:       self.danger_spread.unwrap_or(base.danger_spread),
            danger_floor:        self.danger_floor.unwrap_or(base.danger_floor),
            min_range:           self.min_range.unwrap_or(base.min_range),
            max_range:           self.max_range.unwrap_or(base.max_range),
            strafe_direction:    self.strafe_direction.unwrap_or(base.strafe_direction),
            tether_weight:       self.tether_weight.unwrap_or(base.tether_weight),
            turn_smoothing:      self.turn_smoothing.unwrap_or(base.turn_smoothing),
            velocity_smoothing:  self.velocity_smoothing.unwrap_or(base.velocity_smoothing),
            min_speed_bias:      self.min_speed_bias.unwrap_or(base.min_speed_bias),
            hard_mask_threshold: self.hard_mask_threshold.unwrap_or(base.hard_mask_threshold),
            path_lock_range:     self.path_lock_range.unwrap_or(base.path_lock_range),
            path_lock_width:     self.path_lock_width.unwrap_or(base.path_lock_width),
            deadlock_threshold:  self.deadlock_threshold.unwrap_or(base.deadlock_threshold),
            deadlock_bias:       self.deadlock_bias.unwrap_or(base.deadlock_bias),
            arrive_radius:       self.arrive_radius.unwrap_or(base.arrive_radius),
        }
    }
}

/// Per-behavior parameter defaults, keyed by [`BehaviorName`].
///
/// Unknown or unregistered names resolve to `BehaviorParams::default()`, so a
/// lookup never fails at runtime.
#[derive(Debug, Clone)]
pub struct ParamTable {
    defaults: FxHashMap<BehaviorName, BehaviorParams>,
}

impl ParamTable {
    /// Built-in defaults: pathfind damps wander so waypoints dominate, wander
    /// strolls below full speed, flee sprints above it.
    pub fn new() -> Self {
        let base = BehaviorParams::default();
        let mut defaults = FxHashMap::default();
        for name in BehaviorName::ALL {
            defaults.insert(name, base);
        }
        defaults.insert(
            BehaviorName::Pathfind,
            BehaviorParams { wander_weight: 0.3, ..base },
        );
        defaults.insert(BehaviorName::Wander, BehaviorParams { speed: 30.0, ..base });
        defaults.insert(BehaviorName::Flee, BehaviorParams { speed: 60.0, ..base });
        Self { defaults }
    }

    /// Replace the defaults for one behavior.
    pub fn set(&mut self, name: BehaviorName, params: BehaviorParams) {
        self.defaults.insert(name, params);
    }

    /// Defaults for `name`, or `BehaviorParams::default()` if unregistered.
    pub fn get(&self, name: BehaviorName) -> BehaviorParams {
        self.defaults.get(&name).copied().unwrap_or_default()
    }

    /// Defaults for `name` with an optional per-agent patch merged over them.
    pub fn resolve(&self, name: BehaviorName, patch: Option<&ParamPatch>) -> BehaviorParams {
        let base = self.get(name);
        match patch {
            Some(patch) => patch.apply(base),
            None        => base,
        }
    }
}

impl Default for ParamTable {
    fn default() -> Self {
        Self::new()
    }
}
