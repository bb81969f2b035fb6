//! Configuration and fluent builder for constructing a [`Pilot`].

use cbs_behavior::{BehaviorName, BehaviorParams, ParamTable};
use cbs_context::SlotTable;
use rustc_hash::FxHashMap;

use crate::{Pilot, PilotError, PilotResult};

/// Global pilot configuration, shared by every agent it steers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PilotConfig {
    /// Angular resolution of the steering field (number of slots).
    pub resolution: usize,

    /// Global seed; per-agent noise seeds are derived from it at spawn.
    pub global_seed: u64,

    /// Seconds a behavior blend takes to run 0 → 1.
    pub blend_duration: f32,

    /// Use sub-slot interpolation (`solve`) rather than the discrete
    /// `solve_simple`. Turn off for crowds that are far from the camera.
    pub interpolate: bool,

    /// Capture a [`FieldSnapshot`][crate::FieldSnapshot] per evaluation and
    /// feed it to the observer. Costs an allocation per agent per tick.
    pub debug_field: bool,
}

impl Default for PilotConfig {
    fn default() -> Self {
        Self {
            resolution:     SlotTable::STANDARD,
            global_seed:    0,
            blend_duration: 0.25,
            interpolate:    true,
            debug_field:    false,
        }
    }
}

/// Fluent builder for [`Pilot`].
///
/// # Optional inputs (have defaults)
///
/// | Method                     | Default            |
/// |----------------------------|--------------------|
/// | `.params(t)`               | `ParamTable::new()`|
/// | `.behavior_params(n, p)`   | built-in defaults  |
///
/// # Example
///
/// ```rust,ignore
/// let mut pilot = PilotBuilder::new(PilotConfig::default())
///     .behavior_params(BehaviorName::Flee, BehaviorParams { speed: 80.0, ..Default::default() })
///     .build()?;
/// ```
pub struct PilotBuilder {
    config: PilotConfig,
    params: Option<ParamTable>,
}

impl PilotBuilder {
    /// Create a builder from a configuration.
    pub fn new(config: PilotConfig) -> Self {
        Self { config, params: None }
    }

    /// Supply a complete parameter table, replacing the built-in defaults.
    pub fn params(mut self, table: ParamTable) -> Self {
        self.params = Some(table);
        self
    }

    /// Override the defaults for a single behavior.
    pub fn behavior_params(mut self, name: BehaviorName, params: BehaviorParams) -> Self {
        self.params.get_or_insert_with(ParamTable::new).set(name, params);
        self
    }

    /// Validate the configuration and return a ready [`Pilot`].
    ///
    /// Setup mistakes (a resolution below the minimum, a non-positive blend
    /// duration) are reported here, once — never per tick.
    pub fn build(self) -> PilotResult<Pilot> {
        let slots = SlotTable::new(self.config.resolution)?;
        if !(self.config.blend_duration > 0.0) || !self.config.blend_duration.is_finite() {
            return Err(PilotError::Config(format!(
                "blend_duration must be positive and finite, got {}",
                self.config.blend_duration
            )));
        }
        Ok(Pilot {
            config: self.config,
            params: self.params.unwrap_or_default(),
            slots,
            noise: FxHashMap::default(),
        })
    }
}
