//! The `Pilot`: per-tick behavior orchestration, blending, and smoothing.

use cbs_behavior::{
    BehaviorName, BehaviorParams, DeadlockSide, ParamTable, PathLock, advance_cursor, flee,
    resolve_deadlocks, seek, strafe, tether, try_path_locking, wander,
};
use cbs_context::{
    DilationOptions, MIN_SIGNAL, SlotTable, Steering, SteeringContext, apply_proximity_danger,
    apply_ray_danger, dilate_danger, solve, solve_simple,
};
use cbs_core::{AgentId, NoiseField, Vec2, mix_seed, wrap_angle};
use rustc_hash::FxHashMap;

use crate::builder::{PilotBuilder, PilotConfig};
use crate::debug::FieldSnapshot;
use crate::error::{PilotError, PilotResult};
use crate::input::SteerInput;
use crate::observer::SteerObserver;
use crate::path::advance_path;
use crate::state::{BehaviorMode, SteerState};

// ── Pilot ─────────────────────────────────────────────────────────────────────

/// The steering engine's entry point: one `Pilot` serves any number of
/// agents.
///
/// Holds only shared read-only structures (slot table, parameter defaults, a
/// per-seed noise pool); all per-agent mutable state lives in the caller's
/// [`SteerState`] values. A tick for one agent is a single synchronous
/// [`steer`][Self::steer] call with no I/O and no suspension points, so a
/// host may fan evaluations out across threads — [`steer_all`][Self::steer_all]
/// does exactly that under the `parallel` feature.
///
/// Create via [`PilotBuilder`] or [`Pilot::new`].
#[derive(Debug)]
pub struct Pilot {
    /// Global configuration.
    pub config: PilotConfig,

    /// Per-behavior parameter defaults.
    pub params: ParamTable,

    pub(crate) slots: SlotTable,
    pub(crate) noise: FxHashMap<u64, NoiseField>,
}

impl Pilot {
    /// Build a pilot straight from a configuration with default parameters.
    pub fn new(config: PilotConfig) -> PilotResult<Self> {
        PilotBuilder::new(config).build()
    }

    /// Number of slots in the steering field.
    #[inline]
    pub fn resolution(&self) -> usize {
        self.slots.resolution()
    }

    /// Create steering state for a newly spawned agent and warm its noise
    /// table in the pool.
    pub fn spawn(&mut self, agent: AgentId, home: Vec2, leash_radius: f32) -> SteerState {
        let seed = mix_seed(self.config.global_seed, agent);
        self.noise.entry(seed).or_insert_with(|| NoiseField::new(seed));
        SteerState::spawn(agent, seed, home, leash_radius)
    }

    /// Steer one agent for one tick.
    ///
    /// Reads `input`, mutates `state` (mode, cursor, heading, speed, deadlock
    /// side, path index), reports to `observer`, and returns the velocity to
    /// apply this tick. Use [`NoopObserver`][crate::NoopObserver] if you
    /// don't need callbacks.
    pub fn steer<O: SteerObserver>(
        &mut self,
        state:    &mut SteerState,
        input:    &SteerInput<'_>,
        observer: &mut O,
    ) -> Vec2 {
        // Explicit field borrows so the pool entry stays disjoint from the
        // shared tables.
        let slots  = &self.slots;
        let config = &self.config;
        let params = &self.params;
        let noise  = self
            .noise
            .entry(state.seed)
            .or_insert_with(|| NoiseField::new(state.seed));

        let (velocity, record) = evaluate(slots, config, params, noise, state, input);
        replay(observer, state.agent, &record);
        velocity
    }

    /// Steer a batch of agents for one tick, one input per state.
    ///
    /// With the `parallel` feature, evaluation fans out across Rayon's
    /// thread pool; observer callbacks are replayed sequentially in slice
    /// order afterwards, so results and observations are deterministic
    /// either way.
    pub fn steer_all<O: SteerObserver>(
        &mut self,
        states:   &mut [SteerState],
        inputs:   &[SteerInput<'_>],
        observer: &mut O,
    ) -> PilotResult<Vec<Vec2>> {
        if inputs.len() != states.len() {
            return Err(PilotError::AgentCountMismatch {
                expected: states.len(),
                got:      inputs.len(),
                what:     "steer inputs",
            });
        }

        // Warm every agent's noise table up front; the evaluation phase then
        // only reads the pool.
        for state in states.iter() {
            self.noise
                .entry(state.seed)
                .or_insert_with(|| NoiseField::new(state.seed));
        }

        let slots  = &self.slots;
        let config = &self.config;
        let params = &self.params;
        let pool   = &self.noise;

        #[cfg(not(feature = "parallel"))]
        let results: Vec<(Vec2, TickRecord)> = states
            .iter_mut()
            .zip(inputs)
            .map(|(state, input)| match pool.get(&state.seed) {
                Some(noise) => evaluate(slots, config, params, noise, state, input),
                // A pool miss cannot happen after the warm pass; steer
                // nowhere rather than panic.
                None => (Vec2::ZERO, TickRecord::default()),
            })
            .collect();

        #[cfg(feature = "parallel")]
        let results: Vec<(Vec2, TickRecord)> = {
            use rayon::prelude::*;

            states
                .par_iter_mut()
                .zip(inputs.par_iter())
                .map(|(state, input)| match pool.get(&state.seed) {
                    Some(noise) => evaluate(slots, config, params, noise, state, input),
                    None => (Vec2::ZERO, TickRecord::default()),
                })
                .collect()
        };

        let mut velocities = Vec::with_capacity(results.len());
        for (state, (velocity, record)) in states.iter().zip(&results) {
            replay(observer, state.agent, record);
            velocities.push(*velocity);
        }
        Ok(velocities)
    }
}

// ── Per-tick evaluation ───────────────────────────────────────────────────────

/// Observations recorded during one evaluation, replayed to the observer
/// after the (possibly parallel) compute phase.
#[derive(Debug, Clone, Default)]
struct TickRecord {
    solved:          Option<Steering>,
    lock:            Option<PathLock>,
    deadlock:        Option<DeadlockSide>,
    blend_completed: Option<BehaviorName>,
    path_completed:  bool,
    field:           Option<FieldSnapshot>,
}

/// What one behavior handler decided, before any of it is written back.
///
/// Handlers read `state` but never mutate it; the orchestrator applies the
/// outcome (or discards it — a blend's `from` handler only contributes its
/// raw steering).
struct HandlerOutcome {
    steering:       Steering,
    deadlock:       DeadlockSide,
    path_index:     usize,
    path_completed: bool,
    lock:           Option<PathLock>,
    wandered:       bool,
}

impl HandlerOutcome {
    /// The no-op outcome: idle steering, bookkeeping unchanged.
    fn passive(state: &SteerState) -> Self {
        Self {
            steering:       Steering::idle(state.heading),
            deadlock:       DeadlockSide::None,
            path_index:     state.path_index,
            path_completed: false,
            lock:           None,
            wandered:       false,
        }
    }
}

fn evaluate(
    slots:  &SlotTable,
    config: &PilotConfig,
    params: &ParamTable,
    noise:  &NoiseField,
    state:  &mut SteerState,
    input:  &SteerInput<'_>,
) -> (Vec2, TickRecord) {
    // ── Phase 1: behavior transition intake ───────────────────────────────
    let requested = input.behavior;
    match state.mode {
        BehaviorMode::Steady(current) if requested != current => {
            state.mode = if current == BehaviorName::Idle {
                // Idle has nothing to fade out; the speed smoothing already
                // ramps the new behavior in from a standstill.
                BehaviorMode::Steady(requested)
            } else {
                BehaviorMode::Blending { from: current, to: requested, progress: 0.0 }
            };
        }
        BehaviorMode::Blending { to, .. } if requested != to => {
            // Retarget mid-blend: fade from whatever we were heading to.
            state.mode = BehaviorMode::Blending { from: to, to: requested, progress: 0.0 };
        }
        _ => {}
    }

    let mut record = TickRecord::default();
    let previous_side = state.deadlock_side;

    match state.mode {
        // ── Phase 2a: steady idle is a true no-op ─────────────────────────
        BehaviorMode::Steady(BehaviorName::Idle) => (Vec2::ZERO, record),

        // ── Phase 2b: one steady behavior ─────────────────────────────────
        BehaviorMode::Steady(behavior) => {
            let resolved = params.resolve(behavior, input.patch);
            let mut ctx = SteeringContext::new(slots);
            let outcome =
                run_handler(behavior, state, input, &resolved, noise, &mut ctx, config.interpolate);

            if config.debug_field {
                record.field = Some(FieldSnapshot::capture(
                    state.agent,
                    behavior,
                    &ctx,
                    resolved.hard_mask_threshold,
                ));
            }
            record.solved = Some(outcome.steering);
            record.lock = outcome.lock;
            record.path_completed = outcome.path_completed;
            if previous_side == DeadlockSide::None && outcome.deadlock != DeadlockSide::None {
                record.deadlock = Some(outcome.deadlock);
            }

            state.deadlock_side = outcome.deadlock;
            state.path_index = outcome.path_index;
            if outcome.wandered {
                state.cursor = advance_cursor(state.cursor, input.dt, resolved.wander_rate);
            }

            let target = target_speed_for(&resolved, outcome.steering.magnitude);
            apply_smoothing(
                state,
                outcome.steering.direction,
                target,
                resolved.turn_smoothing,
                resolved.velocity_smoothing,
                input.dt,
            );
            (state.velocity(), record)
        }

        // ── Phase 2c: blend two behaviors ─────────────────────────────────
        BehaviorMode::Blending { from, to, progress } => {
            let params_from = params.resolve(from, input.patch);
            let params_to = params.resolve(to, input.patch);

            let mut ctx = SteeringContext::new(slots);
            let outcome_from =
                run_handler(from, state, input, &params_from, noise, &mut ctx, config.interpolate);
            let outcome_to =
                run_handler(to, state, input, &params_to, noise, &mut ctx, config.interpolate);

            // Evaluate at the clamped progress so 0 and 1 reproduce the pure
            // endpoints exactly.
            let p = progress.min(1.0);
            let blended = Steering {
                direction: outcome_from
                    .steering
                    .direction
                    .lerp(outcome_to.steering.direction, p)
                    .normalized_or(outcome_to.steering.direction),
                magnitude: lerp(outcome_from.steering.magnitude, outcome_to.steering.magnitude, p),
            };

            if config.debug_field {
                // `ctx` holds the `to` handler's field (it ran last).
                record.field = Some(FieldSnapshot::capture(
                    state.agent,
                    to,
                    &ctx,
                    params_to.hard_mask_threshold,
                ));
            }
            record.solved = Some(blended);
            record.lock = outcome_to.lock;
            record.path_completed = outcome_to.path_completed;
            if previous_side == DeadlockSide::None && outcome_to.deadlock != DeadlockSide::None {
                record.deadlock = Some(outcome_to.deadlock);
            }

            // Carry the `to` behavior's bookkeeping forward; the `from`
            // handler's side effects die with the fade.
            state.deadlock_side = outcome_to.deadlock;
            state.path_index = outcome_to.path_index;
            if outcome_to.wandered || outcome_from.wandered {
                let rate = if outcome_to.wandered {
                    params_to.wander_rate
                } else {
                    params_from.wander_rate
                };
                state.cursor = advance_cursor(state.cursor, input.dt, rate);
            }

            // Smoothing inputs fade between the two parameter sets alongside
            // the raw steering.
            let target = lerp(
                target_speed_for(&params_from, outcome_from.steering.magnitude),
                target_speed_for(&params_to, outcome_to.steering.magnitude),
                p,
            );
            let turn = lerp(params_from.turn_smoothing, params_to.turn_smoothing, p);
            let vel = lerp(params_from.velocity_smoothing, params_to.velocity_smoothing, p);
            apply_smoothing(state, blended.direction, target, turn, vel, input.dt);

            if progress >= 1.0 {
                state.mode = BehaviorMode::Steady(to);
                record.blend_completed = Some(to);
            } else {
                state.mode = BehaviorMode::Blending {
                    from,
                    to,
                    progress: progress + input.dt / config.blend_duration,
                };
            }
            (state.velocity(), record)
        }
    }
}

/// Run one behavior's handler against a fresh field.
///
/// Reads `state`, paints `ctx`, and returns what it decided; writing any of
/// it back is the orchestrator's call.
fn run_handler(
    behavior:    BehaviorName,
    state:       &SteerState,
    input:       &SteerInput<'_>,
    params:      &BehaviorParams,
    noise:       &NoiseField,
    ctx:         &mut SteeringContext<'_>,
    interpolate: bool,
) -> HandlerOutcome {
    ctx.reset();
    let mut outcome = HandlerOutcome::passive(state);

    match behavior {
        BehaviorName::Wander => {
            apply_danger(ctx, state, input, params);
            let desired = wander(ctx, state.heading, noise, state.cursor, params);
            tether(ctx, input.position, state.home, state.leash_radius, params.tether_weight);
            outcome.deadlock =
                resolve_deadlocks(ctx, state.heading, desired, params, state.deadlock_side);
            outcome.wandered = true;
            outcome.steering = solve_field(ctx, params, state.heading, interpolate);
        }

        BehaviorName::Pathfind => {
            let (index, target) =
                advance_path(input.waypoints, state.path_index, input.position, params.arrive_radius);
            outcome.path_index = index;
            match target {
                None => {
                    // Freshly exhausted paths complete once; an agent re-fed
                    // a finished (or empty) route just idles.
                    outcome.path_completed = state.path_index < input.waypoints.len();
                }
                Some(waypoint) => {
                    apply_danger(ctx, state, input, params);
                    let to_waypoint = waypoint - input.position;
                    seek(ctx, to_waypoint, 1.0);
                    wander(ctx, state.heading, noise, state.cursor, params);
                    outcome.wandered = true;
                    outcome.lock = Some(try_path_locking(
                        ctx,
                        input.position,
                        to_waypoint,
                        to_waypoint.length(),
                        input.obstacles,
                        state.agent,
                        params,
                    ));
                    outcome.deadlock = resolve_deadlocks(
                        ctx,
                        state.heading,
                        to_waypoint,
                        params,
                        state.deadlock_side,
                    );
                    outcome.steering = solve_field(ctx, params, state.heading, interpolate);
                }
            }
        }

        BehaviorName::Flee => {
            if let Some(threat) = input.target {
                apply_danger(ctx, state, input, params);
                let toward_threat = threat - input.position;
                flee(ctx, toward_threat, 1.0);
                outcome.deadlock = resolve_deadlocks(
                    ctx,
                    state.heading,
                    -toward_threat,
                    params,
                    state.deadlock_side,
                );
                outcome.steering = solve_field(ctx, params, state.heading, interpolate);
            }
        }

        BehaviorName::Strafe => {
            if let Some(center) = input.target {
                apply_danger(ctx, state, input, params);
                let to_center = center - input.position;
                strafe(ctx, to_center, to_center.length(), params);
                outcome.steering = solve_field(ctx, params, state.heading, interpolate);
            }
        }

        // Idle, and any behavior this pilot doesn't recognize, steers
        // nowhere rather than crashing the tick.
        _ => {}
    }

    outcome
}

// ── Shared pieces ─────────────────────────────────────────────────────────────

fn apply_danger(
    ctx:    &mut SteeringContext<'_>,
    state:  &SteerState,
    input:  &SteerInput<'_>,
    params: &BehaviorParams,
) {
    apply_ray_danger(ctx, input.rays, params.danger_range);
    apply_proximity_danger(ctx, input.position, input.obstacles, params.danger_range, state.agent);
    dilate_danger(
        ctx,
        DilationOptions { spread: params.danger_spread, floor: params.danger_floor },
    );
}

fn solve_field(
    ctx:         &SteeringContext<'_>,
    params:      &BehaviorParams,
    fallback:    Vec2,
    interpolate: bool,
) -> Steering {
    if interpolate {
        solve(ctx, params.hard_mask_threshold, fallback)
    } else {
        solve_simple(ctx, params.hard_mask_threshold, fallback)
    }
}

/// Target speed for a solved magnitude: an empty field stops the agent, any
/// real signal keeps at least the minimum-speed bias fraction of base speed.
fn target_speed_for(params: &BehaviorParams, magnitude: f32) -> f32 {
    if magnitude <= MIN_SIGNAL {
        return 0.0;
    }
    let bias = params.min_speed_bias.clamp(0.0, 1.0);
    params.speed * (bias + (1.0 - bias) * magnitude.clamp(0.0, 1.0))
}

/// Exponentially rotate the heading toward `desired` and approach the target
/// speed. Both alphas saturate at 1 for large `rate * dt`, so smoothing can
/// only undershoot, never overshoot.
fn apply_smoothing(
    state:     &mut SteerState,
    desired:   Vec2,
    target:    f32,
    turn_rate: f32,
    vel_rate:  f32,
    dt:        f32,
) {
    let turn_alpha = 1.0 - (-turn_rate.max(0.0) * dt).exp();
    let current = state.heading.angle();
    let delta = wrap_angle(desired.angle() - current);
    state.heading = Vec2::from_angle(current + delta * turn_alpha);

    let vel_alpha = 1.0 - (-vel_rate.max(0.0) * dt).exp();
    state.speed += (target - state.speed) * vel_alpha;
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn replay<O: SteerObserver>(observer: &mut O, agent: AgentId, record: &TickRecord) {
    if let Some(report) = record.lock {
        observer.on_path_lock(agent, report);
    }
    if let Some(side) = record.deadlock {
        observer.on_deadlock(agent, side);
    }
    if let Some(steering) = &record.solved {
        observer.on_solve(agent, steering);
    }
    if let Some(snapshot) = &record.field {
        observer.on_field(agent, snapshot);
    }
    if record.path_completed {
        observer.on_path_complete(agent);
    }
    if let Some(behavior) = record.blend_completed {
        observer.on_blend_complete(agent, behavior);
    }
}
