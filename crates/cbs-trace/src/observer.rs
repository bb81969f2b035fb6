//! `TraceRecorder<W>` — bridges the pilot's observer to a `TraceWriter`.

use cbs_behavior::{BehaviorName, DeadlockSide, PathLock};
use cbs_context::Steering;
use cbs_core::{AgentId, Vec2};
use cbs_pilot::{FieldSnapshot, SteerObserver, SteerState};
use rustc_hash::FxHashMap;

use crate::writer::TraceWriter;
use crate::{FieldSlotRow, SteerEventRow, SteerSampleRow, TraceError, TraceResult};

/// A [`SteerObserver`] that writes steering traces to any [`TraceWriter`]
/// backend.
///
/// Observer callbacks have no return value, so writer errors are stored
/// internally; only the first is kept. Surface it with
/// [`finish`][Self::finish] (or poll with [`take_error`][Self::take_error]).
///
/// # Usage
///
/// ```rust,ignore
/// let mut recorder = TraceRecorder::new(CsvTraceWriter::new(out_dir)?);
/// for tick in 0..ticks {
///     recorder.begin_tick(tick);
///     for (state, input) in states.iter_mut().zip(&inputs) {
///         let velocity = pilot.steer(state, input, &mut recorder);
///         recorder.sample(state, input.position, velocity);
///     }
/// }
/// recorder.finish()?;
/// ```
pub struct TraceRecorder<W: TraceWriter> {
    writer:     W,
    tick:       u64,
    solves:     FxHashMap<u32, Steering>,
    last_error: Option<TraceError>,
}

impl<W: TraceWriter> TraceRecorder<W> {
    /// Create a recorder backed by `writer`, positioned at tick 0.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            tick:       0,
            solves:     FxHashMap::default(),
            last_error: None,
        }
    }

    /// Stamp subsequent rows with `tick` and drop any solves left unsampled
    /// from the previous one.
    pub fn begin_tick(&mut self, tick: u64) {
        self.tick = tick;
        self.solves.clear();
    }

    /// Emit the sample row for one agent's tick, pairing the post-smoothing
    /// state with the raw solve captured during `steer`.
    ///
    /// Call after `steer` returns, with the position the agent was steered
    /// from and the velocity it produced.
    pub fn sample(&mut self, state: &SteerState, position: Vec2, velocity: Vec2) {
        let raw = self
            .solves
            .remove(&state.agent.0)
            .unwrap_or_else(|| Steering::idle(state.heading));
        let row = SteerSampleRow {
            agent_id:      state.agent.0,
            tick:          self.tick,
            behavior:      state.mode.active(),
            blending:      state.mode.is_blending(),
            pos_x:         position.x,
            pos_y:         position.y,
            vel_x:         velocity.x,
            vel_y:         velocity.y,
            speed:         state.speed,
            raw_dir_x:     raw.direction.x,
            raw_dir_y:     raw.direction.y,
            raw_magnitude: raw.magnitude,
        };
        let result = self.writer.write_sample(&row);
        self.store_err(result);
    }

    /// Flush and close the writer, surfacing the first error of the run.
    pub fn finish(&mut self) -> TraceResult<()> {
        let flushed = self.writer.finish();
        match self.last_error.take() {
            Some(err) => Err(err),
            None => flushed,
        }
    }

    /// Take the stored write error (if any).
    pub fn take_error(&mut self) -> Option<TraceError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn event(&mut self, agent: AgentId, event: &'static str, detail: &'static str) {
        let row = SteerEventRow {
            agent_id: agent.0,
            tick: self.tick,
            event,
            detail,
        };
        let result = self.writer.write_event(&row);
        self.store_err(result);
    }

    fn store_err(&mut self, result: TraceResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: TraceWriter> SteerObserver for TraceRecorder<W> {
    fn on_solve(&mut self, agent: AgentId, steering: &Steering) {
        self.solves.insert(agent.0, *steering);
    }

    fn on_path_lock(&mut self, agent: AgentId, report: PathLock) {
        self.event(agent, "path_lock", report.as_str());
    }

    fn on_deadlock(&mut self, agent: AgentId, side: DeadlockSide) {
        self.event(agent, "deadlock", side.as_str());
    }

    fn on_blend_complete(&mut self, agent: AgentId, behavior: BehaviorName) {
        self.event(agent, "blend_complete", behavior.as_str());
    }

    fn on_path_complete(&mut self, agent: AgentId) {
        self.event(agent, "path_complete", "");
    }

    fn on_field(&mut self, agent: AgentId, snapshot: &FieldSnapshot) {
        let rows: Vec<FieldSlotRow> = snapshot
            .slots
            .iter()
            .enumerate()
            .map(|(i, sample)| FieldSlotRow {
                agent_id: agent.0,
                tick:     self.tick,
                slot:     i as u32,
                dir_x:    sample.direction.x,
                dir_y:    sample.direction.y,
                interest: sample.interest,
                danger:   sample.danger,
                masked:   sample.masked,
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_field_rows(&rows);
            self.store_err(result);
        }
    }
}
