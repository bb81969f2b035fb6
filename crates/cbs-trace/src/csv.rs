//! CSV trace backend.
//!
//! Creates three files in the configured output directory:
//! - `steer_samples.csv` — one row per agent per tick
//! - `steer_events.csv`  — path locks, deadlocks, blend/path completions
//! - `steer_fields.csv`  — per-slot field dumps (empty unless `debug_field`)

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::TraceWriter;
use crate::{FieldSlotRow, SteerEventRow, SteerSampleRow, TraceResult};

/// Writes steering traces to three CSV files.
pub struct CsvTraceWriter {
    samples:  Writer<File>,
    events:   Writer<File>,
    fields:   Writer<File>,
    finished: bool,
}

impl CsvTraceWriter {
    /// Open (or create) the three CSV files in `dir` and write the header
    /// rows.
    pub fn new(dir: &Path) -> TraceResult<Self> {
        let mut samples = Writer::from_path(dir.join("steer_samples.csv"))?;
        samples.write_record([
            "agent_id",
            "tick",
            "behavior",
            "blending",
            "pos_x",
            "pos_y",
            "vel_x",
            "vel_y",
            "speed",
            "raw_dir_x",
            "raw_dir_y",
            "raw_magnitude",
        ])?;

        let mut events = Writer::from_path(dir.join("steer_events.csv"))?;
        events.write_record(["agent_id", "tick", "event", "detail"])?;

        let mut fields = Writer::from_path(dir.join("steer_fields.csv"))?;
        fields.write_record([
            "agent_id", "tick", "slot", "dir_x", "dir_y", "interest", "danger", "masked",
        ])?;

        Ok(Self {
            samples,
            events,
            fields,
            finished: false,
        })
    }
}

impl TraceWriter for CsvTraceWriter {
    fn write_sample(&mut self, row: &SteerSampleRow) -> TraceResult<()> {
        self.samples.write_record(&[
            row.agent_id.to_string(),
            row.tick.to_string(),
            row.behavior.as_str().to_string(),
            (row.blending as u8).to_string(),
            row.pos_x.to_string(),
            row.pos_y.to_string(),
            row.vel_x.to_string(),
            row.vel_y.to_string(),
            row.speed.to_string(),
            row.raw_dir_x.to_string(),
            row.raw_dir_y.to_string(),
            row.raw_magnitude.to_string(),
        ])?;
        Ok(())
    }

    fn write_event(&mut self, row: &SteerEventRow) -> TraceResult<()> {
        self.events.write_record(&[
            row.agent_id.to_string(),
            row.tick.to_string(),
            row.event.to_string(),
            row.detail.to_string(),
        ])?;
        Ok(())
    }

    fn write_field_rows(&mut self, rows: &[FieldSlotRow]) -> TraceResult<()> {
        for row in rows {
            self.fields.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                row.slot.to_string(),
                row.dir_x.to_string(),
                row.dir_y.to_string(),
                row.interest.to_string(),
                row.danger.to_string(),
                row.masked.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> TraceResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.samples.flush()?;
        self.events.flush()?;
        self.fields.flush()?;
        Ok(())
    }
}
