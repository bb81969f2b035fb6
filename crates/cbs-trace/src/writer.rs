//! The `TraceWriter` trait implemented by backend writers.

use crate::{FieldSlotRow, SteerEventRow, SteerSampleRow, TraceResult};

/// Sink for steering trace rows.
///
/// [`TraceRecorder`][crate::TraceRecorder] drives one of these from the
/// pilot's observer callbacks; errors it returns are stored there and
/// surfaced after the run.
pub trait TraceWriter {
    /// Write one per-agent per-tick sample row.
    fn write_sample(&mut self, row: &SteerSampleRow) -> TraceResult<()>;

    /// Write one discrete event row.
    fn write_event(&mut self, row: &SteerEventRow) -> TraceResult<()>;

    /// Write a batch of field rows (one captured snapshot = one row per slot).
    fn write_field_rows(&mut self, rows: &[FieldSlotRow]) -> TraceResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> TraceResult<()>;
}
