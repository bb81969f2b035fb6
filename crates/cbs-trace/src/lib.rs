//! `cbs-trace` — steering trace writers for offline analysis.
//!
//! A [`TraceRecorder`] sits on the pilot's observer seam and streams three
//! kinds of rows to a [`TraceWriter`] backend:
//!
//! | File                | Contents                                          |
//! |---------------------|---------------------------------------------------|
//! | `steer_samples.csv` | One row per agent per tick: position, velocity, raw solve |
//! | `steer_events.csv`  | Path locks, deadlock picks, blend/path completions |
//! | `steer_fields.csv`  | Per-slot field dumps when `debug_field` is on      |
//!
//! # Usage
//!
//! ```rust,ignore
//! use cbs_trace::{CsvTraceWriter, TraceRecorder};
//!
//! let mut recorder = TraceRecorder::new(CsvTraceWriter::new(Path::new("./trace"))?);
//! for tick in 0..ticks {
//!     recorder.begin_tick(tick);
//!     for (state, input) in states.iter_mut().zip(&inputs) {
//!         let velocity = pilot.steer(state, input, &mut recorder);
//!         recorder.sample(state, input.position, velocity);
//!     }
//! }
//! recorder.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use self::csv::CsvTraceWriter;
pub use error::{TraceError, TraceResult};
pub use observer::TraceRecorder;
pub use row::{FieldSlotRow, SteerEventRow, SteerSampleRow};
pub use writer::TraceWriter;
