//! `cbs-pilot` — behavior orchestration, blending, and output smoothing.
//!
//! The pilot is the engine's front door: the host hands it one
//! [`SteerInput`] and one [`SteerState`] per agent per tick and gets a
//! velocity back. Everything below it (field painting, danger mapping,
//! solving) lives in `cbs-context` and `cbs-behavior`.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`pilot`]    | `Pilot` — `steer`, `steer_all`, `spawn`                   |
//! | [`builder`]  | `PilotConfig`, `PilotBuilder`                             |
//! | [`state`]    | `SteerState`, `BehaviorMode`                              |
//! | [`input`]    | `SteerInput`                                              |
//! | [`path`]     | `advance_path`                                            |
//! | [`observer`] | `SteerObserver`, `NoopObserver`                           |
//! | [`debug`]    | `FieldSnapshot`, `SlotSample`                             |
//! | [`error`]    | `PilotError`, `PilotResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | `steer_all` evaluates agents on Rayon's thread pool.     |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.       |

pub mod builder;
pub mod debug;
pub mod error;
pub mod input;
pub mod observer;
pub mod path;
pub mod pilot;
pub mod state;


pub use builder::{PilotBuilder, PilotConfig};
pub use debug::{FieldSnapshot, SlotSample};
pub use error::{PilotError, PilotResult};
pub use input::SteerInput;
pub use observer::{NoopObserver, SteerObserver};
pub use path::advance_path;
pub use pilot::Pilot;
pub use state::{BehaviorMode, SteerState};
