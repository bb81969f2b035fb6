//! `cbs-context` — the discretized angular steering field and its solver.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`context`] | `SlotTable`, `SteeringContext`                             |
//! | [`danger`]  | `DilationOptions`, ray/proximity danger mapping, dilation  |
//! | [`solver`]  | `Steering`, `solve`, `solve_simple`, `masked_values`       |
//! | [`error`]   | `ContextError`, `ContextResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                             |
//! |---------|----------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types. |

pub mod context;
pub mod danger;
pub mod error;
pub mod solver;


pub use context::{SlotTable, SteeringContext};
pub use danger::{DilationOptions, apply_proximity_danger, apply_ray_danger, dilate_danger};
pub use error::{ContextError, ContextResult};
pub use solver::{MIN_SIGNAL, Steering, masked_value, masked_values, solve, solve_simple};
