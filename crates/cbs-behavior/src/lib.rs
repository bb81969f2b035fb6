//! `cbs-behavior` — named behaviors, parameters, and maneuver heuristics.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`name`]      | `BehaviorName`                                               |
//! | [`params`]    | `BehaviorParams`, `ParamPatch`, `ParamTable`                 |
//! | [`behaviors`] | `seek`, `flee`, `strafe`, `wander`, `tether`                 |
//! | [`maneuver`]  | `try_path_locking`, `resolve_deadlocks`, reason/side enums   |
//! | [`error`]     | `BehaviorError`, `BehaviorResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                             |
//! |---------|----------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types. |

pub mod behaviors;
pub mod error;
pub mod maneuver;
pub mod name;
pub mod params;

#[cfg(test)]
mod tests;

pub use behaviors::{advance_cursor, flee, seek, strafe, tether, wander};
pub use error::{BehaviorError, BehaviorResult};
pub use maneuver::{DeadlockSide, LOCK_BOOST, PathLock, resolve_deadlocks, try_path_locking};
pub use name::BehaviorName;
pub use params::{BehaviorParams, ParamPatch, ParamTable};
