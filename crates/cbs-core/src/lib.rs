//! `cbs-core` — foundational types for the `rust_cbs` steering engine.
//!
//! This crate is a dependency of every other `cbs-*` crate.  It
//! intentionally has no `cbs-*` dependencies and minimal external ones
//! (only `rand`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                                |
//! |-----------|---------------------------------------------------------|
//! | [`vec2`]  | `Vec2` algebra: safe normalize, rotate, perp, lerp      |
//! | [`ids`]   | `AgentId`                                               |
//! | [`noise`] | `NoiseField` (seeded gradient noise), `mix_seed`        |
//! | [`sense`] | `RayHit`, `Obstacle` sensor data                        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.       |

pub mod ids;
pub mod noise;
pub mod sense;
pub mod vec2;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use ids::AgentId;
pub use noise::{NoiseField, mix_seed};
pub use sense::{Obstacle, RayHit};
pub use vec2::{Vec2, wrap_angle};
