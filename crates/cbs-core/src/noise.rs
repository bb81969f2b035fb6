//! Deterministic 2D gradient noise feeding the wander behavior.
//!
//! # Determinism strategy
//!
//! Each agent samples its own [`NoiseField`], seeded by:
//!
//!   seed = global_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive agent IDs uniformly across the seed space.
//! This means:
//!
//! - Agents with adjacent IDs follow uncorrelated wander paths.
//! - Adding agents never disturbs the seeds of existing ones — runs stay
//!   reproducible as populations grow.
//! - All randomness is spent at construction time (building the
//!   permutation table); tick-path sampling is a pure function of
//!   (table, cursor), so the same (seed, cursor) pair is bit-identical
//!   on every call and every IEEE-754 platform.
//!
//! The caller owns and advances the cursor. A `NoiseField` is read-only
//! after construction and safe for unsynchronized concurrent sampling,
//! which is what lets a host pool one field per seed across threads.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::AgentId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Fixed second coordinate for [`NoiseField::sample`]: the wander cursor
/// walks the x axis of noise space along this off-lattice lane (gradient
/// noise is exactly zero at integer lattice points, so the lane must not
/// sit on one).
const WANDER_LANE: f32 = 0.5;

/// Derive a per-agent noise seed from the run's global seed.
#[inline]
pub fn mix_seed(global_seed: u64, agent: AgentId) -> u64 {
    global_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT)
}

// ── NoiseField ────────────────────────────────────────────────────────────────

/// Seeded, repeatable 2D gradient noise.
///
/// Internally a classic permutation-table setup: 0..=255 Fisher–Yates
/// shuffled by a `SmallRng` seeded from `seed`, doubled so lattice lookups
/// never wrap explicitly. Smooth (C²) output via the quintic fade curve.
#[derive(Debug)]
pub struct NoiseField {
    /// Doubled permutation table: `perm[i] == perm[i + 256]`.
    perm: [u8; 512],
}

impl NoiseField {
    /// Build the permutation table for `seed`. All randomness happens here.
    pub fn new(seed: u64) -> Self {
        let mut base: [u8; 256] = std::array::from_fn(|i| i as u8);
        let mut rng = SmallRng::seed_from_u64(seed);
        base.shuffle(&mut rng);

        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = base[i & 255];
        }
        Self { perm }
    }

    /// Noise value for a wander cursor, in `[-1, 1]`.
    ///
    /// Nearby cursor values vary smoothly, so a cursor advanced a little
    /// each tick produces a drifting angle rather than per-tick jitter.
    #[inline]
    pub fn sample(&self, cursor: f32) -> f32 {
        self.sample2(cursor, WANDER_LANE)
    }

    /// 2D gradient noise at `(x, y)`, clamped into `[-1, 1]`.
    ///
    /// The raw gradient blend can overshoot ±1 slightly in cells with
    /// diagonal gradients; clamping keeps the contract without affecting
    /// smoothness away from the (rare) extremes.
    pub fn sample2(&self, x: f32, y: f32) -> f32 {
        let xf = x.floor();
        let yf = y.floor();
        // Two's-complement & 255 wraps negative lattice coordinates too.
        let xi = (xf as i32 & 255) as usize;
        let yi = (yf as i32 & 255) as usize;
        let dx = x - xf;
        let dy = y - yf;

        let u = fade(dx);
        let v = fade(dy);

        let a = self.perm[xi] as usize + yi;
        let b = self.perm[xi + 1] as usize + yi;

        let g00 = grad(self.perm[a], dx, dy);
        let g10 = grad(self.perm[b], dx - 1.0, dy);
        let g01 = grad(self.perm[a + 1], dx, dy - 1.0);
        let g11 = grad(self.perm[b + 1], dx - 1.0, dy - 1.0);

        let nx0 = lerp(g00, g10, u);
        let nx1 = lerp(g01, g11, u);
        lerp(nx0, nx1, v).clamp(-1.0, 1.0)
    }
}

// ── Evaluation helpers ────────────────────────────────────────────────────────

/// Quintic fade `6t⁵ - 15t⁴ + 10t³`: zero first and second derivatives at
/// the lattice ends, which is what keeps the output visually continuous.
#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Dot product of the lattice offset with one of 8 fixed gradients
/// (axis-aligned and diagonal), selected by the low hash bits.
#[inline]
fn grad(hash: u8, dx: f32, dy: f32) -> f32 {
    match hash & 7 {
        0 => dx + dy,
        1 => dx - dy,
        2 => -dx + dy,
        3 => -dx - dy,
        4 => dx,
        5 => -dx,
        6 => dy,
        _ => -dy,
    }
}
