//! Per-context random number source.
//!
//! # Design Decisions
//! - One generator per script context, never shared, so no locking
//! - Seeded at construction from wall-clock nanoseconds mixed with a
//!   process-wide sequence number; contexts built in the same nanosecond
//!   still get distinct streams

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::BoundPolicy;
use crate::script::error::{ScriptError, ScriptResult};

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

// Odd 64-bit constant (golden ratio) spreading sequence numbers across the seed.
const SEQUENCE_SPREAD: u64 = 0x9e37_79b9_7f4a_7c15;

/// Random integers for the `random` binding.
#[derive(Debug, Clone)]
pub struct ScriptRandom {
    rng: StdRng,
    policy: BoundPolicy,
}

impl ScriptRandom {
    /// Create a generator seeded from the current time.
    pub fn from_time(policy: BoundPolicy) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self::with_seed(nanos ^ seq.wrapping_mul(SEQUENCE_SPREAD), policy)
    }

    /// Create a generator with a fixed seed.
    pub fn with_seed(seed: u64, policy: BoundPolicy) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            policy,
        }
    }

    pub fn policy(&self) -> BoundPolicy {
        self.policy
    }

    /// Uniform integer in `[0, bound)`.
    ///
    /// Non-positive bounds follow the configured [`BoundPolicy`].
    pub fn next_below(&mut self, bound: i64) -> ScriptResult<i64> {
        if bound > 0 {
            return Ok(self.rng.gen_range(0..bound));
        }
        match self.policy {
            BoundPolicy::Zero => {
                tracing::debug!(bound, "Non-positive random bound, returning 0");
                Ok(0)
            }
            BoundPolicy::Reject => Err(ScriptError::InvalidBound(bound)),
        }
    }
}
