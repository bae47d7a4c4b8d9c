//! Generator construction and sharing
//!
//! Every stochastic initialiser owns exactly one generator. When a run needs a single
//! stream of randomness across many initialisers, wrap one generator in a [`SharedRng`]
//! and hand clones of the handle to each of them: state then advances in call order.
//!
//! ```
//! # use mlp_core::rng::{seeded_rng, SharedRng};
//! # use mlp_core::init::{Initialiser, XavierInit, KaimingInit};
//! let shared = SharedRng::new(seeded_rng(7));
//! let mut hidden = XavierInit::with_rng(shared.clone());
//! let mut output = KaimingInit::with_rng(shared);
//! let w1 = hidden.produce(&[4, 8]).unwrap();
//! let w2 = output.produce(&[8, 2]).unwrap();
//! assert_eq!(w1.shape(), &[4, 8]);
//! assert_eq!(w2.shape(), &[8, 2]);
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::config::DEFAULT_SEED;

/// A generator seeded with [`DEFAULT_SEED`]
pub fn default_rng() -> StdRng {
    seeded_rng(DEFAULT_SEED)
}

/// A generator seeded with `seed`
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Cloneable handle to one generator.
///
/// All clones draw from the same underlying state. Access is serialised by a mutex, so
/// handles may cross threads, but the resulting sequences still depend on call order.
#[derive(Clone, Debug)]
pub struct SharedRng {
    inner: Arc<Mutex<StdRng>>,
}

impl SharedRng {
    /// Take ownership of `rng` and make it shareable
    pub fn new(rng: StdRng) -> Self {
        SharedRng {
            inner: Arc::new(Mutex::new(rng)),
        }
    }

    /// Shareable generator seeded with `seed`
    pub fn from_seed(seed: u64) -> Self {
        Self::new(seeded_rng(seed))
    }

    fn lock(&self) -> MutexGuard<'_, StdRng> {
        // A panic while holding the lock cannot leave StdRng half-updated.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RngCore for SharedRng {
    fn next_u32(&mut self) -> u32 {
        self.lock().next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.lock().next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.lock().fill_bytes(dst)
    }
}
