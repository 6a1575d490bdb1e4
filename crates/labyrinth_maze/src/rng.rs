//! The world's single random stream
//!
//! Generation and every later gameplay draw (entrance count, patrol choices,
//! spawn shuffles and rotations) come from one `MazeRng`, so a seed fixes the
//! whole sequence as long as the draws happen in the same order.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Seeded PCG stream, remembering the seed it was built from
#[derive(Debug, Clone)]
pub struct MazeRng {
    inner: Pcg64Mcg,
    seed: u64,
}

impl MazeRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed drawn from the thread-local entropy source
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RngCore for MazeRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}
