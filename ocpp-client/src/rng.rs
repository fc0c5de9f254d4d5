use std::sync::Mutex;

use ocppx_core::RequestId;
use rand::{rngs::SmallRng, RngCore, SeedableRng};

/// Source of request ids. Seeded, so a test run produces the same ids every
/// time.
#[derive(Debug)]
pub struct IdGenerator {
    rng: Mutex<SmallRng>,
}

impl IdGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }

    pub fn request_id(&self) -> RequestId {
        let mut bytes = [0u8; 16];
        self.rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .fill_bytes(&mut bytes);
        RequestId::from_random_bytes(bytes)
    }
}
