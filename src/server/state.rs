use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::catalog::Catalog;

/// Shared handler state. The catalog is read-only after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    catalog: Arc<Catalog>,
    rng: RngSource,
}

impl AppState {
    pub fn new(catalog: Catalog, rng: RngSource) -> Self {
        Self {
            catalog: Arc::new(catalog),
            rng,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn rng(&self) -> &RngSource {
        &self.rng
    }
}

/// Randomness provider for request handlers.
///
/// `Thread` gives every worker thread its own generator. `Seeded` serializes
/// draws through one generator so a session replays exactly.
#[derive(Debug, Clone)]
pub enum RngSource {
    Thread,
    Seeded(Arc<Mutex<StdRng>>),
}

impl RngSource {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::Seeded(Arc::new(Mutex::new(StdRng::seed_from_u64(seed)))),
            None => Self::Thread,
        }
    }

    pub fn with_rng<T>(&self, f: impl FnOnce(&mut dyn RngCore) -> T) -> T {
        match self {
            Self::Thread => {
                let mut rng = rand::thread_rng();
                f(&mut rng)
            }
            Self::Seeded(shared) => {
                // A panic mid-draw leaves the generator usable.
                let mut rng = shared.lock().unwrap_or_else(PoisonError::into_inner);
                f(&mut *rng)
            }
        }
    }
}
