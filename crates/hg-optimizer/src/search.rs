//! Search strategies over hypergrids.

use hg_spaces::{HgResult, Hypergrid, Point};
use hg_types::internal_error;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, error, info};

use crate::config::SamplerConfig;

/// Common trait for all search strategies.
pub trait SearchStrategy: Send + Sync {
    /// Generate the next batch of configurations to evaluate.
    ///
    /// Either exactly `count` legal points are returned or an error.
    fn suggest(&mut self, count: usize) -> HgResult<Vec<Point>>;

    /// Report completed evaluations so adaptive strategies can learn.
    fn report(&mut self, _parameters: &Point, _objective: f64) {}

    /// Human-readable strategy name.
    fn name(&self) -> &str;
}

/// Independent random sampling across a (possibly hierarchical) grid.
///
/// Each instance owns its generator, so concurrent sessions never share
/// random state. Two instances built with the same seed suggest the same
/// sequence of points.
#[derive(Debug, Clone)]
pub struct RandomSearch {
    space: Hypergrid,
    rng: ChaCha8Rng,
}

impl RandomSearch {
    pub fn new(space: Hypergrid, config: &SamplerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        info!(
            "Random search over {} (seed: {:?})",
            space.name(),
            config.seed
        );
        Self { space, rng }
    }

    pub fn space(&self) -> &Hypergrid {
        &self.space
    }

    /// Restarts the generator from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        debug!("Reseeding random search over {} with {}", self.space.name(), seed);
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    fn sample_one(&mut self) -> HgResult<Point> {
        let point = self.space.sample(&mut self.rng);
        if self.space.contains(&point) {
            Ok(point)
        } else {
            error!("Sampled point outside {}: {}", self.space.name(), point);
            Err(internal_error!(
                "sampled point {} is not contained in {}",
                point,
                self.space.name()
            ))
        }
    }
}

impl SearchStrategy for RandomSearch {
    fn suggest(&mut self, count: usize) -> HgResult<Vec<Point>> {
        (0..count).map(|_| self.sample_one()).collect()
    }

    fn name(&self) -> &str {
        "random"
    }
}
