//! Forward (ancestral) sampling.
//!
//! Each sample is one pass over the network in topological order: a node's
//! parents are always drawn before the node, so its CPT row is known when it
//! is reached and a single Bernoulli trial decides its value.
//!
//! # Example
//!
//! ```rust
//! use bayes_sim::{exposure_network, sample_forward};
//!
//! let net = exposure_network().unwrap();
//! let a = sample_forward(&net, 1000, Some(123));
//! let b = sample_forward(&net, 1000, Some(123));
//!
//! assert_eq!(a.len(), 1000);
//! assert_eq!(a, b);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::network::Network;
use crate::sample::{Sample, SampleSet};

/// Draw `count` joint samples.
///
/// With `Some(seed)` the result is fully reproducible; with `None` the RNG is
/// seeded from OS entropy.
pub fn sample_forward(network: &Network, count: usize, seed: Option<u64>) -> SampleSet {
    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let samples = draw(network, &mut rng, count);
    debug!(count, ?seed, "Drew forward samples");
    SampleSet::new(network, samples, seed)
}

/// Draw `count` joint samples from a caller-owned RNG.
pub fn sample_forward_with<R: Rng + ?Sized>(
    network: &Network,
    rng: &mut R,
    count: usize,
) -> SampleSet {
    let samples = draw(network, rng, count);
    debug!(count, "Drew forward samples from caller RNG");
    SampleSet::new(network, samples, None)
}

/// Draw a single joint sample.
pub fn sample_once<R: Rng + ?Sized>(network: &Network, rng: &mut R) -> Sample {
    let mut values = vec![false; network.len()];
    for (i, node) in network.nodes().iter().enumerate() {
        // Parents precede `i`, so they are already set
        let p = node.probability_given(&values);
        values[i] = rng.gen_bool(p);
    }
    Sample::new(values)
}

fn draw<R: Rng + ?Sized>(network: &Network, rng: &mut R, count: usize) -> Vec<Sample> {
    (0..count).map(|_| sample_once(network, rng)).collect()
}
