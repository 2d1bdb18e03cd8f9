//! Exact inference by enumeration.
//!
//! For small networks the joint distribution can be written out in full:
//!
//! ```text
//! P(X₁, ..., Xₙ) = ∏ᵢ P(Xᵢ | parents(Xᵢ))
//! ```
//!
//! Conditioning sums the joint over assignments consistent with the evidence
//! and renormalizes. This is exponential in the node count, so it is only
//! offered up to [`MAX_EXACT_NODES`] nodes; its purpose is to give ground
//! truth for Monte Carlo estimates.

use tracing::debug;

use crate::cpt::Cpt;
use crate::error::SimError;
use crate::network::Network;
use crate::query::Evidence;

/// Largest network exact enumeration accepts.
pub const MAX_EXACT_NODES: usize = 20;

/// P(X = assignment), with `assignment` in topological order.
pub fn joint_probability(network: &Network, assignment: &[bool]) -> f64 {
    if assignment.len() != network.len() {
        return 0.0;
    }

    network
        .nodes()
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let p = node.probability_given(assignment);
            if assignment[i] {
                p
            } else {
                1.0 - p
            }
        })
        .product()
}

/// Exact P(target = true | evidence).
///
/// Fails with [`SimError::InsufficientEvidence`] when the evidence has zero
/// probability under the network.
pub fn exact_query(
    network: &Network,
    target: &str,
    evidence: &Evidence,
) -> Result<f64, SimError> {
    if network.len() > MAX_EXACT_NODES {
        return Err(SimError::NetworkTooLarge {
            nodes: network.len(),
            max: MAX_EXACT_NODES,
        });
    }

    let target_idx = network.index_of(target)?;
    let required = evidence
        .iter()
        .map(|(node, value)| network.index_of(node).map(|idx| (idx, value)))
        .collect::<Result<Vec<_>, SimError>>()?;

    let n = network.len();
    let mut evidence_mass = 0.0;
    let mut target_mass = 0.0;

    for idx in 0..(1usize << n) {
        let assignment = Cpt::decode(idx, n);
        if !required.iter().all(|&(i, v)| assignment[i] == v) {
            continue;
        }
        let p = joint_probability(network, &assignment);
        evidence_mass += p;
        if assignment[target_idx] {
            target_mass += p;
        }
    }

    if evidence_mass <= 0.0 {
        return Err(SimError::InsufficientEvidence {
            evidence: evidence.to_string(),
        });
    }

    let posterior = target_mass / evidence_mass;
    debug!(node = target, %evidence, posterior, "Exact query");
    Ok(posterior)
}

/// Exact marginal P(node = true).
pub fn exact_marginal(network: &Network, node: &str) -> Result<f64, SimError> {
    exact_query(network, node, &Evidence::new())
}
