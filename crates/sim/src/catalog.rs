//! Ready-made networks.

use crate::error::SimError;
use crate::network::{Network, NetworkBuilder};
use crate::query::Evidence;

/// A named posterior query.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedQuery {
    pub label: String,
    pub target: String,
    pub evidence: Evidence,
}

/// Two-node exposure/disease network.
///
/// ```text
/// exposure ──→ disease
/// ```
///
/// P(exposure) = 0.2; P(disease | exposure) = 0.7, P(disease | ¬exposure) = 0.1.
pub fn exposure_network() -> Result<Network, SimError> {
    NetworkBuilder::new()
        .prior("exposure", 0.2)
        .conditional("disease", ["exposure"], vec![0.1, 0.7])
        .build()
}

/// Six-node disease-screening network.
///
/// Structure:
/// ```text
///  risk   exposure
///     \   /     \
///     dis_a    dis_b
///       |  \   /  |
///       |   \ /   |
///       |   / \   |
///      sym     test_a
/// ```
///
/// `sym` and `test_a` both depend on `(dis_a, dis_b)`.
pub fn disease_network() -> Result<Network, SimError> {
    NetworkBuilder::new()
        .prior("exposure", 0.2)
        .prior("risk", 0.3)
        // Keyed [risk, exposure]: FF, FT, TF, TT
        .conditional("dis_a", ["risk", "exposure"], vec![0.1, 0.5, 0.6, 0.7])
        .conditional("dis_b", ["exposure"], vec![0.2, 0.7])
        // Keyed [dis_a, dis_b]
        .conditional("sym", ["dis_a", "dis_b"], vec![0.05, 0.4, 0.6, 0.9])
        .conditional("test_a", ["dis_a", "dis_b"], vec![0.08, 0.2, 0.85, 0.97])
        .build()
}

/// The two questions asked of [`disease_network`].
pub fn disease_queries() -> Vec<NamedQuery> {
    vec![
        NamedQuery {
            label: "Probability of disease A | disease B = false, symptoms = true".to_string(),
            target: "dis_a".to_string(),
            evidence: Evidence::new().with("dis_b", false).with("sym", true),
        },
        NamedQuery {
            label: "Probability of exposure | test A = true, symptoms = true".to_string(),
            target: "exposure".to_string(),
            evidence: Evidence::new().with("test_a", true).with("sym", true),
        },
    ]
}

/// The classic "sprinkler" network.
///
/// Structure:
/// ```text
///      cloudy
///      ↙     ↘
/// sprinkler   rain
///        ↘    ↙
///       wet_grass
/// ```
pub fn sprinkler_network() -> Result<Network, SimError> {
    NetworkBuilder::new()
        .prior("cloudy", 0.5)
        .conditional("sprinkler", ["cloudy"], vec![0.5, 0.1])
        .conditional("rain", ["cloudy"], vec![0.2, 0.8])
        // [sprinkler, rain]: dry, rain only, sprinkler only, both
        .conditional("wet_grass", ["sprinkler", "rain"], vec![0.0, 0.8, 0.9, 0.99])
        .build()
}
