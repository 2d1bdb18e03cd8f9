//! Posterior queries over forward samples.
//!
//! P(target | evidence) is estimated by keeping the samples consistent with
//! every evidence entry and taking the fraction of them where `target` is
//! true. There is no weighting and no interval: the estimate is a plain
//! frequency, and its quality depends on how many samples survive the filter
//! (reported as [`QueryEstimate::matched`]).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::sample::SampleSet;

/// Required node values, keyed by node name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Evidence(BTreeMap<String, bool>);

impl Evidence {
    /// No evidence: every sample matches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one observation.
    pub fn with(mut self, node: impl Into<String>, value: bool) -> Self {
        self.0.insert(node.into(), value);
        self
    }

    /// Set one observation, returning the value it replaced.
    pub fn insert(&mut self, node: impl Into<String>, value: bool) -> Option<bool> {
        self.0.insert(node.into(), value)
    }

    /// Observed value of `node`, if any.
    pub fn get(&self, node: &str) -> Option<bool> {
        self.0.get(node).copied()
    }

    /// Number of observed nodes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing is observed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Observations in node-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for Evidence {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl fmt::Display for Evidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (node, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", node, value)?;
        }
        write!(f, "}}")
    }
}

/// A point estimate together with the sample counts behind it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QueryEstimate {
    /// Fraction of matching samples where the target is true.
    pub probability: f64,
    /// Samples consistent with the evidence.
    pub matched: usize,
    /// Samples in the set.
    pub total: usize,
}

/// Estimate P(target = true | evidence).
///
/// # Example
///
/// ```rust
/// use bayes_sim::{exposure_network, query, sample_forward, Evidence};
///
/// let net = exposure_network().unwrap();
/// let samples = sample_forward(&net, 100_000, Some(123));
///
/// let p = query(&samples, "disease", &Evidence::new().with("exposure", true)).unwrap();
/// assert!((p - 0.7).abs() < 0.02);
/// ```
pub fn query(samples: &SampleSet, target: &str, evidence: &Evidence) -> Result<f64, SimError> {
    estimate(samples, target, evidence).map(|e| e.probability)
}

/// Like [`query`], also reporting how many samples matched.
pub fn estimate(
    samples: &SampleSet,
    target: &str,
    evidence: &Evidence,
) -> Result<QueryEstimate, SimError> {
    let target_idx = samples.index_of(target)?;
    let required = evidence
        .iter()
        .map(|(node, value)| samples.index_of(node).map(|idx| (idx, value)))
        .collect::<Result<Vec<_>, SimError>>()?;

    let (matched, hits) = samples
        .iter()
        .filter(|s| required.iter().all(|&(idx, value)| s.get(idx) == value))
        .fold((0usize, 0usize), |(matched, hits), s| {
            (matched + 1, hits + usize::from(s.get(target_idx)))
        });

    if matched == 0 {
        return Err(SimError::InsufficientEvidence {
            evidence: evidence.to_string(),
        });
    }

    Ok(QueryEstimate {
        probability: hits as f64 / matched as f64,
        matched,
        total: samples.len(),
    })
}

/// Unconditional observed frequency of `node = true`.
pub fn frequency(samples: &SampleSet, node: &str) -> Result<f64, SimError> {
    query(samples, node, &Evidence::new())
}
