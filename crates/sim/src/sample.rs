//! Joint samples drawn from a network.

use std::collections::HashMap;

use crate::error::SimError;
use crate::network::Network;

/// One joint assignment, indexed by the network's topological order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sample {
    values: Vec<bool>,
}

impl Sample {
    pub(crate) fn new(values: Vec<bool>) -> Self {
        Self { values }
    }

    /// Value of the node at topological position `idx`.
    pub fn get(&self, idx: usize) -> bool {
        self.values[idx]
    }

    /// All values, in topological order.
    pub fn values(&self) -> &[bool] {
        &self.values
    }

    /// Number of nodes assigned.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True for a sample of an empty network.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An immutable batch of joint samples.
///
/// Carries the node names of the network it was drawn from so that queries
/// can resolve names without the network.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    names: Vec<String>,
    index: HashMap<String, usize>,
    samples: Vec<Sample>,
    seed: Option<u64>,
}

impl SampleSet {
    pub(crate) fn new(network: &Network, samples: Vec<Sample>, seed: Option<u64>) -> Self {
        let names: Vec<String> = network.names().map(str::to_string).collect();
        let index = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i))
            .collect();
        Self {
            names,
            index,
            samples,
            seed,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when no samples were drawn.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples in generation order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Iterate samples in generation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Node names, in topological order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Seed the samples were drawn with, if one was supplied.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Topological position of a node.
    pub fn index_of(&self, name: &str) -> Result<usize, SimError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| SimError::UnknownNode {
                node: name.to_string(),
            })
    }

    /// Every value drawn for one node, in generation order.
    pub fn column(&self, name: &str) -> Result<Vec<bool>, SimError> {
        let idx = self.index_of(name)?;
        Ok(self.samples.iter().map(|s| s.get(idx)).collect())
    }
}

impl<'a> IntoIterator for &'a SampleSet {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
