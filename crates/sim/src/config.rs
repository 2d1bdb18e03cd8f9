//! Model files: a network plus the settings for simulating it.
//!
//! ```json
//! {
//!   "network": {
//!     "nodes": [
//!       { "name": "exposure", "cpt": [0.2] },
//!       { "name": "disease", "parents": ["exposure"], "cpt": [0.1, 0.7] }
//!     ]
//!   },
//!   "simulation": {
//!     "iterations": 100000,
//!     "seed": 123,
//!     "queries": [
//!       { "label": "disease | exposure", "target": "disease",
//!         "evidence": { "exposure": true } }
//!     ]
//!   }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::NamedQuery;
use crate::error::SimError;
use crate::network::{Network, NetworkBuilder};
use crate::query::Evidence;

/// One node as written in a model file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub name: String,
    /// Parents in CPT key order.
    #[serde(default)]
    pub parents: Vec<String>,
    /// P(true | parents), `2^parents` entries.
    pub cpt: Vec<f64>,
}

/// Network section of a model file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub nodes: Vec<NodeSpec>,
}

impl NetworkSpec {
    /// Validate and build the network.
    pub fn build(&self) -> Result<Network, SimError> {
        self.nodes
            .iter()
            .fold(NetworkBuilder::new(), |b, node| {
                b.conditional(node.name.clone(), node.parents.iter().cloned(), node.cpt.clone())
            })
            .build()
    }
}

/// A query as written in a model file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    /// Defaults to `P(target | evidence)`.
    #[serde(default)]
    pub label: Option<String>,
    pub target: String,
    #[serde(default)]
    pub evidence: Evidence,
}

impl QuerySpec {
    pub fn label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| format!("P({} | {})", self.target, self.evidence))
    }
}

impl From<NamedQuery> for QuerySpec {
    fn from(q: NamedQuery) -> Self {
        Self {
            label: Some(q.label),
            target: q.target,
            evidence: q.evidence,
        }
    }
}

/// Simulation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of forward samples to draw.
    #[serde(default = "default_iterations")]
    pub iterations: usize,

    /// RNG seed; unseeded runs draw from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Posterior queries to answer after sampling.
    #[serde(default)]
    pub queries: Vec<QuerySpec>,
}

fn default_iterations() -> usize {
    100_000
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            seed: None,
            queries: Vec::new(),
        }
    }
}

impl SimulationConfig {
    /// Reject settings that cannot produce an estimate.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.iterations == 0 {
            return Err(SimError::InvalidConfig {
                reason: "iterations must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_query(mut self, query: impl Into<QuerySpec>) -> Self {
        self.queries.push(query.into());
        self
    }
}

/// A complete model file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelFile {
    pub network: NetworkSpec,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl ModelFile {
    /// Parse and validate a model from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        let model: Self = serde_json::from_str(json).map_err(|e| SimError::InvalidConfig {
            reason: e.to_string(),
        })?;
        model.simulation.validate()?;
        Ok(model)
    }

    /// Read, parse and validate a model file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| SimError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json_str(&json)
    }
}
