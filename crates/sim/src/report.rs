//! Summary of a simulation run.

use std::fmt;

use serde::Serialize;

use crate::error::SimError;
use crate::network::Network;
use crate::query::{Evidence, QueryEstimate};
use crate::sample::SampleSet;

/// Per-node statistics over a sample set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeSummary {
    pub name: String,
    /// Observed frequency of `true`.
    pub frequency: f64,
    /// Mean of the CPT entry each sample drew this node with.
    pub mean_probability: f64,
}

/// Result of one configured query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueryOutcome {
    Estimated { probability: f64, matched: usize },
    InsufficientEvidence,
}

impl QueryOutcome {
    /// The estimate, if any sample matched the evidence.
    pub fn probability(&self) -> Option<f64> {
        match self {
            QueryOutcome::Estimated { probability, .. } => Some(*probability),
            QueryOutcome::InsufficientEvidence => None,
        }
    }
}

impl From<QueryEstimate> for QueryOutcome {
    fn from(e: QueryEstimate) -> Self {
        QueryOutcome::Estimated {
            probability: e.probability,
            matched: e.matched,
        }
    }
}

/// One configured query and what the run made of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    /// Display label; defaults to the query written out in full.
    pub label: String,
    /// Node whose posterior was asked for.
    pub target: String,
    pub evidence: Evidence,
    pub outcome: QueryOutcome,
}

/// Node frequencies and query answers for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub iterations: usize,
    pub seed: Option<u64>,
    pub nodes: Vec<NodeSummary>,
    pub queries: Vec<QueryResult>,
}

impl Report {
    /// Summarize every node of `network` over `samples`.
    ///
    /// An empty sample set yields zero frequencies.
    pub fn summarize(network: &Network, samples: &SampleSet) -> Result<Self, SimError> {
        if !network.names().eq(samples.names().iter().map(String::as_str)) {
            return Err(SimError::NetworkMismatch {
                expected: network.names().map(str::to_string).collect(),
                got: samples.names().to_vec(),
            });
        }

        let n = samples.len().max(1) as f64;
        let mut trues = vec![0usize; network.len()];
        let mut prob_sums = vec![0.0f64; network.len()];

        for sample in samples {
            for (i, node) in network.nodes().iter().enumerate() {
                trues[i] += usize::from(sample.get(i));
                prob_sums[i] += node.probability_given(sample.values());
            }
        }

        let nodes = network
            .nodes()
            .iter()
            .enumerate()
            .map(|(i, node)| NodeSummary {
                name: node.name().to_string(),
                frequency: trues[i] as f64 / n,
                mean_probability: prob_sums[i] / n,
            })
            .collect();

        Ok(Self {
            iterations: samples.len(),
            seed: samples.seed(),
            nodes,
            queries: Vec::new(),
        })
    }

    /// Append a query result.
    pub fn push_query(
        &mut self,
        label: impl Into<String>,
        target: impl Into<String>,
        evidence: Evidence,
        outcome: QueryOutcome,
    ) {
        self.queries.push(QueryResult {
            label: label.into(),
            target: target.into(),
            evidence,
            outcome,
        });
    }

    /// Summary for one node.
    pub fn node(&self, name: &str) -> Option<&NodeSummary> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Result of the query with this label.
    pub fn query(&self, label: &str) -> Option<&QueryResult> {
        self.queries.iter().find(|q| q.label == label)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SimError> {
        serde_json::to_string_pretty(self).map_err(|e| SimError::Serialization {
            reason: e.to_string(),
        })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.seed {
            Some(seed) => writeln!(
                f,
                "Forward sampling: {} iterations (seed {})",
                self.iterations, seed
            )?,
            None => writeln!(
                f,
                "Forward sampling: {} iterations (unseeded)",
                self.iterations
            )?,
        }
        writeln!(f)?;

        let width = self
            .nodes
            .iter()
            .map(|n| n.name.len())
            .max()
            .unwrap_or(0)
            .max("node".len());
        writeln!(f, "{:<width$}  {:>8}  {:>8}", "node", "P(true)", "mean p")?;
        for node in &self.nodes {
            writeln!(
                f,
                "{:<width$}  {:>8.4}  {:>8.4}",
                node.name, node.frequency, node.mean_probability
            )?;
        }

        if !self.queries.is_empty() {
            writeln!(f)?;
        }
        for q in &self.queries {
            match &q.outcome {
                QueryOutcome::Estimated {
                    probability,
                    matched,
                } => writeln!(f, "{}: {:.4} (n = {})", q.label, probability, matched)?,
                QueryOutcome::InsufficientEvidence => writeln!(
                    f,
                    "{}: no samples match {}; increase iterations or relax evidence",
                    q.label, q.evidence
                )?,
            }
        }
        Ok(())
    }
}
