//! Error types for network construction, sampling and queries.

use thiserror::Error;

/// Errors that can occur while building or querying a Bayesian network.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimError {
    /// The network has no nodes.
    #[error("Network must declare at least one node")]
    EmptyNetwork,

    /// The parent/child edges contain a cycle.
    #[error("Cycle detected in network at node '{node}'")]
    CyclicGraph { node: String },

    /// A CPT has the wrong size or an entry outside [0, 1].
    #[error("Malformed CPT for node '{node}': {reason}")]
    MalformedCpt { node: String, reason: String },

    /// A CPT lookup was given the wrong number of parent values.
    #[error("CPT keyed by {expected} parents, got {got} values")]
    ParentCountMismatch { expected: usize, got: usize },

    /// A declared node has no CPT.
    #[error("Node '{node}' has no CPT")]
    MissingCpt { node: String },

    /// A name was declared more than once.
    #[error("Node '{node}' is declared more than once")]
    DuplicateNode { node: String },

    /// An edge, CPT, query or evidence entry names an undeclared node.
    #[error("Unknown node '{node}'")]
    UnknownNode { node: String },

    /// No sample (or no probability mass) is consistent with the evidence.
    #[error("No samples match evidence {evidence}; cannot estimate")]
    InsufficientEvidence { evidence: String },

    /// A sample set was paired with a network it was not drawn from.
    #[error("Sample set does not match network (nodes {expected:?}, got {got:?})")]
    NetworkMismatch {
        expected: Vec<String>,
        got: Vec<String>,
    },

    /// Exact enumeration would need more than `max` nodes.
    #[error("Network has {nodes} nodes; exact enumeration supports at most {max}")]
    NetworkTooLarge { nodes: usize, max: usize },

    /// A model file could not be parsed or failed validation.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// A report could not be rendered as JSON.
    #[error("Serialization failed: {reason}")]
    Serialization { reason: String },

    /// A model file could not be read.
    #[error("I/O error reading '{path}': {reason}")]
    Io { path: String, reason: String },
}
