//! # Bayes-Sim - Forward Sampling for Boolean Bayesian Networks
//!
//! This crate simulates small discrete Bayesian networks by Monte Carlo and
//! answers posterior queries by filtering the joint samples.
//!
//! ## Core Concepts
//!
//! - **Nodes are boolean**: each node owns a CPT with one P(true) per parent
//!   configuration, `2^parents` entries keyed row-major by parent values
//! - **Networks are validated once**: cycles, malformed CPTs and unknown names
//!   fail at build time, never inside the sampling loop
//! - **Forward sampling**: one pass in topological order per sample, a
//!   Bernoulli trial per node; a seed makes the whole sample set reproducible
//! - **Queries filter samples**: P(target | evidence) is the fraction of
//!   evidence-consistent samples where the target is true
//! - **Exact enumeration**: small networks can be solved exactly to check the
//!   Monte Carlo estimates
//!
//! There is no ambient "current model": every operation takes the
//! [`Network`] or [`SampleSet`] it works on.
//!
//! ## Example: Exposure and Disease
//!
//! ```rust
//! use bayes_sim::{query, sample_forward, Evidence, NetworkBuilder};
//!
//! let net = NetworkBuilder::new()
//!     .prior("exposure", 0.2)
//!     .conditional("disease", ["exposure"], vec![0.1, 0.7])
//!     .build()
//!     .unwrap();
//!
//! let samples = sample_forward(&net, 100_000, Some(123));
//! let exposed = Evidence::new().with("exposure", true);
//!
//! let p = query(&samples, "disease", &exposed).unwrap();
//! assert!((p - 0.7).abs() < 0.02);
//! ```

mod catalog;
mod config;
mod cpt;
mod error;
mod exact;
mod network;
mod query;
mod report;
mod sample;
mod sampler;
mod simulation;

pub use catalog::{
    disease_network, disease_queries, exposure_network, sprinkler_network, NamedQuery,
};
pub use config::{ModelFile, NetworkSpec, NodeSpec, QuerySpec, SimulationConfig};
pub use cpt::Cpt;
pub use error::SimError;
pub use exact::{exact_marginal, exact_query, joint_probability, MAX_EXACT_NODES};
pub use network::{Network, NetworkBuilder, Node};
pub use query::{estimate, frequency, query, Evidence, QueryEstimate};
pub use report::{NodeSummary, QueryOutcome, QueryResult, Report};
pub use sample::{Sample, SampleSet};
pub use sampler::{sample_forward, sample_forward_with, sample_once};
pub use simulation::Simulation;
