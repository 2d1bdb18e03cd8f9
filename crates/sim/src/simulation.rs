//! One simulation run: sample, summarize, answer queries.

use tracing::{info, warn};

use crate::config::SimulationConfig;
use crate::error::SimError;
use crate::network::Network;
use crate::query::estimate;
use crate::report::{QueryOutcome, Report};
use crate::sample::SampleSet;
use crate::sampler::sample_forward;

/// A network paired with the settings to simulate it.
///
/// ```rust
/// use bayes_sim::{disease_network, disease_queries, Simulation, SimulationConfig};
///
/// let config = disease_queries()
///     .into_iter()
///     .fold(SimulationConfig::default().with_seed(123), |c, q| c.with_query(q));
/// let net = disease_network().unwrap();
///
/// let report = Simulation::new(&net, config).run().unwrap();
/// assert_eq!(report.iterations, 100_000);
/// assert_eq!(report.queries.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Simulation<'a> {
    network: &'a Network,
    config: SimulationConfig,
}

impl<'a> Simulation<'a> {
    /// Pair `network` with `config`; nothing is validated until a run.
    pub fn new(network: &'a Network, config: SimulationConfig) -> Self {
        Self { network, config }
    }

    /// The settings this simulation runs with.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Draw the configured number of samples.
    pub fn sample(&self) -> Result<SampleSet, SimError> {
        self.config.validate()?;
        Ok(sample_forward(
            self.network,
            self.config.iterations,
            self.config.seed,
        ))
    }

    /// Sample, then answer every configured query.
    ///
    /// Query node names are resolved before any sample is drawn, so a typo
    /// fails with [`SimError::UnknownNode`] immediately. A query whose evidence
    /// matches no sample is recorded as [`QueryOutcome::InsufficientEvidence`];
    /// any other error aborts the run.
    pub fn run(&self) -> Result<Report, SimError> {
        self.check_queries()?;
        let samples = self.sample()?;
        self.report(&samples)
    }

    /// Every query target and evidence key names a node of the network.
    pub fn check_queries(&self) -> Result<(), SimError> {
        for spec in &self.config.queries {
            self.network.index_of(&spec.target)?;
            for (node, _) in spec.evidence.iter() {
                self.network.index_of(node)?;
            }
        }
        Ok(())
    }

    /// Build the report for an existing sample set.
    pub fn report(&self, samples: &SampleSet) -> Result<Report, SimError> {
        let mut report = Report::summarize(self.network, samples)?;

        for spec in &self.config.queries {
            let label = spec.label();
            let outcome = match estimate(samples, &spec.target, &spec.evidence) {
                Ok(est) => {
                    info!(
                        query = %label,
                        probability = est.probability,
                        matched = est.matched,
                        "Query answered"
                    );
                    QueryOutcome::from(est)
                }
                Err(SimError::InsufficientEvidence { evidence }) => {
                    warn!(query = %label, %evidence, "No samples match evidence");
                    QueryOutcome::InsufficientEvidence
                }
                Err(e) => return Err(e),
            };
            report.push_query(label, spec.target.clone(), spec.evidence.clone(), outcome);
        }

        info!(
            iterations = report.iterations,
            nodes = report.nodes.len(),
            queries = report.queries.len(),
            "Simulation complete"
        );
        Ok(report)
    }
}
