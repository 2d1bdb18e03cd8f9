//! Disease screening: posterior queries on a six-node network
//!
//! Run with: cargo run -p bayes-sim --example disease_screening
//!
//! This example demonstrates:
//! - Building the screening network from priors and CPTs
//! - Forward sampling 100,000 joint assignments with a fixed seed
//! - Per-node frequencies against the mean CPT entry drawn
//! - Two posterior queries, checked against exact enumeration
//!
//! Set RUST_LOG=debug to see sampling and query logs.

use bayes_sim::{
    disease_network, disease_queries, exact_query, Simulation, SimulationConfig,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    println!("=== Disease Screening Network ===\n");

    let net = disease_network()?;
    for node in net.nodes() {
        let parents = net.parent_names(node.name())?;
        println!(
            "  {:<8} parents {:<20} CPT {:?}",
            node.name(),
            format!("{:?}", parents),
            node.cpt().entries()
        );
    }
    println!();

    let config = disease_queries()
        .into_iter()
        .fold(SimulationConfig::default().with_seed(123), |c, q| {
            c.with_query(q)
        });

    let report = Simulation::new(&net, config).run()?;
    println!("{}", report);

    println!("Exact answers:");
    for q in disease_queries() {
        let exact = exact_query(&net, &q.target, &q.evidence)?;
        println!("  {}: {:.4}", q.label, exact);
    }

    Ok(())
}
