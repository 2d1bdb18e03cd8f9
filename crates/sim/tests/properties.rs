//! Behavioural tests for sampling and queries.
//!
//! These tests check the guarantees callers rely on:
//! - Sample sets have exactly the requested size and full assignments
//! - Seeds make runs reproducible
//! - Root-node frequencies converge to their CPT value
//! - Queries agree with frequencies and with exact enumeration

use bayes_sim::{
    disease_network, disease_queries, exact_query, exposure_network, frequency, query,
    sample_forward, Evidence, Network, NetworkBuilder, SimError,
};
use proptest::prelude::*;

// ============================================================================
// Fixed-seed scenarios
// ============================================================================

#[test]
fn exposure_disease_end_to_end() {
    let net = exposure_network().unwrap();
    let samples = sample_forward(&net, 100_000, Some(123));

    let p = query(&samples, "disease", &Evidence::new().with("exposure", true)).unwrap();
    assert!((p - 0.7).abs() < 0.02, "P(disease | exposure) = {}", p);
}

#[test]
fn root_frequency_converges_to_prior() {
    let net = exposure_network().unwrap();
    let samples = sample_forward(&net, 100_000, Some(7));

    let f = frequency(&samples, "exposure").unwrap();
    assert!((f - 0.2).abs() < 0.05, "frequency = {}", f);
}

#[test]
fn same_seed_same_sample_set() {
    let net = disease_network().unwrap();
    let a = sample_forward(&net, 10_000, Some(123));
    let b = sample_forward(&net, 10_000, Some(123));
    assert_eq!(a, b);
}

#[test]
fn disease_queries_match_enumeration() {
    let net = disease_network().unwrap();
    let samples = sample_forward(&net, 100_000, Some(123));

    for q in disease_queries() {
        let mc = query(&samples, &q.target, &q.evidence).unwrap();
        let exact = exact_query(&net, &q.target, &q.evidence).unwrap();
        assert!(
            (mc - exact).abs() < 0.02,
            "{}: mc = {}, exact = {}",
            q.label,
            mc,
            exact
        );
    }
}

#[test]
fn contradictory_evidence_is_insufficient() {
    let net = NetworkBuilder::new()
        .prior("switch", 0.5)
        .conditional("light", ["switch"], vec![0.0, 1.0])
        .build()
        .unwrap();
    let samples = sample_forward(&net, 5_000, Some(1));

    let impossible = Evidence::new().with("switch", false).with("light", true);
    assert!(matches!(
        query(&samples, "switch", &impossible),
        Err(SimError::InsufficientEvidence { .. })
    ));
}

// ============================================================================
// Properties over random networks
// ============================================================================

/// Random DAG: node `i` may only take parents from nodes `0..i`.
fn arb_network() -> impl Strategy<Value = Network> {
    prop::collection::vec(
        (any::<u32>(), prop::collection::vec(0.0f64..=1.0, 32)),
        1..6,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .fold(NetworkBuilder::new(), |b, (i, (raw, pool))| {
                let mask = raw as usize % (1 << i);
                let parents: Vec<String> = (0..i)
                    .filter(|j| mask & (1 << j) != 0)
                    .map(|j| format!("n{}", j))
                    .collect();
                let table = pool[..1 << parents.len()].to_vec();
                b.conditional(format!("n{}", i), parents, table)
            })
            .build()
            .expect("generated network is a valid DAG")
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn sample_count_and_width(net in arb_network(), count in 0usize..300, seed in any::<u64>()) {
        let samples = sample_forward(&net, count, Some(seed));
        prop_assert_eq!(samples.len(), count);
        for s in &samples {
            prop_assert_eq!(s.len(), net.len());
        }
    }

    #[test]
    fn seeded_sampling_is_deterministic(net in arb_network(), seed in any::<u64>()) {
        prop_assert_eq!(
            sample_forward(&net, 200, Some(seed)),
            sample_forward(&net, 200, Some(seed))
        );
    }

    #[test]
    fn empty_evidence_query_is_frequency(net in arb_network(), seed in any::<u64>()) {
        let samples = sample_forward(&net, 200, Some(seed));
        for name in net.names() {
            prop_assert_eq!(
                query(&samples, name, &Evidence::new()).unwrap(),
                frequency(&samples, name).unwrap()
            );
        }
    }

    #[test]
    fn query_is_a_probability(net in arb_network(), seed in any::<u64>(), value in any::<bool>()) {
        let samples = sample_forward(&net, 200, Some(seed));
        let names: Vec<&str> = net.names().collect();
        let evidence = Evidence::new().with(names[0], value);
        match query(&samples, names[names.len() - 1], &evidence) {
            Ok(p) => prop_assert!((0.0..=1.0).contains(&p)),
            Err(SimError::InsufficientEvidence { .. }) => {}
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }
}
