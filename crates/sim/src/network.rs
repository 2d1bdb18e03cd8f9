//! Boolean Bayesian networks.
//!
//! A Bayesian network is a directed acyclic graph where:
//! - Nodes are boolean random variables
//! - Edges point from parent to child
//! - Each node owns a CPT giving P(node = true | parents)
//!
//! A [`Network`] is immutable once built. Its nodes are stored in topological
//! order, so every parent index is smaller than the index of its children and
//! a single left-to-right pass is a valid ancestral ordering.

use std::collections::HashMap;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::debug;

use crate::cpt::Cpt;
use crate::error::SimError;

/// A named boolean variable with its parents and CPT.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    name: String,
    /// Parent positions in the network's topological order.
    parents: Vec<usize>,
    cpt: Cpt,
}

impl Node {
    /// Node name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent positions, in the order the CPT is keyed by.
    pub fn parents(&self) -> &[usize] {
        &self.parents
    }

    /// The node's conditional probability table.
    pub fn cpt(&self) -> &Cpt {
        &self.cpt
    }

    /// P(node = true) given a (possibly partial) assignment in topological order.
    ///
    /// Only the parent positions of `assignment` are read, so a forward pass may
    /// call this before the node itself (or any later node) has been set.
    pub(crate) fn probability_given(&self, assignment: &[bool]) -> f64 {
        let idx = self
            .parents
            .iter()
            .fold(0, |idx, &p| (idx << 1) | usize::from(assignment[p]));
        self.cpt.at(idx)
    }
}

/// An undeclared-order node description, resolved by [`Network::from_decls`].
#[derive(Debug, Clone)]
struct NodeDecl {
    name: String,
    parents: Vec<String>,
    table: Vec<f64>,
}

/// A validated, topologically ordered Bayesian network over boolean nodes.
#[derive(Debug, Clone)]
pub struct Network {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
}

impl Network {
    /// Build a network from node names, `(parent, child)` edges and one CPT per node.
    ///
    /// A node's parents are ordered as its incoming edges appear in `edges`;
    /// its CPT must be keyed in that order (see [`Cpt`]).
    ///
    /// # Example
    ///
    /// ```rust
    /// use bayes_sim::Network;
    /// use std::collections::HashMap;
    ///
    /// let cpts = HashMap::from([
    ///     ("exposure", vec![0.2]),
    ///     ("disease", vec![0.1, 0.7]),
    /// ]);
    /// let net = Network::build(
    ///     &["exposure", "disease"],
    ///     &[("exposure", "disease")],
    ///     &cpts,
    /// ).unwrap();
    ///
    /// assert_eq!(net.len(), 2);
    /// assert_eq!(net.index_of("disease").unwrap(), 1);
    /// ```
    pub fn build(
        nodes: &[&str],
        edges: &[(&str, &str)],
        cpts: &HashMap<&str, Vec<f64>>,
    ) -> Result<Self, SimError> {
        for (parent, child) in edges {
            for name in [parent, child] {
                if !nodes.contains(name) {
                    return Err(SimError::UnknownNode {
                        node: name.to_string(),
                    });
                }
            }
        }

        if let Some(name) = cpts.keys().find(|name| !nodes.contains(*name)) {
            return Err(SimError::UnknownNode {
                node: name.to_string(),
            });
        }

        let decls = nodes
            .iter()
            .map(|&name| {
                let table = cpts.get(name).cloned().ok_or_else(|| SimError::MissingCpt {
                    node: name.to_string(),
                })?;
                let parents = edges
                    .iter()
                    .filter(|(_, child)| *child == name)
                    .map(|(parent, _)| parent.to_string())
                    .collect();
                Ok(NodeDecl {
                    name: name.to_string(),
                    parents,
                    table,
                })
            })
            .collect::<Result<Vec<_>, SimError>>()?;

        Self::from_decls(decls)
    }

    fn from_decls(decls: Vec<NodeDecl>) -> Result<Self, SimError> {
        if decls.is_empty() {
            return Err(SimError::EmptyNetwork);
        }

        // Declaration index for every name
        let mut declared: HashMap<&str, usize> = HashMap::with_capacity(decls.len());
        for (i, decl) in decls.iter().enumerate() {
            if declared.insert(decl.name.as_str(), i).is_some() {
                return Err(SimError::DuplicateNode {
                    node: decl.name.clone(),
                });
            }
        }

        // Resolve parent names to declaration indices
        let mut parent_ids: Vec<Vec<usize>> = Vec::with_capacity(decls.len());
        for decl in &decls {
            let mut ids = Vec::with_capacity(decl.parents.len());
            for parent in &decl.parents {
                let id = *declared
                    .get(parent.as_str())
                    .ok_or_else(|| SimError::UnknownNode {
                        node: parent.clone(),
                    })?;
                if ids.contains(&id) {
                    return Err(SimError::MalformedCpt {
                        node: decl.name.clone(),
                        reason: format!("parent '{}' listed more than once", parent),
                    });
                }
                ids.push(id);
            }
            parent_ids.push(ids);
        }

        let order = topological_order(&decls, &parent_ids)?;

        // position[declaration index] = position in topological order
        let mut position = vec![0; decls.len()];
        for (pos, &id) in order.iter().enumerate() {
            position[id] = pos;
        }

        let mut slots: Vec<Option<NodeDecl>> = decls.into_iter().map(Some).collect();
        let mut nodes = Vec::with_capacity(order.len());
        for &id in &order {
            let Some(decl) = slots[id].take() else {
                continue;
            };
            let cpt = Cpt::new(&decl.name, parent_ids[id].len(), decl.table)?;
            nodes.push(Node {
                name: decl.name,
                parents: parent_ids[id].iter().map(|&p| position[p]).collect(),
                cpt,
            });
        }

        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.name.clone(), i))
            .collect();

        debug!(
            nodes = nodes.len(),
            edges = nodes.iter().map(|n| n.parents.len()).sum::<usize>(),
            "Built network"
        );

        Ok(Self { nodes, index })
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false for a built network; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in topological order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Node names in topological order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.name.as_str())
    }

    /// Look up a node by name.
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.index.get(name).map(|&i| &self.nodes[i])
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

    /// Names of a node's parents, in CPT key order.
    pub fn parent_names(&self, name: &str) -> Result<Vec<&str>, SimError> {
        let i = self.index_of(name)?;
        Ok(self.nodes[i]
            .parents
            .iter()
            .map(|&p| self.nodes[p].name.as_str())
            .collect())
    }
}

/// Topological order of declaration indices.
///
/// The declaration order is kept when it is already topological; otherwise the
/// order petgraph computes is used.
fn topological_order(
    decls: &[NodeDecl],
    parent_ids: &[Vec<usize>],
) -> Result<Vec<usize>, SimError> {
    let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(decls.len(), 0);
    let handles: Vec<NodeIndex> = (0..decls.len()).map(|i| graph.add_node(i)).collect();
    for (child, parents) in parent_ids.iter().enumerate() {
        for &parent in parents {
            graph.add_edge(handles[parent], handles[child], ());
        }
    }

    let sorted = toposort(&graph, None).map_err(|cycle| SimError::CyclicGraph {
        node: decls[graph[cycle.node_id()]].name.clone(),
    })?;

    let declared_is_sorted = parent_ids
        .iter()
        .enumerate()
        .all(|(child, parents)| parents.iter().all(|&p| p < child));

    if declared_is_sorted {
        Ok((0..decls.len()).collect())
    } else {
        Ok(sorted.into_iter().map(|h| graph[h]).collect())
    }
}

/// Incremental construction in the style of `add_prior` / `add_conditional`.
///
/// ```rust
/// use bayes_sim::NetworkBuilder;
///
/// let net = NetworkBuilder::new()
///     .prior("exposure", 0.2)
///     .conditional("disease", ["exposure"], vec![0.1, 0.7])
///     .build()
///     .unwrap();
/// assert_eq!(net.parent_names("disease").unwrap(), vec!["exposure"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NetworkBuilder {
    decls: Vec<NodeDecl>,
}

impl NetworkBuilder {
    /// Start an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root node with P(true) = `p`.
    pub fn prior(self, name: impl Into<String>, p: f64) -> Self {
        self.conditional(name, std::iter::empty::<String>(), vec![p])
    }

    /// Add a node conditioned on `parents`; `table` is keyed in parent order.
    pub fn conditional<I, S>(
        mut self,
        name: impl Into<String>,
        parents: I,
        table: Vec<f64>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.decls.push(NodeDecl {
            name: name.into(),
            parents: parents.into_iter().map(Into::into).collect(),
            table,
        });
        self
    }

    /// Validate and build the network.
    pub fn build(self) -> Result<Network, SimError> {
        Network::from_decls(self.decls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_node_cpts() -> HashMap<&'static str, Vec<f64>> {
        HashMap::from([("exposure", vec![0.2]), ("disease", vec![0.1, 0.7])])
    }

    #[test]
    fn test_build_two_nodes() {
        let net = Network::build(
            &["exposure", "disease"],
            &[("exposure", "disease")],
            &two_node_cpts(),
        )
        .unwrap();

        assert_eq!(net.len(), 2);
        assert!(!net.is_empty());
        assert_eq!(net.names().collect::<Vec<_>>(), vec!["exposure", "disease"]);
        assert_eq!(net.node("disease").unwrap().parents(), &[0]);
        assert_eq!(net.node("exposure").unwrap().cpt().entries(), &[0.2]);
    }

    #[test]
    fn test_out_of_order_declaration_is_sorted() {
        let net = Network::build(
            &["disease", "exposure"],
            &[("exposure", "disease")],
            &two_node_cpts(),
        )
        .unwrap();

        assert_eq!(net.index_of("exposure").unwrap(), 0);
        assert_eq!(net.index_of("disease").unwrap(), 1);
        assert_eq!(net.node("disease").unwrap().parents(), &[0]);
    }

    #[test]
    fn test_parent_order_follows_edges() {
        let net = NetworkBuilder::new()
            .prior("a", 0.5)
            .prior("b", 0.5)
            .conditional("c", ["b", "a"], vec![0.0, 0.1, 0.2, 0.3])
            .build()
            .unwrap();

        assert_eq!(net.parent_names("c").unwrap(), vec!["b", "a"]);
        // b=T, a=F -> index 2
        let c = net.node("c").unwrap();
        assert_eq!(c.probability_given(&[false, true, false]), 0.2);
        assert_eq!(c.probability_given(&[true, false, false]), 0.1);
    }

    #[test]
    fn test_cycle_rejected() {
        let cpts = HashMap::from([("a", vec![0.1, 0.2]), ("b", vec![0.3, 0.4])]);
        let result = Network::build(&["a", "b"], &[("a", "b"), ("b", "a")], &cpts);
        assert!(matches!(result, Err(SimError::CyclicGraph { .. })));
    }

    #[test]
    fn test_self_loop_rejected() {
        let result = NetworkBuilder::new()
            .conditional("a", ["a"], vec![0.1, 0.2])
            .build();
        assert!(matches!(result, Err(SimError::CyclicGraph { node }) if node == "a"));
    }

    #[test]
    fn test_malformed_cpt_rejected() {
        let cpts = HashMap::from([("exposure", vec![0.2]), ("disease", vec![0.7])]);
        let result = Network::build(&["exposure", "disease"], &[("exposure", "disease")], &cpts);
        assert!(matches!(result, Err(SimError::MalformedCpt { node, .. }) if node == "disease"));
    }

    #[test]
    fn test_unknown_and_missing_nodes() {
        let result = Network::build(&["exposure"], &[("exposure", "disease")], &two_node_cpts());
        assert!(matches!(result, Err(SimError::UnknownNode { .. })));

        let cpts = HashMap::from([("exposure", vec![0.2])]);
        let result = Network::build(&["exposure", "disease"], &[], &cpts);
        assert!(matches!(result, Err(SimError::MissingCpt { node }) if node == "disease"));

        let result = NetworkBuilder::new()
            .conditional("disease", ["exposure"], vec![0.1, 0.7])
            .build();
        assert!(matches!(result, Err(SimError::UnknownNode { node }) if node == "exposure"));
    }

    #[test]
    fn test_duplicates_rejected() {
        let result = NetworkBuilder::new().prior("a", 0.1).prior("a", 0.2).build();
        assert!(matches!(result, Err(SimError::DuplicateNode { .. })));

        let result = NetworkBuilder::new()
            .prior("a", 0.1)
            .conditional("b", ["a", "a"], vec![0.0, 0.0, 0.0, 0.0])
            .build();
        assert!(matches!(result, Err(SimError::MalformedCpt { .. })));
    }

    #[test]
    fn test_empty_network_rejected() {
        assert_eq!(NetworkBuilder::new().build().unwrap_err(), SimError::EmptyNetwork);
    }

    #[test]
    fn test_index_of_unknown() {
        let net = NetworkBuilder::new().prior("a", 0.5).build().unwrap();
        assert!(matches!(net.index_of("z"), Err(SimError::UnknownNode { .. })));
        assert!(net.node("z").is_none());
    }
}
