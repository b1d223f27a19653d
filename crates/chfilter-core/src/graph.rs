//! # Contracted Graph
//!
//! The read-only view of a contraction hierarchy that the filter consumes.
//!
//! Node levels and shortcuts are produced by an external contraction
//! process. This module only exposes them: the `ContractedGraph` trait, a
//! simple in-memory `ChGraph`, and a `QueryOverlay` that adds query-time
//! virtual nodes on top of a base graph.

use crate::primitives::core_level;
use crate::{ChEdge, FilterError, GraphId, Level, NodeId};

// =============================================================================
// CONTRACTED GRAPH TRAIT
// =============================================================================

/// The graph operations the core-aware filter relies on.
///
/// Identity matters: the registry keys core membership by `id()`, not by
/// graph content.
pub trait ContractedGraph {
    /// Identity of this graph instance.
    fn id(&self) -> GraphId;

    /// Number of real nodes. Ids at or above this count are virtual.
    fn node_count(&self) -> usize;

    /// Level of a real node.
    ///
    /// Virtual nodes have no level; callers must not ask for one.
    fn level(&self, node: NodeId) -> Level;

    /// All edges of the graph.
    fn edges(&self) -> impl Iterator<Item = ChEdge> + '_;
}

// =============================================================================
// IN-MEMORY GRAPH
// =============================================================================

/// An in-memory contraction hierarchy.
///
/// Every instance takes a fresh `GraphId` on construction. `ChGraph` does
/// not implement `Clone`: a copy would be a different graph to the registry.
#[derive(Debug)]
pub struct ChGraph {
    id: GraphId,
    levels: Vec<Level>,
    edges: Vec<ChEdge>,
}

impl ChGraph {
    /// Create a graph with the given per-node levels and no edges.
    #[must_use]
    pub fn new(levels: Vec<Level>) -> Self {
        Self {
            id: GraphId::next(),
            levels,
            edges: Vec::new(),
        }
    }

    /// Create a graph from raw level values.
    #[must_use]
    pub fn from_levels(levels: &[u64]) -> Self {
        Self::new(levels.iter().copied().map(Level::new).collect())
    }

    /// Create a graph with levels and edges.
    ///
    /// Fails if any edge endpoint lies outside the graph.
    pub fn with_edges(
        levels: Vec<Level>,
        edges: impl IntoIterator<Item = ChEdge>,
    ) -> Result<Self, FilterError> {
        let mut graph = Self::new(levels);
        for edge in edges {
            graph.add_edge(edge)?;
        }
        Ok(graph)
    }

    /// Add an edge between two real nodes.
    pub fn add_edge(&mut self, edge: ChEdge) -> Result<(), FilterError> {
        let node_count = self.levels.len();
        for node in [edge.base, edge.adjacent] {
            if node.is_virtual(node_count) {
                return Err(FilterError::InvalidGraph(format!(
                    "edge {} -> {} references node {} outside a graph of {} nodes",
                    edge.base, edge.adjacent, node, node_count
                )));
            }
        }
        self.edges.push(edge);
        Ok(())
    }

    /// Per-node levels in node order.
    #[must_use]
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Number of stored edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The level that marks core nodes in this graph.
    #[must_use]
    pub fn core_level(&self) -> Level {
        core_level(self.levels.len())
    }

    /// Edges leaving `node`, in insertion order.
    pub fn outgoing(&self, node: NodeId) -> impl Iterator<Item = ChEdge> + '_ {
        self.edges.iter().copied().filter(move |e| e.base == node)
    }
}

impl ContractedGraph for ChGraph {
    fn id(&self) -> GraphId {
        self.id
    }

    fn node_count(&self) -> usize {
        self.levels.len()
    }

    fn level(&self, node: NodeId) -> Level {
        node.index()
            .and_then(|i| self.levels.get(i))
            .copied()
            .unwrap_or_default()
    }

    fn edges(&self) -> impl Iterator<Item = ChEdge> + '_ {
        self.edges.iter().copied()
    }
}

// =============================================================================
// QUERY OVERLAY
// =============================================================================

/// Query-time virtual nodes and edges layered over a base graph.
///
/// The overlay reports the base graph's identity and node count, so virtual
/// nodes stay at or above `node_count` and the base graph's registry slot
/// applies unchanged.
#[derive(Debug)]
pub struct QueryOverlay<'a, G: ContractedGraph> {
    base: &'a G,
    virtual_nodes: usize,
    virtual_edges: Vec<ChEdge>,
}

impl<'a, G: ContractedGraph> QueryOverlay<'a, G> {
    /// Create an empty overlay over `base`.
    #[must_use]
    pub fn new(base: &'a G) -> Self {
        Self {
            base,
            virtual_nodes: 0,
            virtual_edges: Vec::new(),
        }
    }

    /// The underlying base graph.
    #[must_use]
    pub fn base(&self) -> &'a G {
        self.base
    }

    /// Insert a virtual node and return its id.
    pub fn add_virtual_node(&mut self) -> NodeId {
        let id = NodeId::new((self.base.node_count() + self.virtual_nodes) as u64);
        self.virtual_nodes += 1;
        id
    }

    /// Number of virtual nodes inserted so far.
    #[must_use]
    pub fn virtual_node_count(&self) -> usize {
        self.virtual_nodes
    }

    /// Add an edge touching at least one virtual node.
    ///
    /// Both endpoints must exist, either in the base graph or in the overlay.
    pub fn add_virtual_edge(&mut self, edge: ChEdge) -> Result<(), FilterError> {
        let node_count = self.base.node_count();
        let total = node_count + self.virtual_nodes;
        if edge.base.is_virtual(total) || edge.adjacent.is_virtual(total) {
            return Err(FilterError::InvalidGraph(format!(
                "virtual edge {} -> {} references an unknown node",
                edge.base, edge.adjacent
            )));
        }
        if !edge.base.is_virtual(node_count) && !edge.adjacent.is_virtual(node_count) {
            return Err(FilterError::InvalidGraph(format!(
                "virtual edge {} -> {} connects two real nodes",
                edge.base, edge.adjacent
            )));
        }
        self.virtual_edges.push(edge);
        Ok(())
    }
}

impl<G: ContractedGraph> ContractedGraph for QueryOverlay<'_, G> {
    fn id(&self) -> GraphId {
        self.base.id()
    }

    fn node_count(&self) -> usize {
        self.base.node_count()
    }

    fn level(&self, node: NodeId) -> Level {
        self.base.level(node)
    }

    fn edges(&self) -> impl Iterator<Item = ChEdge> + '_ {
        self.base
            .edges()
            .chain(self.virtual_edges.iter().copied())
    }
}

// =============================================================================
// TESTS
// =============================================================================
