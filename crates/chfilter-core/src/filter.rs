//! # Core-Aware Edge Filter
//!
//! The edge predicate of a two-phase contraction hierarchy search.
//!
//! In the outward phase the search climbs the hierarchy: it may only move
//! to nodes of equal or higher level. Once it reaches the uncontracted core
//! it switches to the in-core phase, where it must stay inside the core and
//! where feature restrictions apply.
//!
//! One filter is created per query. The search calls [`CoreEdgeFilter::set_in_core`]
//! when it changes phase; the filter never switches on its own.

use crate::graph::ContractedGraph;
use crate::registry::CoreRegistry;
use crate::{ChEdge, EdgeFilter, FilterError, NodeId};
use std::fmt;

/// Two-mode edge filter bound to one graph and its core flags.
pub struct CoreEdgeFilter<'a, G: ContractedGraph> {
    graph: &'a G,
    node_count: usize,
    /// Core flags of the bound graph, resolved once at construction.
    core_flags: &'a [bool],
    in_core: bool,
    restrictions: Option<Box<dyn EdgeFilter + 'a>>,
}

impl<'a, G: ContractedGraph> CoreEdgeFilter<'a, G> {
    /// Bind a filter to `graph` using the core flags registered for it.
    ///
    /// Fails with `FilterError::NotRegistered` if the graph was never
    /// registered, and with `FilterError::InvalidGraph` if its node count no
    /// longer matches the registered slot.
    pub fn new(graph: &'a G, registry: &'a CoreRegistry) -> Result<Self, FilterError> {
        let slot = registry.select(graph)?;
        let node_count = graph.node_count();
        if slot.node_count() != node_count {
            return Err(FilterError::InvalidGraph(format!(
                "{} has {} nodes but was registered with {}",
                graph.id(),
                node_count,
                slot.node_count()
            )));
        }

        Ok(Self {
            graph,
            node_count,
            core_flags: registry.core_flags(slot),
            in_core: false,
            restrictions: None,
        })
    }

    /// Attach the restriction consulted for edges inside the core.
    #[must_use]
    pub fn with_restrictions(mut self, restrictions: impl EdgeFilter + 'a) -> Self {
        self.set_restrictions(restrictions);
        self
    }

    /// Replace the restriction consulted for edges inside the core.
    pub fn set_restrictions(&mut self, restrictions: impl EdgeFilter + 'a) {
        self.restrictions = Some(Box::new(restrictions));
    }

    /// Switch between the outward and the in-core phase.
    pub fn set_in_core(&mut self, in_core: bool) {
        self.in_core = in_core;
    }

    /// True while the filter is in the in-core phase.
    #[must_use]
    pub fn in_core(&self) -> bool {
        self.in_core
    }

    /// The graph this filter is bound to.
    #[must_use]
    pub fn graph(&self) -> &'a G {
        self.graph
    }

    /// Decide whether the search may relax `edge` in the current phase.
    #[must_use]
    pub fn accept(&self, edge: &ChEdge) -> bool {
        if self.in_core {
            self.accept_in_core(edge)
        } else {
            self.accept_outward(edge)
        }
    }

    fn accept_outward(&self, edge: &ChEdge) -> bool {
        // Query-time nodes have no level.
        if self.is_virtual(edge.base) || self.is_virtual(edge.adjacent) {
            return true;
        }
        // Shortcuts pointing down are disconnected by construction.
        if edge.shortcut {
            return true;
        }
        self.graph.level(edge.base) <= self.graph.level(edge.adjacent)
    }

    fn accept_in_core(&self, edge: &ChEdge) -> bool {
        if self.is_virtual(edge.adjacent) {
            return false;
        }
        if edge.shortcut {
            return true;
        }
        if !self.is_core(edge.adjacent) {
            return false;
        }
        self.restrictions
            .as_ref()
            .is_none_or(|restrictions| restrictions.accept(edge))
    }

    fn is_virtual(&self, node: NodeId) -> bool {
        node.is_virtual(self.node_count)
    }

    fn is_core(&self, node: NodeId) -> bool {
        node.index()
            .and_then(|i| self.core_flags.get(i))
            .copied()
            .unwrap_or(false)
    }
}

impl<G: ContractedGraph + Sync> EdgeFilter for CoreEdgeFilter<'_, G> {
    fn accept(&self, edge: &ChEdge) -> bool {
        CoreEdgeFilter::accept(self, edge)
    }
}

impl<G: ContractedGraph> fmt::Debug for CoreEdgeFilter<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoreEdgeFilter")
            .field("graph", &self.graph.id())
            .field("node_count", &self.node_count)
            .field("in_core", &self.in_core)
            .field(
                "restrictions",
                &self.restrictions.as_ref().map(|r| r.type_tag()),
            )
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{ChGraph, QueryOverlay};

    struct RejectAll;

    impl EdgeFilter for RejectAll {
        fn accept(&self, _edge: &ChEdge) -> bool {
            false
        }
    }

    fn scenario() -> (ChGraph, CoreRegistry) {
        let graph = ChGraph::from_levels(&[0, 1, 2, 5]);
        let mut registry = CoreRegistry::new();
        registry.register(&graph).expect("register");
        (graph, registry)
    }

    #[test]
    fn new_fails_for_unregistered_graph() {
        let graph = ChGraph::from_levels(&[0, 1]);
        let registry = CoreRegistry::new();

        let result = CoreEdgeFilter::new(&graph, &registry);
        assert!(matches!(result, Err(FilterError::NotRegistered(id)) if id == graph.id()));
    }

    /// Reports the identity of `base` with a different node count.
    struct Resized<'a> {
        base: &'a ChGraph,
        node_count: usize,
    }

    impl ContractedGraph for Resized<'_> {
        fn id(&self) -> crate::GraphId {
            self.base.id()
        }

        fn node_count(&self) -> usize {
            self.node_count
        }

        fn level(&self, node: NodeId) -> crate::Level {
            self.base.level(node)
        }

        fn edges(&self) -> impl Iterator<Item = ChEdge> + '_ {
            self.base.edges()
        }
    }

    #[test]
    fn new_fails_when_node_count_changed_since_registration() {
        let (graph, registry) = scenario();

        for node_count in [3, 5] {
            let resized = Resized {
                base: &graph,
                node_count,
            };
            let result = CoreEdgeFilter::new(&resized, &registry);
            assert!(matches!(result, Err(FilterError::InvalidGraph(_))));
        }

        let same = Resized {
            base: &graph,
            node_count: 4,
        };
        assert!(CoreEdgeFilter::new(&same, &registry).is_ok());
    }

    #[test]
    fn outward_follows_levels_upward() {
        let (graph, registry) = scenario();
        let filter = CoreEdgeFilter::new(&graph, &registry).expect("filter");

        assert!(!filter.in_core());
        assert!(filter.accept(&ChEdge::new(NodeId(0), NodeId(1))));
        assert!(!filter.accept(&ChEdge::new(NodeId(2), NodeId(1))));
        assert!(filter.accept(&ChEdge::new(NodeId(1), NodeId(1))));
    }

    #[test]
    fn outward_accepts_downward_shortcuts() {
        let (graph, registry) = scenario();
        let filter = CoreEdgeFilter::new(&graph, &registry).expect("filter");

        assert!(filter.accept(&ChEdge::shortcut(NodeId(3), NodeId(0))));
    }

    #[test]
    fn outward_accepts_any_virtual_endpoint() {
        let (graph, registry) = scenario();
        let filter = CoreEdgeFilter::new(&graph, &registry).expect("filter");

        assert!(filter.accept(&ChEdge::new(NodeId(4), NodeId(0))));
        assert!(filter.accept(&ChEdge::new(NodeId(3), NodeId(7))));
    }

    #[test]
    fn in_core_stays_inside_core() {
        let (graph, registry) = scenario();
        let mut filter = CoreEdgeFilter::new(&graph, &registry).expect("filter");
        filter.set_in_core(true);

        assert!(filter.accept(&ChEdge::new(NodeId(2), NodeId(3))));
        assert!(!filter.accept(&ChEdge::new(NodeId(2), NodeId(1))));
        assert!(filter.accept(&ChEdge::shortcut(NodeId(3), NodeId(1))));
    }

    #[test]
    fn in_core_rejects_virtual_adjacent_even_for_shortcuts() {
        let (graph, registry) = scenario();
        let mut filter = CoreEdgeFilter::new(&graph, &registry).expect("filter");
        filter.set_in_core(true);

        assert!(!filter.accept(&ChEdge::new(NodeId(3), NodeId(4))));
        assert!(!filter.accept(&ChEdge::shortcut(NodeId(3), NodeId(4))));
    }

    #[test]
    fn in_core_delegates_to_restrictions() {
        let (graph, registry) = scenario();
        let mut filter = CoreEdgeFilter::new(&graph, &registry)
            .expect("filter")
            .with_restrictions(RejectAll);
        filter.set_in_core(true);

        assert!(!filter.accept(&ChEdge::new(NodeId(2), NodeId(3))));
        // Shortcuts bypass restrictions.
        assert!(filter.accept(&ChEdge::shortcut(NodeId(2), NodeId(3))));
    }

    #[test]
    fn restrictions_ignored_outward() {
        let (graph, registry) = scenario();
        let filter = CoreEdgeFilter::new(&graph, &registry)
            .expect("filter")
            .with_restrictions(RejectAll);

        assert!(filter.accept(&ChEdge::new(NodeId(2), NodeId(3))));
    }

    #[test]
    fn overlay_resolves_base_slot() {
        let (graph, registry) = scenario();
        let mut overlay = QueryOverlay::new(&graph);
        let start = overlay.add_virtual_node();

        let mut filter = CoreEdgeFilter::new(&overlay, &registry).expect("filter");
        assert!(filter.accept(&ChEdge::new(start, NodeId(2))));

        filter.set_in_core(true);
        assert!(!filter.accept(&ChEdge::new(NodeId(3), start)));
    }

    #[test]
    fn debug_reports_restriction_tag() {
        let (graph, registry) = scenario();
        let filter = CoreEdgeFilter::new(&graph, &registry)
            .expect("filter")
            .with_restrictions(RejectAll);

        let debug = format!("{:?}", filter);
        assert!(debug.contains("RejectAll"));
        assert!(debug.contains("in_core: false"));
    }
}
