//! # Graph Fixtures
//!
//! Small contracted graphs described in TOML or JSON, for inspecting the
//! filter outside a routing engine.
//!
//! ```toml
//! levels = [0, 1, 2, 5]
//! edges = [ { base = 0, adjacent = 1 }, { base = 2, adjacent = 3, shortcut = true } ]
//! blocked = [ [2, 3] ]
//! ```
//!
//! `blocked` lists edges the in-core restriction rejects.

use chfilter_core::{ChEdge, ChGraph, EdgeFilter, FilterError, Level, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// A contracted graph as written in a fixture file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphFixture {
    /// Level of each node, in node order.
    pub levels: Vec<u64>,
    /// Edges between real nodes.
    #[serde(default)]
    pub edges: Vec<ChEdge>,
    /// `(base, adjacent)` pairs rejected inside the core.
    #[serde(default)]
    pub blocked: Vec<(u64, u64)>,
}

impl GraphFixture {
    /// Parse a TOML fixture.
    pub fn from_toml_str(input: &str) -> Result<Self, FilterError> {
        toml::from_str(input).map_err(|e| FilterError::DeserializationError(e.to_string()))
    }

    /// Parse a JSON fixture.
    pub fn from_json_str(input: &str) -> Result<Self, FilterError> {
        serde_json::from_str(input).map_err(|e| FilterError::DeserializationError(e.to_string()))
    }

    /// Load a fixture, choosing the format by file extension.
    ///
    /// `.json` files are parsed as JSON; everything else as TOML.
    pub fn load(path: &Path) -> Result<Self, FilterError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| FilterError::IoError(format!("{}: {}", path.display(), e)))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let fixture = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };

        tracing::info!(
            "Loaded fixture {:?}: {} nodes, {} edges",
            path,
            fixture.levels.len(),
            fixture.edges.len()
        );
        Ok(fixture)
    }

    /// Build the in-memory graph. Fails on edges outside the graph.
    pub fn build_graph(&self) -> Result<ChGraph, FilterError> {
        ChGraph::with_edges(
            self.levels.iter().copied().map(Level::new).collect(),
            self.edges.iter().copied(),
        )
    }

    /// The in-core restriction described by `blocked`.
    #[must_use]
    pub fn restrictions(&self) -> BlockedEdges {
        BlockedEdges::new(
            self.blocked
                .iter()
                .map(|&(base, adjacent)| (NodeId(base), NodeId(adjacent))),
        )
    }
}

/// Rejects a fixed set of directed edges.
#[derive(Debug, Clone, Default)]
pub struct BlockedEdges {
    edges: BTreeSet<(NodeId, NodeId)>,
}

impl BlockedEdges {
    /// Block every `(base, adjacent)` pair.
    pub fn new(edges: impl IntoIterator<Item = (NodeId, NodeId)>) -> Self {
        Self {
            edges: edges.into_iter().collect(),
        }
    }

    /// Number of blocked edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// True if nothing is blocked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl EdgeFilter for BlockedEdges {
    fn accept(&self, edge: &ChEdge) -> bool {
        !self.edges.contains(&(edge.base, edge.adjacent))
    }
}

// =============================================================================
// TESTS
// =============================================================================
