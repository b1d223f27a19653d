//! # Core Type Definitions
//!
//! This module contains the shared vocabulary of the edge filter:
//! - Graph identifiers (`NodeId`, `Level`, `GraphId`)
//! - The edge view handed to every predicate (`ChEdge`)
//! - The predicate capability (`EdgeFilter`)
//! - Error types (`FilterError`)
//!
//! ## Virtual Nodes
//!
//! A `NodeId` is not tied to a graph. Whether it names a real node or a
//! query-time virtual node depends on the node count of the graph it is
//! checked against (see [`NodeId::is_virtual`]).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Identifier of a node in a contracted graph.
///
/// Ids `0..node_count` are real nodes; anything at or above the node count
/// is a virtual node inserted at query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Create a node id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw id.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Index of this node into per-node storage.
    ///
    /// `None` if the id does not fit in `usize` on this target. Such a node
    /// cannot be part of any in-memory graph.
    #[must_use]
    pub fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }

    /// True if this id lies beyond a graph with `node_count` real nodes.
    #[must_use]
    pub const fn is_virtual(self, node_count: usize) -> bool {
        self.0 >= node_count as u64
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Contraction level of a node.
///
/// Assigned by the contraction process. Higher levels were contracted later.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Level(pub u64);

impl Level {
    /// Create a level.
    #[must_use]
    pub const fn new(level: u64) -> Self {
        Self(level)
    }

    /// Get the raw level.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of a graph instance.
///
/// Two graphs with identical content still have different ids. The registry
/// keys core membership by this identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GraphId(u64);

impl GraphId {
    /// Allocate a fresh, process-unique graph id.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw id.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "graph#{}", self.0)
    }
}

// =============================================================================
// EDGE
// =============================================================================

/// The view of an edge that predicates decide on.
///
/// `base` is the node the search expands from, `adjacent` the node it would
/// reach. Shortcuts are synthetic edges added during contraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChEdge {
    pub base: NodeId,
    pub adjacent: NodeId,
    #[serde(default)]
    pub shortcut: bool,
}

impl ChEdge {
    /// A regular (non-shortcut) edge.
    #[must_use]
    pub const fn new(base: NodeId, adjacent: NodeId) -> Self {
        Self {
            base,
            adjacent,
            shortcut: false,
        }
    }

    /// A shortcut edge created by contraction.
    #[must_use]
    pub const fn shortcut(base: NodeId, adjacent: NodeId) -> Self {
        Self {
            base,
            adjacent,
            shortcut: true,
        }
    }

    /// The same edge seen from the other end.
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self {
            base: self.adjacent,
            adjacent: self.base,
            shortcut: self.shortcut,
        }
    }
}

// =============================================================================
// EDGE FILTER TRAIT
// =============================================================================

/// An edge predicate consulted on every edge relaxation.
///
/// Implementors must be pure: the same edge yields the same answer for as
/// long as the filter's own state is unchanged.
///
/// `type_tag` names the filter inside a [`FilterChain`](crate::FilterChain).
/// It defaults to the implementing type's name without module path or
/// generic arguments.
pub trait EdgeFilter: Send + Sync {
    /// Decide whether the search may relax `edge`.
    fn accept(&self, edge: &ChEdge) -> bool;

    /// Short type tag used to derive chain names.
    fn type_tag(&self) -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }
}

impl<T: EdgeFilter + ?Sized> EdgeFilter for &T {
    fn accept(&self, edge: &ChEdge) -> bool {
        (**self).accept(edge)
    }

    fn type_tag(&self) -> &'static str {
        (**self).type_tag()
    }
}

impl<T: EdgeFilter + ?Sized> EdgeFilter for Box<T> {
    fn accept(&self, edge: &ChEdge) -> bool {
        (**self).accept(edge)
    }

    fn type_tag(&self) -> &'static str {
        (**self).type_tag()
    }
}

impl<T: EdgeFilter + ?Sized> EdgeFilter for Arc<T> {
    fn accept(&self, edge: &ChEdge) -> bool {
        (**self).accept(edge)
    }

    fn type_tag(&self) -> &'static str {
        (**self).type_tag()
    }
}

/// Strip the module path and generic arguments from a type name.
///
/// `chfilter_core::filter::CoreEdgeFilter<'_, G>` becomes `CoreEdgeFilter`.
#[must_use]
pub fn short_type_name(full: &'static str) -> &'static str {
    let without_generics = full.split('<').next().unwrap_or(full);
    without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors raised while setting up a core-aware search.
///
/// These are configuration errors. They surface at registration or filter
/// construction time, never from `accept`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The graph was never registered with the core registry.
    #[error("Graph not registered: {0}")]
    NotRegistered(GraphId),

    /// The graph was already registered with the core registry.
    #[error("Graph already registered: {0}")]
    DuplicateRegistration(GraphId),

    /// The graph's structure is inconsistent.
    #[error("Invalid graph: {0}")]
    InvalidGraph(String),

    /// A deserialization error occurred.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
