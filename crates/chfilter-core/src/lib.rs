//! # chfilter-core
//!
//! Edge acceptance for core-aware contraction hierarchy searches - THE LOGIC.
//!
//! A contraction hierarchy search relaxes only the edges its filter accepts.
//! This crate provides that filter for hierarchies with an uncontracted
//! core:
//! - `registry`: which nodes of each graph belong to the core
//! - `filter`: the two-phase (outward / in-core) edge predicate
//! - `chain`: AND-composition of further edge restrictions
//!
//! ## Architectural Constraints
//!
//! - Consumes node levels and shortcuts; never computes them
//! - Computes no shortest paths; the search calls `accept` per edge
//! - No shared mutable cursor: each filter carries its own graph binding
//!
//! ## Example
//!
//! ```
//! use chfilter_core::{ChEdge, ChGraph, CoreEdgeFilter, CoreRegistry, NodeId};
//!
//! let graph = ChGraph::from_levels(&[0, 1, 2, 5]);
//! let mut registry = CoreRegistry::new();
//! registry.register(&graph).expect("register");
//!
//! let mut filter = CoreEdgeFilter::new(&graph, &registry).expect("filter");
//! assert!(filter.accept(&ChEdge::new(NodeId(0), NodeId(1))));
//!
//! filter.set_in_core(true);
//! assert!(!filter.accept(&ChEdge::new(NodeId(2), NodeId(1))));
//! ```

// =============================================================================
// MODULES
// =============================================================================

pub mod chain;
pub mod filter;
pub mod graph;
pub mod primitives;
pub mod registry;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{ChEdge, EdgeFilter, FilterError, GraphId, Level, NodeId, short_type_name};

// =============================================================================
// RE-EXPORTS: Filter Engine
// =============================================================================

pub use chain::{FilterChain, FnFilter};
pub use filter::CoreEdgeFilter;
pub use graph::{ChGraph, ContractedGraph, QueryOverlay};
pub use primitives::{CORE_LEVEL_OFFSET, core_level};
pub use registry::{CoreRegistry, CoreSlot};
