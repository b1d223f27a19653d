//! # Core Registry
//!
//! Core membership flags for every graph known to the process.
//!
//! Flags live in one flat arena. Each registered graph owns a contiguous
//! slice of it, located by the `CoreSlot` handed out at registration.
//! Registration is append-only: slots are never reused or removed.
//!
//! There is no "current graph" cursor. Callers resolve a slot with
//! [`CoreRegistry::select`] and keep it, so concurrent searches over
//! different graphs can share one registry by reference.

use crate::graph::ContractedGraph;
use crate::primitives::core_level;
use crate::{FilterError, GraphId, NodeId};
use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_REGISTRY_ID: AtomicU64 = AtomicU64::new(0);

/// Location of one graph's flags inside the registry arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreSlot {
    /// Registry that issued this slot.
    registry: u64,
    index: usize,
    offset: usize,
    node_count: usize,
}

impl CoreSlot {
    /// Registration order of this slot, starting at 0.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Number of real nodes in the slot's graph.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.node_count
    }

    fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.node_count
    }
}

/// Registry of core membership, keyed by graph identity.
///
/// Slots are only valid in the registry that issued them. The registry is
/// not `Clone`: a copy would accept the original's slots and then diverge.
#[derive(Debug)]
pub struct CoreRegistry {
    /// Process-unique id stamped into every issued slot.
    id: u64,
    /// Flat arena: one flag per node, graphs concatenated in slot order.
    flags: Vec<bool>,
    /// GraphId -> slot
    slots: BTreeMap<GraphId, CoreSlot>,
}

impl CoreRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed),
            flags: Vec::new(),
            slots: BTreeMap::new(),
        }
    }

    /// Register a graph and compute its core flags.
    ///
    /// A node is core iff its level equals `node_count + 1`. Flags are
    /// computed once here and never updated.
    ///
    /// Returns `FilterError::DuplicateRegistration` if this graph instance
    /// is already registered; storage is left untouched in that case.
    pub fn register<G: ContractedGraph>(&mut self, graph: &G) -> Result<CoreSlot, FilterError> {
        let id = graph.id();
        if self.slots.contains_key(&id) {
            tracing::warn!(graph = %id, "Rejected duplicate core registration");
            return Err(FilterError::DuplicateRegistration(id));
        }

        let node_count = graph.node_count();
        let sentinel = core_level(node_count);
        let slot = CoreSlot {
            registry: self.id,
            index: self.slots.len(),
            offset: self.flags.len(),
            node_count,
        };

        self.flags.reserve(node_count);
        self.flags.extend(
            (0..node_count).map(|node| graph.level(NodeId::new(node as u64)) == sentinel),
        );
        self.slots.insert(id, slot);

        tracing::debug!(
            graph = %id,
            slot = slot.index,
            node_count,
            core_nodes = self.core_flags(slot).iter().filter(|&&c| c).count(),
            "Registered core flags"
        );

        Ok(slot)
    }

    /// Register a graph unless it is already known.
    ///
    /// For callers that deliberately reuse a graph instance across
    /// preprocessing runs. Returns the existing slot in that case.
    pub fn ensure_registered<G: ContractedGraph>(
        &mut self,
        graph: &G,
    ) -> Result<CoreSlot, FilterError> {
        match self.slots.get(&graph.id()) {
            Some(slot) => Ok(*slot),
            None => self.register(graph),
        }
    }

    /// Resolve the slot of a registered graph.
    pub fn select<G: ContractedGraph>(&self, graph: &G) -> Result<CoreSlot, FilterError> {
        self.slot(graph.id())
    }

    /// Resolve the slot registered for `id`.
    pub fn slot(&self, id: GraphId) -> Result<CoreSlot, FilterError> {
        self.slots
            .get(&id)
            .copied()
            .ok_or(FilterError::NotRegistered(id))
    }

    /// Check whether a graph is registered.
    #[must_use]
    pub fn contains(&self, id: GraphId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Core flags of one slot, indexed by node id.
    ///
    /// A slot issued by another registry yields an empty slice.
    #[must_use]
    pub fn core_flags(&self, slot: CoreSlot) -> &[bool] {
        if slot.registry != self.id {
            return &[];
        }
        self.flags.get(slot.range()).unwrap_or(&[])
    }

    /// Check whether `slot` was issued by this registry.
    #[must_use]
    pub fn owns(&self, slot: CoreSlot) -> bool {
        slot.registry == self.id
    }

    /// Check whether `node` is a core node of the slot's graph.
    ///
    /// Virtual nodes are never core, and neither is any node looked up
    /// through a slot from another registry.
    #[must_use]
    pub fn is_core(&self, slot: CoreSlot, node: NodeId) -> bool {
        let flags = self.core_flags(slot);
        node.index()
            .and_then(|i| flags.get(i))
            .copied()
            .unwrap_or(false)
    }

    /// Core nodes of one slot in ascending order.
    pub fn core_nodes(&self, slot: CoreSlot) -> impl Iterator<Item = NodeId> + '_ {
        self.core_flags(slot)
            .iter()
            .enumerate()
            .filter(|(_, core)| **core)
            .map(|(node, _)| NodeId::new(node as u64))
    }

    /// Number of registered graphs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if no graph is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Total number of flags across all slots.
    #[must_use]
    pub fn flag_count(&self) -> usize {
        self.flags.len()
    }
}

impl Default for CoreRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
