//! # Filter Chain
//!
//! Ordered AND-composition of independent edge predicates.
//!
//! The chain adds no filtering logic of its own. Order only decides which
//! member gets the chance to reject first.
//!
//! ## Naming
//!
//! Preprocessing artifacts are cached per filter combination. A chain's
//! name identifies the combination: either an explicit name, or one derived
//! from the members' type tags.

use crate::primitives::NAME_SEPARATOR;
use crate::{ChEdge, EdgeFilter};
use std::fmt;

/// An ordered sequence of edge filters that accepts iff all members do.
#[derive(Default)]
pub struct FilterChain<'a> {
    filters: Vec<Box<dyn EdgeFilter + 'a>>,
    name: Option<String>,
}

impl<'a> FilterChain<'a> {
    /// Create an empty chain. An empty chain accepts every edge.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter.
    pub fn push(&mut self, filter: impl EdgeFilter + 'a) {
        self.filters.push(Box::new(filter));
    }

    /// Append a filter, builder style.
    #[must_use]
    pub fn with(mut self, filter: impl EdgeFilter + 'a) -> Self {
        self.push(filter);
        self
    }

    /// Number of member filters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// True if the chain has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Type tags of the members in chain order.
    pub fn type_tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.filters.iter().map(|f| f.type_tag())
    }

    /// The chain's name.
    ///
    /// Without an explicit name this is every member's type tag prefixed
    /// with `_`, concatenated in order and lower-cased.
    #[must_use]
    pub fn name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self
                .type_tags()
                .flat_map(|tag| std::iter::once(NAME_SEPARATOR).chain(tag.chars()))
                .collect::<String>()
                .to_lowercase(),
        }
    }

    /// Replace the explicit name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Extend the explicit name with `_suffix`.
    ///
    /// If no explicit name was set, the name becomes `_suffix`; the derived
    /// name is not carried over.
    pub fn append_name(&mut self, suffix: &str) {
        let name = self.name.get_or_insert_with(String::new);
        name.push(NAME_SEPARATOR);
        name.push_str(suffix);
    }

    /// Evaluate members in order, stopping at the first rejection.
    #[must_use]
    pub fn accept(&self, edge: &ChEdge) -> bool {
        self.filters.iter().all(|f| f.accept(edge))
    }
}

impl EdgeFilter for FilterChain<'_> {
    fn accept(&self, edge: &ChEdge) -> bool {
        FilterChain::accept(self, edge)
    }
}

impl fmt::Display for FilterChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeFilter sequence: {}", self.filters.len())
    }
}

impl fmt::Debug for FilterChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterChain")
            .field("filters", &self.type_tags().collect::<Vec<_>>())
            .field("name", &self.name)
            .finish()
    }
}

// =============================================================================
// CLOSURE ADAPTER
// =============================================================================

/// A closure used as an edge filter, with an explicit type tag.
pub struct FnFilter<F> {
    tag: &'static str,
    predicate: F,
}

impl<F> FnFilter<F>
where
    F: Fn(&ChEdge) -> bool + Send + Sync,
{
    /// Wrap `predicate`, naming it `tag` in chain names.
    #[must_use]
    pub fn new(tag: &'static str, predicate: F) -> Self {
        Self { tag, predicate }
    }
}

impl<F> EdgeFilter for FnFilter<F>
where
    F: Fn(&ChEdge) -> bool + Send + Sync,
{
    fn accept(&self, edge: &ChEdge) -> bool {
        (self.predicate)(edge)
    }

    fn type_tag(&self) -> &'static str {
        self.tag
    }
}

impl<F> fmt::Debug for FnFilter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnFilter").field("tag", &self.tag).finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NodeId;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct AvoidFerries;

    impl EdgeFilter for AvoidFerries {
        fn accept(&self, edge: &ChEdge) -> bool {
            edge.adjacent != NodeId(9)
        }
    }

    struct HeavyVehicle;

    impl EdgeFilter for HeavyVehicle {
        fn accept(&self, edge: &ChEdge) -> bool {
            edge.base != NodeId(7)
        }
    }

    #[test]
    fn empty_chain_accepts() {
        let chain = FilterChain::new();
        assert!(chain.accept(&ChEdge::new(NodeId(0), NodeId(1))));
        assert_eq!(chain.name(), "");
    }

    #[test]
    fn chain_is_conjunction() {
        let chain = FilterChain::new().with(AvoidFerries).with(HeavyVehicle);

        assert!(chain.accept(&ChEdge::new(NodeId(0), NodeId(1))));
        assert!(!chain.accept(&ChEdge::new(NodeId(0), NodeId(9))));
        assert!(!chain.accept(&ChEdge::new(NodeId(7), NodeId(1))));
    }

    #[test]
    fn chain_stops_at_first_rejection() {
        let calls = AtomicUsize::new(0);
        let chain = FilterChain::new()
            .with(FnFilter::new("never", |_: &ChEdge| false))
            .with(FnFilter::new("counting", |_: &ChEdge| {
                calls.fetch_add(1, Ordering::Relaxed);
                true
            }));

        assert!(!chain.accept(&ChEdge::new(NodeId(0), NodeId(1))));
        assert_eq!(calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn derived_name_uses_lowercased_type_tags() {
        let chain = FilterChain::new().with(AvoidFerries).with(HeavyVehicle);
        assert_eq!(chain.name(), "_avoidferries_heavyvehicle");
    }

    #[test]
    fn fn_filter_tag_is_used_in_name() {
        let chain = FilterChain::new().with(FnFilter::new("Wheelchair", |_: &ChEdge| true));
        assert_eq!(chain.name(), "_wheelchair");
    }

    #[test]
    fn append_name_replaces_derived_name() {
        let mut chain = FilterChain::new().with(AvoidFerries);
        chain.append_name("car");
        assert_eq!(chain.name(), "_car");

        chain.append_name("fastest");
        assert_eq!(chain.name(), "_car_fastest");
    }

    #[test]
    fn set_name_then_append() {
        let mut chain = FilterChain::new();
        chain.set_name("profile");
        chain.append_name("x");
        assert_eq!(chain.name(), "profile_x");
    }

    #[test]
    fn nested_chain_has_chain_tag() {
        let inner = FilterChain::new().with(AvoidFerries);
        let outer = FilterChain::new().with(inner).with(HeavyVehicle);
        assert_eq!(outer.name(), "_filterchain_heavyvehicle");
    }

    #[test]
    fn display_reports_length() {
        let chain = FilterChain::new().with(AvoidFerries).with(HeavyVehicle);
        assert_eq!(chain.to_string(), "EdgeFilter sequence: 2");
        assert_eq!(chain.len(), 2);
        assert!(!chain.is_empty());
    }
}
