//! # Primitives
//!
//! Fixed rules shared by the registry, the filter and the chain.
//!
//! ## Primitives
//!
//! 1. **Core Sentinel**: the level that marks a node as never contracted.
//! 2. **Chain Naming**: how filter chains derive their names.

use crate::Level;

/// Offset above the node count that marks a core node.
///
/// The contraction process assigns `node_count + CORE_LEVEL_OFFSET` to every
/// node it leaves in the core. Regular levels stay below the node count.
pub const CORE_LEVEL_OFFSET: u64 = 1;

/// Separator placed before every segment of a filter chain name.
pub const NAME_SEPARATOR: char = '_';

/// The level that marks core membership in a graph with `node_count` nodes.
#[must_use]
pub const fn core_level(node_count: usize) -> Level {
    Level::new((node_count as u64).saturating_add(CORE_LEVEL_OFFSET))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_level_is_one_past_node_count() {
        assert_eq!(core_level(4), Level(5));
        assert_eq!(core_level(0), Level(1));
    }
}
