//! # CLI Command Implementations
//!
//! Every command loads the fixture, registers its graph with a fresh core
//! registry and binds a filter to it.

use crate::fixture::GraphFixture;
use chfilter_core::{
    ChEdge, ChGraph, ContractedGraph, CoreEdgeFilter, CoreRegistry, FilterChain, FilterError,
    NodeId,
};
use std::path::Path;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Load a fixture and build its graph.
fn load_graph(path: &Path) -> Result<(GraphFixture, ChGraph), FilterError> {
    let fixture = GraphFixture::load(path)?;
    let graph = fixture.build_graph()?;
    Ok((fixture, graph))
}

fn phase_name(in_core: bool) -> &'static str {
    if in_core { "in-core" } else { "outward" }
}

fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

// =============================================================================
// INSPECT COMMAND
// =============================================================================

/// Show node count, core level and core nodes.
pub fn cmd_inspect(path: &Path, json_mode: bool) -> Result<(), FilterError> {
    let (fixture, graph) = load_graph(path)?;
    let mut registry = CoreRegistry::new();
    let slot = registry.register(&graph)?;
    let core: Vec<u64> = registry.core_nodes(slot).map(NodeId::value).collect();

    if json_mode {
        print_json(&serde_json::json!({
            "graph": path.to_string_lossy(),
            "node_count": graph.node_count(),
            "edge_count": graph.edge_count(),
            "core_level": graph.core_level().value(),
            "core_nodes": core,
            "blocked_edges": fixture.blocked.len()
        }));
        return Ok(());
    }

    println!("chfilter Graph Summary");
    println!("======================");
    println!("Graph:      {:?}", path);
    println!();
    println!("Nodes:      {}", graph.node_count());
    println!("Edges:      {}", graph.edge_count());
    println!("Core Level: {}", graph.core_level());
    println!("Core Nodes: {} {:?}", core.len(), core);
    println!("Blocked:    {}", fixture.blocked.len());

    Ok(())
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Evaluate a single edge in the chosen phase.
pub fn cmd_check(
    path: &Path,
    json_mode: bool,
    base: u64,
    adjacent: u64,
    shortcut: bool,
    in_core: bool,
) -> Result<(), FilterError> {
    let (fixture, graph) = load_graph(path)?;
    let mut registry = CoreRegistry::new();
    registry.register(&graph)?;

    let mut filter =
        CoreEdgeFilter::new(&graph, &registry)?.with_restrictions(fixture.restrictions());
    filter.set_in_core(in_core);

    let edge = ChEdge {
        base: NodeId(base),
        adjacent: NodeId(adjacent),
        shortcut,
    };
    let accepted = filter.accept(&edge);

    if json_mode {
        print_json(&serde_json::json!({
            "edge": edge,
            "phase": phase_name(in_core),
            "accepted": accepted
        }));
        return Ok(());
    }

    println!(
        "{} -> {}{} ({}): {}",
        base,
        adjacent,
        if shortcut { " [shortcut]" } else { "" },
        phase_name(in_core),
        if accepted { "accepted" } else { "rejected" }
    );

    Ok(())
}

// =============================================================================
// SWEEP COMMAND
// =============================================================================

/// Evaluate every edge of the graph in the chosen phase.
pub fn cmd_sweep(
    path: &Path,
    json_mode: bool,
    verbose: bool,
    in_core: bool,
) -> Result<(), FilterError> {
    let (fixture, graph) = load_graph(path)?;
    let mut registry = CoreRegistry::new();
    registry.register(&graph)?;

    let mut filter =
        CoreEdgeFilter::new(&graph, &registry)?.with_restrictions(fixture.restrictions());
    filter.set_in_core(in_core);

    let decisions: Vec<(ChEdge, bool)> = graph.edges().map(|e| (e, filter.accept(&e))).collect();
    let accepted = decisions.iter().filter(|(_, ok)| *ok).count();
    let rejected = decisions.len() - accepted;

    if json_mode {
        let mut output = serde_json::json!({
            "phase": phase_name(in_core),
            "accepted": accepted,
            "rejected": rejected
        });
        if verbose {
            output["edges"] = decisions
                .iter()
                .map(|(edge, ok)| serde_json::json!({ "edge": edge, "accepted": ok }))
                .collect();
        }
        print_json(&output);
        return Ok(());
    }

    println!("Sweep ({})", phase_name(in_core));
    println!("Accepted: {}", accepted);
    println!("Rejected: {}", rejected);

    if verbose {
        println!();
        for (edge, ok) in &decisions {
            println!(
                "  {} -> {}{}: {}",
                edge.base,
                edge.adjacent,
                if edge.shortcut { " [shortcut]" } else { "" },
                if *ok { "accepted" } else { "rejected" }
            );
        }
    }

    Ok(())
}

// =============================================================================
// CHAIN COMMAND
// =============================================================================

/// Show the name of the chain `[core filter, blocked edges]`.
pub fn cmd_chain(path: &Path, json_mode: bool, suffixes: &[String]) -> Result<(), FilterError> {
    let (fixture, graph) = load_graph(path)?;
    let mut registry = CoreRegistry::new();
    registry.register(&graph)?;

    let mut chain = FilterChain::new()
        .with(CoreEdgeFilter::new(&graph, &registry)?)
        .with(fixture.restrictions());
    for suffix in suffixes {
        chain.append_name(suffix);
    }

    if json_mode {
        print_json(&serde_json::json!({
            "name": chain.name(),
            "filters": chain.type_tags().collect::<Vec<_>>()
        }));
        return Ok(());
    }

    println!("{}", chain);
    println!("Name: {}", chain.name());

    Ok(())
}
