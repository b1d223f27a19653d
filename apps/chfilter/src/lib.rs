//! # chfilter
//!
//! Library half of the chfilter binary: the CLI definition and the graph
//! fixture format, exposed for integration tests.

pub mod cli;
pub mod fixture;
