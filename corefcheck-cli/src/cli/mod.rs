//! Command-line interface for corefcheck.
//!
//! Three commands operate on a JSON annotation document: `validate` checks
//! that the claimed clusters form a partition, `closure` lists relations
//! implied by transitivity but missing, and `group` merges linked mentions
//! into clusters.

mod commands;
mod document;

pub use commands::{
    Cli, CliError, ClosureCommand, Command, EmptySpans, GroupCommand, Outcome, ValidateCommand,
    render_outcome, run_cli,
};
pub use document::{ClusterKey, ClusterRecord, Document, MentionRecord, RelationRecord};
