//! Command-line orchestration: load a JSON Lines hypergraph, run one query,
//! and render the report as text.

mod commands;
mod render;

pub use commands::{
    Cli, CliError, Command, ComponentsCommand, EntityPathsCommand, ExecutionSummary, HubsCommand,
    InputArgs, NeighboursCommand, PathsCommand, PatternsCommand, Report, StatsCommand,
    TraversalArgs, run_cli,
};
pub use render::render_summary;
