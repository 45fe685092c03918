use std::{
    collections::BTreeMap,
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::{Args, Parser, Subcommand};
use hyperpath_core::{
    ComponentSummary, DEFAULT_K, DEFAULT_RICH_CLUB_THRESHOLDS, DecisionPatterns, FeedbackReport,
    HubAnalysis, HyperPath, Hypergraph, HypergraphStatistics, Hyperpath, HyperpathBuilder,
    HyperpathError, PowerLawFit,
};
use hyperpath_providers_jsonl::{JsonlHyperedgeProvider, JsonlProviderError};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_TOP_K: usize = 10;
const DEFAULT_TOP_COMPONENTS: usize = 10;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "hyperpath",
    about = "Traverse and analyse hypergraphs of n-ary relations."
)]
pub struct Cli {
    /// Query to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported queries.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Headline statistics, degree distribution, and power-law fit.
    Stats(StatsCommand),
    /// Hyperedges overlapping one hyperedge on at least `s` entities.
    Neighbours(NeighboursCommand),
    /// K shortest s-paths between two hyperedges.
    Paths(PathsCommand),
    /// K shortest s-paths linking mentions of two entities.
    EntityPaths(EntityPathsCommand),
    /// s-connected components and isolated hyperedges.
    Components(ComponentsCommand),
    /// Highest-degree entities and rich-club coefficients.
    Hubs(HubsCommand),
    /// Recurring decision patterns and gaps in linking context.
    Patterns(PatternsCommand),
}

impl Command {
    const fn label(&self) -> &'static str {
        match self {
            Self::Stats(_) => "stats",
            Self::Neighbours(_) => "neighbours",
            Self::Paths(_) => "paths",
            Self::EntityPaths(_) => "entity-paths",
            Self::Components(_) => "components",
            Self::Hubs(_) => "hubs",
            Self::Patterns(_) => "patterns",
        }
    }
}

/// Location of the JSON Lines input.
#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// Path to a JSON Lines file with one hyperedge record per line.
    pub path: PathBuf,

    /// Override name for the input (defaults to the file stem).
    #[arg(long)]
    pub name: Option<String>,
}

/// Overlap and depth constraints shared by path queries.
#[derive(Debug, Args, Clone, Copy)]
pub struct TraversalArgs {
    /// Minimum number of shared entities between consecutive hyperedges.
    #[arg(long, default_value_t = 1)]
    pub s: usize,

    /// Maximum number of hops; unbounded when omitted.
    #[arg(long = "max-depth")]
    pub max_depth: Option<usize>,
}

/// Options accepted by `stats`.
#[derive(Debug, Args, Clone)]
pub struct StatsCommand {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Options accepted by `neighbours`.
#[derive(Debug, Args, Clone)]
pub struct NeighboursCommand {
    #[command(flatten)]
    pub input: InputArgs,

    /// Identifier of the hyperedge to inspect.
    #[arg(long)]
    pub edge: String,

    /// Minimum number of shared entities.
    #[arg(long, default_value_t = 1)]
    pub s: usize,
}

/// Options accepted by `paths`.
#[derive(Debug, Args, Clone)]
pub struct PathsCommand {
    #[command(flatten)]
    pub input: InputArgs,

    /// Identifier of the starting hyperedge.
    #[arg(long)]
    pub from: String,

    /// Identifier of the target hyperedge.
    #[arg(long)]
    pub to: String,

    /// Number of paths to return.
    #[arg(long, default_value_t = DEFAULT_K)]
    pub k: usize,

    #[command(flatten)]
    pub traversal: TraversalArgs,
}

/// Options accepted by `entity-paths`.
#[derive(Debug, Args, Clone)]
pub struct EntityPathsCommand {
    #[command(flatten)]
    pub input: InputArgs,

    /// Entity mentioned by the starting hyperedges.
    #[arg(long)]
    pub from: String,

    /// Entity mentioned by the target hyperedges.
    #[arg(long)]
    pub to: String,

    /// Number of paths to return.
    #[arg(long, default_value_t = DEFAULT_K)]
    pub k: usize,

    #[command(flatten)]
    pub traversal: TraversalArgs,
}

/// Options accepted by `components`.
#[derive(Debug, Args, Clone)]
pub struct ComponentsCommand {
    #[command(flatten)]
    pub input: InputArgs,

    /// Minimum number of shared entities.
    #[arg(long, default_value_t = 1)]
    pub s: usize,

    /// Number of component sizes to report.
    #[arg(long, default_value_t = DEFAULT_TOP_COMPONENTS)]
    pub top: usize,
}

/// Options accepted by `hubs`.
#[derive(Debug, Args, Clone)]
pub struct HubsCommand {
    #[command(flatten)]
    pub input: InputArgs,

    /// Number of hubs to describe.
    #[arg(long = "top-k", default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Degree threshold for the rich club; repeat for several.
    #[arg(long = "threshold", default_values_t = DEFAULT_RICH_CLUB_THRESHOLDS)]
    pub thresholds: Vec<usize>,
}

/// Options accepted by `patterns`.
#[derive(Debug, Args, Clone)]
pub struct PatternsCommand {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Errors surfaced by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Opening the input failed.
    #[error("failed to open {path:?}: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A hyperedge identifier named on the command line is not in the input.
    #[error("unknown hyperedge `{id}`")]
    UnknownHyperedge {
        /// Identifier supplied by the user.
        id: String,
    },
    /// JSON Lines ingestion failed.
    #[error(transparent)]
    Jsonl(#[from] JsonlProviderError),
    /// The engine rejected the input or a query.
    #[error(transparent)]
    Core(#[from] HyperpathError),
}

/// Outcome of one CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name of the loaded input.
    pub data_source: String,
    /// The generation every query in this command ran against.
    pub snapshot: Arc<Hypergraph>,
    /// Command-specific results.
    pub report: Report,
}

/// Command-specific results, rendered by [`super::render_summary`].
#[derive(Debug, Clone)]
pub enum Report {
    /// Output of `stats`.
    Stats {
        statistics: Option<HypergraphStatistics>,
        distribution: BTreeMap<usize, usize>,
        fit: Option<PowerLawFit>,
    },
    /// Output of `neighbours`, as positions in the snapshot.
    Neighbours {
        position: usize,
        s: usize,
        neighbours: Vec<usize>,
    },
    /// Output of `paths` and `entity-paths`.
    Paths {
        from: String,
        to: String,
        paths: Vec<HyperPath>,
    },
    /// Output of `components`.
    Components {
        summary: ComponentSummary,
        isolated: Vec<usize>,
    },
    /// Output of `hubs`.
    Hubs {
        analysis: HubAnalysis,
        rich_club: BTreeMap<usize, f64>,
    },
    /// Output of `patterns`.
    Patterns {
        patterns: DecisionPatterns,
        feedback: FeedbackReport,
    },
}

/// Executes the command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading the input or running the query fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use hyperpath_cli::cli::{Cli, Command, InputArgs, Report, StatsCommand, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(
///     file.path(),
///     "{\"id\": \"h0\", \"participants\": [\"a\", \"b\"]}\n\
///      {\"id\": \"h1\", \"participants\": [\"b\", \"c\"]}\n",
/// )?;
/// let cli = Cli {
///     command: Command::Stats(StatsCommand {
///         input: InputArgs { path: file.path().to_path_buf(), name: None },
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.snapshot.len(), 2);
/// assert!(matches!(summary.report, Report::Stats { .. }));
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    Span::current().record("command", field::display(cli.command.label()));
    match cli.command {
        Command::Stats(command) => run_stats(&command),
        Command::Neighbours(command) => run_neighbours(&command),
        Command::Paths(command) => run_paths(&command),
        Command::EntityPaths(command) => run_entity_paths(&command),
        Command::Components(command) => run_components(&command),
        Command::Hubs(command) => run_hubs(&command),
        Command::Patterns(command) => run_patterns(&command),
    }
}

pub(super) struct Loaded {
    pub(super) data_source: String,
    pub(super) engine: Hyperpath,
}

impl Loaded {
    fn finish(self, report: Report) -> Result<ExecutionSummary, CliError> {
        Ok(ExecutionSummary {
            data_source: self.data_source,
            snapshot: self.engine.snapshot()?,
            report,
        })
    }

    fn resolve(&self, id: &str) -> Result<usize, CliError> {
        self.engine
            .snapshot()?
            .position_of(id)
            .ok_or_else(|| CliError::UnknownHyperedge { id: id.to_owned() })
    }
}

#[instrument(
    name = "cli.load",
    err,
    skip(input),
    fields(path = field::Empty, override_name = field::Empty, hyperedges = field::Empty),
)]
pub(super) fn load(input: &InputArgs) -> Result<Loaded, CliError> {
    let span = Span::current();
    span.record("path", field::display(input.path.display()));
    span.record(
        "override_name",
        field::display(input.name.as_deref().unwrap_or("<derived>")),
    );
    let reader = open_input(&input.path)?;
    let provider = JsonlHyperedgeProvider::try_from_reader(
        derive_data_source_name(&input.path, input.name.as_deref()),
        reader,
    )?;
    let data_source = provider.name().to_owned();
    let engine = HyperpathBuilder::new()
        .with_capacity(provider.len())
        .with_hyperedges(provider.into_hyperedges())
        .build()?;
    let hyperedges = engine.snapshot()?.len();
    span.record("hyperedges", hyperedges);
    info!(data_source = data_source.as_str(), hyperedges, "hypergraph loaded");
    Ok(Loaded {
        data_source,
        engine,
    })
}

#[instrument(name = "cli.open_input", err, fields(path = field::Empty))]
pub(super) fn open_input(path: &Path) -> Result<BufReader<File>, CliError> {
    Span::current().record("path", field::display(path.display()));
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })
}

pub(super) fn derive_data_source_name(path: &Path, override_name: Option<&str>) -> String {
    override_name
        .map(ToOwned::to_owned)
        .or_else(|| path.file_stem()?.to_str().map(ToOwned::to_owned))
        .unwrap_or_else(|| String::from("hypergraph"))
}

fn run_stats(command: &StatsCommand) -> Result<ExecutionSummary, CliError> {
    let loaded = load(&command.input)?;
    let report = Report::Stats {
        statistics: loaded.engine.statistics()?,
        distribution: loaded.engine.degree_distribution()?,
        fit: loaded.engine.power_law_fit()?,
    };
    loaded.finish(report)
}

#[instrument(name = "cli.neighbours", err, skip(command), fields(edge = %command.edge, s = command.s))]
fn run_neighbours(command: &NeighboursCommand) -> Result<ExecutionSummary, CliError> {
    let loaded = load(&command.input)?;
    let position = loaded.resolve(&command.edge)?;
    let neighbours = loaded.engine.neighbours(position, command.s)?;
    info!(neighbours = neighbours.len(), "neighbour query completed");
    loaded.finish(Report::Neighbours {
        position,
        s: command.s,
        neighbours: neighbours.into_iter().collect(),
    })
}

#[instrument(
    name = "cli.paths",
    err,
    skip(command),
    fields(from = %command.from, to = %command.to, k = command.k, s = command.traversal.s),
)]
fn run_paths(command: &PathsCommand) -> Result<ExecutionSummary, CliError> {
    let loaded = load(&command.input)?;
    let start = loaded.resolve(&command.from)?;
    let target = loaded.resolve(&command.to)?;
    let TraversalArgs { s, max_depth } = command.traversal;
    let paths = loaded
        .engine
        .k_shortest_paths(start, target, command.k, s, max_depth)?;
    info!(paths = paths.len(), "path query completed");
    loaded.finish(Report::Paths {
        from: command.from.clone(),
        to: command.to.clone(),
        paths,
    })
}

#[instrument(
    name = "cli.entity_paths",
    err,
    skip(command),
    fields(from = %command.from, to = %command.to, k = command.k, s = command.traversal.s),
)]
fn run_entity_paths(command: &EntityPathsCommand) -> Result<ExecutionSummary, CliError> {
    let loaded = load(&command.input)?;
    let TraversalArgs { s, max_depth } = command.traversal;
    let paths = loaded
        .engine
        .entity_paths(&command.from, &command.to, command.k, s, max_depth)?;
    info!(paths = paths.len(), "entity path query completed");
    loaded.finish(Report::Paths {
        from: command.from.clone(),
        to: command.to.clone(),
        paths,
    })
}

#[instrument(name = "cli.components", err, skip(command), fields(s = command.s))]
fn run_components(command: &ComponentsCommand) -> Result<ExecutionSummary, CliError> {
    let loaded = load(&command.input)?;
    let summary = loaded.engine.component_summary(command.s, command.top)?;
    let isolated = loaded.engine.isolated_hyperedges()?;
    info!(
        components = summary.component_count,
        isolated = isolated.len(),
        "component query completed"
    );
    loaded.finish(Report::Components { summary, isolated })
}

#[instrument(name = "cli.hubs", err, skip(command), fields(top_k = command.top_k))]
fn run_hubs(command: &HubsCommand) -> Result<ExecutionSummary, CliError> {
    let loaded = load(&command.input)?;
    let analysis = loaded.engine.hub_analysis(command.top_k)?;
    let rich_club = loaded.engine.rich_club(&command.thresholds)?;
    info!(hubs = analysis.hubs.len(), "hub query completed");
    loaded.finish(Report::Hubs {
        analysis,
        rich_club,
    })
}

#[instrument(name = "cli.patterns", err, skip(command))]
fn run_patterns(command: &PatternsCommand) -> Result<ExecutionSummary, CliError> {
    let loaded = load(&command.input)?;
    let patterns = loaded.engine.decision_patterns()?;
    let feedback = loaded.engine.feedback_potential()?;
    info!(
        anomalies = patterns.anomalies.len(),
        resolution_candidates = feedback.resolution_candidates.len(),
        "pattern query completed"
    );
    loaded.finish(Report::Patterns { patterns, feedback })
}
