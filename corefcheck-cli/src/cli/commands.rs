//! Command implementations and argument parsing for the corefcheck CLI.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use corefcheck_core::{
    ClusterValidator, ClusterViolation, DiagnosticSink, DisjointSet, EmptySpanPolicy, TracingSink,
    ValidationError, natural_key, sort_naturally,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::document::Document;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "corefcheck",
    about = "Check coreference and relation annotations for structural consistency."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Check that clusters are disjoint and free of duplicate spans.
    Validate(ValidateCommand),
    /// List relations implied by transitivity but missing from the document.
    Closure(ClosureCommand),
    /// Group linked mentions into clusters.
    Group(GroupCommand),
}

/// Options accepted by the `validate` command.
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to the JSON annotation document.
    pub path: PathBuf,

    /// How mentions with no tokens take part in duplicate detection.
    #[arg(long = "empty-spans", value_enum, default_value_t = EmptySpans::Flag)]
    pub empty_spans: EmptySpans,

    /// Report every violation instead of stopping at the first.
    #[arg(long)]
    pub collect: bool,
}

/// Options accepted by the `closure` command.
#[derive(Debug, Args, Clone)]
pub struct ClosureCommand {
    /// Path to the JSON annotation document.
    pub path: PathBuf,

    /// Only consider relations with this label.
    #[arg(long)]
    pub label: Option<String>,
}

/// Options accepted by the `group` command.
#[derive(Debug, Args, Clone)]
pub struct GroupCommand {
    /// Path to the JSON annotation document.
    pub path: PathBuf,

    /// Only link mentions through relations with this label.
    #[arg(long)]
    pub label: Option<String>,
}

/// Command-line spelling of [`EmptySpanPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EmptySpans {
    /// Colliding empty spans fail validation without a diagnostic.
    Flag,
    /// Mentions with empty spans are ignored.
    Skip,
}

impl From<EmptySpans> for EmptySpanPolicy {
    fn from(value: EmptySpans) -> Self {
        match value {
            EmptySpans::Flag => Self::FlagSilently,
            EmptySpans::Skip => Self::Skip,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The document could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The document is not valid JSON or does not match the expected shape.
    #[error("failed to parse `{path}`: {source}")]
    Json {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },
    /// The document is structurally inconsistent.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result of executing a CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Findings of the `validate` command.
    Validated {
        /// Violations reported by the checks.
        violations: Vec<ClusterViolation>,
        /// Whether every check passed. Can be `false` with no violations
        /// when empty spans collide silently.
        passed: bool,
    },
    /// Relations the `closure` command found missing, in natural order.
    Unresolved(Vec<(String, String)>),
    /// Clusters built by the `group` command, members in natural order.
    Grouped(Vec<Vec<String>>),
}

impl Outcome {
    /// Reports whether the command found nothing wrong.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        match self {
            Self::Validated { passed, .. } => *passed,
            Self::Unresolved(missing) => missing.is_empty(),
            Self::Grouped(_) => true,
        }
    }
}

/// Logs each violation and keeps a copy for the outcome.
#[derive(Default)]
struct Recorder {
    violations: Vec<ClusterViolation>,
}

impl DiagnosticSink for Recorder {
    fn record(&mut self, violation: ClusterViolation) {
        TracingSink.record(violation.clone());
        self.violations.push(violation);
    }
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the document cannot be read or is structurally
/// inconsistent.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use corefcheck_cli::cli::{Cli, Command, GroupCommand, Outcome, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(
///     file.path(),
///     r#"{"relations": [{"source": "e1", "target": "e2", "label": "coref"}]}"#,
/// )?;
/// let cli = Cli {
///     command: Command::Group(GroupCommand {
///         path: file.path().to_path_buf(),
///         label: None,
///     }),
/// };
/// let outcome = run_cli(cli)?;
/// assert_eq!(outcome, Outcome::Grouped(vec![vec!["e1".into(), "e2".into()]]));
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<Outcome, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Validate(command) => {
            span.record("command", field::display("validate"));
            run_validate(command)
        }
        Command::Closure(command) => {
            span.record("command", field::display("closure"));
            run_closure(command)
        }
        Command::Group(command) => {
            span.record("command", field::display("group"));
            run_group(command)
        }
    }
}

#[instrument(
    name = "cli.validate",
    err,
    skip(command),
    fields(path = field::Empty, collect = command.collect),
)]
pub(super) fn run_validate(command: ValidateCommand) -> Result<Outcome, CliError> {
    Span::current().record("path", field::display(command.path.display()));
    let document = Document::load(&command.path)?;
    let spans = document.spans()?;
    let clusters = document.clusters()?;
    let validator = ClusterValidator::new().with_empty_span_policy(command.empty_spans.into());

    let mut recorder = Recorder::default();
    let passed = if command.collect {
        validator.report_all(&clusters, &spans, &mut recorder)?
    } else {
        let mut failed = validator.transitive_not_resolved(&clusters, &mut recorder);
        for members in clusters.values() {
            if failed {
                break;
            }
            failed = validator.within_cluster_span_duplicate(members, &spans, &mut recorder)?;
        }
        !failed
    };

    info!(
        clusters = clusters.len(),
        violations = recorder.violations.len(),
        passed,
        "validation completed"
    );
    Ok(Outcome::Validated {
        violations: recorder.violations,
        passed,
    })
}

#[instrument(
    name = "cli.closure",
    err,
    skip(command),
    fields(path = field::Empty, label = field::Empty),
)]
pub(super) fn run_closure(command: ClosureCommand) -> Result<Outcome, CliError> {
    let span = Span::current();
    span.record("path", field::display(command.path.display()));
    span.record(
        "label",
        field::display(command.label.as_deref().unwrap_or("<any>")),
    );
    let document = Document::load(&command.path)?;
    let relations = document.relations(command.label.as_deref());
    let missing = ClusterValidator::new().unresolved_links(&relations, TracingSink);
    info!(
        relations = relations.len(),
        unresolved = missing.len(),
        "closure check completed"
    );
    Ok(Outcome::Unresolved(missing))
}

#[instrument(
    name = "cli.group",
    err,
    skip(command),
    fields(path = field::Empty, label = field::Empty),
)]
pub(super) fn run_group(command: GroupCommand) -> Result<Outcome, CliError> {
    let span = Span::current();
    span.record("path", field::display(command.path.display()));
    span.record(
        "label",
        field::display(command.label.as_deref().unwrap_or("<any>")),
    );
    let document = Document::load(&command.path)?;

    let mut groups: DisjointSet<String> = document
        .relations(command.label.as_deref())
        .into_iter()
        .map(|relation| (relation.source, relation.target))
        .collect();
    for mention in &document.mentions {
        groups.insert(mention.id.clone());
    }

    let mut clusters: Vec<Vec<String>> = groups
        .into_groups()
        .map(|(_, members)| {
            let mut members: Vec<String> = members.into_iter().collect();
            sort_naturally(&mut members);
            members
        })
        .collect();
    clusters.sort_by_cached_key(|members| members.first().map(|first| natural_key(first)));
    info!(clusters = clusters.len(), "grouping completed");
    Ok(Outcome::Grouped(clusters))
}

/// Renders `outcome` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::io::Cursor;
/// # use corefcheck_cli::cli::{Outcome, render_outcome};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let outcome = Outcome::Unresolved(vec![("e1".into(), "e3".into())]);
/// let mut buffer = Cursor::new(Vec::new());
/// render_outcome(&outcome, &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer.into_inner())?, "unresolved: 1\ne1 -> e3\n");
/// # Ok(())
/// # }
/// ```
pub fn render_outcome(outcome: &Outcome, mut writer: impl Write) -> io::Result<()> {
    match outcome {
        Outcome::Validated { violations, passed } => {
            let status = if *passed { "ok" } else { "failed" };
            writeln!(writer, "status: {status}")?;
            writeln!(writer, "violations: {}", violations.len())?;
            for violation in violations {
                writeln!(writer, "{violation}")?;
            }
        }
        Outcome::Unresolved(missing) => {
            writeln!(writer, "unresolved: {}", missing.len())?;
            for (source, target) in missing {
                writeln!(writer, "{source} -> {target}")?;
            }
        }
        Outcome::Grouped(clusters) => {
            writeln!(writer, "clusters: {}", clusters.len())?;
            for (index, members) in clusters.iter().enumerate() {
                writeln!(writer, "{index}\t{}", members.join(" "))?;
            }
        }
    }
    Ok(())
}
