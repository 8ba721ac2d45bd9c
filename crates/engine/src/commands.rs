//! Command-line surface.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;

use l5r4_domain::{detect_schema, migrate_document, SchemaVersion};

use crate::config::EngineConfig;
use crate::documents::{prepare_document, read_document, write_document};

pub const USAGE: &str = "Usage: l5r4-engine <command>\n\nCommands:\n  prepare <input> [output]  Recompute wound data for an actor or world\n  migrate <input> [output]  Upgrade a legacy actor, item or world\n  detect <input>            Report whether a document uses the legacy schema";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Prepare {
        input: PathBuf,
        output: Option<PathBuf>,
    },
    Migrate {
        input: PathBuf,
        output: Option<PathBuf>,
    },
    Detect {
        input: PathBuf,
    },
}

impl Command {
    /// Parse arguments (without the program name).
    pub fn parse(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
        let mut args = args.into_iter();
        let command = args.next();
        let input = args.next().map(PathBuf::from);
        let output = args.next().map(PathBuf::from);
        if let Some(extra) = args.next() {
            anyhow::bail!("Unexpected argument: {extra}\n\n{USAGE}");
        }

        let require_input = |input: Option<PathBuf>| {
            input.with_context(|| format!("Missing input path\n\n{USAGE}"))
        };

        match command.as_deref() {
            Some("prepare") => Ok(Self::Prepare {
                input: require_input(input)?,
                output,
            }),
            Some("migrate") => Ok(Self::Migrate {
                input: require_input(input)?,
                output,
            }),
            Some("detect") => {
                if output.is_some() {
                    anyhow::bail!("detect takes a single path\n\n{USAGE}");
                }
                Ok(Self::Detect {
                    input: require_input(input)?,
                })
            }
            Some(cmd) => anyhow::bail!("Unknown command: {cmd}\n\n{USAGE}"),
            None => anyhow::bail!("{USAGE}"),
        }
    }

    /// Execute the command. Output without a target path goes to `stdout`.
    pub fn run(&self, config: &EngineConfig, stdout: &mut dyn Write) -> anyhow::Result<()> {
        match self {
            Self::Prepare { input, output } => prepare(input, output.as_deref(), config, stdout),
            Self::Migrate { input, output } => migrate(input, output.as_deref(), config, stdout),
            Self::Detect { input } => detect(input, stdout),
        }
    }
}

fn prepare(
    input: &Path,
    output: Option<&Path>,
    config: &EngineConfig,
    stdout: &mut dyn Write,
) -> anyhow::Result<()> {
    let mut doc = read_document(input)?;
    let summaries = prepare_document(&mut doc)?;

    for summary in &summaries {
        tracing::info!(
            current = %summary.current,
            penalty = summary.penalty,
            max = summary.max,
            remaining = summary.remaining,
            "Prepared actor"
        );
        if summary.display_degraded {
            tracing::warn!("Wound display fell back to unfiltered tables");
        }
    }

    write_document(&doc, output, config, stdout)
}

fn migrate(
    input: &Path,
    output: Option<&Path>,
    config: &EngineConfig,
    stdout: &mut dyn Write,
) -> anyhow::Result<()> {
    let mut doc = read_document(input)?;
    let report = migrate_document(&mut doc)
        .with_context(|| format!("migrating {}", input.display()))?;

    if !report.has_changes() {
        tracing::info!(skipped = report.skipped, "Document already uses the current schema");
    } else {
        tracing::info!(
            renamed = report.renamed.len(),
            dropped = report.dropped.len(),
            coerced = report.coerced.len(),
            bows = report.bows_converted,
            skipped = report.skipped,
            "Migrated document"
        );
    }

    write_document(&doc, output, config, stdout)
}

fn detect(input: &Path, stdout: &mut dyn Write) -> anyhow::Result<()> {
    let doc = read_document(input)?;
    let label = match detect_schema(&doc) {
        SchemaVersion::Legacy => "legacy",
        SchemaVersion::Current => "current",
    };
    writeln!(stdout, "{label}").context("writing output")
}
