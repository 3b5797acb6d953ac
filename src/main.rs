use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use forestdrift_io::{
    AgreementReport, ForestReader, REFERENCE_COLUMN, ScalerReader, ScoringDriver, TableReader,
    TableWriter,
};

#[derive(Parser)]
#[command(name = "forestdrift")]
#[command(about = "Decision-forest inference with hard-vote and soft-vote scoring")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Score a sample table with both vote policies and rewrite it with label columns
    Score {
        /// Path to the exported forest (JSON array of tree records)
        #[arg(long, default_value = "/data/rf_model.json")]
        model: PathBuf,

        /// Path to the exported standardization parameters
        #[arg(long, default_value = "/data/scaler.json")]
        scaler: PathBuf,

        /// Path to the input CSV file
        #[arg(long, default_value = "/data/test.csv")]
        data: PathBuf,

        /// Where to write the scored table (defaults to rewriting --data in place)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Column the produced labels are compared against
        #[arg(long, default_value = REFERENCE_COLUMN)]
        reference: String,
    },

    /// Print a structural summary of a forest and, optionally, a scaler
    Inspect {
        /// Path to the exported forest (JSON array of tree records)
        #[arg(long)]
        model: PathBuf,

        /// Path to the exported standardization parameters
        #[arg(long)]
        scaler: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct ScoreOutput {
    data: PathBuf,
    output: PathBuf,
    n_rows: usize,
    n_trees: usize,
    n_features: usize,
    n_disagreements: usize,
    report: Option<AgreementReport>,
}

#[derive(Serialize)]
struct TreeSummary {
    index: usize,
    n_nodes: usize,
    n_leaves: usize,
    depth: usize,
    n_classes: usize,
}

#[derive(Serialize)]
struct InspectOutput {
    n_trees: usize,
    n_classes: Option<usize>,
    uniform_classes: bool,
    trees: Vec<TreeSummary>,
    scaler_n_features: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Score {
            model,
            scaler,
            data,
            output,
            reference,
        } => {
            let forest = ForestReader::new(&model)
                .read()
                .context("failed to load model")?;
            let scaler = ScalerReader::new(&scaler)
                .read()
                .context("failed to load scaler")?;
            let mut table = TableReader::new(&data)
                .read()
                .context("failed to read input CSV")?;

            let labels = ScoringDriver::new(&forest, &scaler)
                .score_into(&mut table)
                .context("scoring failed")?;

            let output = output.unwrap_or_else(|| data.clone());
            TableWriter::new(&output)
                .write(&table)
                .context("failed to write scored CSV")?;
            info!(path = %output.display(), "updated sample table");

            let report = AgreementReport::from_table(&table, &reference);
            if let Some(report) = &report {
                info!("{report}");
            }

            let summary = ScoreOutput {
                data,
                output,
                n_rows: table.n_rows(),
                n_trees: forest.n_trees(),
                n_features: table.n_features(),
                n_disagreements: labels.n_disagreements(),
                report,
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }

        Command::Inspect { model, scaler } => {
            let forest = ForestReader::new(&model)
                .read()
                .context("failed to load model")?;
            let scaler_n_features = scaler
                .map(|path| {
                    ScalerReader::new(&path)
                        .read()
                        .context("failed to load scaler")
                })
                .transpose()?
                .map(|s| s.n_features());

            let output = InspectOutput {
                n_trees: forest.n_trees(),
                n_classes: forest.n_classes(),
                uniform_classes: forest.has_uniform_classes(),
                trees: forest
                    .trees()
                    .iter()
                    .enumerate()
                    .map(|(index, tree)| TreeSummary {
                        index,
                        n_nodes: tree.n_nodes(),
                        n_leaves: tree.n_leaves(),
                        depth: tree.depth(),
                        n_classes: tree.n_classes(),
                    })
                    .collect(),
                scaler_n_features,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
