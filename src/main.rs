use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use fieldscore::{
    BatchSummary, Comparator, ReportLog, SchemaDescriptor, SchemaIndex, DEFAULT_LOG_FILE,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Score machine-classified records against ground truth
#[derive(Parser, Debug)]
#[command(name = "fieldscore")]
#[command(about = "Score structured records against ground truth", long_about = None)]
struct Args {
    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare one predicted record with its ground truth
    Compare {
        /// Schema descriptor or JSON Schema file
        #[arg(short, long)]
        schema: PathBuf,

        /// File holding the predicted record as JSON text
        #[arg(short, long)]
        predicted: PathBuf,

        /// File holding the ground-truth record as JSON text
        #[arg(short, long)]
        truth: PathBuf,

        /// Append-only results log
        #[arg(long, default_value = DEFAULT_LOG_FILE)]
        results: PathBuf,

        /// Do not append the report to the results log
        #[arg(long)]
        no_record: bool,
    },

    /// Compare every row of a CSV file holding predicted and ground-truth columns
    Batch {
        #[arg(short, long)]
        schema: PathBuf,

        /// CSV file with a header row
        #[arg(short, long)]
        input: PathBuf,

        #[arg(long, default_value = "Prediction")]
        predicted_column: String,

        #[arg(long, default_value = "GroundTruth")]
        truth_column: String,

        #[arg(long, default_value = DEFAULT_LOG_FILE)]
        results: PathBuf,

        #[arg(long)]
        no_record: bool,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize the reports already in a results log
    Summarize {
        #[arg(long, default_value = DEFAULT_LOG_FILE)]
        results: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Show the field kinds and soft accuracy fields of a schema
    Inspect {
        #[arg(short, long)]
        schema: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level.as_str()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Compare {
            schema,
            predicted,
            truth,
            results,
            no_record,
        } => {
            let comparator = build_comparator(&schema, &results, no_record)?;
            let predicted = read_text(&predicted)?;
            let truth = read_text(&truth)?;

            match comparator.compare(predicted, truth) {
                Ok(report) => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                    Ok(())
                }
                Err(err) => {
                    if let Some(report) = err.report() {
                        println!("{}", serde_json::to_string_pretty(report)?);
                    }
                    Err(err.into())
                }
            }
        }
        Command::Batch {
            schema,
            input,
            predicted_column,
            truth_column,
            results,
            no_record,
            json,
        } => {
            let comparator = build_comparator(&schema, &results, no_record)?;
            let pairs = read_pairs(&input, &predicted_column, &truth_column)?;
            info!("Comparing {} record pairs", pairs.len());

            let outcome = comparator.compare_batch(pairs);
            for failure in &outcome.failures {
                warn!("Row {}: {}", failure.position + 1, failure.error);
            }
            print_summary(&outcome.summary(), json)?;

            if outcome.reports.is_empty() && !outcome.failures.is_empty() {
                bail!("all {} comparisons failed", outcome.failures.len());
            }
            Ok(())
        }
        Command::Summarize { results, json } => {
            let reports = ReportLog::new(&results).read_reports()?;
            info!("Loaded {} reports from {}", reports.len(), results.display());
            print_summary(&BatchSummary::compute(&reports), json)
        }
        Command::Inspect { schema } => {
            let index = SchemaIndex::build(&load_schema(&schema)?)?;

            println!("Fields:");
            for (path, kind) in index.field_kinds() {
                println!("  {path}: {kind:?}");
            }
            println!("\nSoft accuracy fields:");
            for (path, enum_name) in index.soft_fields() {
                let described = index
                    .enums()
                    .get(enum_name)
                    .map(|e| format!("{} [{}]", e.name(), e.members().join(" < ")))
                    .unwrap_or_else(|| enum_name.to_string());
                println!("  {path}: {described}");
            }
            Ok(())
        }
    }
}

fn load_schema(path: &Path) -> Result<SchemaDescriptor> {
    SchemaDescriptor::from_path(path)
        .with_context(|| format!("loading schema {}", path.display()))
}

fn build_comparator(schema: &Path, results: &Path, no_record: bool) -> Result<Comparator> {
    let comparator = Comparator::new(&load_schema(schema)?)?;
    if no_record {
        return Ok(comparator);
    }
    info!("Recording reports to {}", results.display());
    Ok(comparator.with_sink(Arc::new(ReportLog::new(results))))
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Read (predicted, truth) JSON text pairs from two named CSV columns
fn read_pairs(
    path: &Path,
    predicted_column: &str,
    truth_column: &str,
) -> Result<Vec<(String, String)>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("column '{}' not found in {}", name, path.display()))
    };
    let predicted_idx = column(predicted_column)?;
    let truth_idx = column(truth_column)?;

    let mut pairs = Vec::new();
    for record in reader.records() {
        let record = record?;
        let predicted = record.get(predicted_idx).unwrap_or_default().to_string();
        let truth = record.get(truth_idx).unwrap_or_default().to_string();
        pairs.push((predicted, truth));
    }
    Ok(pairs)
}

fn print_summary(summary: &BatchSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    println!("\nBatch Testing Results:");
    println!("Reports: {}", summary.reports_count);
    println!("Overall Average Accuracy: {:.2}%", summary.avg_overall_accuracy * 100.0);
    println!(
        "Range: {:.2}% - {:.2}%",
        summary.min_overall_accuracy * 100.0,
        summary.max_overall_accuracy * 100.0
    );
    println!("\nField-wise Average Accuracies:");
    for (field, accuracy) in &summary.field_accuracies {
        println!("{}: {:.2}%", field, accuracy * 100.0);
    }
    if let Some(weakest) = &summary.weakest_field {
        println!("\nWeakest field: {weakest}");
    }
    Ok(())
}
