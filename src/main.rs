//! MCQ Pipeline - Entry point
//!
//! Parses generated MCQ PDFs into weekly JSON question banks.

use anyhow::Context;
use clap::{Parser, Subcommand};
use mcq_pipeline::{
    available_weeks, driver::sort_records, run_preprocessing, try_parse_mcq_pdf, PipelineConfig,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mcq-pipeline")]
#[command(author, version, about = "Parse generated MCQ PDFs into weekly question banks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse every week's MCQ PDF and write JSON question files
    Preprocess {
        /// Directory containing week_<N>_mcqs.pdf files
        #[arg(long, default_value = "mcq_pdfs")]
        mcq_pdf_dir: PathBuf,

        /// Directory to write week_<N>_questions.json files to
        #[arg(long, default_value = "data")]
        output_dir: PathBuf,

        /// Number of weeks to process
        #[arg(long, default_value_t = 12)]
        total_weeks: u32,
    },

    /// Parse a single MCQ PDF and print the accepted questions as JSON
    Parse {
        /// PDF file to parse
        input: PathBuf,
    },

    /// List weeks that have a parsed question file
    Weeks {
        /// Directory holding week_<N>_questions.json files
        #[arg(long, default_value = "data")]
        output_dir: PathBuf,

        /// Number of weeks in the course
        #[arg(long, default_value_t = 12)]
        total_weeks: u32,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mcq_pipeline=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Preprocess {
            mcq_pdf_dir,
            output_dir,
            total_weeks,
        } => {
            let config = PipelineConfig {
                mcq_pdf_dir,
                output_dir,
                total_weeks,
                ..PipelineConfig::default()
            };
            let report = run_preprocessing(&config).with_context(|| {
                format!(
                    "cannot preprocess MCQ PDFs from {}",
                    config.mcq_pdf_dir.display()
                )
            })?;

            println!(
                "{} of {} weeks written ({} questions)",
                report.succeeded(),
                report.weeks.len(),
                report.records_written()
            );
            if !report.all_successful() {
                eprintln!(
                    "warning: {} weeks failed; some JSON files may be missing or incomplete",
                    report.failed()
                );
            }
        }
        Commands::Parse { input } => {
            let report = try_parse_mcq_pdf(&input)
                .with_context(|| format!("cannot parse {}", input.display()))?;

            for (reason, count) in report.rejection_counts() {
                tracing::info!(reason = %reason, count, "rejected blocks");
            }

            let mut records = report.into_records();
            sort_records(&mut records);
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Commands::Weeks {
            output_dir,
            total_weeks,
        } => {
            let config = PipelineConfig {
                output_dir,
                total_weeks,
                ..PipelineConfig::default()
            };
            for week in available_weeks(&config) {
                println!("{}", week);
            }
        }
    }

    Ok(())
}
