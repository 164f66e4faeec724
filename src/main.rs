use anyhow::Result;
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;

use studydeck::config::{require_file, Config};
use studydeck::coverage::risk::RiskOptions;
use studydeck::deck::merge::MergeOptions;
use studydeck::labels::reader::LabelFilter;
use studydeck::output::terminal;
use studydeck::pipeline;

/// Studydeck: transcript deduplication and deck coverage for certification study.
///
/// Finds duplicate lesson recordings, checks which lessons the question deck
/// already covers, and keeps the question CSVs and flashcard exports in sync.
#[derive(Parser)]
#[command(name = "studydeck", version, about)]
struct Cli {
    /// Print result objects as JSON instead of terminal summaries
    #[arg(long, global = true)]
    json: bool,

    /// Score at or above which a lesson counts as covered (default: 0.8)
    #[arg(long, global = true)]
    high: Option<f64>,

    /// Score at or above which a lesson is ambiguous (default: 0.4)
    #[arg(long, global = true)]
    low: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

/// Input and output locations shared by the label-driven commands.
#[derive(Args)]
struct LabelArgs {
    /// Label listing, one lesson file per line
    #[arg(long)]
    labels: Option<PathBuf>,

    /// Directory for reports and generated lists
    #[arg(long)]
    out: Option<PathBuf>,

    /// Only keep labels mentioning one of these (comma-separated, e.g. "az-104,az104")
    #[arg(long)]
    filter: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Consolidate duplicates, then analyze deck coverage of the kept lessons
    Analyze {
        #[command(flatten)]
        input: LabelArgs,

        /// Master question CSV
        #[arg(long)]
        questions: Option<PathBuf>,
    },

    /// Group duplicate lesson labels and write the consolidated list
    Dedup {
        #[command(flatten)]
        input: LabelArgs,
    },

    /// Score lessons against the deck's batches
    Coverage {
        #[command(flatten)]
        input: LabelArgs,

        /// Master question CSV
        #[arg(long)]
        questions: Option<PathBuf>,
    },

    /// Estimate duplication risk before a bulk conversion
    Risk {
        #[command(flatten)]
        input: LabelArgs,

        /// Master question CSV
        #[arg(long)]
        questions: Option<PathBuf>,

        /// Expected cards per converted lesson (default: 2)
        #[arg(long, default_value = "2")]
        cards_per_transcript: usize,
    },

    /// Append converted questions to the master CSV
    Merge {
        /// Master question CSV (rewritten in place)
        #[arg(long)]
        master: Option<PathBuf>,

        /// Converted question CSV to append
        #[arg(long)]
        converted: PathBuf,

        /// Keep converted questions the master already has
        #[arg(long)]
        keep_duplicates: bool,

        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,

        /// Directory for the merge report
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Export questions as an Anki text import file
    Export {
        /// Question CSV to export
        #[arg(long)]
        questions: Option<PathBuf>,

        /// Root deck name
        #[arg(long)]
        deck: Option<String>,

        /// Output file
        #[arg(long, default_value = "flashcards.txt")]
        output: PathBuf,
    },

    /// Show configured inputs and what they contain
    Status,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("studydeck=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    config.override_thresholds(cli.high, cli.low)?;
    let at = Local::now();

    match cli.command {
        Commands::Analyze { input, questions } => {
            apply_label_args(&mut config, input);
            if questions.is_some() {
                config.questions_path = questions;
            }
            let labels = config.require_labels()?;
            let questions = config.require_questions()?;
            info!(labels = %labels.display(), questions = %questions.display(), "Starting analysis");

            let extractor = config.keyword_extractor();
            let result = pipeline::analyze::run(
                labels,
                &config.course_filter,
                questions,
                &extractor,
                &config.thresholds,
                &config.reports_dir,
                &at,
            )?;

            if cli.json {
                print_json(&result)?;
            } else {
                terminal::display_duplicate_summary(&result.dedup.report);
                terminal::display_coverage_summary(&result.coverage.report);
                println!();
                for path in [
                    &result.dedup.report_path,
                    &result.dedup.consolidated_path,
                    &result.dedup.backlog_path,
                    &result.coverage.report_path,
                ] {
                    println!("  Wrote {}", path.display().to_string().dimmed());
                }
            }
        }

        Commands::Dedup { input } => {
            apply_label_args(&mut config, input);
            let labels_path = config.require_labels()?;
            let labels = studydeck::labels::reader::read_labels(labels_path, &config.course_filter)?;
            let result = pipeline::analyze::run_dedup(&labels, &config.reports_dir, &at)?;

            if cli.json {
                print_json(&result)?;
            } else {
                terminal::display_duplicate_summary(&result.report);
                println!(
                    "\n  Report: {}",
                    result.report_path.display().to_string().dimmed()
                );
                println!(
                    "  Consolidated list: {}",
                    result.consolidated_path.display().to_string().dimmed()
                );
            }
        }

        Commands::Coverage { input, questions } => {
            apply_label_args(&mut config, input);
            if questions.is_some() {
                config.questions_path = questions;
            }
            let labels_path = config.require_labels()?;
            let questions = config.require_questions()?;
            let labels = studydeck::labels::reader::read_labels(labels_path, &config.course_filter)?;

            let extractor = config.keyword_extractor();
            let result = pipeline::analyze::run_coverage(
                &labels,
                questions,
                &extractor,
                &config.thresholds,
                &config.reports_dir,
                &at,
            )?;

            if cli.json {
                print_json(&result)?;
            } else {
                terminal::display_coverage_summary(&result.report);
                println!(
                    "\n  Report: {}",
                    result.report_path.display().to_string().dimmed()
                );
            }
        }

        Commands::Risk {
            input,
            questions,
            cards_per_transcript,
        } => {
            apply_label_args(&mut config, input);
            if questions.is_some() {
                config.questions_path = questions;
            }
            let labels = config.require_labels()?;
            let questions = config.require_questions()?;

            let options = RiskOptions {
                cards_per_transcript,
                ..RiskOptions::default()
            };
            let result = pipeline::risk::run(
                labels,
                &config.course_filter,
                questions,
                &config.thresholds,
                options,
                &config.reports_dir,
                &at,
            )?;

            if cli.json {
                print_json(&result)?;
            } else {
                terminal::display_risk_summary(&result.report);
                println!(
                    "\n  Report: {}",
                    result.report_path.display().to_string().dimmed()
                );
            }
        }

        Commands::Merge {
            master,
            converted,
            keep_duplicates,
            force,
            out,
        } => {
            if master.is_some() {
                config.questions_path = master;
            }
            if let Some(out) = out {
                config.reports_dir = out;
            }
            let master = config.require_questions()?;
            let converted = require_file(
                Some(converted.as_path()),
                "Converted CSV",
                "--converted",
            )?;

            if !force
                && !confirm(&format!(
                    "Merge {} into {}?",
                    converted.display(),
                    master.display()
                ))?
            {
                println!("Merge cancelled.");
                return Ok(());
            }

            let result = pipeline::merge::run(
                master,
                converted,
                MergeOptions { keep_duplicates },
                &config.reports_dir,
                &at,
            )?;

            if cli.json {
                print_json(&result)?;
            } else {
                terminal::display_merge_summary(&result.summary, &result.master_path);
                println!(
                    "  Report: {}",
                    result.report_path.display().to_string().dimmed()
                );
            }
        }

        Commands::Export {
            questions,
            deck,
            output,
        } => {
            if questions.is_some() {
                config.questions_path = questions;
            }
            if let Some(deck) = deck {
                config.deck_root = deck;
            }
            let questions = config.require_questions()?;
            let result = pipeline::export::run(questions, &config.deck_root, &output)?;

            if cli.json {
                print_json(&result)?;
            } else {
                terminal::display_export_summary(&result.summary, &result.output_path);
            }
        }

        Commands::Status => {
            if cli.json {
                print_json(&studydeck::status::collect(&config)?)?;
            } else {
                studydeck::status::show(&config)?;
            }
        }
    }

    Ok(())
}

/// Let command-line paths and filter override the environment.
fn apply_label_args(config: &mut Config, args: LabelArgs) {
    if args.labels.is_some() {
        config.labels_path = args.labels;
    }
    if let Some(out) = args.out {
        config.reports_dir = out;
    }
    if let Some(filter) = args.filter {
        config.course_filter = LabelFilter::parse(&filter);
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Ask a yes/no question on stdin. Anything but "yes" or "y" declines.
fn confirm(question: &str) -> Result<bool> {
    print!("{question} (yes/no): ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "yes" || answer == "y")
}
