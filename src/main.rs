mod lookup;
mod model;
mod output;
mod parser;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

use lookup::Lookup;
use model::MedicationRecord;
use parser::rules::RULES;
use parser::Prescription;

/// Pages inside one text dump are separated by form feeds.
const PAGE_SEPARATOR: char = '\x0c';

#[derive(Parser)]
#[command(
    name = "receita_extract",
    about = "Extract medications from e-SUS prescription text"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract medication records from prescription text dumps
    Extract {
        /// Text files, one document each (pages separated by form feed)
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Print a JSON report instead of a table
        #[arg(long)]
        json: bool,
        /// Pictogram keyword table (JSON)
        #[arg(long, env = "RECEITA_PICTOGRAMS")]
        pictograms: Option<PathBuf>,
        /// Instructional video keyword table (JSON)
        #[arg(long, env = "RECEITA_VIDEOS")]
        videos: Option<PathBuf>,
    },
    /// Print the prescription category of each file
    Classify {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the text-to-speech script for all files
    Narrate {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// List the line filter rules in application order
    Rules,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            files,
            json,
            pictograms,
            videos,
        } => {
            let lookup = Lookup::load(pictograms.as_deref(), videos.as_deref())?;
            let docs = process_files(&files)?;
            let report = Report::build(&files, &docs, &lookup);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                report.print();
            }
            Ok(())
        }
        Commands::Classify { files } => {
            let docs = process_files(&files)?;
            for (path, doc) in files.iter().zip(&docs) {
                println!("{:<16} {}", doc.kind, path.display());
            }
            Ok(())
        }
        Commands::Narrate { files } => {
            let docs = process_files(&files)?;
            let records: Vec<&MedicationRecord> =
                docs.iter().flat_map(|d| &d.medications).collect();
            println!("{}", output::narration::narrate(records));
            Ok(())
        }
        Commands::Rules => {
            for (i, rule) in RULES.iter().enumerate() {
                println!("{:>2} {:<9} {:<24} {}", i + 1, format!("{:?}", rule.action), rule.name, rule.re);
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        info!("done in {}", format_duration(elapsed));
    }

    result
}

fn read_pages(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(text.split(PAGE_SEPARATOR).map(String::from).collect())
}

/// Documents are independent, so they run in parallel; results keep input order.
fn process_files(files: &[PathBuf]) -> Result<Vec<Prescription>> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")?
            .progress_chars("#>-"),
    );

    let docs = files
        .par_iter()
        .map(|path| {
            let pages = read_pages(path)?;
            let doc = parser::process_document(&pages);
            if doc.medications.is_empty() {
                warn!(file = %path.display(), "no medications found");
            } else {
                info!(
                    file = %path.display(),
                    kind = %doc.kind,
                    pages = doc.pages,
                    medications = doc.medications.len(),
                    "processed"
                );
            }
            pb.inc(1);
            Ok(doc)
        })
        .collect::<Result<Vec<_>>>();

    pb.finish_and_clear();
    docs
}

#[derive(Serialize)]
struct FileSummary {
    path: String,
    kind: parser::kind::PrescriptionType,
    pages: usize,
    medications: usize,
}

#[derive(Serialize)]
struct Report {
    generated_at: DateTime<Utc>,
    files: Vec<FileSummary>,
    medications: Vec<output::Enriched>,
    narration: String,
    interaction_names: Option<Vec<String>>,
}

impl Report {
    fn build(files: &[PathBuf], docs: &[Prescription], lookup: &Lookup) -> Self {
        let records: Vec<MedicationRecord> = docs
            .iter()
            .flat_map(|d| d.medications.iter().cloned())
            .collect();

        Report {
            generated_at: Utc::now(),
            files: files
                .iter()
                .zip(docs)
                .map(|(path, doc)| FileSummary {
                    path: path.display().to_string(),
                    kind: doc.kind,
                    pages: doc.pages,
                    medications: doc.medications.len(),
                })
                .collect(),
            medications: output::enrich(&records, lookup),
            narration: output::narration::narrate(&records),
            interaction_names: output::interaction_names(&records),
        }
    }

    fn print(&self) {
        for f in &self.files {
            println!(
                "{} [{}] {} page(s), {} medication(s)",
                f.path, f.kind, f.pages, f.medications
            );
        }
        if self.medications.is_empty() {
            println!("No medications found.");
            return;
        }

        println!();
        println!(
            "{:>3} | {:<2} | {:<28} | {:<40} | {:<12} | {:<10} | {:<7}",
            "#", "", "Medication", "Instructions", "Hint", "Pattern", "Color"
        );
        println!("{}", "-".repeat(120));

        for (i, m) in self.medications.iter().enumerate() {
            println!(
                "{:>3} | {:<2} | {:<28} | {:<40} | {:<12} | {:<10} | {:<7}",
                i + 1,
                m.emoji,
                truncate(&m.record.name, 28),
                truncate(&m.record.instructions, 40),
                m.hint.label,
                m.swatch.pattern,
                m.swatch.hex()
            );
        }

        let with_notes: Vec<_> = self
            .medications
            .iter()
            .filter(|m| !m.record.recommendations.is_empty())
            .collect();
        if !with_notes.is_empty() {
            println!("\n--- Recommendations ---");
            for m in &with_notes {
                println!("  {}: {}", truncate(&m.record.name, 28), m.record.recommendations);
            }
        }

        if let Some(names) = &self.interaction_names {
            println!("\nInteraction check: {}", names.join(", "));
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
