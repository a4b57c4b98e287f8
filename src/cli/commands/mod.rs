//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod check;
mod digitize;
mod extract;
mod templates;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Config;
use crate::models::FormType;
use crate::validation::ClaimData;

#[derive(Parser)]
#[command(name = "adhikar")]
#[command(about = "Digitize and validate Forest Rights Act claim forms")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print machine-readable JSON instead of a summary
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Recognize scanned claim pages, then extract and validate the form
    Digitize {
        /// Images or PDFs, in page order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        claim: ClaimArgs,
    },

    /// Extract and validate a form from already-recognized text
    Extract {
        /// Text file with the recognized page text
        file: PathBuf,

        #[command(flatten)]
        claim: ClaimArgs,
    },

    /// Show the field templates of the claim forms
    Templates {
        /// Only this form (form-a, form-b, form-c)
        #[arg(long, value_parser = parse_form_type)]
        form: Option<FormType>,
    },

    /// Check recognition tool availability
    Check,
}

/// Claim details entered alongside the scanned form.
#[derive(Args, Debug, Clone, Default)]
pub struct ClaimArgs {
    /// Use this form type instead of the detected one (form-a, form-b, form-c)
    #[arg(long, value_parser = parse_form_type)]
    pub form: Option<FormType>,

    /// Claimed land area in hectares
    #[arg(long)]
    pub area: Option<String>,

    /// Declared date occupation began (repeatable)
    #[arg(long = "occupation-date")]
    pub occupation_dates: Vec<String>,

    /// Comma-separated evidence list (replaces the extracted one)
    #[arg(long)]
    pub evidence: Option<String>,

    /// Claimant is a Forest Dwelling Scheduled Tribe
    #[arg(long)]
    pub scheduled_tribe: bool,

    /// Claimant is an Other Traditional Forest Dweller
    #[arg(long)]
    pub otfd: bool,
}

impl ClaimArgs {
    /// Apply the entered details over the values derived from extraction.
    pub fn apply(&self, mut claim: ClaimData) -> ClaimData {
        if let Some(area) = &self.area {
            claim = claim.with_area(area.clone());
        }
        if !self.occupation_dates.is_empty() {
            claim = claim.with_occupation_dates(self.occupation_dates.iter().cloned());
        }
        if let Some(evidence) = &self.evidence {
            claim = claim.with_evidence_text(evidence);
        }
        if self.scheduled_tribe {
            claim = claim.with_scheduled_tribe(true);
        }
        if self.otfd {
            claim = claim.with_otfd(true);
        }
        claim
    }
}

fn parse_form_type(s: &str) -> Result<FormType, String> {
    FormType::from_str(s).ok_or_else(|| format!("unknown form '{}' (expected form-a, form-b or form-c)", s))
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Digitize { files, claim } => {
            digitize::cmd_digitize(&config, &files, &claim, cli.json).await
        }
        Commands::Extract { file, claim } => {
            extract::cmd_extract(&config, &file, &claim, cli.json).await
        }
        Commands::Templates { form } => templates::cmd_templates(form, cli.json),
        Commands::Check => check::cmd_check(&config).await,
    }
}
