//! CLI interface for the applicant matcher

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "applicant-matcher")]
#[command(about = "Search, shortlist and analyze job applicants")]
#[command(long_about = "Rule-based applicant matching: semantic search, job-description shortlists, free-text filters and a canned analytics assistant over an applicant export")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Applicant data file (JSON or CSV); overrides the configured path
    #[arg(short, long, global = true)]
    pub applicants: Option<PathBuf>,

    /// Output format: console, json, markdown
    #[arg(short, long, global = true)]
    pub output: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search applicants by name, skill or a natural-language description
    Search {
        /// Search text; empty lists everyone
        #[arg(default_value = "")]
        query: String,

        /// Restrict to a job category (repeatable)
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Restrict to an experience level (repeatable)
        #[arg(long = "experience")]
        experience_levels: Vec<String>,

        /// Restrict to an employment type (repeatable)
        #[arg(long = "employment")]
        employment_types: Vec<String>,

        /// Restrict to a job id (repeatable)
        #[arg(long = "job")]
        job_ids: Vec<String>,

        /// Show location, skills and dates
        #[arg(short, long)]
        detailed: bool,
    },

    /// Propose candidates for a job description
    Shortlist {
        /// Job description text
        #[arg(required_unless_present = "job_file")]
        description: Option<String>,

        /// Read the job description from a file
        #[arg(short, long)]
        job_file: Option<PathBuf>,

        /// Create a pipeline with the top matches pre-selected
        #[arg(long)]
        create_pipeline: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Turn a free-text request into filter criteria and apply it
    Filter {
        query: String,

        /// Save the criteria as a named custom filter
        #[arg(long)]
        save_as: Option<String>,

        /// Pin the current matches instead of re-running the criteria later
        #[arg(long, requires = "save_as")]
        pin: bool,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Ask the analytics assistant a question
    Ask {
        #[arg(required_unless_present = "suggest")]
        question: Option<String>,

        /// List suggested questions
        #[arg(long)]
        suggest: bool,

        /// Print the answer at once instead of streaming it
        #[arg(long)]
        no_stream: bool,
    },

    /// Show a candidate profile card
    Profile {
        /// Applicant id
        id: String,

        /// Include application responses
        #[arg(short, long)]
        detailed: bool,
    },

    /// Export applicants to CSV
    Export {
        /// Destination file; defaults to a dated name in the current directory
        #[arg(short = 'f', long)]
        file: Option<PathBuf>,

        /// Only export applicants matching this search
        #[arg(long)]
        query: Option<String>,

        /// Only export the members of a pipeline
        #[arg(long, conflicts_with = "query")]
        pipeline: Option<String>,
    },

    /// Map raw application-form submissions into applicant records
    ImportForms {
        /// JSON file with an array of submissions
        input: PathBuf,

        /// Where to write the mapped records (JSON array)
        #[arg(short = 'f', long)]
        file: PathBuf,
    },

    /// Hiring pipeline management
    Pipelines {
        #[command(subcommand)]
        action: PipelineAction,
    },

    /// Saved custom filter management
    Filters {
        #[command(subcommand)]
        action: FilterAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum PipelineAction {
    /// List pipelines
    List,

    /// Show the applicants in a pipeline
    Show { id: String },

    /// Create a pipeline
    Create {
        name: String,

        /// Applicant ids to add
        #[arg(long = "applicant")]
        applicant_ids: Vec<String>,
    },

    /// Rename a pipeline
    Rename { id: String, name: String },

    /// Replace the members of a pipeline
    SetMembers {
        id: String,

        #[arg(long = "applicant")]
        applicant_ids: Vec<String>,
    },

    /// Delete a pipeline
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum FilterAction {
    /// List saved filters, newest first
    List,

    /// Apply a saved filter to the current applicants
    Apply { id: String },

    /// Delete a saved filter
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
