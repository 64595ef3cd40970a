//! CLI interface for the skill matcher

use clap::{Parser, Subcommand};
use reqwest::Url;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skill-matcher")]
#[command(about = "Extract candidate skills and match them against job requirements")]
#[command(long_about = "Score candidates against job requirements using declared skills, skills extracted from CV documents, and ranked job recommendations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format: console, json (defaults to the configured format)
    #[arg(short, long, global = true)]
    pub output: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match a candidate against one job's requirements
    Match {
        /// Declared candidate skills, comma separated
        #[arg(short, long, value_delimiter = ',')]
        skills: Vec<String>,

        /// Job requirements, comma separated
        #[arg(short, long, value_delimiter = ',', required = true)]
        requirements: Vec<String>,

        /// CV document locator (http(s):// or file:// URL)
        #[arg(short, long)]
        document: Option<String>,
    },

    /// List the skills found in a document
    Extract {
        /// Document locator (http(s):// or file:// URL)
        #[arg(short, long)]
        document: String,
    },

    /// Rank jobs from a JSON file by match percentage
    Recommend {
        /// JSON array of jobs: [{"id", "title", "company"?, "requirements": [...]}]
        #[arg(short, long)]
        jobs: PathBuf,

        /// Declared candidate skills, comma separated
        #[arg(short, long, value_delimiter = ',')]
        skills: Vec<String>,

        /// CV document locator (http(s):// or file:// URL)
        #[arg(short, long)]
        document: Option<String>,

        /// Maximum number of jobs to return
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// List the recognised skill vocabulary
    Vocabulary,

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        _ => Err(format!("Invalid output format: {}. Supported: console, json", format)),
    }
}

/// Turn a plain filesystem path into a percent-encoded `file://` locator; URLs pass through unchanged
pub fn normalize_locator(locator: &str) -> String {
    if locator.contains("://") {
        return locator.to_string();
    }

    let path = PathBuf::from(locator);
    let absolute = if path.is_absolute() {
        path
    } else {
        std::env::current_dir().map(|dir| dir.join(&path)).unwrap_or(path)
    };
    Url::from_file_path(&absolute)
        .map(|url| url.to_string())
        .unwrap_or_else(|_| format!("file://{}", absolute.display()))
}
