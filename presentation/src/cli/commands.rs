//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use promptlab_domain::Side;
use std::path::PathBuf;

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Two wrapped columns with headers
    SideBySide,
    /// JSON output
    Json,
    /// One section per response
    Plain,
}

/// CLI arguments for promptlab
#[derive(Parser, Debug)]
#[command(name = "promptlab")]
#[command(author, version, about = "Compare prompt-engineering techniques side by side")]
#[command(long_about = r#"
promptlab renders the same question with two prompting techniques
(zero-shot, few-shot, chain-of-thought, role prompting, ...) and sends
both prompts to the same model at the same time, so the answers can be
read side by side.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./promptlab.toml    Project-level config
3. ~/.config/promptlab/config.toml   Global config
4. PROMPTLAB_* environment variables

Example:
  promptlab compare "My EC2 instance is unreachable over SSH"
  promptlab compare -a few-shot -b role-sa -m claude-3.5-sonnet "How should I size RDS?"
  promptlab compare --vs-rag "Why is my Lambda timing out?"
  promptlab ask --rag -t cot "Why is my Lambda timing out?"
  promptlab --dry-run render cot "What is S3?"
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (defaults to the config file, then side-by-side)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Append comparison events to this JSONL file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Use the offline echo backend instead of Bedrock
    #[arg(long, global = true)]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send one query with two techniques and show both answers
    Compare {
        /// The question to ask
        query: String,

        /// Technique for the left column
        #[arg(short = 'a', long = "technique-a", value_name = "TECHNIQUE")]
        technique_a: Option<String>,

        /// Technique for the right column
        #[arg(short = 'b', long = "technique-b", value_name = "TECHNIQUE")]
        technique_b: Option<String>,

        /// Model both prompts are sent to
        #[arg(short, long, value_name = "MODEL")]
        model: Option<String>,

        /// Answer both sides through the configured knowledge base
        #[arg(long)]
        rag: bool,

        /// Side A asks the model directly, side B asks the knowledge base
        #[arg(long, conflicts_with = "rag")]
        vs_rag: bool,

        /// Skip the analysis section
        #[arg(long)]
        no_analysis: bool,
    },

    /// Send one query with a single technique
    Ask {
        /// The question to ask
        query: String,

        /// Technique to render the query with
        #[arg(short, long, value_name = "TECHNIQUE")]
        technique: Option<String>,

        /// Model the prompt is sent to
        #[arg(short, long, value_name = "MODEL")]
        model: Option<String>,

        /// Answer through the configured knowledge base
        #[arg(long)]
        rag: bool,
    },

    /// Print the rendered prompt without calling a backend
    Render {
        /// Technique id
        technique: String,

        /// The question to render
        query: String,
    },

    /// List registered techniques
    Techniques,
}

impl Command {
    /// Whether the command reaches a backend
    pub fn needs_backend(&self) -> bool {
        matches!(self, Command::Compare { .. } | Command::Ask { .. })
    }

    /// Whether `side` answers through the knowledge base.
    ///
    /// `ask` has a single side, reported as [`Side::A`].
    pub fn uses_knowledge_base(&self, side: Side) -> bool {
        match self {
            Command::Compare { rag: true, .. } => true,
            Command::Compare { vs_rag: true, .. } => side == Side::B,
            Command::Ask { rag, .. } => *rag && side == Side::A,
            _ => false,
        }
    }

    /// Whether any side needs the knowledge base
    pub fn wants_rag(&self) -> bool {
        self.uses_knowledge_base(Side::A) || self.uses_knowledge_base(Side::B)
    }
}
