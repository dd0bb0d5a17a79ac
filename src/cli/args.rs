use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::engine::EngineKind;
use crate::glossary::TermKind;

#[derive(Parser, Debug)]
#[command(name = "doctl")]
#[command(about = "Translate Word documents while keeping their formatting")]
#[command(version)]
pub struct Args {
    /// Word document (.docx) to translate
    pub input: Option<PathBuf>,

    /// Output path (defaults to <name>_Translated.docx next to the input)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Translation engine
    #[arg(short = 'e', long, value_enum)]
    pub engine: Option<EngineKind>,

    /// DeepL API key (overrides config and environment)
    #[arg(short = 'k', long)]
    pub key: Option<String>,

    /// Source language code (ISO 639-1, e.g., tr)
    #[arg(short = 'f', long = "from")]
    pub from: Option<String>,

    /// Target language code (ISO 639-1, e.g., en)
    #[arg(short = 't', long = "to")]
    pub to: Option<String>,

    /// Glossary category to apply
    #[arg(short = 'c', long)]
    pub category: Option<String>,

    /// Glossary database path
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Suppress progress and status output
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage glossary terms
    Glossary {
        #[command(subcommand)]
        command: Option<GlossaryCommand>,
    },
    /// List translation engines and their settings
    Engines,
    /// List supported language codes
    Languages,
    /// Configure doctl defaults
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum GlossaryCommand {
    /// List glossary terms
    List {
        /// Only show terms from this category
        #[arg(short = 'c', long)]
        category: Option<String>,

        /// Only show terms of this type
        #[arg(short = 'k', long, value_enum)]
        kind: Option<TermKind>,
    },
    /// Add or update a term
    Add {
        /// Term as it appears in source documents
        source: String,

        /// Fixed translation (makes the term forced)
        #[arg(short = 't', long)]
        target: Option<String>,

        /// Term type (inferred from --target when omitted)
        #[arg(short = 'k', long, value_enum)]
        kind: Option<TermKind>,

        /// Category to store the term in
        #[arg(short = 'c', long)]
        category: Option<String>,
    },
    /// Remove a term
    Remove {
        /// Term to remove
        source: String,

        /// Category the term belongs to
        #[arg(short = 'c', long)]
        category: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// List categories with term counts
    Categories,
}
