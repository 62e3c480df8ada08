//! CLI parsing for PhishGuard

use clap::{Parser, Subcommand};

use crate::commands;

#[derive(Parser)]
#[command(name = "phishguard")]
#[command(about = "AI-powered phishing and scam scanner for URLs, messages and files", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a one-shot security scan of a URL, a text snippet or file metadata
    Scan(commands::scan::Args),

    /// Start an interactive scan-and-chat session
    Session(commands::session::Args),

    /// Show the resolved backend configuration and credential status
    Config(commands::config::Args),
}
