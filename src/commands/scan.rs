use std::path::PathBuf;

use clap::{ArgGroup, Args as ClapArgs};
use miette::{IntoDiagnostic as _, Result};

use crate::analysis::analyze_content;
use crate::analysis::gemini::GeminiBackend;
use crate::chat::Conversation;
use crate::global::Config;
use crate::input::{FileMetadata, ScanInput};
use crate::report;

#[derive(ClapArgs)]
#[command(group(ArgGroup::new("target").required(true).args(["url", "text", "file"])))]
pub struct Args {
    /// URL to scan
    #[arg(long)]
    pub url: Option<String>,

    /// Email or SMS text content to scan
    #[arg(long)]
    pub text: Option<String>,

    /// File whose metadata (name, type, size) should be scanned; file
    /// contents are never read or uploaded
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Print the raw analysis result as JSON instead of the rendered report
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Open the follow-up assistant chat after the scan
    #[arg(long, default_value_t = false)]
    pub chat: bool,
}

pub fn run(args: Args, config: &Config) -> Result<()> {
    let api_key = config.backend.resolve_api_key()?;
    let backend = GeminiBackend::new(&config.backend, api_key);

    let input = build_input(&args)?;

    println!("Running security scan...");
    let result = analyze_content(&backend, &input);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).into_diagnostic()?
        );
    } else {
        report::render(&result);
    }

    if args.chat {
        let mut conversation = Conversation::start(&result);
        super::chat_loop(&backend, &mut conversation)?;
    }

    Ok(())
}

fn build_input(args: &Args) -> Result<ScanInput> {
    if let Some(url) = &args.url {
        Ok(ScanInput::Url(url.clone()))
    } else if let Some(text) = &args.text {
        Ok(ScanInput::Text(text.clone()))
    } else if let Some(path) = &args.file {
        Ok(ScanInput::FileRef(FileMetadata::from_path(path)?))
    } else {
        // unreachable through clap, the target group is required
        Err(miette::miette!("no scan target provided"))
    }
}
