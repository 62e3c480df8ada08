use std::path::Path;

use clap::Args as ClapArgs;
use inquire::{Confirm, Select, Text};
use miette::{IntoDiagnostic as _, Result};

use crate::analysis::AnalysisBackend;
use crate::analysis::analyze_content;
use crate::analysis::gemini::GeminiBackend;
use crate::global::Config;
use crate::input::{FileMetadata, ScanKind};
use crate::report;
use crate::session::Session;

const TAB_URL: &str = "URL";
const TAB_TEXT: &str = "Text / SMS";
const TAB_FILE: &str = "File metadata";
const TAB_QUIT: &str = "Quit";

#[derive(ClapArgs)]
pub struct Args {}

pub fn run(_args: Args, config: &Config) -> Result<()> {
    let api_key = config.backend.resolve_api_key()?;
    let backend = GeminiBackend::new(&config.backend, api_key);

    run_loop(&backend)
}

fn run_loop(backend: &dyn AnalysisBackend) -> Result<()> {
    let mut session = Session::new();

    loop {
        let choice = Select::new(
            "What do you want to check?",
            vec![TAB_URL, TAB_TEXT, TAB_FILE, TAB_QUIT],
        )
        .prompt()
        .into_diagnostic()?;

        let tab = match choice {
            TAB_URL => ScanKind::Url,
            TAB_TEXT => ScanKind::Text,
            TAB_FILE => ScanKind::File,
            _ => return Ok(()),
        };

        session.select_tab(tab);
        collect_input(&mut session, tab)?;

        if !session.can_scan() {
            println!("Nothing to scan.");
            session.reset();
            continue;
        }

        let Some((token, input)) = session.begin_scan() else {
            continue;
        };

        println!("Running security scan...");
        let result = analyze_content(backend, &input);

        if !session.finish_scan(token, result) {
            session.reset();
            continue;
        }

        if let Some(analysis) = session.analysis() {
            report::render(analysis);
        }

        if let Some(conversation) = session.conversation_mut() {
            super::chat_loop(backend, conversation)?;
        }

        let again = Confirm::new("Start a new scan?")
            .with_default(true)
            .prompt()
            .into_diagnostic()?;

        if !again {
            return Ok(());
        }

        session.reset();
    }
}

fn collect_input(session: &mut Session, tab: ScanKind) -> Result<()> {
    match tab {
        ScanKind::Url => {
            let value = Text::new("Target URL:")
                .with_placeholder("https://example.com/login")
                .prompt()
                .into_diagnostic()?;
            session.set_draft(value.trim());
        }
        ScanKind::Text => {
            let value = Text::new("Paste the email or SMS content:")
                .prompt()
                .into_diagnostic()?;
            session.set_draft(value.trim());
        }
        ScanKind::File => {
            let value = Text::new("Path to the file:")
                .with_help_message("only name, type and size are sent, never the contents")
                .prompt()
                .into_diagnostic()?;

            match FileMetadata::from_path(Path::new(value.trim())) {
                Ok(metadata) => session.set_file(metadata),
                Err(error) => eprintln!("{error}"),
            }
        }
    }

    Ok(())
}
