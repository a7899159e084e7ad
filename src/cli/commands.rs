use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use crate::api::{AnalysisFlow, AnalysisRequest, HttpAnalysisClient, SUBMISSION_FAILED_MESSAGE};
use crate::clipboard::copy_negotiation_email;
use crate::filters::{FilterExpr, parse_filter};
use crate::history::HistoryStore;
use crate::models::{AnalysisResult, HistoryEntry};
use crate::report::{format_fallback, format_history, format_report};
use crate::storage::FileStore;
use crate::utils::{request_timeout, resolve_api_url, resolve_data_dir};

#[derive(Parser)]
#[command(name = "contractiq")]
#[command(version)]
#[command(about = "Check contracts against your expectations and browse past reports", long_about = None)]
pub struct Cli {
    /// Directory holding the analysis history (default: $CONTRACTIQ_DATA_DIR or the platform
    /// data directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Base url of the analysis service (default: $CONTRACTIQ_API_URL or http://localhost:8000)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a contract for analysis and record the report
    Analyze {
        /// Contract document to upload
        file: PathBuf,

        /// What you expect from the contract (payment terms, liability, ...)
        #[arg(long, short = 'e', value_name = "TEXT", conflicts_with = "expect_file")]
        expect: Option<String>,

        /// Read the expectations from a file
        #[arg(long, value_name = "PATH")]
        expect_file: Option<PathBuf>,
    },
    /// List past analyses, newest first
    History {
        /// Print the entries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stored report
    Show {
        /// History entry id, as printed by `history`
        id: String,

        /// Risk filter, e.g. `severity:critical severity:high category:payment`
        #[arg(long, short = 'f')]
        filter: Option<String>,

        /// Only risks whose finding or category contains this text
        #[arg(long, short = 's')]
        search: Option<String>,
    },
    /// Remove one analysis from history
    Delete {
        /// History entry id
        id: String,
    },
    /// Remove every analysis from history
    Clear {
        /// Do not ask for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Copy a report's negotiation email to the clipboard
    CopyEmail {
        /// History entry id
        id: String,
    },
    /// Browse history interactively
    Browse,
}

pub fn run() -> Result<()> {
    run_with(Cli::parse())
}

pub fn run_with(cli: Cli) -> Result<()> {
    let data_dir = cli.data_dir.as_deref();

    match cli.command {
        Some(Commands::Analyze { file, expect, expect_file }) => {
            let expectations = read_expectations(expect, expect_file.as_deref())?;
            analyze(&file, expectations, data_dir, cli.api_url.as_deref())?;
        }
        Some(Commands::History { json }) => list_history(data_dir, json)?,
        Some(Commands::Show { id, filter, search }) => {
            show(data_dir, &id, filter.as_deref(), search.as_deref().unwrap_or(""))?;
        }
        Some(Commands::Delete { id }) => {
            let mut store = open_store(data_dir)?;
            if !store.delete_one(&id)? {
                bail!("No analysis with id {}", id);
            }
            println!("Deleted {}", id);
        }
        Some(Commands::Clear { yes }) => clear(data_dir, yes)?,
        Some(Commands::CopyEmail { id }) => {
            let store = open_store(data_dir)?;
            let (_, result) = load_report(&store, &id)?;
            let Some(result) = result else {
                bail!("Only the summary of analysis {} was saved; there is no email to copy", id);
            };
            copy_negotiation_email(&result)?;
            println!("Negotiation email copied to clipboard");
        }
        Some(Commands::Browse) => crate::tui::run_interactive(open_store(data_dir)?)?,
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn open_store(data_dir: Option<&Path>) -> Result<HistoryStore<FileStore>> {
    let dir = resolve_data_dir(data_dir)?;
    let backend = FileStore::open(&dir)?;
    Ok(HistoryStore::new(backend))
}

fn read_expectations(expect: Option<String>, expect_file: Option<&Path>) -> Result<String> {
    match (expect, expect_file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read expectations: {}", path.display())),
        (None, None) => bail!("Describe your expectations with --expect or --expect-file"),
    }
}

fn analyze(
    file: &Path,
    expectations: String,
    data_dir: Option<&Path>,
    api_url: Option<&str>,
) -> Result<()> {
    let request = AnalysisRequest::from_path(file, expectations)?;
    request.validate()?;
    let file_name = request.file_name.clone();

    let client = HttpAnalysisClient::new(&resolve_api_url(api_url), request_timeout()?)?;
    let mut flow = AnalysisFlow::with_draft(request);
    let result = flow.submit(&client).context(SUBMISSION_FAILED_MESSAGE)?.clone();

    print!("{}", format_report(&result, &FilterExpr::new(), ""));

    // The report is already on screen; a history failure only costs the saved copy
    match open_store(data_dir).and_then(|mut store| store.record_analysis(&file_name, &result)) {
        Ok(id) => {
            info!(%id, file = %file_name, "analysis recorded");
            println!();
            println!("Saved to history as {}", id);
        }
        Err(e) => warn!(error = %format!("{:#}", e), "failed to record analysis in history"),
    }

    Ok(())
}

fn list_history(data_dir: Option<&Path>, json: bool) -> Result<()> {
    let entries = open_store(data_dir)?.list()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print!("{}", format_history(&entries));
    }
    Ok(())
}

fn load_report(
    store: &HistoryStore<FileStore>,
    id: &str,
) -> Result<(HistoryEntry, Option<AnalysisResult>)> {
    let Some(entry) = store.get(id)? else {
        bail!("No analysis with id {}", id);
    };
    let result = store.load_full(id)?;
    Ok((entry, result))
}

fn show(data_dir: Option<&Path>, id: &str, filter: Option<&str>, search: &str) -> Result<()> {
    let filter = match filter {
        Some(text) => parse_filter(text)?,
        None => FilterExpr::new(),
    };

    let store = open_store(data_dir)?;
    match load_report(&store, id)? {
        (_, Some(result)) => print!("{}", format_report(&result, &filter, search)),
        (entry, None) => print!("{}", format_fallback(&entry)),
    }
    Ok(())
}

fn clear(data_dir: Option<&Path>, yes: bool) -> Result<()> {
    let mut store = open_store(data_dir)?;
    let count = store.list()?.len();

    if !yes && !confirm(&format!("Delete all {} analyses? [y/N] ", count))? {
        println!("Cancelled");
        return Ok(());
    }

    store.clear_all()?;
    println!("History cleared");
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
