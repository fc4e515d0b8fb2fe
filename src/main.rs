use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use doccat::ScanMode;
use doccat::cli::{render_document, render_stats, render_tree, status_line};
use doccat::core::catalog::find_document;
use doccat::core::config::{self, ResolvedConfig};
use doccat::core::{CatalogHandle, CatalogState, FsSource};
use serde::Serialize;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "doccat", about = "Browse a directory of Markdown documentation")]
struct Args {
    /// Resource directory to scan
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// How subdirectories are treated
    #[arg(short, long, value_enum)]
    mode: Option<ScanMode>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the category tree
    Tree,
    /// Print document and category counts
    Stats,
    /// Print the categories and documents matching a query
    Search { query: String },
    /// Print one document's outline and content
    Show { file_name: String },
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to doccat.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("doccat.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        eprintln!("warning: {e}; using defaults");
        config::DoccatConfig::default()
    });
    let resolved = config::resolve(&file_config, args.dir.as_deref(), args.mode);
    log::info!("doccat starting: {:?}", resolved);

    run(&args, &resolved).await
}

async fn run(args: &Args, resolved: &ResolvedConfig) -> io::Result<()> {
    let handle = CatalogHandle::spawn(Arc::new(FsSource::new()), resolved.scan_options());
    let state = handle.reload_and_wait().await;

    if let Some(error) = &state.error_message {
        fail(error);
    }

    match &args.command {
        Command::Tree => emit(args.json, state.root_categories.as_slice(), || {
            status_line(&state)
                .map(|line| format!("{line}\n"))
                .unwrap_or_else(|| render_tree(&state.root_categories))
        }),
        Command::Stats => {
            let stats = state.statistics();
            emit(args.json, &stats, || render_stats(&stats))
        }
        Command::Search { query } => {
            let filtered = state.filtered_categories(query);
            emit(args.json, filtered.as_ref(), || {
                if filtered.is_empty() {
                    format!("No documents match \"{query}\"\n")
                } else {
                    render_tree(&filtered)
                }
            })
        }
        Command::Show { file_name } => show(args.json, &handle, &state, file_name).await,
    }
}

async fn show(
    json: bool,
    handle: &CatalogHandle,
    state: &CatalogState,
    file_name: &str,
) -> io::Result<()> {
    let Some(document) = find_document(&state.root_categories, file_name) else {
        fail(&format!("no document named {file_name}"));
    };
    let content = match handle.open_document(document).await {
        Ok(content) => content,
        Err(e) => fail(&e.to_string()),
    };
    emit(json, &content, || render_document(&content))
}

/// Prints a catalog failure to stderr and exits non-zero.
fn fail(message: &str) -> ! {
    log::error!("{}", message);
    eprintln!("error: {message}");
    process::exit(1)
}

fn emit<T: Serialize + ?Sized>(
    json: bool,
    value: &T,
    text: impl FnOnce() -> String,
) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    if json {
        let out = serde_json::to_string_pretty(value)?;
        writeln!(stdout, "{out}")
    } else {
        write!(stdout, "{}", text())
    }
}
