//! Command-line front end and entry point.
//!
//! This binary is a thin layer over the library: it resolves configuration,
//! installs tracing, and drives the same list/detail view models and entry
//! editor an interactive front end would use. Results go to stdout; failures
//! print their human-readable message to stderr and exit non-zero.
//!
//! # Commands
//!
//! - `list`: all books in ascending id order
//! - `show <id>`: one book
//! - `add --title --author --year`: create a book
//! - `edit <id> [--title] [--author] [--year]`: update a book, omitted fields
//!   keep their current value
//! - `delete <id>`: delete a book
//!
//! # Global Flags
//!
//! - `--api-base <url>`: service address (overrides file and environment)
//! - `--config <path>`: TOML configuration file
//! - `--trace-level <level>`: log filter for stderr output

#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use url::Url;

use bookshelf::editor::EntryEditor;
use bookshelf::views::{parse_book_id, BookDetailView, CatalogListView, ErrorBanner, ListStatus};
use bookshelf::{
    observability, parse_api_base, Book, BookId, CatalogStore, Config, ConfigError, HttpBookApi,
    SubmitOutcome,
};

/// Manage the catalog of a remote book service.
#[derive(Debug, Parser)]
#[command(name = "bookshelf", version)]
struct Cli {
    /// Base address of the book service.
    #[arg(long, global = true, value_name = "url", value_parser = parse_api_base)]
    api_base: Option<Url>,

    /// Configuration file. Defaults to `$XDG_CONFIG_HOME/bookshelf/config.toml`.
    #[arg(long, global = true, value_name = "path")]
    config: Option<PathBuf>,

    /// Log filter for stderr output, e.g. `debug` or `bookshelf=trace`.
    #[arg(long, global = true, value_name = "level")]
    trace_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every book in id order.
    List,
    /// Show one book.
    Show {
        /// Book id.
        id: String,
    },
    /// Add a book.
    Add(NewBook),
    /// Edit a book. Omitted fields keep their current value.
    Edit {
        /// Book id.
        id: String,
        #[command(flatten)]
        changes: BookChanges,
    },
    /// Delete a book.
    Delete {
        /// Book id.
        #[arg(value_parser = book_id)]
        id: BookId,
    },
}

#[derive(Debug, Args)]
struct NewBook {
    #[arg(long)]
    title: String,
    #[arg(long)]
    author: String,
    #[arg(long, allow_hyphen_values = true)]
    year: String,
}

#[derive(Debug, Args)]
struct BookChanges {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    year: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("bookshelf: {e}");
            return ExitCode::from(2);
        }
    };
    observability::init_tracing(&config);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("bookshelf: failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli.command, &config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("bookshelf: {message}");
            ExitCode::FAILURE
        }
    }
}

/// Layers command-line flags over file and environment configuration.
fn resolve_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(api_base) = &cli.api_base {
        config.api_base = api_base.clone();
    }
    if let Some(level) = &cli.trace_level {
        config.trace_level = Some(level.clone());
    }
    Ok(config)
}

fn book_id(raw: &str) -> Result<BookId, String> {
    parse_book_id(raw).ok_or_else(|| "Invalid book id".to_string())
}

#[tracing::instrument(level = "debug", skip_all)]
async fn run(command: Command, config: &Config) -> Result<(), String> {
    tracing::debug!(command = ?command, api_base = %config.api_base, "running command");

    match command {
        Command::List => list(config).await,
        Command::Show { id } => show(&connect(config)?, &id).await,
        Command::Add(book) => add(connect(config)?, book).await,
        Command::Edit { id, changes } => edit(&connect(config)?, &id, changes).await,
        Command::Delete { id } => delete(connect(config)?, id).await,
    }
}

fn connect(config: &Config) -> Result<HttpBookApi, String> {
    HttpBookApi::from_config(config).map_err(|e| e.to_string())
}

async fn list(config: &Config) -> Result<(), String> {
    let store = bookshelf::initialize(config)
        .await
        .map_err(|e| e.to_string())?;
    let snapshot = store.snapshot();

    let mut view = CatalogListView::new();
    view.sync(&snapshot);
    if let Some(message) = banner_text(&view.banners()) {
        return Err(message);
    }

    match CatalogListView::status(&snapshot) {
        ListStatus::Loading => tracing::debug!("catalog still loading"),
        ListStatus::Empty => println!("No books yet."),
        ListStatus::Rows => {
            for book in CatalogListView::rows(&snapshot) {
                println!("{}", format_row(book));
            }
        }
    }
    Ok(())
}

async fn show(api: &HttpBookApi, raw_id: &str) -> Result<(), String> {
    let mut view = BookDetailView::new(raw_id);
    view.load(api).await;
    if let Some(message) = banner_text(&view.banners()) {
        return Err(message);
    }
    if let Some(book) = view.book() {
        print_book(book);
    }
    Ok(())
}

async fn add(api: HttpBookApi, book: NewBook) -> Result<(), String> {
    let store = CatalogStore::new(api);
    let mut view = CatalogListView::new();
    view.open_create();

    let editor = view.editor_mut();
    editor.set_title(book.title);
    editor.set_author(book.author);
    editor.set_year(book.year);
    log_editor(view.editor());

    let outcome = view.save(&store).await;
    saved_or_message(outcome, view.editor())?;

    warn_on_banners(&view.banners());
    println!("Added. {} book(s) in catalog.", store.snapshot().books.len());
    Ok(())
}

async fn edit(api: &HttpBookApi, raw_id: &str, changes: BookChanges) -> Result<(), String> {
    let mut view = BookDetailView::new(raw_id);
    view.load(api).await;
    if let Some(message) = banner_text(&view.banners()) {
        return Err(message);
    }
    if !view.open_edit() {
        return Err("Failed to load book".to_string());
    }

    let editor = view.editor_mut();
    if let Some(title) = changes.title {
        editor.set_title(title);
    }
    if let Some(author) = changes.author {
        editor.set_author(author);
    }
    if let Some(year) = changes.year {
        editor.set_year(year);
    }
    log_editor(view.editor());

    let outcome = view.save(api).await;
    saved_or_message(outcome, view.editor())?;

    if let Some(message) = banner_text(&view.banners()) {
        return Err(message);
    }
    if let Some(book) = view.book() {
        print_book(book);
    }
    Ok(())
}

async fn delete(api: HttpBookApi, id: BookId) -> Result<(), String> {
    let store = CatalogStore::new(api);
    let mut view = CatalogListView::new();

    if !view.delete(&store, id).await {
        return Err(banner_text(&view.banners()).unwrap_or_else(|| "Failed to delete".to_string()));
    }
    warn_on_banners(&view.banners());
    println!("Deleted book {id}.");
    Ok(())
}

fn log_editor(editor: &EntryEditor) {
    tracing::debug!(
        heading = editor.heading(),
        submit = editor.submit_label(),
        phase = ?editor.phase(),
        "submitting entry editor"
    );
}

/// Maps a submit outcome to the message the editor would show.
fn saved_or_message(outcome: SubmitOutcome, editor: &EntryEditor) -> Result<(), String> {
    match outcome {
        SubmitOutcome::Saved => Ok(()),
        SubmitOutcome::Rejected(err) => Err(err.to_string()),
        SubmitOutcome::Failed(err) => Err(editor
            .error()
            .map_or_else(|| err.to_string(), str::to_string)),
        SubmitOutcome::Ignored => Err("Nothing to submit".to_string()),
    }
}

fn banner_text(banners: &[&ErrorBanner]) -> Option<String> {
    if banners.is_empty() {
        return None;
    }
    let messages: Vec<&str> = banners.iter().map(|banner| banner.message()).collect();
    Some(messages.join("; "))
}

/// Reports a failed follow-up refresh after a mutation that itself succeeded.
fn warn_on_banners(banners: &[&ErrorBanner]) {
    if let Some(message) = banner_text(banners) {
        eprintln!("bookshelf: warning: {message}");
    }
}

fn format_row(book: &Book) -> String {
    format!("{}\t{}\t{}\t{}", book.id, book.title, book.author, book.year)
}

fn print_book(book: &Book) {
    println!("#{} {}", book.id, book.title);
    println!("  author: {}", book.author);
    println!("  year:   {}", book.year);
}
