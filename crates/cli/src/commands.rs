// crates/cli/src/commands.rs

use anyhow::{anyhow, bail, Context, Result};
use clap::ArgMatches;
use console::style;
use readlog_catalog::{CatalogHit, DebouncedSearch, GoogleBooksSource};
use readlog_config::{Config, ConfigManager};
use readlog_core::{Book, BookDraft, BookId, BookPatch, BookStatus};
use readlog_network::{Client, ClientConfig};
use readlog_persistence::RestAdapter;
use readlog_store::{BackendVariant, CollectionStore, FailurePolicy, StoreError};
use std::sync::Arc;
use std::time::Duration;

/// Builds the REST-backed store described by `config`
pub fn build_store(config: &Config) -> Result<CollectionStore> {
    let client = Client::with_config(client_config(config.backend.request_timeout_secs))
        .context("Failed to build HTTP client")?;
    let adapter = RestAdapter::with_client(client, &config.backend.base_url);

    let policy = FailurePolicy::for_variant(BackendVariant::Open)
        .with_rollback(config.store.rollback_failed_edits);

    Ok(CollectionStore::open(Arc::new(adapter)).with_policy(policy))
}

/// Builds the store and fetches the collection
pub async fn open_store(config: &Config) -> Result<CollectionStore> {
    let store = build_store(config)?;
    store
        .load()
        .await
        .with_context(|| format!("Failed to load books from {}", config.backend.base_url))?;
    Ok(store)
}

/// List the books in the collection
pub fn list_books(store: &CollectionStore, matches: &ArgMatches) -> Result<()> {
    let books = match matches.get_one::<String>("status") {
        Some(status) => store.by_status(parse_status(status)?),
        None => store.books(),
    };

    if books.is_empty() {
        println!("No books yet. Use 'add' or 'search --add' to collect some.");
        return Ok(());
    }

    println!("\n{} Books", style(books.len()).bold().cyan());
    println!("{}", "=".repeat(80));

    for book in &books {
        print_book_summary(book);
    }

    Ok(())
}

/// Show every field of one book
pub fn show_book(store: &CollectionStore, matches: &ArgMatches) -> Result<()> {
    let id = book_id(matches)?;
    let book = store
        .get(&id)
        .ok_or_else(|| anyhow!("No book with id {}", id))?;

    println!("\n{}", style(&book.title).bold().cyan());
    println!("{}", "=".repeat(80));
    println!("ID:       {}", book.id);
    println!("Author:   {}", or_dash(&book.author));
    println!("Genre:    {}", or_dash(&book.genre));
    println!("Status:   {}", book.status.label());
    if let Some(user) = &book.user_id {
        println!("Owner:    {}", user);
    }
    println!("Added:    {}", book.created_at.to_iso());
    println!("Updated:  {}", book.updated_at.to_iso());
    if !book.image.is_empty() {
        println!("Cover:    {}", book.image);
    }
    if !book.summary.is_empty() {
        println!("\n{}", book.summary);
    }

    Ok(())
}

/// Add a book from command line fields
pub async fn add_book(store: &CollectionStore, matches: &ArgMatches) -> Result<()> {
    let draft = BookDraft::new(
        required(matches, "title")?,
        optional(matches, "author").unwrap_or_default(),
        optional(matches, "genre").unwrap_or_default(),
    )
    .with_status(status_or_default(matches)?);

    let book = store.add(draft).await.map_err(report)?;
    println!("{} Added: {} ({})", style("✓").green().bold(), book.title, book.id);
    Ok(())
}

/// Change one or more fields of a book
pub async fn edit_book(store: &CollectionStore, matches: &ArgMatches) -> Result<()> {
    let id = book_id(matches)?;
    let patch = patch_from_matches(matches)?;
    if patch.is_empty() {
        bail!("Nothing to change; pass at least one of --title, --author, --genre or --status");
    }

    let book = store.edit(&id, patch).await.map_err(report)?;
    println!("{} Updated: {}", style("✓").green().bold(), book.title);
    Ok(())
}

/// Replace a book's summary
pub async fn set_summary(store: &CollectionStore, matches: &ArgMatches) -> Result<()> {
    let id = book_id(matches)?;
    let text = required(matches, "text")?;

    let book = store.set_summary(&id, text).await.map_err(report)?;
    println!("{} Summary saved for {}", style("✓").green().bold(), book.title);
    Ok(())
}

/// Remove a book
pub async fn remove_book(store: &CollectionStore, matches: &ArgMatches) -> Result<()> {
    let id = book_id(matches)?;
    let title = store.get(&id).map(|b| b.title);

    store.remove(&id).await.map_err(report)?;
    println!(
        "{} Removed: {}",
        style("✓").green().bold(),
        title.unwrap_or_else(|| id.to_string())
    );
    Ok(())
}

/// Search the catalog, optionally adding one hit
pub async fn search_catalog(config: &Config, matches: &ArgMatches) -> Result<()> {
    let query = required(matches, "query")?;

    let client = Client::with_config(client_config(config.catalog.request_timeout_secs))
        .context("Failed to build HTTP client")?;
    let source = GoogleBooksSource::with_base_url(client, &config.catalog.base_url);
    let search = DebouncedSearch::new(Arc::new(source))
        .with_delay(Duration::from_millis(config.catalog.debounce_ms))
        .with_limit(config.catalog.max_results);

    let hits = search
        .search(&query)
        .await
        .context("Catalog search failed")?
        .into_results()
        .unwrap_or_default();

    if hits.is_empty() {
        println!("No results for \"{}\"", query);
        return Ok(());
    }

    let Some(index) = matches.get_one::<usize>("add").copied() else {
        print_hits(&hits);
        return Ok(());
    };

    let hit = pick_hit(&hits, index)?;
    let store = open_store(config).await?;
    let book = store
        .add(hit.to_draft(status_or_default(matches)?))
        .await
        .map_err(report)?;

    println!("{} Added: {} ({})", style("✓").green().bold(), book.title, book.id);
    Ok(())
}

/// `config init|show|path`
pub fn config_command(manager: &ConfigManager, config: &Config, matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("init", _)) => {
            if manager.initialize().context("Failed to write config file")? {
                println!(
                    "{} Created {}",
                    style("✓").green().bold(),
                    manager.config_path().display()
                );
            } else {
                println!("Config already exists at {}", manager.config_path().display());
            }
        }
        Some(("show", _)) => print_config(config),
        Some(("path", _)) => println!("{}", manager.config_path().display()),
        _ => bail!("Unknown config command"),
    }
    Ok(())
}

fn client_config(timeout_secs: u64) -> ClientConfig {
    let config = ClientConfig::default();
    if timeout_secs > 0 {
        config.with_timeout(Duration::from_secs(timeout_secs))
    } else {
        config
    }
}

/// Prints what a failed mutation left behind, then hands the error on
fn report(err: StoreError) -> anyhow::Error {
    if let Some(local) = err.local_effect() {
        eprintln!("{} Backend write failed: {}", style("!").yellow().bold(), local);
    }
    anyhow::Error::new(err)
}

fn patch_from_matches(matches: &ArgMatches) -> Result<BookPatch> {
    let mut patch = BookPatch::new();
    if let Some(title) = optional(matches, "title") {
        patch = patch.with_title(title);
    }
    if let Some(author) = optional(matches, "author") {
        patch = patch.with_author(author);
    }
    if let Some(genre) = optional(matches, "genre") {
        patch = patch.with_genre(genre);
    }
    if let Some(status) = matches.get_one::<String>("status") {
        patch = patch.with_status(parse_status(status)?);
    }
    Ok(patch)
}

fn pick_hit(hits: &[CatalogHit], index: usize) -> Result<&CatalogHit> {
    // listed from 1
    index
        .checked_sub(1)
        .and_then(|i| hits.get(i))
        .ok_or_else(|| anyhow!("No result number {}; pick 1 to {}", index, hits.len()))
}

fn book_id(matches: &ArgMatches) -> Result<BookId> {
    Ok(BookId::new(required(matches, "id")?))
}

fn required(matches: &ArgMatches, name: &str) -> Result<String> {
    optional(matches, name).ok_or_else(|| anyhow!("--{} is required", name))
}

fn optional(matches: &ArgMatches, name: &str) -> Option<String> {
    matches.get_one::<String>(name).cloned()
}

fn status_or_default(matches: &ArgMatches) -> Result<BookStatus> {
    match matches.get_one::<String>("status") {
        Some(status) => parse_status(status),
        None => Ok(BookStatus::default()),
    }
}

fn parse_status(s: &str) -> Result<BookStatus> {
    s.parse::<BookStatus>().map_err(|e| anyhow!(e))
}

fn print_book_summary(book: &Book) {
    println!(
        "{:<14} {} {}",
        style(book.status.label()).dim(),
        style(truncate(&book.title, 40)).bold(),
        style(format!("by {}", or_dash(&book.author))).dim()
    );
    println!("{:<14} {}", "", style(book.id.as_str()).cyan());
}

fn print_hits(hits: &[CatalogHit]) {
    println!("\n{} Results", style(hits.len()).bold().cyan());
    println!("{}", "=".repeat(80));

    for (i, hit) in hits.iter().enumerate() {
        println!(
            "{:>3}. {} {} {}",
            i + 1,
            style(truncate(&hit.title, 40)).bold(),
            style(format!("by {}", truncate(&hit.author, 30))).dim(),
            style(format!("[{}]", hit.genre)).dim()
        );
    }

    println!("\nAdd one with: readlog search <query> --add <number>");
}

fn print_config(config: &Config) {
    println!("{}", style("[app]").bold());
    println!("log_level = {}", config.app.log_level);
    println!("{}", style("[backend]").bold());
    println!("base_url = {}", config.backend.base_url);
    println!("request_timeout_secs = {}", config.backend.request_timeout_secs);
    println!("{}", style("[catalog]").bold());
    println!("base_url = {}", config.catalog.base_url);
    println!("max_results = {}", config.catalog.max_results);
    println!("debounce_ms = {}", config.catalog.debounce_ms);
    println!("request_timeout_secs = {}", config.catalog.request_timeout_secs);
    println!("{}", style("[store]").bold());
    println!("rollback_failed_edits = {}", config.store.rollback_failed_edits);
}

fn or_dash(s: &str) -> &str {
    if s.trim().is_empty() {
        "-"
    } else {
        s
    }
}

/// Truncate a string to a maximum character count
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
