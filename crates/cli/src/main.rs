// crates/cli/src/main.rs

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use readlog_config::ConfigManager;
use std::path::PathBuf;

mod commands;

const STATUSES: [&str; 3] = ["watchlist", "in-progress", "done"];

fn status_arg() -> Arg {
    Arg::new("status")
        .short('s')
        .long("status")
        .value_name("STATUS")
        .help("Reading status")
        .value_parser(STATUSES)
}

fn build_cli() -> Command {
    Command::new("readlog")
        .version(env!("CARGO_PKG_VERSION"))
        .author("DrTomLLC")
        .about("Keep track of the books you read")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.toml")
                .global(true),
        )
        .subcommand(
            Command::new("list")
                .about("List the books in your collection")
                .arg(status_arg().help("Only show books with this status")),
        )
        .subcommand(
            Command::new("show")
                .about("Show every field of one book")
                .arg(Arg::new("id").required(true).value_name("BOOK_ID").help("Book ID")),
        )
        .subcommand(
            Command::new("add")
                .about("Add a book")
                .arg(Arg::new("title").short('t').long("title").value_name("TITLE").required(true).help("Book title"))
                .arg(Arg::new("author").short('a').long("author").value_name("AUTHOR").default_value("").help("Book author"))
                .arg(Arg::new("genre").short('g').long("genre").value_name("GENRE").default_value("").help("Genre"))
                .arg(status_arg().default_value("watchlist")),
        )
        .subcommand(
            Command::new("edit")
                .about("Change fields of a book")
                .arg(Arg::new("id").required(true).value_name("BOOK_ID").help("Book ID"))
                .arg(Arg::new("title").short('t').long("title").value_name("TITLE").help("New title"))
                .arg(Arg::new("author").short('a').long("author").value_name("AUTHOR").help("New author"))
                .arg(Arg::new("genre").short('g').long("genre").value_name("GENRE").help("New genre"))
                .arg(status_arg().help("New status")),
        )
        .subcommand(
            Command::new("summary")
                .about("Set the summary of a book")
                .arg(Arg::new("id").required(true).value_name("BOOK_ID").help("Book ID"))
                .arg(Arg::new("text").required(true).value_name("TEXT").help("Summary text")),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove a book from your collection")
                .arg(Arg::new("id").required(true).value_name("BOOK_ID").help("Book ID")),
        )
        .subcommand(
            Command::new("search")
                .about("Search the book catalog")
                .arg(Arg::new("query").required(true).value_name("QUERY").help("Search terms"))
                .arg(
                    Arg::new("add")
                        .long("add")
                        .value_name("INDEX")
                        .help("Add the result with this number to your collection")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(status_arg().default_value("watchlist").help("Status for an added result")),
        )
        .subcommand(
            Command::new("config")
                .about("Manage the configuration file")
                .subcommand_required(true)
                .subcommand(Command::new("init").about("Write a default config file if none exists"))
                .subcommand(Command::new("show").about("Print the effective configuration"))
                .subcommand(Command::new("path").about("Print the config file location")),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only log errors")
                .action(ArgAction::SetTrue)
                .global(true),
        )
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    let manager = match matches.get_one::<String>("config") {
        Some(dir) => ConfigManager::with_directory(PathBuf::from(dir)),
        None => ConfigManager::new(),
    }
    .context("Failed to locate config directory")?;
    let config = manager
        .load_with_env_overrides()
        .context("Failed to load configuration")?;

    let default_level = if matches.get_flag("quiet") {
        "error".to_string()
    } else {
        config.app.log_level.to_string()
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match matches.subcommand() {
        Some(("config", sub_matches)) => commands::config_command(&manager, &config, sub_matches),
        Some(("search", sub_matches)) => commands::search_catalog(&config, sub_matches).await,
        Some(("list", sub_matches)) => {
            let store = commands::open_store(&config).await?;
            commands::list_books(&store, sub_matches)
        }
        Some(("show", sub_matches)) => {
            let store = commands::open_store(&config).await?;
            commands::show_book(&store, sub_matches)
        }
        Some(("add", sub_matches)) => {
            let store = commands::open_store(&config).await?;
            commands::add_book(&store, sub_matches).await
        }
        Some(("edit", sub_matches)) => {
            let store = commands::open_store(&config).await?;
            commands::edit_book(&store, sub_matches).await
        }
        Some(("summary", sub_matches)) => {
            let store = commands::open_store(&config).await?;
            commands::set_summary(&store, sub_matches).await
        }
        Some(("remove", sub_matches)) => {
            let store = commands::open_store(&config).await?;
            commands::remove_book(&store, sub_matches).await
        }
        _ => {
            build_cli().print_help()?;
            Ok(())
        }
    }
}
