//! booklog CLI
//!
//! Personal book tracker over a local SQLite file. Without a subcommand it
//! starts the interactive menu; subcommands run a single operation.

mod api;
mod config;
mod menu;
mod render;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use booklog_core::{init_logging, BookSearchQuery, Genre, LogLevel, NewBook, SearchField};
use clap::{Parser, Subcommand};
use log::info;

use crate::config::Settings;
use crate::menu::Menu;
use crate::render::{write_action, write_list, write_stats, OutputFormat};

#[derive(Parser)]
#[command(name = "booklog", version = booklog_core::core_version())]
#[command(about = "Track the books in your personal library", long_about = None)]
struct Cli {
    /// Library database file (default: $BOOKLOG_DB_PATH or ./booklog.sqlite3)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    /// Absolute directory for rolling log files (default: $BOOKLOG_LOG_DIR)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive menu (default)
    Menu,

    /// Create the library file if it does not exist
    Init,

    /// Add a book
    Add {
        title: String,
        author: String,

        /// Publication year (0-2100)
        #[arg(short, long, value_parser = clap::value_parser!(i32).range(0..=2100))]
        year: i32,

        /// Fiction, Non-fiction, Science, Religious, Biography, Fantasy, Mystery or Others
        #[arg(short, long, default_value = "Others")]
        genre: Genre,

        /// Mark the book as already read
        #[arg(short, long)]
        read: bool,
    },

    /// Remove every book with this title (case-insensitive)
    Remove { title: String },

    /// Find books by exact title or author
    Search {
        /// Field to match: title or author
        #[arg(short, long, default_value = "title")]
        by: SearchField,

        value: String,
    },

    /// Display all books
    List,

    /// Display total count and read percentage
    Stats,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = Settings::resolve(cli.db, cli.log_level, cli.log_dir);

    if let Some(log_dir) = settings.log_dir.as_deref() {
        if let Err(err) = init_logging(settings.log_level, log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    match run(cli.command.unwrap_or(Commands::Menu), &settings, format) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Runs one command; `Ok(false)` means the operation reported failure.
fn run(command: Commands, settings: &Settings, format: OutputFormat) -> io::Result<bool> {
    let db_path = settings.db_path.as_path();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let startup = api::initialize(db_path);
    if !startup.ok {
        write_action(&mut out, &startup, format)?;
        return Ok(false);
    }
    info!("event=cli_start module=cli status=ok");

    let ok = match command {
        Commands::Menu => {
            let stdin = io::stdin();
            Menu::new(db_path, stdin.lock(), &mut out).run()?;
            true
        }
        Commands::Init => {
            write_action(&mut out, &startup, format)?;
            true
        }
        Commands::Add {
            title,
            author,
            year,
            genre,
            read,
        } => {
            let book = NewBook::new(title.trim(), author.trim(), year, genre, read);
            let response = api::add_book(db_path, &book);
            write_action(&mut out, &response, format)?;
            response.ok
        }
        Commands::Remove { title } => {
            let response = api::remove_book(db_path, &title);
            write_action(&mut out, &response, format)?;
            response.ok
        }
        Commands::Search { by, value } => {
            let response = api::search(db_path, &BookSearchQuery::new(by, value));
            write_list(&mut out, &response, format)?;
            response.ok
        }
        Commands::List => {
            let response = api::list_all(db_path);
            write_list(&mut out, &response, format)?;
            response.ok
        }
        Commands::Stats => {
            let response = api::statistics(db_path);
            write_stats(&mut out, &response, format)?;
            response.ok
        }
    };

    out.flush()?;
    Ok(ok)
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands};
    use booklog_core::{Genre, SearchField};
    use clap::Parser;

    #[test]
    fn add_parses_genre_and_read_flag() {
        let cli = Cli::try_parse_from([
            "booklog", "add", "1984", "Orwell", "--year", "1949", "--genre", "fiction", "--read",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Add {
                title,
                year,
                genre,
                read,
                ..
            }) => {
                assert_eq!(title, "1984");
                assert_eq!(year, 1949);
                assert_eq!(genre, Genre::Fiction);
                assert!(read);
            }
            _ => panic!("expected add command"),
        }
    }

    #[test]
    fn add_rejects_year_outside_range() {
        let result =
            Cli::try_parse_from(["booklog", "add", "Future", "Nobody", "--year", "2101"]);
        assert!(result.is_err());
    }

    #[test]
    fn search_defaults_to_title() {
        let cli = Cli::try_parse_from(["booklog", "search", "Dune"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Search { by: SearchField::Title, ref value }) if value == "Dune"
        ));
    }

    #[test]
    fn no_subcommand_means_menu_and_global_flags_parse() {
        let cli = Cli::try_parse_from(["booklog", "--json", "--log-level", "warn"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.json);
        assert_eq!(cli.log_level, Some(booklog_core::LogLevel::Warn));
    }
}
