//! Interactive menu dispatcher.
//!
//! # Responsibility
//! - Read one menu choice per interaction and run exactly one operation.
//! - Collect form input with re-prompting on malformed values.
//!
//! # Invariants
//! - No state is retained between interactions besides the library file.
//! - `Exit` and end of input both end the session without an error.

use crate::api;
use crate::render::{write_action, write_list, write_stats, OutputFormat};
use booklog_core::model::book::{MAX_YEAR, MIN_YEAR};
use booklog_core::{BookSearchQuery, Genre, NewBook, SearchField};
use log::debug;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::str::FromStr;

/// One selectable menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Remove,
    Search,
    DisplayAll,
    Statistics,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::Add,
        MenuChoice::Remove,
        MenuChoice::Search,
        MenuChoice::DisplayAll,
        MenuChoice::Statistics,
        MenuChoice::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Add => "Add a book",
            MenuChoice::Remove => "Remove a book",
            MenuChoice::Search => "Search a book",
            MenuChoice::DisplayAll => "Display all books",
            MenuChoice::Statistics => "Display statistics",
            MenuChoice::Exit => "Exit",
        }
    }

    fn log_name(self) -> &'static str {
        match self {
            MenuChoice::Add => "add",
            MenuChoice::Remove => "remove",
            MenuChoice::Search => "search",
            MenuChoice::DisplayAll => "list",
            MenuChoice::Statistics => "stats",
            MenuChoice::Exit => "exit",
        }
    }
}

impl FromStr for MenuChoice {
    type Err = String;

    /// Accepts the 1-based menu number or a keyword.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_ascii_lowercase();
        if let Ok(index) = value.parse::<usize>() {
            return index
                .checked_sub(1)
                .and_then(|i| MenuChoice::ALL.get(i).copied())
                .ok_or_else(|| format!("choose a number between 1 and {}", MenuChoice::ALL.len()));
        }
        match value.as_str() {
            "add" => Ok(MenuChoice::Add),
            "remove" | "delete" => Ok(MenuChoice::Remove),
            "search" | "find" => Ok(MenuChoice::Search),
            "list" | "display" | "all" => Ok(MenuChoice::DisplayAll),
            "stats" | "statistics" => Ok(MenuChoice::Statistics),
            "exit" | "quit" | "q" => Ok(MenuChoice::Exit),
            other => Err(format!("unknown menu choice `{other}`")),
        }
    }
}

/// Whether the session continues after an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Terminal menu session over arbitrary input/output streams.
pub struct Menu<'a, R, W> {
    db_path: &'a Path,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(db_path: &'a Path, input: R, output: W) -> Self {
        Self {
            db_path,
            input,
            output,
        }
    }

    /// Runs interactions until `Exit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Personal Library Manager")?;
        while self.interact()? == Flow::Continue {}
        Ok(())
    }

    /// Reads one choice and runs its operation to completion.
    pub fn interact(&mut self) -> io::Result<Flow> {
        writeln!(self.output)?;
        for (index, choice) in MenuChoice::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", index + 1, choice.label())?;
        }
        let Some(choice) = self.prompt_parsed::<MenuChoice>("Menu")? else {
            return Ok(Flow::Stop);
        };

        debug!(
            "event=menu_choice module=cli status=ok choice={}",
            choice.log_name()
        );
        self.dispatch(choice)
    }

    fn dispatch(&mut self, choice: MenuChoice) -> io::Result<Flow> {
        match choice {
            MenuChoice::Add => self.add_form(),
            MenuChoice::Remove => self.remove_form(),
            MenuChoice::Search => self.search_form(),
            MenuChoice::DisplayAll => {
                let response = api::list_all(self.db_path);
                write_list(&mut self.output, &response, OutputFormat::Text)?;
                Ok(Flow::Continue)
            }
            MenuChoice::Statistics => {
                let response = api::statistics(self.db_path);
                write_stats(&mut self.output, &response, OutputFormat::Text)?;
                Ok(Flow::Continue)
            }
            MenuChoice::Exit => {
                writeln!(self.output, "Goodbye")?;
                Ok(Flow::Stop)
            }
        }
    }

    fn add_form(&mut self) -> io::Result<Flow> {
        let Some(title) = self.prompt_text("Enter the book title")? else {
            return Ok(Flow::Stop);
        };
        let Some(author) = self.prompt_text("Enter the book author")? else {
            return Ok(Flow::Stop);
        };
        let Some(year) = self.prompt_year()? else {
            return Ok(Flow::Stop);
        };
        let Some(genre) = self.prompt_genre()? else {
            return Ok(Flow::Stop);
        };
        let Some(read_status) = self.prompt_yes_no("Have you read this book? (yes/no)")? else {
            return Ok(Flow::Stop);
        };

        let book = NewBook::new(title, author, year, genre, read_status);
        let response = api::add_book(self.db_path, &book);
        write_action(&mut self.output, &response, OutputFormat::Text)?;
        Ok(Flow::Continue)
    }

    fn remove_form(&mut self) -> io::Result<Flow> {
        let Some(title) = self.prompt_text("Enter the title of the book you want to remove")?
        else {
            return Ok(Flow::Stop);
        };
        let response = api::remove_book(self.db_path, &title);
        write_action(&mut self.output, &response, OutputFormat::Text)?;
        Ok(Flow::Continue)
    }

    fn search_form(&mut self) -> io::Result<Flow> {
        let Some(field) = self.prompt_parsed::<SearchField>("Search by (title/author)")? else {
            return Ok(Flow::Stop);
        };
        let label = match field {
            SearchField::Title => "Enter book title",
            SearchField::Author => "Enter the author",
        };
        let Some(value) = self.prompt_line(label)? else {
            return Ok(Flow::Stop);
        };
        let response = api::search(self.db_path, &BookSearchQuery::new(field, value));
        write_list(&mut self.output, &response, OutputFormat::Text)?;
        Ok(Flow::Continue)
    }

    fn prompt_year(&mut self) -> io::Result<Option<i32>> {
        loop {
            let Some(year) = self.prompt_parsed::<i32>("Enter the year")? else {
                return Ok(None);
            };
            if (MIN_YEAR..=MAX_YEAR).contains(&year) {
                return Ok(Some(year));
            }
            writeln!(
                self.output,
                "Year must be between {MIN_YEAR} and {MAX_YEAR}"
            )?;
        }
    }

    fn prompt_genre(&mut self) -> io::Result<Option<Genre>> {
        let options = Genre::ALL
            .iter()
            .enumerate()
            .map(|(index, genre)| format!("{}. {genre}", index + 1))
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(self.output, "{options}")?;
        loop {
            let Some(raw) = self.prompt_line("Select the genre")? else {
                return Ok(None);
            };
            let by_number = raw
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| Genre::ALL.get(i).copied());
            match by_number.map(Ok).unwrap_or_else(|| raw.parse::<Genre>()) {
                Ok(genre) => return Ok(Some(genre)),
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    fn prompt_yes_no(&mut self, label: &str) -> io::Result<Option<bool>> {
        loop {
            let Some(raw) = self.prompt_line(label)? else {
                return Ok(None);
            };
            match raw.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(Some(true)),
                "n" | "no" => return Ok(Some(false)),
                _ => writeln!(self.output, "Please answer yes or no")?,
            }
        }
    }

    /// Prompts until a non-blank value is entered; the value is trimmed.
    fn prompt_text(&mut self, label: &str) -> io::Result<Option<String>> {
        loop {
            let Some(raw) = self.prompt_line(label)? else {
                return Ok(None);
            };
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_string()));
            }
            writeln!(self.output, "A value is required")?;
        }
    }

    fn prompt_parsed<T>(&mut self, label: &str) -> io::Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        loop {
            let Some(raw) = self.prompt_line(label)? else {
                return Ok(None);
            };
            match raw.trim().parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    /// Returns the line without its terminator, or `None` at end of input.
    fn prompt_line(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim_end_matches(['\n', '\r']).to_string();
        Ok(Some(line))
    }
}
