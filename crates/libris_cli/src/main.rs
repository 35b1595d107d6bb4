//! Interactive console front end for the libris catalog.
//!
//! # Responsibility
//! - Drive the menu loop and input prompting over `libris_core`.
//! - Keep all catalog and persistence logic inside the core crate.
//!
//! # Invariants
//! - Input validation (numeric retry, category case, ISBN shape) happens
//!   here, before anything reaches the catalog.
//! - The catalog is loaded once at startup and saved on exit; a save
//!   failure is reported but does not lose the running session.

use chrono::Local;
use libris_core::{
    default_log_level, init_logging, is_plausible_isbn, normalize_category, Book, LibraryService,
};
use log::{info, warn};
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

const DATA_FILE_ENV: &str = "LIBRIS_DATA_FILE";
const DEFAULT_DATA_FILE: &str = "library.csv";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let data_path = data_path();

    // Logging is best-effort: a read-only working directory should not
    // prevent the catalog from running.
    let log_dir = data_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"));
    if let Err(err) = init_logging(default_log_level(), &log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }

    // A malformed data file is fatal here: running on top of partially
    // loaded state would silently lose records on the next save.
    let mut session = LibraryService::open(&data_path)?;
    info!(
        "event=session_start module=cli status=ok records={}",
        session.len()
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        print_menu();
        let Some(choice) = prompt(&mut input, "Your choice: ")? else {
            break;
        };

        match choice.as_str() {
            "1" => add_book_flow(&mut input, &mut session)?,
            "2" => list_books_flow(&session),
            "3" => search_flow(&mut input, &session)?,
            "4" => borrow_flow(&mut input, &mut session)?,
            "5" => return_flow(&mut input, &mut session)?,
            "6" => break,
            other => {
                println!("Invalid choice `{other}`. Please enter 1-6.");
                warn!("event=menu_choice module=cli status=error choice={other}");
            }
        }
    }

    match session.save() {
        Ok(()) => println!("Catalog saved to {}.", session.data_path().display()),
        Err(err) => {
            // The session stays usable in memory; report and move on.
            eprintln!("warning: could not save catalog: {err}");
        }
    }
    info!("event=session_end module=cli status=ok records={}", session.len());
    println!("Goodbye!");
    Ok(())
}

fn data_path() -> PathBuf {
    std::env::var_os(DATA_FILE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
}

fn print_menu() {
    println!();
    println!("******************************");
    println!("   LIBRIS LIBRARY CATALOG");
    println!("******************************");
    println!("1) Add a book");
    println!("2) List all books");
    println!("3) Search by title");
    println!("4) Borrow a book");
    println!("5) Return a book");
    println!("6) Save and exit");
    println!("******************************");
}

fn add_book_flow(input: &mut impl BufRead, session: &mut LibraryService) -> io::Result<()> {
    println!();
    println!("Add a book");
    let Some(title) = prompt(input, "Title: ")? else {
        return Ok(());
    };
    let Some(author) = prompt(input, "Author: ")? else {
        return Ok(());
    };
    let Some(year) = ask_positive_int(input, "Publication year: ")? else {
        return Ok(());
    };
    let Some(isbn) = ask_isbn(input)? else {
        return Ok(());
    };
    let Some(category) = prompt(input, "Category: ")? else {
        return Ok(());
    };

    let book = session.add_book(title, author, year, isbn, normalize_category(&category));
    println!("Added: {}", render_book(&book));
    Ok(())
}

fn list_books_flow(session: &LibraryService) {
    println!();
    println!("Catalog");
    let all = session.get_all();
    if all.is_empty() {
        println!("No books yet.");
        return;
    }
    for book in &all {
        println!(" - {}", render_book(book));
    }
}

fn search_flow(input: &mut impl BufRead, session: &LibraryService) -> io::Result<()> {
    println!();
    println!("Search by title");
    let Some(query) = prompt(input, "Search for: ")? else {
        return Ok(());
    };
    let found = session.search_by_title(&query);
    if found.is_empty() {
        println!("No matches.");
    } else {
        println!("Matches:");
        for book in &found {
            println!(" - {}", render_book(book));
        }
    }
    Ok(())
}

fn borrow_flow(input: &mut impl BufRead, session: &mut LibraryService) -> io::Result<()> {
    println!();
    println!("Borrow a book");
    let Some(id) = ask_positive_int(input, "Book ID: ")? else {
        return Ok(());
    };
    let id = id as u32;

    let Some(book) = session.get_by_id(id) else {
        println!("No book with ID {id}.");
        return Ok(());
    };
    if book.is_borrowed() {
        println!("That book is already out on loan.");
        return Ok(());
    }

    let Some(borrower) = prompt(input, "Borrower name: ")? else {
        return Ok(());
    };
    let today = Local::now().date_naive();
    if session.borrow_book(id, &borrower, today) {
        println!("Borrowed: {}", book.title);
    } else {
        println!("That book is already out on loan.");
    }
    Ok(())
}

fn return_flow(input: &mut impl BufRead, session: &mut LibraryService) -> io::Result<()> {
    println!();
    println!("Return a book");
    let Some(id) = ask_positive_int(input, "Book ID: ")? else {
        return Ok(());
    };
    let id = id as u32;

    let Some(book) = session.get_by_id(id) else {
        println!("No book with ID {id}.");
        return Ok(());
    };
    if session.return_book(id) {
        println!("Returned: {}", book.title);
    } else {
        println!("That book is already on the shelf.");
    }
    Ok(())
}

/// Prints `label`, reads one trimmed line. `None` means end of input.
fn prompt(input: &mut impl BufRead, label: &str) -> io::Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Re-prompts until the user enters a positive integer.
fn ask_positive_int(input: &mut impl BufRead, label: &str) -> io::Result<Option<i32>> {
    loop {
        let Some(raw) = prompt(input, label)? else {
            return Ok(None);
        };
        match raw.parse::<i32>() {
            Ok(value) if value > 0 => return Ok(Some(value)),
            Ok(_) => println!("Please enter a positive number."),
            Err(_) => println!("Please enter a valid number."),
        }
    }
}

/// Re-prompts until the input looks like an ISBN-10 or ISBN-13.
fn ask_isbn(input: &mut impl BufRead) -> io::Result<Option<String>> {
    loop {
        let Some(raw) = prompt(input, "ISBN: ")? else {
            return Ok(None);
        };
        if is_plausible_isbn(&raw) {
            return Ok(Some(raw));
        }
        println!("That does not look like an ISBN-10 or ISBN-13.");
    }
}

fn render_book(book: &Book) -> String {
    let status = match book.borrower_name() {
        Some(name) => format!("ON LOAN to {name}"),
        None => "AVAILABLE".to_string(),
    };
    format!(
        "#{} | {} - {} ({}) | ISBN: {} | Category: {} | {}",
        book.id, book.title, book.author, book.year, book.isbn, book.category, status
    )
}
