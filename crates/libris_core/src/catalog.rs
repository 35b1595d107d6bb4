//! In-memory book catalog.
//!
//! # Responsibility
//! - Own the ordered collection of books and allocate their identities.
//! - Provide query operations and the borrow/return transitions.
//!
//! # Invariants
//! - Insertion order is listing order; books are never removed.
//! - The next-id counter is monotonically increasing and never reuses an id.
//! - Borrow state changes only through `borrow_book` / `return_book`.
//! - Read accessors hand out clones, never live handles into the catalog.

use crate::model::book::{Availability, Book, BookId};
use chrono::NaiveDate;

/// Ordered collection of books plus identity allocation.
///
/// Missing ids and invalid transitions are ordinary return values
/// (`Option` / `bool`), so callers render a message instead of handling a
/// fault.
#[derive(Debug)]
pub struct Catalog {
    books: Vec<Book>,
    next_id: BookId,
}

impl Catalog {
    /// Creates an empty catalog with the id counter at 1.
    pub fn new() -> Self {
        Self {
            books: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuilds a catalog from already-identified books, in the given order.
    ///
    /// The id counter resumes one past the highest id seen, or at 1 for an
    /// empty input.
    pub fn from_books(books: Vec<Book>) -> Self {
        let next_id = books.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        Self { books, next_id }
    }

    /// Adds a new available book and returns a snapshot of it.
    ///
    /// Allocates the next id; never fails. Input validation (year
    /// positivity, ISBN shape, category case) is the entry layer's job.
    pub fn add_book(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        isbn: impl Into<String>,
        category: impl Into<String>,
    ) -> Book {
        let book = Book::new(self.next_id, title, author, year, isbn, category);
        self.next_id += 1;
        let snapshot = book.clone();
        self.books.push(book);
        snapshot
    }

    /// Returns a snapshot of every book in insertion order.
    pub fn get_all(&self) -> Vec<Book> {
        self.books.clone()
    }

    /// Returns a snapshot of the book with the given id, if any.
    pub fn get_by_id(&self, id: BookId) -> Option<Book> {
        self.books.iter().find(|b| b.id == id).cloned()
    }

    /// Returns snapshots of every book whose title contains `query`,
    /// case-insensitively, in insertion order.
    ///
    /// An empty query matches every book.
    pub fn search_by_title(&self, query: &str) -> Vec<Book> {
        let needle = query.to_lowercase();
        self.books
            .iter()
            .filter(|b| b.title.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Marks the book as borrowed by `borrower_name` since `date`.
    ///
    /// Returns `false` without changing anything when the id is unknown or
    /// the book is already out.
    pub fn borrow_book(&mut self, id: BookId, borrower_name: &str, date: NaiveDate) -> bool {
        match self.books.iter_mut().find(|b| b.id == id) {
            Some(book) if !book.is_borrowed() => {
                book.availability = Availability::Borrowed {
                    borrower_name: borrower_name.to_string(),
                    borrow_date: date,
                };
                true
            }
            _ => false,
        }
    }

    /// Marks the book as back on the shelf.
    ///
    /// Returns `false` without changing anything when the id is unknown or
    /// the book is not currently borrowed.
    pub fn return_book(&mut self, id: BookId) -> bool {
        match self.books.iter_mut().find(|b| b.id == id) {
            Some(book) if book.is_borrowed() => {
                book.availability = Availability::Available;
                true
            }
            _ => false,
        }
    }

    /// Read-only view of the books in insertion order, for serialization.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Number of books in the catalog.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// The id the next `add_book` call will assign.
    pub fn next_id(&self) -> BookId {
        self.next_id
    }
}
