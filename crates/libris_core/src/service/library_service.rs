//! Library session service.
//!
//! # Responsibility
//! - Load the catalog from its data file on open, save it on demand.
//! - Delegate every catalog operation for front-end callers.
//!
//! # Invariants
//! - The service never bypasses catalog borrow/return transitions.
//! - No hidden global state: each service owns its own catalog and path,
//!   so independent instances can coexist (tests rely on this).

use crate::catalog::Catalog;
use crate::model::book::{Book, BookId};
use crate::store::{load_catalog, save_catalog, StoreResult};
use chrono::NaiveDate;
use log::info;
use std::path::{Path, PathBuf};

/// One user session over a catalog persisted at a fixed path.
pub struct LibraryService {
    catalog: Catalog,
    data_path: PathBuf,
}

impl LibraryService {
    /// Opens a session by loading the catalog from `data_path`.
    ///
    /// A missing file starts an empty session. A malformed or unreadable
    /// file is returned as an error so the caller can refuse to run over
    /// possibly corrupt data.
    pub fn open(data_path: impl Into<PathBuf>) -> StoreResult<Self> {
        let data_path = data_path.into();
        let catalog = load_catalog(&data_path)?;
        info!(
            "event=session_open module=service status=ok records={} path={}",
            catalog.len(),
            data_path.display()
        );
        Ok(Self { catalog, data_path })
    }

    /// Saves the current catalog back to the session's data file.
    pub fn save(&self) -> StoreResult<()> {
        save_catalog(&self.data_path, &self.catalog)
    }

    /// Path this session persists to.
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Adds a book and returns a snapshot of it.
    pub fn add_book(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        isbn: impl Into<String>,
        category: impl Into<String>,
    ) -> Book {
        self.catalog.add_book(title, author, year, isbn, category)
    }

    /// Snapshot of every book in insertion order.
    pub fn get_all(&self) -> Vec<Book> {
        self.catalog.get_all()
    }

    /// Snapshot of one book by id.
    pub fn get_by_id(&self, id: BookId) -> Option<Book> {
        self.catalog.get_by_id(id)
    }

    /// Case-insensitive title substring search.
    pub fn search_by_title(&self, query: &str) -> Vec<Book> {
        self.catalog.search_by_title(query)
    }

    /// Borrows a book; `false` when unknown or already out.
    pub fn borrow_book(&mut self, id: BookId, borrower_name: &str, date: NaiveDate) -> bool {
        self.catalog.borrow_book(id, borrower_name, date)
    }

    /// Returns a book; `false` when unknown or not out.
    pub fn return_book(&mut self, id: BookId) -> bool {
        self.catalog.return_book(id)
    }

    /// Number of books in the session's catalog.
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }
}
