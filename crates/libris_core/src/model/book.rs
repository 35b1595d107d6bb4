//! Book domain model.
//!
//! # Responsibility
//! - Define the canonical book record and its borrow state.
//! - Provide entry-time normalization helpers for caller-facing layers.
//!
//! # Invariants
//! - `id` is stable and never reused for another book.
//! - Borrow state is a tagged variant: a borrowed book always has both a
//!   borrower name and a borrow date, an available book has neither.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Stable identifier for a catalog entry.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// Allocated only by the catalog, starting at 1.
pub type BookId = u32;

static ISBN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\d{9}[\dXx]|\d{13})$").expect("valid isbn regex"));

/// Borrow state of a single book.
///
/// The two borrower fields exist only inside the `Borrowed` variant, so a
/// book can never claim to be borrowed without a borrower, or carry a
/// borrower while sitting on the shelf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    /// On the shelf, free to borrow.
    Available,
    /// Out with a borrower since `borrow_date`.
    Borrowed {
        borrower_name: String,
        borrow_date: NaiveDate,
    },
}

impl Availability {
    /// Returns whether this state counts as borrowed.
    pub fn is_borrowed(&self) -> bool {
        matches!(self, Self::Borrowed { .. })
    }
}

/// Canonical catalog record.
///
/// Identity and catalog fields are immutable after creation; only the
/// availability changes over a book's lifetime, and only through the
/// catalog's borrow/return operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Stable catalog-allocated ID used for lookups and persistence.
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// Publication year. Positivity is the entry layer's concern.
    pub year: i32,
    pub isbn: String,
    /// Normalized to uppercase by the entry layer, not enforced here.
    pub category: String,
    pub availability: Availability,
}

impl Book {
    /// Creates a new available book with the given identity and fields.
    pub fn new(
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        isbn: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            year,
            isbn: isbn.into(),
            category: category.into(),
            availability: Availability::Available,
        }
    }

    /// Returns whether this book is currently borrowed.
    pub fn is_borrowed(&self) -> bool {
        self.availability.is_borrowed()
    }

    /// Returns the current borrower's name, if any.
    pub fn borrower_name(&self) -> Option<&str> {
        match &self.availability {
            Availability::Borrowed { borrower_name, .. } => Some(borrower_name),
            Availability::Available => None,
        }
    }

    /// Returns the date the current loan started, if any.
    pub fn borrow_date(&self) -> Option<NaiveDate> {
        match &self.availability {
            Availability::Borrowed { borrow_date, .. } => Some(*borrow_date),
            Availability::Available => None,
        }
    }
}

/// Normalizes a category entered by a user: trimmed and uppercased.
///
/// Entry layers call this before handing the category to the catalog; the
/// catalog itself stores whatever it is given.
pub fn normalize_category(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Checks whether `raw` has the shape of an ISBN-10 or ISBN-13 after
/// stripping separators.
///
/// Shape only: no check-digit math. Entry layers use this to re-prompt on
/// obvious typos; the catalog accepts any ISBN text.
pub fn is_plausible_isbn(raw: &str) -> bool {
    let compact: String = raw
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect();
    ISBN_RE.is_match(&compact)
}
