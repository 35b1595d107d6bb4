//! Line codec between a book record and the delimited persistence format.
//!
//! # Responsibility
//! - Encode one book as one comma-delimited text line.
//! - Decode one line back into a book, rejecting malformed rows.
//!
//! # Invariants
//! - Field order is fixed: id, title, author, year, isbn, category,
//!   borrowed, borrower name, borrow date.
//! - Absent borrower fields encode as empty strings.
//! - Decoding never masks a bad row: every malformed line is an error.
//!
//! Text fields are written unescaped. A title or author containing the
//! delimiter corrupts its row on reload; that limitation is part of the
//! on-disk format this codec is compatible with.

use crate::model::book::{Availability, Book};
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Field delimiter of the persistence format.
pub const DELIMITER: char = ',';

const FIELD_COUNT: usize = 9;

/// Decode error for one persisted line.
#[derive(Debug)]
pub enum CodecError {
    /// The line does not split into exactly nine fields.
    FieldCount { found: usize },
    /// The id field is not a positive integer.
    InvalidId(String),
    /// The year field is not an integer.
    InvalidYear(String),
    /// The borrowed field is not the literal `true` or `false`.
    InvalidFlag(String),
    /// The borrow date is present but not an ISO `YYYY-MM-DD` date.
    InvalidDate(String),
    /// The borrowed flag disagrees with borrower name/date presence.
    BorrowStateMismatch,
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FieldCount { found } => {
                write!(f, "expected {FIELD_COUNT} fields, found {found}")
            }
            Self::InvalidId(value) => write!(f, "invalid book id `{value}`"),
            Self::InvalidYear(value) => write!(f, "invalid year `{value}`"),
            Self::InvalidFlag(value) => write!(f, "invalid borrowed flag `{value}`"),
            Self::InvalidDate(value) => write!(f, "invalid borrow date `{value}`"),
            Self::BorrowStateMismatch => {
                write!(f, "borrowed flag disagrees with borrower fields")
            }
        }
    }
}

impl Error for CodecError {}

/// Encodes one book as one line, without the line terminator.
pub fn encode_line(book: &Book) -> String {
    let (borrowed, borrower_name, borrow_date) = match &book.availability {
        Availability::Available => ("false", String::new(), String::new()),
        Availability::Borrowed {
            borrower_name,
            borrow_date,
        } => ("true", borrower_name.clone(), borrow_date.to_string()),
    };

    [
        book.id.to_string(),
        book.title.clone(),
        book.author.clone(),
        book.year.to_string(),
        book.isbn.clone(),
        book.category.clone(),
        borrowed.to_string(),
        borrower_name,
        borrow_date,
    ]
    .join(&DELIMITER.to_string())
}

/// Decodes one line into a book.
///
/// The split keeps trailing empty fields, so an available book's two empty
/// borrower fields survive the round trip.
pub fn decode_line(line: &str) -> Result<Book, CodecError> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    if fields.len() != FIELD_COUNT {
        return Err(CodecError::FieldCount {
            found: fields.len(),
        });
    }

    let id = fields[0]
        .parse()
        .map_err(|_| CodecError::InvalidId(fields[0].to_string()))?;
    let year = fields[3]
        .parse()
        .map_err(|_| CodecError::InvalidYear(fields[3].to_string()))?;
    let borrowed: bool = fields[6]
        .parse()
        .map_err(|_| CodecError::InvalidFlag(fields[6].to_string()))?;

    let borrower_name = fields[7];
    let borrow_date = fields[8];

    let availability = match (borrowed, borrower_name.is_empty(), borrow_date.is_empty()) {
        (false, true, true) => Availability::Available,
        (true, false, false) => Availability::Borrowed {
            borrower_name: borrower_name.to_string(),
            borrow_date: borrow_date
                .parse::<NaiveDate>()
                .map_err(|_| CodecError::InvalidDate(borrow_date.to_string()))?,
        },
        _ => return Err(CodecError::BorrowStateMismatch),
    };

    Ok(Book {
        id,
        title: fields[1].to_string(),
        author: fields[2].to_string(),
        year,
        isbn: fields[4].to_string(),
        category: fields[5].to_string(),
        availability,
    })
}

#[cfg(test)]
mod tests {
    use super::{decode_line, encode_line, CodecError};
    use crate::model::book::{Availability, Book};
    use chrono::NaiveDate;

    fn sample_book() -> Book {
        Book::new(3, "War and Peace", "Tolstoy", 1869, "9780140447934", "CLASSICS")
    }

    #[test]
    fn encode_available_book_leaves_borrower_fields_empty() {
        let line = encode_line(&sample_book());
        assert_eq!(
            line,
            "3,War and Peace,Tolstoy,1869,9780140447934,CLASSICS,false,,"
        );
    }

    #[test]
    fn encode_borrowed_book_writes_borrower_and_iso_date() {
        let mut book = sample_book();
        book.availability = Availability::Borrowed {
            borrower_name: "Ada".to_string(),
            borrow_date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
        };
        let line = encode_line(&book);
        assert!(line.ends_with(",true,Ada,2026-03-14"));
    }

    #[test]
    fn round_trip_preserves_available_and_borrowed_books() {
        let available = sample_book();
        assert_eq!(decode_line(&encode_line(&available)).unwrap(), available);

        let mut borrowed = sample_book();
        borrowed.availability = Availability::Borrowed {
            borrower_name: "Ada".to_string(),
            borrow_date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
        };
        assert_eq!(decode_line(&encode_line(&borrowed)).unwrap(), borrowed);
    }

    #[test]
    fn decode_rejects_wrong_field_count() {
        let err = decode_line("1,only,five,fields,here").unwrap_err();
        assert!(matches!(err, CodecError::FieldCount { found: 5 }));
    }

    #[test]
    fn decode_rejects_non_numeric_id_and_year() {
        let err = decode_line("abc,T,A,1999,i,C,false,,").unwrap_err();
        assert!(matches!(err, CodecError::InvalidId(_)));

        let err = decode_line("1,T,A,year,i,C,false,,").unwrap_err();
        assert!(matches!(err, CodecError::InvalidYear(_)));
    }

    #[test]
    fn decode_rejects_non_literal_flag() {
        let err = decode_line("1,T,A,1999,i,C,TRUE,,").unwrap_err();
        assert!(matches!(err, CodecError::InvalidFlag(_)));
    }

    #[test]
    fn decode_rejects_malformed_date() {
        let err = decode_line("1,T,A,1999,i,C,true,Ada,14-03-2026").unwrap_err();
        assert!(matches!(err, CodecError::InvalidDate(_)));
    }

    #[test]
    fn decode_rejects_flag_field_disagreement() {
        let err = decode_line("1,T,A,1999,i,C,true,,").unwrap_err();
        assert!(matches!(err, CodecError::BorrowStateMismatch));

        let err = decode_line("1,T,A,1999,i,C,false,Ada,2026-03-14").unwrap_err();
        assert!(matches!(err, CodecError::BorrowStateMismatch));
    }

    #[test]
    fn delimiter_inside_title_corrupts_the_row() {
        let mut book = sample_book();
        book.title = "One, Two".to_string();
        let err = decode_line(&encode_line(&book)).unwrap_err();
        assert!(matches!(err, CodecError::FieldCount { found: 10 }));
    }
}
