//! Core catalog engine for libris.
//! This crate is the single source of truth for catalog invariants.

pub mod catalog;
pub mod codec;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use catalog::Catalog;
pub use codec::{decode_line, encode_line, CodecError};
pub use logging::{default_log_level, init_logging};
pub use model::book::{is_plausible_isbn, normalize_category, Availability, Book, BookId};
pub use service::library_service::LibraryService;
pub use store::{load_catalog, save_catalog, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
