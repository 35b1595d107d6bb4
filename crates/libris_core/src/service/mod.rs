//! Core use-case services.
//!
//! # Responsibility
//! - Tie the catalog and its persistence path into one session object.
//! - Keep front ends decoupled from storage details.

pub mod library_service;
