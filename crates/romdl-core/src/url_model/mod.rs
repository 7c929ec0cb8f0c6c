//! URL modeling and filename derivation.
//!
//! Joins listing links onto a source's base URL and derives the local file
//! name for a listing row.

mod file_name;
mod link;

pub use file_name::derive_file_name;
pub use link::{host_of, resolve_link};
