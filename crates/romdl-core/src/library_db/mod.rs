//! Download history (SQLite via sqlx).
//!
//! Records which listing entry was downloaded, from where, and to which
//! path. The search/download core does not depend on it; the CLI records
//! each completed download here.

pub mod db;
mod records;
pub mod types;

pub use db::LibraryDb;
pub use types::*;

#[cfg(test)]
mod tests;
