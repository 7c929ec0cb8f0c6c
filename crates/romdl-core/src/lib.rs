pub mod config;
pub mod logging;

pub mod error;
pub mod fetch;
pub mod library_db;
pub mod listing;
pub mod orchestrator;
pub mod platform;
pub mod registry;
pub mod retry;
pub mod source;
pub mod url_model;

pub use error::{Result, RomdlError};
