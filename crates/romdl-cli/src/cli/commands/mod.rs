//! CLI command handlers, one file per command.

mod clear_cache;
mod forget;
mod get;
mod history;
mod platforms;
mod search;
mod session;

pub use clear_cache::run_clear_cache;
pub use forget::run_forget;
pub use get::{record_download, run_get};
pub use history::run_history;
pub use platforms::run_platforms;
pub use search::run_search;
