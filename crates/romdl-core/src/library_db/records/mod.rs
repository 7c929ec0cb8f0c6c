//! Download record CRUD.

mod read;
mod write;
