//! Persistence for the `users` table, split into connection handling, typed
//! errors, and the record operations themselves.

mod connection;
mod error;
mod users;

pub use connection::UserStore;
pub use error::StoreError;
