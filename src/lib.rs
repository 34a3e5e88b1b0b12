//! Library surface for the user records manager.
//!
//! The binary wires these together: [`config`] resolves where the database
//! lives, [`db`] persists records, [`validation`] checks form input,
//! [`export`] writes CSV files, and [`ui`] drives the terminal interface.
pub mod config;
pub mod db;
pub mod export;
pub mod models;
pub mod ui;
pub mod validation;

pub use config::{AppConfig, Cli, ConnectionConfig};
pub use db::{StoreError, UserStore};
pub use models::{CategorySummary, Statistics, UserRecord};
pub use ui::{run_app, App};
