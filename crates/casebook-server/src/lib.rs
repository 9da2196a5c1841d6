//! Casebook HTTP server
//!
//! Wires the casebook services into an `axum` router and owns the runtime
//! configuration consumed by the `casebook` binary.

#![warn(unreachable_pub)]

pub mod config;
pub mod http;

pub use config::{ConfigError, ServerConfig};
pub use http::{build_router, ApiError, AppState};

use casebook_core::{Casebook, Stores};
use casebook_store::CollectionPaths;

/// Casebook backed by the collection files under `config.data_dir`
#[must_use]
pub fn casebook_from_config(config: &ServerConfig) -> Casebook {
    let paths = CollectionPaths::under(&config.data_dir);
    Casebook::new(Stores::files(&paths)).with_tension_filter(config.tension_filter())
}
