//! Storage core for a personal movie and TV tracker.
//!
//! The HTTP layer talks to a [`db::Store`]: a media catalog, per-user watchlist,
//! watched and favorites memberships, user-owned lists, and stats derived from them.
//! Two interchangeable backends implement it, selected once at startup from [`config::Config`].

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod stats;

pub use config::{Backend, Config};
pub use db::{open_store, MemoryStore, SqliteStore, Store};
pub use error::{StoreError, StoreResult};
