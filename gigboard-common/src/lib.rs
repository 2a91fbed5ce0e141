//! # gigboard common library
//!
//! Shared code for the gigboard listing service:
//! - Error type and result alias
//! - Configuration resolution (CLI, environment, TOML, defaults)
//! - SQLite schema, migrations, and queries for venues, artists, and shows
//! - Genre list codec
//! - Venue grouping, upcoming/past show split, and name search
//! - Seed data loader
//! - Date formatting for show start times

pub mod config;
pub mod db;
pub mod error;
pub mod genres;
pub mod listing;
pub mod seed;
pub mod time;

pub use error::{Error, Result};
pub use genres::Genres;
