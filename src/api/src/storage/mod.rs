//! SQLite storage for the racing and sports catalogs
//!
//! Each service owns one database file with a single table. Repositories
//! compile listing queries through [`crate::query`] and map rows to API types.

pub mod database;
pub mod events;
pub mod races;
pub mod schema;
pub mod seed;

pub use database::{CatalogError, Database};
pub use events::EventRepository;
pub use races::RaceRepository;
