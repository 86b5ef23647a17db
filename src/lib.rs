//! # watchlog
//!
//! A personal log of watched movies and TV shows. Entries live in a local SQLite
//! database, can be enriched with metadata from TMDB (genre, runtime), and feed a few
//! simple reports: watch time for a day or a week and the most-watched genre.
//!
//! ```rust,no_run
//! use watchlog::{MediaStore, MediaType, NewMediaEntry, ReportGenerator};
//!
//! let store = MediaStore::open("media_tracker.db")?;
//! store.insert(&NewMediaEntry::new("Arrival", MediaType::Movie).with_genre("Drama"))?;
//!
//! let reports = ReportGenerator::new(&store);
//! println!("Most watched genre: {}", reports.top_genre()?);
//! # Ok::<(), watchlog::WatchLogError>(())
//! ```

pub mod catalog;
pub mod client;
pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod parsing;
pub mod report;
pub mod store;
pub mod types;

pub use catalog::CatalogClient;
pub use client::TmdbClient;
pub use config::AppConfig;
pub use context::AppContext;
pub use controller::{Controller, MenuChoice};
pub use error::WatchLogError;
pub use report::{ReportGenerator, TopGenre};
pub use store::MediaStore;
pub use types::{
    Candidate, GenreCount, MediaDetails, MediaEntry, MediaType, MediaUpdate, NewMediaEntry,
    WatchTime,
};

#[cfg(feature = "mock")]
pub use catalog::MockCatalogClient;

pub type Result<T> = std::result::Result<T, WatchLogError>;
