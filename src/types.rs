//! Data types for the watch log.
//!
//! This module contains the core data structures used throughout the crate: logged
//! media entries, the inputs used to create and edit them, catalog search candidates
//! and details, and the aggregate values produced by reports.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::WatchLogError;

/// Genre recorded when neither the catalog nor the user supplies one.
pub const UNKNOWN_GENRE: &str = "Unknown";

// ================================================================================================
// MEDIA TYPE
// ================================================================================================

/// The kind of media a log entry refers to.
///
/// Stored in the database as lowercase text (`movie` / `tv`).
///
/// # Examples
///
/// ```rust
/// use watchlog::MediaType;
///
/// let kind: MediaType = "TV".parse().unwrap();
/// assert_eq!(kind, MediaType::Tv);
/// assert_eq!(kind.default_duration(), 30);
/// assert_eq!(MediaType::Movie.to_string(), "movie");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    /// The lowercase name used in the database and in catalog URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }

    /// Fallback duration in minutes when no runtime is known.
    pub fn default_duration(&self) -> u32 {
        match self {
            MediaType::Movie => 90,
            MediaType::Tv => 30,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = WatchLogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" => Ok(MediaType::Movie),
            "tv" => Ok(MediaType::Tv),
            other => Err(WatchLogError::InvalidInput(format!(
                "unknown media type '{other}' (expected 'movie' or 'tv')"
            ))),
        }
    }
}

// ================================================================================================
// LOG ENTRIES
// ================================================================================================

/// One logged watch record, as stored.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use watchlog::{MediaEntry, MediaType};
///
/// let entry = MediaEntry {
///     id: 1,
///     title: "Arrival".to_string(),
///     media_type: MediaType::Movie,
///     genre: "Drama".to_string(),
///     duration_minutes: 116,
///     watched_date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
/// };
///
/// assert_eq!(format!("{entry}"), "#1 Arrival (movie, Drama, 116 min) watched 2024-03-09");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaEntry {
    /// Unique id assigned by the store on insert
    pub id: i64,
    pub title: String,
    pub media_type: MediaType,
    pub genre: String,
    pub duration_minutes: u32,
    /// Local calendar date the entry was logged
    pub watched_date: NaiveDate,
}

impl fmt::Display for MediaEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} ({}, {}, {} min) watched {}",
            self.id,
            self.title,
            self.media_type,
            self.genre,
            self.duration_minutes,
            self.watched_date
        )
    }
}

/// A media entry that has not been stored yet.
///
/// Built with [`NewMediaEntry::new`], which fills in the fallback genre, the
/// type-dependent fallback duration and today's date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMediaEntry {
    pub title: String,
    pub media_type: MediaType,
    pub genre: String,
    pub duration_minutes: u32,
    pub watched_date: NaiveDate,
}

impl NewMediaEntry {
    /// Create an entry dated today with the fallback genre and duration.
    pub fn new(title: impl Into<String>, media_type: MediaType) -> Self {
        Self {
            title: title.into(),
            media_type,
            genre: UNKNOWN_GENRE.to_string(),
            duration_minutes: media_type.default_duration(),
            watched_date: Local::now().date_naive(),
        }
    }

    /// Create an entry from fetched catalog details.
    pub fn from_details(details: &MediaDetails, media_type: MediaType) -> Self {
        Self::new(details.display_name.clone(), media_type)
            .with_genre(details.genre.clone())
            .with_duration(details.duration_minutes)
    }

    /// Set the genre. A blank genre keeps the fallback.
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        let genre = genre.into();
        if !genre.trim().is_empty() {
            self.genre = genre.trim().to_string();
        }
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    pub fn watched_on(mut self, date: NaiveDate) -> Self {
        self.watched_date = date;
        self
    }

    /// Check the invariants the store relies on.
    pub fn validate(&self) -> Result<(), WatchLogError> {
        validate_title(&self.title)
    }
}

/// Field changes for an existing entry. `None` keeps the stored value.
///
/// The id and the watched date cannot be changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaUpdate {
    pub title: Option<String>,
    pub media_type: Option<MediaType>,
    pub genre: Option<String>,
    pub duration_minutes: Option<u32>,
}

impl MediaUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.media_type.is_none()
            && self.genre.is_none()
            && self.duration_minutes.is_none()
    }

    pub fn validate(&self) -> Result<(), WatchLogError> {
        match &self.title {
            Some(title) => validate_title(title),
            None => Ok(()),
        }
    }
}

fn validate_title(title: &str) -> Result<(), WatchLogError> {
    if title.trim().is_empty() {
        return Err(WatchLogError::InvalidInput(
            "title must not be empty".to_string(),
        ));
    }
    Ok(())
}

// ================================================================================================
// CATALOG METADATA
// ================================================================================================

/// A search hit from the catalog service.
///
/// Only movie and TV results are kept; the order is the service's ranking order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Catalog id used to fetch details
    pub id: u64,
    pub display_name: String,
    pub media_type: MediaType,
    /// Release or first-air date as reported by the catalog (`YYYY-MM-DD`)
    pub release_date: Option<String>,
    /// Full poster image URL, `None` when the catalog has no poster
    pub poster_url: Option<String>,
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.release_date {
            Some(date) => write!(f, "{} ({}, {})", self.display_name, self.media_type, date),
            None => write!(f, "{} ({})", self.display_name, self.media_type),
        }
    }
}

/// Details fetched for a single catalog title, with fallbacks already applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaDetails {
    pub display_name: String,
    pub genre: String,
    pub duration_minutes: u32,
}

// ================================================================================================
// REPORT VALUES
// ================================================================================================

/// A genre together with how many entries carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: u64,
}

impl fmt::Display for GenreCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} entries)", self.genre, self.count)
    }
}

/// An amount of watch time, displayed as `H hour(s) M minute(s)`.
///
/// # Examples
///
/// ```rust
/// use watchlog::WatchTime;
///
/// let total = WatchTime::from_minutes(150);
/// assert_eq!(total.hours(), 2);
/// assert_eq!(total.to_string(), "2 hour(s) 30 minute(s)");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WatchTime {
    minutes: u64,
}

impl WatchTime {
    pub fn from_minutes(minutes: u64) -> Self {
        Self { minutes }
    }

    pub fn total_minutes(&self) -> u64 {
        self.minutes
    }

    pub fn hours(&self) -> u64 {
        self.minutes / 60
    }

    /// Minutes left over after whole hours.
    pub fn remaining_minutes(&self) -> u64 {
        self.minutes % 60
    }
}

impl fmt::Display for WatchTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} hour(s) {} minute(s)",
            self.hours(),
            self.remaining_minutes()
        )
    }
}
