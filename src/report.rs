//! Read-only watch-time reports over the media store.

use crate::store::MediaStore;
use crate::types::{GenreCount, WatchTime};
use crate::Result;
use chrono::{Duration, NaiveDate};
use std::fmt;

/// Number of days in a weekly report window, reference day included.
pub const WEEK_DAYS: i64 = 7;

/// Outcome of a most-watched genre query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopGenre {
    Genre(GenreCount),
    NoData,
}

impl fmt::Display for TopGenre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopGenre::Genre(top) => write!(f, "{top}"),
            TopGenre::NoData => f.write_str("no data available"),
        }
    }
}

/// Aggregate views over the logged entries.
///
/// # Examples
///
/// ```rust,no_run
/// use chrono::Local;
/// use watchlog::{MediaStore, ReportGenerator};
///
/// let store = MediaStore::open("media_tracker.db")?;
/// let reports = ReportGenerator::new(&store);
///
/// let today = Local::now().date_naive();
/// println!("Today: {}", reports.daily_total(today)?);
/// println!("This week: {}", reports.weekly_total(today)?);
/// println!("Most watched genre: {}", reports.top_genre()?);
/// # Ok::<(), watchlog::WatchLogError>(())
/// ```
pub struct ReportGenerator<'a> {
    store: &'a MediaStore,
}

impl<'a> ReportGenerator<'a> {
    pub fn new(store: &'a MediaStore) -> Self {
        Self { store }
    }

    /// Total watch time logged on `date`.
    pub fn daily_total(&self, date: NaiveDate) -> Result<WatchTime> {
        let minutes = self.store.sum_duration_for_date(date)?;
        Ok(WatchTime::from_minutes(minutes))
    }

    /// Total watch time over the seven days ending on `reference`, inclusive.
    pub fn weekly_total(&self, reference: NaiveDate) -> Result<WatchTime> {
        let (start, end) = weekly_window(reference);
        let minutes = self.store.sum_duration_for_range(start, end)?;
        Ok(WatchTime::from_minutes(minutes))
    }

    pub fn top_genre(&self) -> Result<TopGenre> {
        Ok(match self.store.most_frequent_genre()? {
            Some(top) => TopGenre::Genre(top),
            None => TopGenre::NoData,
        })
    }
}

/// The inclusive `[reference - 6 days, reference]` window used by weekly reports.
pub fn weekly_window(reference: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = reference
        .checked_sub_signed(Duration::days(WEEK_DAYS - 1))
        .unwrap_or(NaiveDate::MIN);
    (start, reference)
}
