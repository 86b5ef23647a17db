//! The interactive, menu-driven session.
//!
//! The controller prints a fixed menu, reads one line per choice, runs the chosen
//! action and loops until the user exits or input ends. Action failures are printed
//! and the menu comes back; only terminal I/O failures end the session.

use crate::context::AppContext;
use crate::report::{weekly_window, ReportGenerator};
use crate::types::{MediaType, MediaUpdate, NewMediaEntry};
use crate::{Result, WatchLogError};
use chrono::{Local, NaiveDate};
use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::str::FromStr;

/// How many catalog candidates are offered for selection.
pub const MAX_CANDIDATES: usize = 5;

const MENU: &str = "\
--- Media Tracker Menu ---
1. Add Media Entry
2. Update Media Entry
3. Delete Media Entry
4. View Daily Report
5. View Weekly Report
6. View Most Watched Genre
7. Exit";

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Update,
    Delete,
    DailyReport,
    WeeklyReport,
    TopGenre,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = WatchLogError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::Add),
            "2" => Ok(MenuChoice::Update),
            "3" => Ok(MenuChoice::Delete),
            "4" => Ok(MenuChoice::DailyReport),
            "5" => Ok(MenuChoice::WeeklyReport),
            "6" => Ok(MenuChoice::TopGenre),
            "7" => Ok(MenuChoice::Exit),
            other => Err(WatchLogError::InvalidInput(format!(
                "'{other}' is not a menu option"
            ))),
        }
    }
}

/// What the metadata step of "add" settled on.
enum Lookup {
    /// The user accepted fetched metadata.
    Accepted(NewMediaEntry),
    /// Fall back to manual entry, with the media type if a candidate fixed it.
    Manual(Option<MediaType>),
}

/// Menu-driven session over any line-based input and output.
///
/// # Examples
///
/// ```rust,no_run
/// use watchlog::{AppConfig, AppContext, Controller};
///
/// # tokio_test::block_on(async {
/// let http_client = http_client::native::NativeClient::new();
/// let ctx = AppContext::from_config(&AppConfig::from_env()?, Box::new(http_client))?;
/// Controller::stdio(&ctx).run().await?;
/// # Ok::<(), watchlog::WatchLogError>(())
/// # });
/// ```
pub struct Controller<'a, R, W> {
    ctx: &'a AppContext,
    input: R,
    output: W,
    fixed_date: Option<NaiveDate>,
}

impl<'a> Controller<'a, StdinLock<'static>, Stdout> {
    /// A controller reading from stdin and writing to stdout.
    pub fn stdio(ctx: &'a AppContext) -> Self {
        Self::new(ctx, io::stdin().lock(), io::stdout())
    }
}

impl<'a, R: BufRead, W: Write> Controller<'a, R, W> {
    pub fn new(ctx: &'a AppContext, input: R, output: W) -> Self {
        Self {
            ctx,
            input,
            output,
            fixed_date: None,
        }
    }

    /// Use `date` as "today" instead of the local clock.
    pub fn with_fixed_date(mut self, date: NaiveDate) -> Self {
        self.fixed_date = Some(date);
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn today(&self) -> NaiveDate {
        self.fixed_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Run the menu loop until the user exits or input ends.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "\n{MENU}")?;
            let line = match self.prompt_line("Choose an option: ") {
                Ok(Some(line)) => line,
                Ok(None) => {
                    writeln!(self.output)?;
                    break;
                }
                Err(e @ WatchLogError::InvalidInput(_)) => {
                    writeln!(self.output, "Error: {e}")?;
                    continue;
                }
                Err(e) => return Err(e),
            };

            let choice = match line.parse::<MenuChoice>() {
                Ok(choice) => choice,
                Err(_) => {
                    writeln!(self.output, "Invalid option. Try again.")?;
                    continue;
                }
            };

            if choice == MenuChoice::Exit {
                break;
            }

            match self.dispatch(choice).await {
                Ok(()) => {}
                Err(WatchLogError::Io(e)) => return Err(WatchLogError::Io(e)),
                Err(e) => {
                    log::warn!("{choice:?} failed: {e}");
                    writeln!(self.output, "Error: {e}")?;
                }
            }
        }

        writeln!(self.output, "Goodbye.")?;
        Ok(())
    }

    async fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::Add => self.add_media().await,
            MenuChoice::Update => self.update_media(),
            MenuChoice::Delete => self.delete_media(),
            MenuChoice::DailyReport => self.daily_report(),
            MenuChoice::WeeklyReport => self.weekly_report(),
            MenuChoice::TopGenre => self.top_genre_report(),
            MenuChoice::Exit => Ok(()),
        }
    }

    // ============================================================================================
    // ACTIONS
    // ============================================================================================

    async fn add_media(&mut self) -> Result<()> {
        let title = self.prompt("Title: ")?;
        if title.is_empty() {
            return Err(WatchLogError::InvalidInput(
                "title must not be empty".to_string(),
            ));
        }

        let entry = match self.lookup_metadata(&title).await? {
            Lookup::Accepted(entry) => entry,
            Lookup::Manual(media_type) => self.manual_entry(&title, media_type)?,
        };
        let entry = entry.watched_on(self.today());

        let id = self.ctx.store.insert(&entry)?;
        writeln!(self.output, "Media added with id {id}.")?;
        Ok(())
    }

    async fn lookup_metadata(&mut self, title: &str) -> Result<Lookup> {
        let ctx = self.ctx;
        let Some(catalog) = ctx.catalog() else {
            writeln!(
                self.output,
                "Metadata lookup is not configured. Entering manually."
            )?;
            return Ok(Lookup::Manual(None));
        };

        let candidates = match catalog.resolve_candidates(title).await {
            Ok(candidates) => candidates,
            Err(e) if e.is_transient() => {
                log::warn!("Catalog search for '{title}' failed: {e}");
                writeln!(
                    self.output,
                    "Could not fetch metadata ({e}). Entering manually."
                )?;
                return Ok(Lookup::Manual(None));
            }
            Err(e) => return Err(e),
        };

        if candidates.is_empty() {
            writeln!(self.output, "No match found. Entering manually.")?;
            return Ok(Lookup::Manual(None));
        }

        let shown = &candidates[..candidates.len().min(MAX_CANDIDATES)];
        writeln!(self.output, "Matches:")?;
        for (index, candidate) in shown.iter().enumerate() {
            writeln!(self.output, "{}. {candidate}", index + 1)?;
        }

        let selection = self.prompt(&format!(
            "Select a match (1-{}, 0 to enter manually): ",
            shown.len()
        ))?;
        let index: usize = selection
            .parse()
            .map_err(|_| WatchLogError::InvalidInput(format!("'{selection}' is not a number")))?;
        if index == 0 {
            return Ok(Lookup::Manual(None));
        }
        let candidate = shown.get(index - 1).ok_or_else(|| {
            WatchLogError::InvalidInput(format!("selection {index} is out of range"))
        })?;

        let details = match catalog
            .fetch_details(candidate.id, candidate.media_type)
            .await
        {
            Ok(Some(details)) => details,
            Ok(None) => {
                writeln!(
                    self.output,
                    "No details available for {candidate}. Entering manually."
                )?;
                return Ok(Lookup::Manual(Some(candidate.media_type)));
            }
            Err(e) if e.is_transient() => {
                log::warn!("Fetching details for {} failed: {e}", candidate.id);
                writeln!(
                    self.output,
                    "Could not fetch metadata ({e}). Entering manually."
                )?;
                return Ok(Lookup::Manual(Some(candidate.media_type)));
            }
            Err(e) => return Err(e),
        };

        writeln!(self.output, "Fetched metadata:")?;
        writeln!(self.output, "Title: {}", details.display_name)?;
        writeln!(self.output, "Type: {}", candidate.media_type)?;
        writeln!(self.output, "Genre: {}", details.genre)?;
        writeln!(self.output, "Duration: {} minutes", details.duration_minutes)?;
        writeln!(
            self.output,
            "Poster: {}",
            candidate.poster_url.as_deref().unwrap_or("not available")
        )?;

        let answer = self.prompt("Do you want to save this? (yes/no): ")?;
        if is_yes(&answer) {
            Ok(Lookup::Accepted(NewMediaEntry::from_details(
                &details,
                candidate.media_type,
            )))
        } else {
            writeln!(self.output, "Entering manually.")?;
            Ok(Lookup::Manual(Some(candidate.media_type)))
        }
    }

    fn manual_entry(&mut self, title: &str, media_type: Option<MediaType>) -> Result<NewMediaEntry> {
        let media_type = match media_type {
            Some(media_type) => media_type,
            None => self.prompt("Type (movie/tv): ")?.parse::<MediaType>()?,
        };

        let genre = self.prompt("Genre: ")?;
        let duration = self.prompt(&format!(
            "Duration (minutes) [{}]: ",
            media_type.default_duration()
        ))?;

        let mut entry = NewMediaEntry::new(title, media_type).with_genre(genre);
        if !duration.is_empty() {
            entry = entry.with_duration(parse_minutes(&duration)?);
        }
        Ok(entry)
    }

    fn update_media(&mut self) -> Result<()> {
        let id = parse_id(&self.prompt("Enter media ID to update: ")?)?;
        let current = self
            .ctx
            .store
            .get(id)?
            .ok_or(WatchLogError::NotFound(id))?;

        writeln!(self.output, "Current: {current}")?;
        writeln!(self.output, "Leave a field blank to keep its current value.")?;

        let title = self.prompt(&format!("New Title [{}]: ", current.title))?;
        let media_type = self.prompt(&format!("New Type (movie/tv) [{}]: ", current.media_type))?;
        let genre = self.prompt(&format!("New Genre [{}]: ", current.genre))?;
        let duration = self.prompt(&format!(
            "New Duration (minutes) [{}]: ",
            current.duration_minutes
        ))?;

        let update = MediaUpdate {
            title: non_blank(title),
            media_type: non_blank(media_type)
                .map(|value| value.parse::<MediaType>())
                .transpose()?,
            genre: non_blank(genre),
            duration_minutes: non_blank(duration)
                .map(|value| parse_minutes(&value))
                .transpose()?,
        };

        if update.is_empty() {
            writeln!(self.output, "Nothing to update.")?;
            return Ok(());
        }

        self.ctx.store.update(id, &update)?;
        writeln!(self.output, "Media updated.")?;
        Ok(())
    }

    fn delete_media(&mut self) -> Result<()> {
        let id = parse_id(&self.prompt("Enter media ID to delete: ")?)?;
        self.ctx.store.delete(id)?;
        writeln!(self.output, "Media deleted.")?;
        Ok(())
    }

    fn daily_report(&mut self) -> Result<()> {
        let today = self.today();
        let total = ReportGenerator::new(&self.ctx.store).daily_total(today)?;
        writeln!(self.output, "Total watch time on {today}: {total}")?;
        Ok(())
    }

    fn weekly_report(&mut self) -> Result<()> {
        let (start, end) = weekly_window(self.today());
        let total = ReportGenerator::new(&self.ctx.store).weekly_total(end)?;
        writeln!(self.output, "Total watch time from {start} to {end}: {total}")?;
        Ok(())
    }

    fn top_genre_report(&mut self) -> Result<()> {
        let top = ReportGenerator::new(&self.ctx.store).top_genre()?;
        writeln!(self.output, "Most watched genre: {top}")?;
        Ok(())
    }

    // ============================================================================================
    // INPUT
    // ============================================================================================

    /// Print `label` and read one trimmed line; `None` at end of input.
    fn prompt_line(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(line.trim().to_string())),
            // The offending line has already been consumed
            Err(e) if e.kind() == io::ErrorKind::InvalidData => Err(WatchLogError::InvalidInput(
                "input line is not valid UTF-8".to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Like [`Self::prompt_line`], but running out of input mid-action is an error.
    fn prompt(&mut self, label: &str) -> Result<String> {
        self.prompt_line(label)?
            .ok_or_else(|| WatchLogError::InvalidInput("input ended unexpectedly".to_string()))
    }
}

fn is_yes(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("yes") || answer.eq_ignore_ascii_case("y")
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn parse_id(value: &str) -> Result<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| WatchLogError::InvalidInput(format!("'{value}' is not a valid media id")))
}

fn parse_minutes(value: &str) -> Result<u32> {
    value.trim().parse().map_err(|_| {
        WatchLogError::InvalidInput(format!(
            "'{value}' is not a non-negative whole number of minutes"
        ))
    })
}
