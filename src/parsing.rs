//! Parsing of catalog (TMDB) JSON responses into typed records.
//!
//! Every field the catalog may omit or send as `null` is optional here; the
//! fallbacks (unknown genre, type-dependent duration, missing poster) are applied
//! while converting into [`Candidate`] and [`MediaDetails`].

use crate::types::{Candidate, MediaDetails, MediaType, UNKNOWN_GENRE};
use crate::{Result, WatchLogError};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: Option<u64>,
    media_type: Option<String>,
    title: Option<String>,
    name: Option<String>,
    release_date: Option<String>,
    first_air_date: Option<String>,
    poster_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    title: Option<String>,
    name: Option<String>,
    #[serde(default)]
    genres: Option<Vec<Genre>>,
    runtime: Option<u32>,
    #[serde(default)]
    episode_run_time: Option<Vec<u32>>,
}

#[derive(Debug, Deserialize)]
struct Genre {
    name: Option<String>,
}

/// Parse a multi-type search response into candidates.
///
/// Results that are not movies or TV shows (people, collections) are dropped, as are
/// results without an id or a name. The remaining order is the catalog's ranking.
pub fn parse_search_response(body: &str, image_base_url: &str) -> Result<Vec<Candidate>> {
    let response: SearchResponse = serde_json::from_str(body)
        .map_err(|e| WatchLogError::Parse(format!("invalid search response: {e}")))?;

    let candidates = response
        .results
        .into_iter()
        .filter_map(|result| into_candidate(result, image_base_url))
        .collect();

    Ok(candidates)
}

fn into_candidate(result: SearchResult, image_base_url: &str) -> Option<Candidate> {
    let media_type = match result.media_type.as_deref() {
        Some("movie") => MediaType::Movie,
        Some("tv") => MediaType::Tv,
        _ => return None,
    };

    let Some(id) = result.id else {
        log::debug!("Skipping search result without an id");
        return None;
    };

    let display_name = match media_type {
        MediaType::Movie => first_present([result.title, result.name]),
        MediaType::Tv => first_present([result.name, result.title]),
    };
    let Some(display_name) = display_name else {
        log::debug!("Skipping search result {id} without a title");
        return None;
    };

    let release_date = first_present([result.release_date, result.first_air_date]);
    let poster_url = non_empty(result.poster_path).map(|path| poster_url(image_base_url, &path));

    Some(Candidate {
        id,
        display_name,
        media_type,
        release_date,
        poster_url,
    })
}

/// Parse a details response for a movie or TV show.
///
/// The genre is the first listed genre name, `Unknown` when there is none. The
/// duration is `runtime` for movies and the first `episode_run_time` value for TV,
/// falling back to [`MediaType::default_duration`] when missing or zero.
pub fn parse_details_response(body: &str, media_type: MediaType) -> Result<MediaDetails> {
    let details: DetailsResponse = serde_json::from_str(body)
        .map_err(|e| WatchLogError::Parse(format!("invalid details response: {e}")))?;

    let display_name = match media_type {
        MediaType::Movie => first_present([details.title, details.name]),
        MediaType::Tv => first_present([details.name, details.title]),
    }
    .ok_or_else(|| WatchLogError::Parse("details response has no title".to_string()))?;

    let genre = details
        .genres
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|genre| non_empty(genre.name))
        .unwrap_or_else(|| UNKNOWN_GENRE.to_string());

    let runtime = match media_type {
        MediaType::Movie => details.runtime,
        MediaType::Tv => details
            .episode_run_time
            .and_then(|times| times.into_iter().next()),
    };
    let duration_minutes = runtime
        .filter(|minutes| *minutes > 0)
        .unwrap_or_else(|| media_type.default_duration());

    Ok(MediaDetails {
        display_name,
        genre,
        duration_minutes,
    })
}

fn poster_url(image_base_url: &str, poster_path: &str) -> String {
    format!(
        "{}/{}",
        image_base_url.trim_end_matches('/'),
        poster_path.trim_start_matches('/')
    )
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn first_present<const N: usize>(values: [Option<String>; N]) -> Option<String> {
    values.into_iter().find_map(non_empty)
}
