//! Display projections over raw TMDB records.
//!
//! Every function here is total: missing data turns into an explicit
//! sentinel instead of an error, so the views never have to branch on
//! absent fields.

use crate::media::{
    MediaDetail, MediaItem, MediaKind, Record, ResultPage, TmdbDetailResult, TmdbMediaResult,
    TmdbPageResponse,
};

pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
pub const POSTER_SIZE: &str = "/w342";
pub const POSTER_SIZE_FALLBACK: &str = "/w185";

pub const UNTITLED: &str = "(untitled)";
pub const NO_RATING: &str = "—";
pub const NO_OVERVIEW: &str = "No overview available.";

const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

pub fn title_of(record: &TmdbMediaResult) -> String {
    non_empty(&record.title)
        .or_else(|| non_empty(&record.name))
        .unwrap_or(UNTITLED)
        .to_string()
}

pub fn date_of(record: &TmdbMediaResult) -> &str {
    non_empty(&record.release_date)
        .or_else(|| non_empty(&record.first_air_date))
        .unwrap_or_default()
}

pub fn year_of(record: &TmdbMediaResult) -> String {
    date_of(record).chars().take(4).collect()
}

/// Explicit `media_type` wins; otherwise a movie-style title means movie.
pub fn kind_of(record: &TmdbMediaResult) -> String {
    match non_empty(&record.media_type) {
        Some(tag) => tag.to_string(),
        None if non_empty(&record.title).is_some() => MediaKind::Movie.to_string(),
        None => MediaKind::Tv.to_string(),
    }
}

pub fn rating_of(record: &TmdbMediaResult) -> String {
    format_rating(record.vote_average)
}

pub fn format_rating(vote_average: Option<f64>) -> String {
    match vote_average {
        Some(v) if v != 0.0 && !v.is_nan() => format!("{:.1}", v),
        _ => NO_RATING.to_string(),
    }
}

pub fn poster_url(path: Option<&str>, size: &str) -> String {
    match path.filter(|p| !p.is_empty()) {
        Some(p) => format!("{}{}{}", IMAGE_BASE_URL, size, p),
        None => String::new(),
    }
}

/// Poster at the regular size, else the backdrop at the smaller size.
pub fn display_poster(record: &TmdbMediaResult) -> String {
    let primary = poster_url(record.poster_path.as_deref(), POSTER_SIZE);
    if !primary.is_empty() {
        return primary;
    }
    poster_url(record.backdrop_path.as_deref(), POSTER_SIZE_FALLBACK)
}

pub fn media_item(record: &TmdbMediaResult, kind: MediaKind) -> MediaItem {
    MediaItem {
        id: record.id,
        title: title_of(record),
        year: year_of(record),
        kind,
        rating: rating_of(record),
        poster_url: display_poster(record),
    }
}

pub fn to_record(record: &TmdbMediaResult) -> Record {
    let kind = kind_of(record);
    match MediaKind::from_tag(&kind) {
        Some(media_kind) => Record::Media(media_item(record, media_kind)),
        None => Record::Unlisted {
            id: record.id,
            kind,
        },
    }
}

pub fn to_result_page(response: &TmdbPageResponse) -> ResultPage {
    ResultPage {
        records: response.results.iter().map(to_record).collect(),
        total_pages: response.total_pages.max(1),
    }
}

fn runtime_of(detail: &TmdbDetailResult) -> Option<u32> {
    detail.runtime.filter(|m| *m > 0).or_else(|| {
        detail
            .episode_run_time
            .as_ref()?
            .first()
            .copied()
            .filter(|m| *m > 0)
    })
}

fn trailer_url_of(detail: &TmdbDetailResult) -> Option<String> {
    detail
        .videos
        .as_ref()?
        .results
        .iter()
        .find(|v| v.video_type == "Trailer" && v.site == "YouTube" && !v.key.is_empty())
        .map(|v| format!("{}{}", YOUTUBE_WATCH_URL, v.key))
}

/// `kind` is the kind of the selected entry; detail payloads do not carry
/// a `media_type` tag.
pub fn to_media_detail(detail: &TmdbDetailResult, kind: MediaKind) -> MediaDetail {
    MediaDetail {
        item: media_item(&detail.base, kind),
        tagline: non_empty(&detail.tagline).map(String::from),
        overview: non_empty(&detail.overview).map(String::from),
        genres: detail
            .genres
            .iter()
            .flatten()
            .map(|g| g.name.clone())
            .collect(),
        runtime: runtime_of(detail),
        homepage: non_empty(&detail.homepage).map(String::from),
        trailer_url: trailer_url_of(detail),
    }
}

pub fn overview_text(detail: &MediaDetail) -> &str {
    detail.overview.as_deref().unwrap_or(NO_OVERVIEW)
}
