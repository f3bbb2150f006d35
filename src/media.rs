use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use iced::widget::image::Handle;
use iced::Color;
use serde::Deserialize;
use thiserror::Error;

use crate::browse::PageRequest;

fn simple_hash(s: &str) -> String {
    let mut hash: u64 = 5381;
    for byte in s.bytes() {
        hash = hash.wrapping_mul(33).wrapping_add(byte as u64);
    }
    format!("{:016x}", hash)
}

fn get_cache_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "showfinder").map(|dirs| dirs.cache_dir().join("images"))
}

pub const BACKGROUND_BLACK: Color = Color::from_rgb(0.0, 0.0, 0.0);
pub const SURFACE_DARK_GRAY: Color = Color::from_rgb(0.078, 0.078, 0.078);
pub const ACCENT_RED: Color = Color::from_rgb(0.898, 0.035, 0.078);
pub const RATING_GOLD: Color = Color::from_rgb(0.96, 0.77, 0.09);
pub const TEXT_WHITE: Color = Color::from_rgb(1.0, 1.0, 1.0);
pub const TEXT_GRAY: Color = Color::from_rgb(0.702, 0.702, 0.702);

pub type MediaId = u64;

/// Kind of a displayable title. Anything else the API returns (people,
/// collections) never becomes a `MediaItem`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "movie" => Some(MediaKind::Movie),
            "tv" => Some(MediaKind::Tv),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Movie => "MOVIE",
            MediaKind::Tv => "TV",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Which search endpoint a query goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchKind {
    #[default]
    All,
    Movie,
    Tv,
}

impl SearchKind {
    pub const ALL: [SearchKind; 3] = [SearchKind::All, SearchKind::Movie, SearchKind::Tv];

    pub fn endpoint(&self) -> &'static str {
        match self {
            SearchKind::All => "/search/multi",
            SearchKind::Movie => "/search/movie",
            SearchKind::Tv => "/search/tv",
        }
    }

    /// Query parameter carrying the year filter; combined search has none.
    pub fn year_param(&self) -> Option<&'static str> {
        match self {
            SearchKind::All => None,
            SearchKind::Movie => Some("year"),
            SearchKind::Tv => Some("first_air_date_year"),
        }
    }
}

impl std::fmt::Display for SearchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchKind::All => write!(f, "All"),
            SearchKind::Movie => write!(f, "Movies"),
            SearchKind::Tv => write!(f, "TV"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    pub id: MediaId,
    pub title: String,
    pub year: String,
    pub kind: MediaKind,
    pub rating: String,
    pub poster_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaDetail {
    pub item: MediaItem,
    pub tagline: Option<String>,
    pub overview: Option<String>,
    pub genres: Vec<String>,
    pub runtime: Option<u32>,
    pub homepage: Option<String>,
    pub trailer_url: Option<String>,
}

/// One entry of a result page after it has crossed the mapper boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Media(MediaItem),
    Unlisted { id: MediaId, kind: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultPage {
    pub records: Vec<Record>,
    pub total_pages: u32,
}

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, Clone, Default)]
pub struct ImageCache {
    cache: HashMap<String, Handle>,
    pending: HashSet<String>,
    cache_directory: Option<PathBuf>,
}

impl ImageCache {
    pub fn new() -> Self {
        let cache_directory = get_cache_dir();
        if let Some(ref dir) = cache_directory {
            if let Err(e) = std::fs::create_dir_all(dir) {
                tracing::debug!("image cache dir {} unavailable: {}", dir.display(), e);
            }
        }
        Self {
            cache: HashMap::new(),
            pending: HashSet::new(),
            cache_directory,
        }
    }

    pub fn get(&self, url: &str) -> Option<&Handle> {
        self.cache.get(url)
    }

    pub fn insert(&mut self, url: String, handle: Handle) {
        self.pending.remove(&url);
        self.cache.insert(url, handle);
    }

    pub fn is_pending(&self, url: &str) -> bool {
        self.pending.contains(url)
    }

    pub fn mark_pending(&mut self, url: String) {
        self.pending.insert(url);
    }

    pub fn clear_pending(&mut self, url: &str) {
        self.pending.remove(url);
    }

    pub fn get_cache_path(&self, url: &str) -> Option<PathBuf> {
        self.cache_directory
            .as_ref()
            .map(|dir| dir.join(simple_hash(url)))
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Setup(crate::settings::SetupMessage),
    QueryChanged(String),
    KindSelected(SearchKind),
    YearChanged(String),
    SearchSubmit,
    ShowTrending,
    LoadMore,
    PageLoaded(PageRequest, Result<ResultPage, ApiError>),
    SelectItem(MediaItem),
    DetailLoaded(u64, Result<MediaDetail, ApiError>),
    CloseOverlay,
    OpenLink(String),
    LoadImage(String),
    ImageLoaded(String, Result<Handle, String>),
}

/// A trending or search hit as the API sends it. Movies carry `title` and
/// `release_date`, series carry `name` and `first_air_date`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbMediaResult {
    pub id: u64,
    pub title: Option<String>,
    pub name: Option<String>,
    pub media_type: Option<String>,
    pub vote_average: Option<f64>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbPageResponse {
    pub page: u32,
    pub results: Vec<TmdbMediaResult>,
    pub total_pages: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Genre {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrailerVideo {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub video_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VideosResponse {
    pub results: Vec<TrailerVideo>,
}

/// `/movie/{id}` or `/tv/{id}` with `append_to_response=videos`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbDetailResult {
    #[serde(flatten)]
    pub base: TmdbMediaResult,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub genres: Option<Vec<Genre>>,
    pub runtime: Option<u32>,
    pub episode_run_time: Option<Vec<u32>>,
    pub homepage: Option<String>,
    pub videos: Option<VideosResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_kind_year_param() {
        assert_eq!(SearchKind::All.year_param(), None);
        assert_eq!(SearchKind::Movie.year_param(), Some("year"));
        assert_eq!(SearchKind::Tv.year_param(), Some("first_air_date_year"));
    }

    #[test]
    fn test_media_kind_from_tag() {
        assert_eq!(MediaKind::from_tag("movie"), Some(MediaKind::Movie));
        assert_eq!(MediaKind::from_tag("tv"), Some(MediaKind::Tv));
        assert_eq!(MediaKind::from_tag("person"), None);
    }

    #[test]
    fn test_deserialize_detail_with_videos() {
        let json = r#"{
            "id": 268,
            "title": "Batman",
            "release_date": "1989-06-23",
            "vote_average": 7.2,
            "runtime": 126,
            "genres": [{"id": 14, "name": "Fantasy"}, {"id": 28, "name": "Action"}],
            "homepage": "",
            "production_budget": 35000000,
            "videos": {"results": [{"key": "abc", "site": "YouTube", "type": "Trailer"}]}
        }"#;

        let detail: TmdbDetailResult = serde_json::from_str(json).unwrap();
        assert_eq!(detail.base.id, 268);
        assert_eq!(detail.base.title.as_deref(), Some("Batman"));
        assert_eq!(detail.runtime, Some(126));
        assert_eq!(detail.genres.unwrap().len(), 2);
        assert_eq!(detail.videos.unwrap().results[0].video_type, "Trailer");
    }

    #[test]
    fn test_deserialize_page_tolerates_missing_fields() {
        let json = r#"{"results": [{"id": 1, "media_type": "person", "name": "Adam West"}]}"#;
        let page: TmdbPageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.total_pages, 0);
        assert!(page.results[0].vote_average.is_none());
    }

    #[test]
    fn test_image_cache_pending_cleared_on_insert() {
        let mut cache = ImageCache::default();
        let url = String::from("https://image.tmdb.org/t/p/w342/a.jpg");
        cache.mark_pending(url.clone());
        assert!(cache.is_pending(&url));

        cache.insert(url.clone(), Handle::from_bytes(vec![0u8; 4]));
        assert!(!cache.is_pending(&url));
        assert!(cache.get(&url).is_some());
    }
}
