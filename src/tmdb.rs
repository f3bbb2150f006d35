use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::browse::{PageQuery, PageRequest};
use crate::mapper;
use crate::media::{
    ApiError, MediaDetail, MediaId, MediaKind, ResultPage, SearchKind, TmdbDetailResult,
    TmdbPageResponse,
};
use crate::settings::AppSettings;

pub const DEFAULT_API_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// The three upstream queries the browser needs.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// One page of the rolling weekly trending feed across movies and TV.
    async fn trending(&self, page: u32) -> Result<ResultPage, ApiError>;

    /// `query` must already be trimmed and non-empty.
    async fn search(
        &self,
        query: &str,
        kind: SearchKind,
        year: Option<u16>,
        page: u32,
    ) -> Result<ResultPage, ApiError>;

    /// Full record for one title with its video list embedded.
    async fn detail(&self, id: MediaId, kind: MediaKind) -> Result<MediaDetail, ApiError>;
}

pub async fn fetch_page<C: CatalogApi + ?Sized>(
    catalog: &C,
    request: &PageRequest,
) -> Result<ResultPage, ApiError> {
    match &request.query {
        PageQuery::Trending => catalog.trending(request.page).await,
        PageQuery::Search(params) => {
            catalog
                .search(&params.query, params.kind, params.year, request.page)
                .await
        }
    }
}

pub async fn fetch_image_bytes(url: String) -> Result<Vec<u8>, String> {
    reqwest::get(&url)
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?
        .bytes()
        .await
        .map(|b| b.to_vec())
        .map_err(|e| e.to_string())
}

#[derive(Clone)]
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    language: String,
    http_client: Arc<reqwest::Client>,
}

impl TmdbClient {
    pub fn new(api_key: String, language: String) -> Self {
        Self::with_base_url(api_key, language, String::from(DEFAULT_API_BASE_URL))
    }

    pub fn with_base_url(api_key: String, language: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            language,
            http_client: Arc::new(reqwest::Client::new()),
        }
    }

    pub fn from_settings(settings: &AppSettings) -> Self {
        let language = if settings.language.is_empty() {
            String::from(DEFAULT_LANGUAGE)
        } else {
            settings.language.clone()
        };
        Self::with_base_url(
            settings.api_key.clone(),
            language,
            settings.api_base_url.clone(),
        )
    }

    fn build_url(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, endpoint))
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("api_key", &self.api_key);
            query.append_pair("language", &self.language);
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }

    pub fn trending_url(&self, page: u32) -> Result<Url, ApiError> {
        self.build_url("/trending/all/week", &[("page", page.to_string())])
    }

    pub fn search_url(
        &self,
        query: &str,
        kind: SearchKind,
        year: Option<u16>,
        page: u32,
    ) -> Result<Url, ApiError> {
        let mut params = vec![
            ("include_adult", String::from("false")),
            ("page", page.to_string()),
            ("query", query.to_string()),
        ];
        if let (Some(param), Some(year)) = (kind.year_param(), year) {
            params.push((param, year.to_string()));
        }
        self.build_url(kind.endpoint(), &params)
    }

    pub fn detail_url(&self, id: MediaId, kind: MediaKind) -> Result<Url, ApiError> {
        self.build_url(
            &format!("/{}/{}", kind.path(), id),
            &[("append_to_response", String::from("videos"))],
        )
    }

    async fn fetch_response(&self, url: Url) -> Result<reqwest::Response, ApiError> {
        tracing::debug!(path = url.path(), "GET");
        let response = self
            .http_client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| ApiError::Network(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        Ok(response)
    }

    async fn fetch_json<T: for<'de> Deserialize<'de>>(&self, url: Url) -> Result<T, ApiError> {
        self.fetch_response(url)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.without_url().to_string()))
    }

    async fn fetch_result_page(&self, url: Url) -> Result<ResultPage, ApiError> {
        let response: TmdbPageResponse = self.fetch_json(url).await?;
        tracing::debug!(
            page = response.page,
            total_pages = response.total_pages,
            results = response.results.len(),
            "received result page"
        );
        Ok(mapper::to_result_page(&response))
    }
}

#[async_trait]
impl CatalogApi for TmdbClient {
    async fn trending(&self, page: u32) -> Result<ResultPage, ApiError> {
        self.fetch_result_page(self.trending_url(page)?).await
    }

    async fn search(
        &self,
        query: &str,
        kind: SearchKind,
        year: Option<u16>,
        page: u32,
    ) -> Result<ResultPage, ApiError> {
        self.fetch_result_page(self.search_url(query, kind, year, page)?)
            .await
    }

    async fn detail(&self, id: MediaId, kind: MediaKind) -> Result<MediaDetail, ApiError> {
        let result: TmdbDetailResult = self.fetch_json(self.detail_url(id, kind)?).await?;
        Ok(mapper::to_media_detail(&result, kind))
    }
}
