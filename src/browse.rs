//! Paging and mode state for the result grid.
//!
//! Transitions return the `PageRequest` the caller should run. Each request
//! carries the generation it was issued under; `resolve` drops responses
//! from an older generation so a slow trending page cannot overwrite a
//! newer search.

use crate::media::{ApiError, Record, ResultPage, SearchKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub query: String,
    pub kind: SearchKind,
    pub year: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Trending,
    Searching(SearchParams),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageQuery {
    Trending,
    Search(SearchParams),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub query: PageQuery,
    pub page: u32,
    pub append: bool,
    pub generation: u64,
}

/// What the result list should do with a finished request.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Stale,
    Render { records: Vec<Record>, append: bool },
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct BrowseState {
    mode: Mode,
    current_page: u32,
    total_pages: u32,
    generation: u64,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self {
            mode: Mode::Idle,
            current_page: 1,
            total_pages: 1,
            generation: 0,
        }
    }
}

impl BrowseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn enter_trending(&mut self) -> PageRequest {
        tracing::info!("entering trending mode");
        self.mode = Mode::Trending;
        self.restart(PageQuery::Trending)
    }

    /// Returns `None` when the trimmed query is empty.
    pub fn search(&mut self, query: &str, kind: SearchKind, year: Option<u16>) -> Option<PageRequest> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        let params = SearchParams {
            query: query.to_string(),
            kind,
            year,
        };
        tracing::info!(query, %kind, ?year, "searching");
        self.mode = Mode::Searching(params.clone());
        Some(self.restart(PageQuery::Search(params)))
    }

    pub fn load_more(&mut self) -> Option<PageRequest> {
        let query = match &self.mode {
            Mode::Idle => return None,
            Mode::Trending => PageQuery::Trending,
            Mode::Searching(params) => PageQuery::Search(params.clone()),
        };
        if self.current_page >= self.total_pages {
            return None;
        }
        self.current_page += 1;
        tracing::debug!(page = self.current_page, total = self.total_pages, "loading more");
        Some(PageRequest {
            query,
            page: self.current_page,
            append: true,
            generation: self.generation,
        })
    }

    pub fn is_current(&self, request: &PageRequest) -> bool {
        request.generation == self.generation
    }

    /// Folds a finished request back into the state. A failed load-more
    /// keeps its advanced page counter.
    pub fn resolve(
        &mut self,
        request: &PageRequest,
        result: Result<ResultPage, ApiError>,
    ) -> Resolution {
        if !self.is_current(request) {
            tracing::debug!(
                page = request.page,
                generation = request.generation,
                current = self.generation,
                "discarding stale page"
            );
            return Resolution::Stale;
        }

        match (result, request.append) {
            (Ok(page), false) => {
                self.total_pages = page.total_pages.max(1);
                Resolution::Render {
                    records: page.records,
                    append: false,
                }
            }
            (Ok(page), true) => Resolution::Render {
                records: page.records,
                append: true,
            },
            (Err(e), false) => {
                tracing::warn!("failed to load page {}: {}", request.page, e);
                self.total_pages = 1;
                Resolution::Render {
                    records: Vec::new(),
                    append: false,
                }
            }
            (Err(e), true) => {
                tracing::warn!("failed to load more (page {}): {}", request.page, e);
                Resolution::Unchanged
            }
        }
    }

    /// Until the fresh page reports its total, there is nothing to load more of.
    fn restart(&mut self, query: PageQuery) -> PageRequest {
        self.generation += 1;
        self.current_page = 1;
        self.total_pages = 1;
        PageRequest {
            query,
            page: 1,
            append: false,
            generation: self.generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::media::{MediaDetail, MediaItem, MediaKind};
    use crate::results::ResultList;
    use crate::tmdb::{fetch_page, CatalogApi};

    fn item(id: u64) -> Record {
        Record::Media(MediaItem {
            id,
            title: format!("Title {}", id),
            year: String::from("1989"),
            kind: MediaKind::Movie,
            rating: String::from("7.0"),
            poster_url: String::new(),
        })
    }

    fn page(ids: &[u64], total_pages: u32) -> ResultPage {
        ResultPage {
            records: ids.iter().copied().map(item).collect(),
            total_pages,
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Trending(u32),
        Search(String, SearchKind, Option<u16>, u32),
    }

    struct FakeCatalog {
        calls: Mutex<Vec<Call>>,
        total_pages: u32,
        fail: bool,
    }

    impl FakeCatalog {
        fn new(total_pages: u32) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                total_pages,
                fail: false,
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn respond(&self, page_number: u32) -> Result<ResultPage, ApiError> {
            if self.fail {
                return Err(ApiError::Status(500));
            }
            let first = u64::from(page_number) * 10;
            Ok(page(&[first, first + 1], self.total_pages))
        }
    }

    #[async_trait]
    impl CatalogApi for FakeCatalog {
        async fn trending(&self, page: u32) -> Result<ResultPage, ApiError> {
            self.calls.lock().unwrap().push(Call::Trending(page));
            self.respond(page)
        }

        async fn search(
            &self,
            query: &str,
            kind: SearchKind,
            year: Option<u16>,
            page: u32,
        ) -> Result<ResultPage, ApiError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Search(query.to_string(), kind, year, page));
            self.respond(page)
        }

        async fn detail(&self, _id: u64, _kind: MediaKind) -> Result<MediaDetail, ApiError> {
            Err(ApiError::Status(404))
        }
    }

    async fn run(
        catalog: &FakeCatalog,
        state: &mut BrowseState,
        list: &mut ResultList,
        request: PageRequest,
    ) {
        let result = fetch_page(catalog, &request).await;
        if let Resolution::Render { records, append } = state.resolve(&request, result) {
            list.render(records, append, state);
        }
    }

    #[test]
    fn test_empty_query_is_suppressed() {
        let mut state = BrowseState::new();
        assert!(state.search("   ", SearchKind::All, None).is_none());
        assert_eq!(state.mode(), &Mode::Idle);
    }

    #[test]
    fn test_search_trims_query() {
        let mut state = BrowseState::new();
        let request = state.search("  batman ", SearchKind::Movie, None).unwrap();
        match request.query {
            PageQuery::Search(params) => assert_eq!(params.query, "batman"),
            other => panic!("unexpected query {:?}", other),
        }
    }

    #[test]
    fn test_load_more_is_noop_on_last_page() {
        let mut state = BrowseState::new();
        let request = state.enter_trending();
        state.resolve(&request, Ok(page(&[1], 1)));

        let before = state.clone();
        assert!(state.load_more().is_none());
        assert_eq!(state.current_page(), before.current_page());
        assert_eq!(state.total_pages(), before.total_pages());
        assert_eq!(state.mode(), before.mode());
    }

    #[test]
    fn test_load_more_while_idle_does_nothing() {
        let mut state = BrowseState::new();
        assert!(state.load_more().is_none());
        assert_eq!(state.current_page(), 1);
    }

    #[tokio::test]
    async fn test_search_then_load_more_appends_same_params() {
        let catalog = FakeCatalog::new(5);
        let mut state = BrowseState::new();
        let mut list = ResultList::default();

        let request = state.search("batman", SearchKind::Movie, Some(1989)).unwrap();
        run(&catalog, &mut state, &mut list, request).await;

        assert_eq!(
            state.mode(),
            &Mode::Searching(SearchParams {
                query: String::from("batman"),
                kind: SearchKind::Movie,
                year: Some(1989),
            })
        );
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.total_pages(), 5);
        assert!(list.load_more_visible());
        assert_eq!(list.entries().len(), 2);

        let request = state.load_more().unwrap();
        run(&catalog, &mut state, &mut list, request).await;

        assert_eq!(
            catalog.calls(),
            vec![
                Call::Search(String::from("batman"), SearchKind::Movie, Some(1989), 1),
                Call::Search(String::from("batman"), SearchKind::Movie, Some(1989), 2),
            ]
        );
        let ids: Vec<u64> = list.entries().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![10, 11, 20, 21]);
        assert_eq!(state.current_page(), 2);
    }

    #[tokio::test]
    async fn test_enter_trending_resets_after_search() {
        let catalog = FakeCatalog::new(3);
        let mut state = BrowseState::new();
        let mut list = ResultList::default();

        let request = state.search("alien", SearchKind::All, None).unwrap();
        run(&catalog, &mut state, &mut list, request).await;
        let request = state.load_more().unwrap();
        run(&catalog, &mut state, &mut list, request).await;
        assert_eq!(state.current_page(), 2);

        let request = state.enter_trending();
        assert_eq!(request.page, 1);
        run(&catalog, &mut state, &mut list, request).await;
        assert_eq!(state.mode(), &Mode::Trending);
        assert_eq!(state.current_page(), 1);

        let request = state.load_more().unwrap();
        assert_eq!(request.query, PageQuery::Trending);
        run(&catalog, &mut state, &mut list, request).await;
        assert_eq!(catalog.calls().last(), Some(&Call::Trending(2)));
    }

    #[tokio::test]
    async fn test_failed_fresh_load_shows_empty_state() {
        let mut catalog = FakeCatalog::new(4);
        catalog.fail = true;
        let mut state = BrowseState::new();
        let mut list = ResultList::default();

        let request = state.enter_trending();
        run(&catalog, &mut state, &mut list, request).await;

        assert!(list.entries().is_empty());
        assert!(list.empty_visible());
        assert!(!list.load_more_visible());
        assert_eq!(state.total_pages(), 1);
        assert!(state.load_more().is_none());
    }

    #[test]
    fn test_failed_load_more_keeps_list_and_page() {
        let mut state = BrowseState::new();
        let mut list = ResultList::default();

        let request = state.enter_trending();
        if let Resolution::Render { records, append } = state.resolve(&request, Ok(page(&[1, 2], 3))) {
            list.render(records, append, &state);
        }

        let request = state.load_more().unwrap();
        let resolution = state.resolve(&request, Err(ApiError::Network(String::from("reset"))));
        assert_eq!(resolution, Resolution::Unchanged);
        assert_eq!(list.entries().len(), 2);
        assert_eq!(state.current_page(), 2);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut state = BrowseState::new();
        let trending = state.enter_trending();
        let search = state.search("dune", SearchKind::Movie, None).unwrap();

        assert_eq!(state.resolve(&trending, Ok(page(&[1], 9))), Resolution::Stale);
        assert_eq!(state.total_pages(), 1);

        let resolution = state.resolve(&search, Ok(page(&[2], 2)));
        assert!(matches!(resolution, Resolution::Render { append: false, .. }));
        assert_eq!(state.total_pages(), 2);
    }

    #[test]
    fn test_load_more_from_previous_mode_is_stale() {
        let mut state = BrowseState::new();
        let request = state.enter_trending();
        state.resolve(&request, Ok(page(&[1], 4)));
        let more = state.load_more().unwrap();

        state.search("heat", SearchKind::Movie, None).unwrap();
        assert_eq!(state.resolve(&more, Ok(page(&[2], 4))), Resolution::Stale);
        assert_eq!(state.current_page(), 1);
    }

    #[tokio::test]
    async fn test_load_more_before_fresh_page_arrives() {
        let catalog = FakeCatalog::new(5);
        let mut state = BrowseState::new();
        let mut list = ResultList::default();

        let request = state.search("batman", SearchKind::Movie, None).unwrap();
        run(&catalog, &mut state, &mut list, request).await;
        assert!(list.load_more_visible());

        let fresh = state.enter_trending();
        list.sync_load_more(&state);
        assert!(!list.load_more_visible());
        assert!(state.load_more().is_none());
        assert_eq!(state.current_page(), 1);

        state.resolve(&fresh, Ok(page(&[1], 1)));
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.total_pages(), 1);
        assert!(state.current_page() <= state.total_pages());
    }

    #[test]
    fn test_restart_resets_total_pages() {
        let mut state = BrowseState::new();
        let request = state.enter_trending();
        state.resolve(&request, Ok(page(&[1], 7)));
        assert_eq!(state.total_pages(), 7);

        state.search("heat", SearchKind::Movie, None).unwrap();
        assert_eq!(state.total_pages(), 1);
        assert!(!state.has_more());
    }
}
