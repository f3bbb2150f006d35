use iced::Task;

use crate::browse::{PageRequest, Resolution};
use crate::detail_handlers;
use crate::media::{ApiError, MediaItem, Message, ResultPage, SearchKind};
use crate::tmdb::{fetch_image_bytes, fetch_page};
use crate::Showfinder;

pub fn handle_message(app: &mut Showfinder, message: Message) -> Task<Message> {
    match message {
        Message::Setup(_) => Task::none(),
        Message::QueryChanged(query) => {
            app.search_form.query = query;
            Task::none()
        }
        Message::KindSelected(kind) => handle_kind_selected(app, kind),
        Message::YearChanged(year) => {
            app.search_form.year = year;
            Task::none()
        }
        Message::SearchSubmit => handle_search_submit(app),
        Message::ShowTrending => handle_show_trending(app),
        Message::LoadMore => handle_load_more(app),
        Message::PageLoaded(request, result) => handle_page_loaded(app, request, result),
        Message::SelectItem(item) => detail_handlers::handle_select_item(app, item),
        Message::DetailLoaded(ticket, result) => {
            detail_handlers::handle_detail_loaded(app, ticket, result)
        }
        Message::CloseOverlay => detail_handlers::handle_close_overlay(app),
        Message::OpenLink(url) => detail_handlers::handle_open_link(url),
        Message::LoadImage(url) => handle_load_image(app, url),
        Message::ImageLoaded(url, result) => handle_image_loaded(app, url, result),
    }
}

fn handle_kind_selected(app: &mut Showfinder, kind: SearchKind) -> Task<Message> {
    app.search_form.kind = kind;
    Task::none()
}

fn handle_search_submit(app: &mut Showfinder) -> Task<Message> {
    let kind = app.search_form.kind;
    let year = app.search_form.year_filter();
    match app.browse.search(&app.search_form.query, kind, year) {
        Some(request) => {
            app.results.sync_load_more(&app.browse);
            run_page_request(app, request)
        }
        None => Task::none(),
    }
}

fn handle_show_trending(app: &mut Showfinder) -> Task<Message> {
    let request = app.browse.enter_trending();
    app.results.sync_load_more(&app.browse);
    run_page_request(app, request)
}

fn handle_load_more(app: &mut Showfinder) -> Task<Message> {
    match app.browse.load_more() {
        Some(request) => run_page_request(app, request),
        None => Task::none(),
    }
}

fn run_page_request(app: &Showfinder, request: PageRequest) -> Task<Message> {
    let Some(client) = &app.tmdb_client else {
        return Task::none();
    };
    let fetch_client = client.clone();
    Task::perform(
        async move {
            let result = fetch_page(&fetch_client, &request).await;
            (request, result)
        },
        |(request, result)| Message::PageLoaded(request, result),
    )
}

fn handle_page_loaded(
    app: &mut Showfinder,
    request: PageRequest,
    result: Result<ResultPage, ApiError>,
) -> Task<Message> {
    match app.browse.resolve(&request, result) {
        Resolution::Render { records, append } => {
            tracing::debug!(
                page = app.browse.current_page(),
                total_pages = app.browse.total_pages(),
                append,
                "rendering page"
            );
            let first_new = if append { app.results.entries().len() } else { 0 };
            app.results.render(records, append, &app.browse);
            load_poster_images(app, &app.results.entries()[first_new..])
        }
        Resolution::Stale | Resolution::Unchanged => Task::none(),
    }
}

pub fn load_poster_images(app: &Showfinder, items: &[MediaItem]) -> Task<Message> {
    let tasks: Vec<Task<Message>> = items
        .iter()
        .filter(|item| !item.poster_url.is_empty())
        .filter(|item| app.image_cache.get(&item.poster_url).is_none())
        .map(|item| Task::done(Message::LoadImage(item.poster_url.clone())))
        .collect();
    Task::batch(tasks)
}

fn handle_image_loaded(
    app: &mut Showfinder,
    url: String,
    result: Result<iced::widget::image::Handle, String>,
) -> Task<Message> {
    match result {
        Ok(handle) => app.image_cache.insert(url, handle),
        Err(e) => {
            tracing::debug!("image {} failed: {}", url, e);
            app.image_cache.clear_pending(&url);
        }
    }
    Task::none()
}

fn handle_load_image(app: &mut Showfinder, url: String) -> Task<Message> {
    if app.image_cache.get(&url).is_some() || app.image_cache.is_pending(&url) {
        return Task::none();
    }
    app.image_cache.mark_pending(url.clone());
    let image_url = url.clone();
    let cache_path = app.image_cache.get_cache_path(&url);

    Task::perform(
        async move {
            if let Some(ref path) = cache_path {
                if let Ok(bytes) = tokio::fs::read(path).await {
                    return (image_url, Ok(bytes));
                }
            }
            let bytes = fetch_image_bytes(image_url.clone()).await;
            if let (Ok(data), Some(path)) = (&bytes, &cache_path) {
                if let Err(e) = tokio::fs::write(path, data).await {
                    tracing::debug!("could not cache {}: {}", path.display(), e);
                }
            }
            (image_url, bytes)
        },
        |(url, result)| match result {
            Ok(bytes) => {
                Message::ImageLoaded(url, Ok(iced::widget::image::Handle::from_bytes(bytes)))
            }
            Err(error) => Message::ImageLoaded(url, Err(error)),
        },
    )
}
