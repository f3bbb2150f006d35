use iced::Task;

use crate::media::{ApiError, MediaDetail, MediaItem, Message};
use crate::overlay::OverlayState;
use crate::tmdb::CatalogApi;
use crate::Showfinder;

pub fn handle_select_item(app: &mut Showfinder, item: MediaItem) -> Task<Message> {
    let Some(client) = &app.tmdb_client else {
        return Task::none();
    };
    let fetch_client = client.clone();
    let request = app.overlay.open(item);
    tracing::debug!(id = request.id, kind = %request.kind, "opening detail overlay");

    Task::perform(
        async move { fetch_client.detail(request.id, request.kind).await },
        move |result| Message::DetailLoaded(request.ticket, result),
    )
}

pub fn handle_detail_loaded(
    app: &mut Showfinder,
    ticket: u64,
    result: Result<MediaDetail, ApiError>,
) -> Task<Message> {
    if !app.overlay.resolve(ticket, result) {
        tracing::debug!(ticket, "dropping detail response for a dismissed overlay");
        return Task::none();
    }
    match app.overlay.state() {
        OverlayState::Loaded(detail) if !detail.item.poster_url.is_empty() => {
            Task::done(Message::LoadImage(detail.item.poster_url.clone()))
        }
        _ => Task::none(),
    }
}

pub fn handle_close_overlay(app: &mut Showfinder) -> Task<Message> {
    app.overlay.close();
    Task::none()
}

pub fn handle_open_link(url: String) -> Task<Message> {
    if let Err(e) = open::that_detached(&url) {
        tracing::warn!("failed to open {}: {}", url, e);
    }
    Task::none()
}
