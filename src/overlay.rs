use crate::media::{ApiError, MediaDetail, MediaId, MediaItem, MediaKind};

pub const DETAIL_LOAD_FAILED: &str = "Failed to load details. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayState {
    Closed,
    Loading(MediaItem),
    Loaded(MediaDetail),
    Failed(MediaItem),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailRequest {
    pub id: MediaId,
    pub kind: MediaKind,
    pub ticket: u64,
}

#[derive(Debug, Clone)]
pub struct DetailOverlay {
    state: OverlayState,
    ticket: u64,
}

impl Default for DetailOverlay {
    fn default() -> Self {
        Self {
            state: OverlayState::Closed,
            ticket: 0,
        }
    }
}

impl DetailOverlay {
    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, OverlayState::Closed)
    }

    pub fn open(&mut self, item: MediaItem) -> DetailRequest {
        self.ticket += 1;
        let request = DetailRequest {
            id: item.id,
            kind: item.kind,
            ticket: self.ticket,
        };
        self.state = OverlayState::Loading(item);
        request
    }

    /// Returns `false` if the response belongs to an overlay that has since
    /// been closed or reopened for another title.
    pub fn resolve(&mut self, ticket: u64, result: Result<MediaDetail, ApiError>) -> bool {
        if ticket != self.ticket {
            return false;
        }
        let OverlayState::Loading(item) = &self.state else {
            return false;
        };
        self.state = match result {
            Ok(detail) => OverlayState::Loaded(detail),
            Err(e) => {
                tracing::error!("failed to load details for {} {}: {}", item.kind, item.id, e);
                OverlayState::Failed(item.clone())
            }
        };
        true
    }

    pub fn close(&mut self) {
        self.state = OverlayState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: MediaId) -> MediaItem {
        MediaItem {
            id,
            title: String::from("Twin Peaks"),
            year: String::from("1990"),
            kind: MediaKind::Tv,
            rating: String::from("8.1"),
            poster_url: String::new(),
        }
    }

    fn detail(id: MediaId) -> MediaDetail {
        MediaDetail {
            item: item(id),
            tagline: None,
            overview: None,
            genres: vec![String::from("Mystery")],
            runtime: Some(47),
            homepage: None,
            trailer_url: None,
        }
    }

    #[test]
    fn test_open_requests_selected_kind() {
        let mut overlay = DetailOverlay::default();
        let request = overlay.open(item(1920));
        assert_eq!(request.id, 1920);
        assert_eq!(request.kind, MediaKind::Tv);
        assert!(overlay.is_open());
        assert!(matches!(overlay.state(), OverlayState::Loading(_)));
    }

    #[test]
    fn test_failure_then_close() {
        let mut overlay = DetailOverlay::default();
        let request = overlay.open(item(1920));
        assert!(overlay.resolve(request.ticket, Err(ApiError::Status(404))));
        assert_eq!(overlay.state(), &OverlayState::Failed(item(1920)));

        overlay.close();
        assert!(!overlay.is_open());
        assert_eq!(overlay.state(), &OverlayState::Closed);
    }

    #[test]
    fn test_success_loads_detail() {
        let mut overlay = DetailOverlay::default();
        let request = overlay.open(item(1920));
        assert!(overlay.resolve(request.ticket, Ok(detail(1920))));
        assert_eq!(overlay.state(), &OverlayState::Loaded(detail(1920)));
    }

    #[test]
    fn test_response_after_close_is_ignored() {
        let mut overlay = DetailOverlay::default();
        let request = overlay.open(item(1));
        overlay.close();
        assert!(!overlay.resolve(request.ticket, Ok(detail(1))));
        assert!(!overlay.is_open());
    }

    #[test]
    fn test_response_for_previous_selection_is_ignored() {
        let mut overlay = DetailOverlay::default();
        let first = overlay.open(item(1));
        overlay.close();
        let second = overlay.open(item(2));

        assert!(!overlay.resolve(first.ticket, Ok(detail(1))));
        assert!(overlay.resolve(second.ticket, Ok(detail(2))));
        assert_eq!(overlay.state(), &OverlayState::Loaded(detail(2)));
    }
}
