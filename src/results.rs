use crate::browse::BrowseState;
use crate::media::{MediaItem, Record};

/// The entries currently on the grid plus the two indicators around it.
#[derive(Debug, Clone, Default)]
pub struct ResultList {
    entries: Vec<MediaItem>,
    empty_visible: bool,
    load_more_visible: bool,
}

impl ResultList {
    pub fn entries(&self) -> &[MediaItem] {
        &self.entries
    }

    pub fn empty_visible(&self) -> bool {
        self.empty_visible
    }

    pub fn load_more_visible(&self) -> bool {
        self.load_more_visible
    }

    /// Re-reads load-more visibility after the state restarted without a
    /// render.
    pub fn sync_load_more(&mut self, state: &BrowseState) {
        self.load_more_visible = state.has_more();
    }

    /// Replaces (or extends, with `append`) the grid. Records that are not
    /// movies or series still count toward upstream paging but are never
    /// shown.
    pub fn render(&mut self, records: Vec<Record>, append: bool, state: &BrowseState) {
        if !append {
            self.entries.clear();
            if records.is_empty() {
                self.empty_visible = true;
                self.load_more_visible = false;
                return;
            }
        }
        self.empty_visible = false;

        let before = self.entries.len();
        self.entries
            .extend(records.into_iter().filter_map(|record| match record {
                Record::Media(item) => Some(item),
                Record::Unlisted { id, kind } => {
                    tracing::trace!(id, kind = %kind, "skipping non-media result");
                    None
                }
            }));
        tracing::debug!(
            added = self.entries.len() - before,
            total = self.entries.len(),
            append,
            "rendered results"
        );

        self.load_more_visible = state.has_more();
    }
}
