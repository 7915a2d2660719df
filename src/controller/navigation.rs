//! Navigation-related controller methods (search, video list, selection)

use crate::model::{ActiveSection, KeyValueStorage, VideoEntry, VideoId};
use crate::player::PlayerSdk;

use super::AppController;

impl<S: PlayerSdk, K: KeyValueStorage> AppController<S, K> {
    /// Catalog entries matching the current search query.
    pub fn visible_videos(&self) -> Vec<&VideoEntry> {
        self.catalog.search(&self.ui.search_query)
    }

    pub fn current_entry(&self) -> Option<&VideoEntry> {
        self.current.as_ref().and_then(|id| self.catalog.get(id))
    }

    /// Binds the player and the trim range to `id`.
    pub fn select_video(&mut self, id: &VideoId) {
        self.end_drag();
        if self.current.as_ref() != Some(id) {
            tracing::info!(video_id = %id, "Video selected");
        }
        self.current = Some(id.clone());
        self.trim.select(Some(id));
        self.player.initialize(id);
    }

    /// Selects the highlighted entry of the video list.
    pub fn select_highlighted(&mut self) {
        let id = self
            .visible_videos()
            .get(self.ui.video_selected)
            .map(|entry| entry.id.clone());
        if let Some(id) = id {
            self.select_video(&id);
            self.ui.active_section = ActiveSection::Player;
        }
    }

    /// Selects the first catalog entry, used on startup.
    pub fn select_first(&mut self) {
        let id = self.visible_videos().first().map(|entry| entry.id.clone());
        if let Some(id) = id {
            self.ui.video_selected = 0;
            self.select_video(&id);
        }
    }

    pub fn move_selection_up(&mut self) {
        self.ui.video_selected = self.ui.video_selected.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self) {
        let count = self.visible_videos().len();
        if self.ui.video_selected + 1 < count {
            self.ui.video_selected += 1;
        }
    }

    pub fn append_to_search(&mut self, c: char) {
        self.ui.search_query.push(c);
        self.ui.video_selected = 0;
        self.follow_search_results();
    }

    pub fn backspace_search(&mut self) {
        self.ui.search_query.pop();
        self.ui.video_selected = 0;
        self.follow_search_results();
    }

    pub fn clear_search(&mut self) {
        self.ui.search_query.clear();
        self.ui.video_selected = 0;
        self.follow_search_results();
    }

    /// Switches to the first result when the current video is filtered out.
    /// An empty result list leaves the current video playing.
    fn follow_search_results(&mut self) {
        let visible = self.visible_videos();
        let Some(first) = visible.first() else {
            return;
        };
        let still_listed = self
            .current
            .as_ref()
            .is_some_and(|current| visible.iter().any(|entry| &entry.id == current));
        if !still_listed {
            let id = first.id.clone();
            self.select_video(&id);
        }
    }

    /// Leaves the search box for the filtered list.
    pub fn submit_search(&mut self) {
        let results = self.visible_videos().len();
        tracing::debug!(query = %self.ui.search_query, results, "Search submitted");
        self.ui.video_selected = 0;
        self.ui.active_section = ActiveSection::Videos;
    }

    pub fn cycle_section_forward(&mut self) {
        self.ui.active_section = self.ui.active_section.next();
    }

    pub fn cycle_section_backward(&mut self) {
        self.ui.active_section = self.ui.active_section.prev();
    }
}
