//! Trim range of the active video and its persistence policy

use crate::model::{KeyValueStorage, TrimRange, TrimStore, VideoId};

/// Owns the trim range of the active video.
///
/// Every settled change is written through the [`TrimStore`]: the full range
/// clears the record, anything else saves it. Writes are held back while a
/// drag is in progress and happen once when it ends.
pub struct TrimController<K> {
    store: TrimStore<K>,
    video_id: Option<VideoId>,
    range: TrimRange,
    loaded: bool,
    dragging: bool,
}

impl<K: KeyValueStorage> TrimController<K> {
    pub fn new(store: TrimStore<K>) -> Self {
        Self {
            store,
            video_id: None,
            range: TrimRange::FULL,
            loaded: false,
            dragging: false,
        }
    }

    pub fn range(&self) -> TrimRange {
        self.range
    }

    pub fn video_id(&self) -> Option<&VideoId> {
        self.video_id.as_ref()
    }

    /// Whether the current range came from a stored record.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn store(&self) -> &TrimStore<K> {
        &self.store
    }

    /// Switches to `id`, starting from the full range before any stored one applies.
    pub fn select(&mut self, id: Option<&VideoId>) {
        let Some(id) = id else {
            self.range = TrimRange::FULL;
            self.loaded = false;
            self.video_id = None;
            return;
        };
        if self.video_id.as_ref() == Some(id) {
            return;
        }

        self.range = TrimRange::FULL;
        self.loaded = false;
        self.video_id = Some(id.clone());

        if let Some(stored) = self.store.load(id) {
            tracing::debug!(video_id = %id, start = stored.start, end = stored.end, "Loaded stored trim");
            self.range = stored;
            self.loaded = true;
        }
    }

    pub fn set_start(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        let start = self.range.clamp_start(value);
        if start != self.range.start {
            self.range.start = start;
            self.persist();
        }
    }

    pub fn set_end(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        let end = self.range.clamp_end(value);
        if end != self.range.end {
            self.range.end = end;
            self.persist();
        }
    }

    pub fn reset(&mut self) {
        self.range = TrimRange::FULL;
        self.persist();
    }

    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    pub fn end_drag(&mut self) {
        if self.dragging {
            self.dragging = false;
            self.persist();
        }
    }

    fn persist(&mut self) {
        if self.dragging {
            return;
        }
        let Some(id) = self.video_id.as_ref() else {
            return;
        };
        if self.range.is_full() {
            self.store.clear(id);
        } else {
            self.store.save(id, self.range);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MemoryStorage, MIN_SEGMENT};

    fn controller() -> TrimController<MemoryStorage> {
        TrimController::new(TrimStore::new(MemoryStorage::new()))
    }

    fn stored(controller: &TrimController<MemoryStorage>, id: &str) -> Option<TrimRange> {
        controller.store().load(&VideoId::new(id))
    }

    #[test]
    fn edits_are_clamped_against_the_other_bound() {
        let mut trim = controller();
        trim.select(Some(&VideoId::new("a")));

        trim.set_end(30.0);
        trim.set_start(40.0);
        assert_eq!(trim.range(), TrimRange { start: 25.0, end: 30.0 });

        trim.set_end(-10.0);
        assert_eq!(trim.range().end, 30.0);
        trim.set_start(-10.0);
        trim.set_end(500.0);
        assert_eq!(trim.range(), TrimRange::FULL);
    }

    #[test]
    fn non_finite_edits_are_ignored() {
        let mut trim = controller();
        trim.select(Some(&VideoId::new("a")));
        trim.set_start(f64::NAN);
        trim.set_end(f64::INFINITY);
        assert_eq!(trim.range(), TrimRange::FULL);
    }

    #[test]
    fn switching_resets_before_loading() {
        let mut trim = controller();
        let a = VideoId::new("a");
        let b = VideoId::new("b");
        trim.select(Some(&a));
        trim.set_start(20.0);
        trim.set_end(80.0);

        trim.select(Some(&b));
        assert_eq!(trim.range(), TrimRange::FULL);
        assert!(!trim.is_loaded());

        trim.select(Some(&a));
        assert_eq!(trim.range(), TrimRange { start: 20.0, end: 80.0 });
        assert!(trim.is_loaded());

        trim.select(None);
        assert_eq!(trim.range(), TrimRange::FULL);
        assert_eq!(trim.video_id(), None);
    }

    #[test]
    fn reselecting_the_same_video_keeps_the_range() {
        let mut trim = controller();
        let a = VideoId::new("a");
        trim.select(Some(&a));
        trim.begin_drag();
        trim.set_start(30.0);
        trim.select(Some(&a));
        assert_eq!(trim.range().start, 30.0);
    }

    #[test]
    fn drag_persists_once_on_release() {
        let mut trim = controller();
        trim.select(Some(&VideoId::new("a")));
        trim.begin_drag();
        for step in 1..=10 {
            trim.set_start(step as f64 * 3.0);
            assert_eq!(stored(&trim, "a"), None);
        }
        trim.end_drag();
        assert_eq!(stored(&trim, "a"), Some(TrimRange { start: 30.0, end: 100.0 }));
        assert!(!trim.is_dragging());
    }

    #[test]
    fn drag_extremes_keep_the_invariant() {
        let mut trim = controller();
        trim.select(Some(&VideoId::new("a")));
        trim.begin_drag();
        for value in [-1e9, 1e9, 97.0, 2.0, 100.0, 0.0, 50.0, 49.0] {
            trim.set_start(value);
            assert!(trim.range().is_valid(), "{:?}", trim.range());
            trim.set_end(value);
            assert!(trim.range().is_valid(), "{:?}", trim.range());
            assert!(trim.range().end - trim.range().start >= MIN_SEGMENT);
        }
        trim.end_drag();
    }

    #[test]
    fn fractional_clamps_survive_a_reload() {
        let mut trim = controller();
        let a = VideoId::new("a");
        trim.select(Some(&a));
        trim.set_start(3.04);
        trim.set_end(0.0);
        let edited = trim.range();
        assert!(edited.is_valid(), "{edited:?}");

        trim.select(Some(&VideoId::new("b")));
        trim.select(Some(&a));
        assert_eq!(trim.range(), edited);
        assert!(trim.is_loaded());
    }

    #[test]
    fn reset_removes_the_record() {
        let mut trim = controller();
        trim.select(Some(&VideoId::new("a")));
        trim.set_start(10.0);
        assert!(stored(&trim, "a").is_some());

        trim.reset();
        assert_eq!(trim.range(), TrimRange::FULL);
        assert_eq!(stored(&trim, "a"), None);
    }

    #[test]
    fn edits_without_a_video_are_not_persisted() {
        let mut trim = controller();
        trim.set_start(10.0);
        assert_eq!(trim.range().start, 10.0);
        assert!(trim.store().storage().get_item("trim-").unwrap().is_none());
    }
}
