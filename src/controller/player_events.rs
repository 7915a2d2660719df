//! Player session event routing

use crate::model::KeyValueStorage;
use crate::player::{PlayerSdk, SessionEvent, SessionEventKind};

use super::AppController;

impl<S: PlayerSdk, K: KeyValueStorage> AppController<S, K> {
    /// Feeds one session event to the player and re-applies the trim window.
    pub fn handle_session_event(&mut self, event: SessionEvent) {
        if !matches!(event.kind, SessionEventKind::Tick) {
            tracing::trace!(video_id = %event.video_id, generation = event.generation, kind = ?event.kind, "Session event");
        }
        self.player.handle_event(event);
        self.enforce();
    }
}
