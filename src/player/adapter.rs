//! Stable playback API over the embeddable player
//!
//! The adapter owns at most one [`Session`] at a time together with the
//! normalized [`PlaybackState`]. All SDK callbacks and timers come back as
//! [`SessionEvent`]s through the channel returned by [`PlayerAdapter::new`];
//! the owner feeds them to [`PlayerAdapter::handle_event`] on its own loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::model::{PlaybackState, PlayerError, VideoId};
use super::bootstrap::ApiBootstrap;
use super::sdk::{
    EventSink, PlayerInstance, PlayerOptions, PlayerSdk, PlayerStateCode, SdkEvent,
    SessionEvent, SessionEventKind,
};
use super::session::{Session, SessionPhase, Ticker};

/// Timing policy of the adapter
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerSettings {
    /// Period of the time poll while playing.
    pub tick_interval: Duration,
    /// Construction attempts while the SDK is not loaded.
    pub init_attempts: u32,
    pub init_retry_delay: Duration,
    /// Delay before checking whether muted autoplay actually started.
    pub autoplay_grace: Duration,
    /// Recreate a session that is still not ready after this long, once.
    pub remount_after: Option<Duration>,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(16),
            init_attempts: 3,
            init_retry_delay: Duration::from_secs(1),
            autoplay_grace: Duration::from_millis(1500),
            remount_after: Some(Duration::from_secs(2)),
        }
    }
}

pub struct PlayerAdapter<S: PlayerSdk> {
    bootstrap: Arc<ApiBootstrap<S>>,
    settings: PlayerSettings,
    events_tx: UnboundedSender<SessionEvent>,
    session: Option<Session<S::Instance>>,
    generation: u64,
    state: PlaybackState,
}

impl<S: PlayerSdk> PlayerAdapter<S> {
    pub fn new(
        bootstrap: Arc<ApiBootstrap<S>>,
        settings: PlayerSettings,
    ) -> (Self, UnboundedReceiver<SessionEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let adapter = Self {
            bootstrap,
            settings,
            events_tx,
            session: None,
            generation: 0,
            state: PlaybackState::default(),
        };
        (adapter, events_rx)
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.session
            .as_ref()
            .map(|session| session.phase.clone())
            .unwrap_or(SessionPhase::Uninitialized)
    }

    pub fn video_id(&self) -> Option<&VideoId> {
        self.session.as_ref().map(|session| &session.id)
    }

    /// Binds the adapter to `id`. No-op while a healthy session for `id` exists.
    pub fn initialize(&mut self, id: &VideoId) {
        if let Some(session) = &self.session {
            if session.id == *id && session.phase.holds_init_guard() {
                tracing::trace!(video_id = %id, "Player already initialized");
                return;
            }
        }
        self.start_session(id.clone(), true);
    }

    /// Recreates the session for the current video, e.g. after a player error.
    pub fn reload(&mut self) {
        if let Some(id) = self.video_id().cloned() {
            tracing::info!(video_id = %id, "Reloading player");
            self.start_session(id, true);
        }
    }

    /// Cancels every pending task and frees the instance. Safe without a session.
    pub fn destroy(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.tasks.abort_all();
            if let Some(mut instance) = session.instance.take() {
                if let Err(e) = instance.destroy() {
                    tracing::debug!(video_id = %session.id, error = %e, "Player destroy failed");
                }
            }
            if session.phase != SessionPhase::Destroyed {
                tracing::debug!(video_id = %session.id, generation = session.generation, "Player session destroyed");
            }
            session.phase = SessionPhase::Destroyed;
        }
        self.state = PlaybackState::default();
    }

    fn start_session(&mut self, id: VideoId, watch_remount: bool) {
        self.destroy();
        self.generation += 1;

        let sink = EventSink::new(id.clone(), self.generation, self.events_tx.clone());
        let mut session = Session::new(id, self.generation, sink);
        tracing::info!(video_id = %session.id, generation = session.generation, "Initializing player session");

        if watch_remount {
            if let Some(delay) = self.settings.remount_after {
                session.tasks.remount = Some(session.sink.post_after(SessionEventKind::Remount, delay));
            }
        }

        self.session = Some(session);
        self.try_construct();
    }

    fn try_construct(&mut self) {
        let api_ready = self.bootstrap.is_ready();
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.instance.is_some() || !session.phase.holds_init_guard() || session.phase == SessionPhase::Ready {
            return;
        }

        let attempts = session.phase.attempts() + 1;
        session.phase = SessionPhase::Initializing { attempts };

        if !api_ready {
            if session.tasks.api_waiter.is_none() {
                let bootstrap = self.bootstrap.clone();
                let sink = session.sink.clone();
                session.tasks.api_waiter = Some(tokio::spawn(async move {
                    if bootstrap.ensure_loaded().await.is_ok() {
                        sink.post(SessionEventKind::ApiReady);
                    }
                }));
            }

            if attempts < self.settings.init_attempts {
                tracing::debug!(video_id = %session.id, attempts, "Player API not ready, retrying later");
                session.tasks.retry = Some(
                    session
                        .sink
                        .post_after(SessionEventKind::RetryInit, self.settings.init_retry_delay),
                );
            } else {
                tracing::warn!(video_id = %session.id, attempts, "Player API still not ready, giving up");
            }
            return;
        }

        let options = PlayerOptions::embedded(session.id.clone());
        match self.bootstrap.sdk().create(&options, session.sink.clone()) {
            Ok(instance) => {
                tracing::debug!(video_id = %session.id, "Player instance created");
                session.instance = Some(instance);
                if let Some(retry) = session.tasks.retry.take() {
                    retry.abort();
                }
            }
            Err(e) => {
                tracing::error!(video_id = %session.id, error = %e, "Player construction failed");
                let error = PlayerError::InitializationFailed(e.to_string());
                session.phase = SessionPhase::Error(error.clone());
                self.state.error = Some(error);
            }
        }
    }

    pub fn handle_event(&mut self, event: SessionEvent) {
        let Some(session) = self.session.as_ref() else {
            tracing::trace!(kind = ?event.kind, "Dropping event without session");
            return;
        };
        if session.generation != event.generation
            || session.id != event.video_id
            || session.phase == SessionPhase::Destroyed
        {
            tracing::trace!(
                video_id = %event.video_id,
                generation = event.generation,
                kind = ?event.kind,
                "Dropping stale session event"
            );
            return;
        }

        match event.kind {
            SessionEventKind::Sdk(SdkEvent::Ready) => self.on_ready(),
            SessionEventKind::Sdk(SdkEvent::StateChange(code)) => self.on_state_change(code),
            SessionEventKind::Sdk(SdkEvent::Error(code)) => self.on_error(code),
            SessionEventKind::ApiReady | SessionEventKind::RetryInit => self.try_construct(),
            SessionEventKind::AutoplayCheck => self.on_autoplay_check(),
            SessionEventKind::Tick => self.on_tick(),
            SessionEventKind::Remount => self.on_remount(),
        }

        self.sync_tick_loop();
    }

    fn on_ready(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !matches!(session.phase, SessionPhase::Initializing { .. }) {
            return;
        }
        let Some(instance) = session.instance.as_mut() else {
            return;
        };

        session.phase = SessionPhase::Ready;
        self.state.ready = true;
        if let Ok(duration) = instance.get_duration() {
            self.state.duration = duration;
        }
        tracing::info!(video_id = %session.id, duration = self.state.duration, "Player ready");

        if let Err(e) = instance.play_video() {
            tracing::debug!(video_id = %session.id, error = %e, "Muted autoplay attempt failed");
        }
        if let Some(remount) = session.tasks.remount.take() {
            remount.abort();
        }
        session.tasks.autoplay = Some(
            session
                .sink
                .post_after(SessionEventKind::AutoplayCheck, self.settings.autoplay_grace),
        );
    }

    fn on_autoplay_check(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.tasks.autoplay = None;
        let Some(instance) = session.instance.as_mut() else {
            return;
        };

        let result = match instance.get_player_state() {
            Ok(PlayerStateCode::Playing) => instance.unmute(),
            Ok(_) => instance.mute().and_then(|()| instance.play_video()),
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            tracing::debug!(video_id = %session.id, error = %e, "Autoplay follow-up failed");
        }
    }

    fn on_state_change(&mut self, code: PlayerStateCode) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        self.state.playing = code == PlayerStateCode::Playing;
        session.tick_halted = false;

        if let Some(instance) = session.instance.as_ref() {
            if let Ok(time) = instance.get_current_time() {
                self.state.current_time = time;
            }
            if let Ok(duration) = instance.get_duration() {
                self.state.duration = duration;
            }
        }
        tracing::debug!(video_id = %session.id, state = ?code, time = self.state.current_time, "Player state changed");
    }

    fn on_error(&mut self, code: i32) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let error = PlayerError::from_code(code);
        tracing::error!(video_id = %session.id, code, error = %error, "Player error");
        session.phase = SessionPhase::Error(error.clone());
        self.state.playing = false;
        self.state.error = Some(error);
    }

    fn on_tick(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(instance) = session.instance.as_ref() else {
            return;
        };
        match instance.get_current_time() {
            Ok(time) => self.state.current_time = time,
            Err(e) => {
                tracing::debug!(video_id = %session.id, error = %e, "Time read failed, stopping tick loop");
                session.tick_halted = true;
            }
        }
        if let Some(ticker) = session.tasks.ticker.as_ref() {
            ticker.complete();
        }
    }

    fn on_remount(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.tasks.remount = None;
        if matches!(session.phase, SessionPhase::Ready | SessionPhase::Error(_)) {
            return;
        }
        let id = session.id.clone();
        tracing::info!(video_id = %id, "Player not ready in time, remounting");
        self.start_session(id, false);
    }

    fn sync_tick_loop(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let should_run = self.state.ready
            && self.state.playing
            && session.phase == SessionPhase::Ready
            && session.instance.is_some()
            && !session.tick_halted;

        if should_run && session.tasks.ticker.is_none() {
            tracing::trace!(video_id = %session.id, "Starting tick loop");
            session.tasks.ticker = Some(Ticker::spawn(session.sink.clone(), self.settings.tick_interval));
        } else if !should_run && session.tasks.ticker.is_some() {
            tracing::trace!(video_id = %session.id, "Stopping tick loop");
            session.tasks.ticker = None;
        }
    }

    fn instance_mut(&mut self) -> Option<&mut S::Instance> {
        self.session.as_mut().and_then(|session| session.instance.as_mut())
    }

    pub fn play(&mut self) {
        let result = match self.instance_mut() {
            Some(instance) => instance.play_video(),
            None => return,
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "Play failed");
            self.transport_failed("Failed to play video");
        }
    }

    pub fn pause(&mut self) {
        let result = match self.instance_mut() {
            Some(instance) => instance.pause_video(),
            None => return,
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "Pause failed");
            self.transport_failed("Failed to pause video");
        }
    }

    /// Seeks and optimistically moves the local clock before the player confirms.
    pub fn seek_to(&mut self, time: f64, allow_seek_ahead: bool) {
        let result = match self.instance_mut() {
            Some(instance) => instance.seek_to(time, allow_seek_ahead),
            None => return,
        };
        match result {
            Ok(()) => self.state.current_time = time,
            Err(e) => {
                tracing::warn!(time, error = %e, "Seek failed");
                self.transport_failed("Failed to seek video");
            }
        }
    }

    /// Records a transport failure unless an SDK error already owns the view.
    fn transport_failed(&mut self, message: &'static str) {
        if self.state.error.as_ref().is_some_and(PlayerError::is_fatal_to_view) {
            return;
        }
        self.state.error = Some(PlayerError::Transport(message));
    }

    /// Whether the tick loop is currently scheduled.
    pub fn is_ticking(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.tasks.ticker.is_some())
    }
}

impl<S: PlayerSdk> Drop for PlayerAdapter<S> {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::player::testing::{Call, FakeSdk, FakeShared};

    type Harness = (
        PlayerAdapter<FakeSdk>,
        UnboundedReceiver<SessionEvent>,
        Arc<Mutex<FakeShared>>,
    );

    fn settings() -> PlayerSettings {
        PlayerSettings {
            remount_after: None,
            ..PlayerSettings::default()
        }
    }

    fn harness_with(sdk: FakeSdk, settings: PlayerSettings) -> Harness {
        let shared = sdk.shared();
        let (adapter, rx) = PlayerAdapter::new(ApiBootstrap::new(sdk), settings);
        (adapter, rx, shared)
    }

    async fn loaded_harness() -> Harness {
        let sdk = FakeSdk::new();
        let shared = sdk.shared();
        let bootstrap = ApiBootstrap::new(sdk);
        bootstrap.ensure_loaded().await.unwrap();
        let (adapter, rx) = PlayerAdapter::new(bootstrap, settings());
        (adapter, rx, shared)
    }

    /// Runs spawned tasks and handles every queued event without moving time.
    async fn settle(adapter: &mut PlayerAdapter<FakeSdk>, rx: &mut UnboundedReceiver<SessionEvent>) {
        for _ in 0..4 {
            for _ in 0..8 {
                tokio::task::yield_now().await;
            }
            while let Ok(event) = rx.try_recv() {
                adapter.handle_event(event);
            }
        }
    }

    fn emit(shared: &Arc<Mutex<FakeShared>>, event: SdkEvent) {
        shared.lock().unwrap().last_sink().emit(event);
    }

    #[tokio::test(start_paused = true)]
    async fn ready_captures_duration_and_starts_muted_autoplay() {
        let (mut adapter, mut rx, shared) = loaded_harness().await;
        let id = VideoId::new("a");
        adapter.initialize(&id);
        assert_eq!(adapter.phase(), SessionPhase::Initializing { attempts: 1 });
        assert!(shared.lock().unwrap().options[0].mute);

        emit(&shared, SdkEvent::Ready);
        settle(&mut adapter, &mut rx).await;

        assert_eq!(adapter.phase(), SessionPhase::Ready);
        assert!(adapter.state().ready);
        assert_eq!(adapter.state().duration, 120.0);
        assert_eq!(shared.lock().unwrap().calls, vec![Call::Play(id.clone())]);

        // The fake reports Playing after play_video, so the check unmutes.
        tokio::time::sleep(Duration::from_millis(1600)).await;
        settle(&mut adapter, &mut rx).await;
        assert!(shared.lock().unwrap().calls.contains(&Call::Unmute(id)));
    }

    #[tokio::test(start_paused = true)]
    async fn autoplay_check_retries_play_when_blocked() {
        let (mut adapter, mut rx, shared) = loaded_harness().await;
        let id = VideoId::new("a");
        adapter.initialize(&id);
        emit(&shared, SdkEvent::Ready);
        settle(&mut adapter, &mut rx).await;
        shared.lock().unwrap().state = PlayerStateCode::Unstarted;

        tokio::time::sleep(Duration::from_millis(1600)).await;
        settle(&mut adapter, &mut rx).await;

        let shared = shared.lock().unwrap();
        assert_eq!(shared.count(|c| matches!(c, Call::Play(_))), 2);
        assert_eq!(shared.count(|c| matches!(c, Call::Mute(_))), 1);
        assert_eq!(shared.count(|c| matches!(c, Call::Unmute(_))), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn initialize_is_idempotent_for_the_same_video() {
        let (mut adapter, _rx, shared) = loaded_harness().await;
        let id = VideoId::new("a");
        adapter.initialize(&id);
        adapter.initialize(&id);
        assert_eq!(shared.lock().unwrap().created.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn switching_videos_destroys_the_previous_session_first() {
        let (mut adapter, mut rx, shared) = loaded_harness().await;
        let a = VideoId::new("a");
        let b = VideoId::new("b");
        adapter.initialize(&a);
        emit(&shared, SdkEvent::Ready);
        settle(&mut adapter, &mut rx).await;
        adapter.seek_to(30.0, true);

        adapter.initialize(&b);
        assert_eq!(*adapter.state(), PlaybackState::default());
        let shared = shared.lock().unwrap();
        assert_eq!(shared.live, 1);
        assert!(shared.calls.contains(&Call::Destroy(a)));
        assert_eq!(shared.created, vec![VideoId::new("a"), b]);
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_switches_leave_one_session_and_drop_late_callbacks() {
        let (mut adapter, mut rx, shared) = loaded_harness().await;
        let a = VideoId::new("a");
        let b = VideoId::new("b");

        adapter.initialize(&a);
        let first_a = shared.lock().unwrap().last_sink();
        adapter.initialize(&b);
        let sink_b = shared.lock().unwrap().last_sink();
        adapter.initialize(&a);

        first_a.emit(SdkEvent::Ready);
        sink_b.emit(SdkEvent::Ready);
        sink_b.emit(SdkEvent::Error(100));
        settle(&mut adapter, &mut rx).await;

        assert_eq!(shared.lock().unwrap().live, 1);
        assert_eq!(adapter.video_id(), Some(&a));
        assert!(!adapter.state().ready);
        assert_eq!(adapter.state().error, None);

        emit(&shared, SdkEvent::Ready);
        settle(&mut adapter, &mut rx).await;
        assert!(adapter.state().ready);
    }

    #[tokio::test(start_paused = true)]
    async fn defers_until_api_loads_then_constructs() {
        let sdk = FakeSdk::new().with_api_latency(Duration::from_millis(500));
        let (mut adapter, mut rx, shared) = harness_with(sdk, settings());
        adapter.initialize(&VideoId::new("a"));
        settle(&mut adapter, &mut rx).await;
        assert_eq!(adapter.phase(), SessionPhase::Initializing { attempts: 1 });
        assert!(shared.lock().unwrap().created.is_empty());

        tokio::time::sleep(Duration::from_millis(600)).await;
        settle(&mut adapter, &mut rx).await;
        assert_eq!(shared.lock().unwrap().created.len(), 1);
        assert_eq!(shared.lock().unwrap().load_calls, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_bounded_attempts() {
        let sdk = FakeSdk::new().with_api_latency(Duration::from_secs(3600));
        let (mut adapter, mut rx, shared) = harness_with(sdk, settings());
        adapter.initialize(&VideoId::new("a"));

        for _ in 0..5 {
            tokio::time::sleep(Duration::from_millis(1000)).await;
            settle(&mut adapter, &mut rx).await;
        }

        assert_eq!(adapter.phase(), SessionPhase::Initializing { attempts: 3 });
        assert!(!adapter.state().ready);
        assert_eq!(adapter.state().error, None);
        assert!(shared.lock().unwrap().created.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn switching_cancels_pending_retries() {
        let sdk = FakeSdk::new().with_api_latency(Duration::from_secs(3600));
        let (mut adapter, mut rx, _shared) = harness_with(sdk, settings());
        adapter.initialize(&VideoId::new("a"));
        adapter.initialize(&VideoId::new("b"));

        for _ in 0..3 {
            tokio::time::sleep(Duration::from_millis(1000)).await;
            settle(&mut adapter, &mut rx).await;
        }

        // Only b's own retries advanced its counter.
        assert_eq!(adapter.video_id(), Some(&VideoId::new("b")));
        assert_eq!(adapter.phase(), SessionPhase::Initializing { attempts: 3 });
    }

    #[tokio::test(start_paused = true)]
    async fn construction_failure_is_an_error_that_allows_retry() {
        let (mut adapter, _rx, shared) = loaded_harness().await;
        shared.lock().unwrap().fail_create = true;
        let id = VideoId::new("a");
        adapter.initialize(&id);
        assert!(matches!(adapter.phase(), SessionPhase::Error(PlayerError::InitializationFailed(_))));
        assert!(!adapter.state().ready);

        shared.lock().unwrap().fail_create = false;
        adapter.initialize(&id);
        assert!(matches!(adapter.phase(), SessionPhase::Initializing { .. }));
        assert_eq!(adapter.state().error, None);
    }

    #[tokio::test(start_paused = true)]
    async fn player_error_is_mapped_and_releases_the_guard() {
        let (mut adapter, mut rx, shared) = loaded_harness().await;
        let id = VideoId::new("a");
        adapter.initialize(&id);
        emit(&shared, SdkEvent::Error(150));
        settle(&mut adapter, &mut rx).await;

        assert_eq!(adapter.state().error, Some(PlayerError::EmbeddingNotAllowed));
        assert_eq!(adapter.phase(), SessionPhase::Error(PlayerError::EmbeddingNotAllowed));

        adapter.initialize(&id);
        assert_eq!(shared.lock().unwrap().created.len(), 2);
        assert_eq!(shared.lock().unwrap().live, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn sdk_error_stops_playback_and_outranks_transport_failures() {
        let (mut adapter, mut rx, shared) = loaded_harness().await;
        adapter.initialize(&VideoId::new("a"));
        emit(&shared, SdkEvent::Ready);
        emit(&shared, SdkEvent::StateChange(PlayerStateCode::Playing));
        settle(&mut adapter, &mut rx).await;
        assert!(adapter.state().playing);

        emit(&shared, SdkEvent::Error(5));
        settle(&mut adapter, &mut rx).await;
        assert!(!adapter.state().playing);

        shared.lock().unwrap().fail_transport = true;
        adapter.seek_to(10.0, true);
        assert_eq!(adapter.state().error, Some(PlayerError::Html5));
    }

    #[tokio::test(start_paused = true)]
    async fn tick_loop_follows_playing_and_ready() {
        let (mut adapter, mut rx, shared) = loaded_harness().await;
        adapter.initialize(&VideoId::new("a"));
        emit(&shared, SdkEvent::Ready);
        settle(&mut adapter, &mut rx).await;
        assert!(!adapter.is_ticking());

        emit(&shared, SdkEvent::StateChange(PlayerStateCode::Playing));
        settle(&mut adapter, &mut rx).await;
        assert!(adapter.state().playing);
        assert!(adapter.is_ticking());

        shared.lock().unwrap().time = 42.5;
        tokio::time::sleep(Duration::from_millis(50)).await;
        settle(&mut adapter, &mut rx).await;
        assert_eq!(adapter.state().current_time, 42.5);

        emit(&shared, SdkEvent::StateChange(PlayerStateCode::Paused));
        settle(&mut adapter, &mut rx).await;
        assert!(!adapter.state().playing);
        assert!(!adapter.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn failing_time_read_stops_the_loop() {
        let (mut adapter, mut rx, shared) = loaded_harness().await;
        adapter.initialize(&VideoId::new("a"));
        emit(&shared, SdkEvent::Ready);
        emit(&shared, SdkEvent::StateChange(PlayerStateCode::Playing));
        settle(&mut adapter, &mut rx).await;
        assert!(adapter.is_ticking());

        shared.lock().unwrap().fail_time_read = true;
        tokio::time::sleep(Duration::from_millis(50)).await;
        settle(&mut adapter, &mut rx).await;
        assert!(!adapter.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn transport_failures_are_recorded_not_raised() {
        let (mut adapter, mut rx, shared) = loaded_harness().await;
        adapter.initialize(&VideoId::new("a"));
        emit(&shared, SdkEvent::Ready);
        settle(&mut adapter, &mut rx).await;

        adapter.seek_to(12.0, true);
        assert_eq!(adapter.state().current_time, 12.0);

        shared.lock().unwrap().fail_transport = true;
        adapter.seek_to(50.0, true);
        assert_eq!(adapter.state().current_time, 12.0);
        assert_eq!(adapter.state().error, Some(PlayerError::Transport("Failed to seek video")));

        adapter.play();
        assert_eq!(adapter.state().error, Some(PlayerError::Transport("Failed to play video")));
        assert_eq!(adapter.phase(), SessionPhase::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn transport_without_session_is_a_no_op() {
        let (mut adapter, _rx, shared) = loaded_harness().await;
        adapter.play();
        adapter.pause();
        adapter.seek_to(10.0, true);
        adapter.destroy();
        assert!(shared.lock().unwrap().calls.is_empty());
        assert_eq!(adapter.state().error, None);
    }

    #[tokio::test(start_paused = true)]
    async fn remounts_once_when_ready_never_arrives() {
        let sdk = FakeSdk::new();
        let shared = sdk.shared();
        let bootstrap = ApiBootstrap::new(sdk);
        bootstrap.ensure_loaded().await.unwrap();
        let (mut adapter, mut rx) = PlayerAdapter::new(bootstrap, PlayerSettings::default());

        adapter.initialize(&VideoId::new("a"));
        for _ in 0..3 {
            tokio::time::sleep(Duration::from_millis(2100)).await;
            settle(&mut adapter, &mut rx).await;
        }

        let shared = shared.lock().unwrap();
        assert_eq!(shared.created.len(), 2);
        assert_eq!(shared.live, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_adapter_destroys_the_instance() {
        let (mut adapter, _rx, shared) = loaded_harness().await;
        adapter.initialize(&VideoId::new("a"));
        drop(adapter);
        assert_eq!(shared.lock().unwrap().live, 0);
    }
}
