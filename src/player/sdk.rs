//! Contract of the embeddable player SDK
//!
//! The SDK loads asynchronously, hands out single-use instances per video and
//! reports lifecycle changes through callbacks. Callbacks are delivered as
//! [`SessionEvent`]s tagged with the session that produced them so late
//! events from a destroyed session can be recognised and dropped.

use std::time::Duration;

use anyhow::Result;
use futures::future::BoxFuture;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::model::VideoId;

/// External player state enum
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerStateCode {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
}

/// Construction options for one player instance
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerOptions {
    pub video_id: VideoId,
    pub autoplay: bool,
    /// Start muted so autoplay policies let playback begin.
    pub mute: bool,
    pub controls: bool,
    pub keyboard: bool,
    pub fullscreen: bool,
    pub plays_inline: bool,
    pub related_videos: bool,
}

impl PlayerOptions {
    /// Chromeless, muted-autoplay options used by the dashboard.
    pub fn embedded(video_id: VideoId) -> Self {
        Self {
            video_id,
            autoplay: true,
            mute: true,
            controls: false,
            keyboard: false,
            fullscreen: false,
            plays_inline: true,
            related_videos: false,
        }
    }
}

/// Callbacks raised by an SDK instance
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SdkEvent {
    Ready,
    StateChange(PlayerStateCode),
    Error(i32),
}

/// Everything the adapter reacts to, SDK callbacks and its own timers alike
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionEventKind {
    Sdk(SdkEvent),
    ApiReady,
    RetryInit,
    AutoplayCheck,
    Tick,
    Remount,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SessionEvent {
    pub video_id: VideoId,
    pub generation: u64,
    pub kind: SessionEventKind,
}

/// Callback table handed to an SDK instance, bound to one session.
#[derive(Clone, Debug)]
pub struct EventSink {
    video_id: VideoId,
    generation: u64,
    tx: UnboundedSender<SessionEvent>,
}

impl EventSink {
    pub(crate) fn new(video_id: VideoId, generation: u64, tx: UnboundedSender<SessionEvent>) -> Self {
        Self {
            video_id,
            generation,
            tx,
        }
    }

    pub fn video_id(&self) -> &VideoId {
        &self.video_id
    }

    pub fn emit(&self, event: SdkEvent) {
        self.post(SessionEventKind::Sdk(event));
    }

    /// Returns false once the receiving side is gone.
    pub(crate) fn post(&self, kind: SessionEventKind) -> bool {
        self.tx
            .send(SessionEvent {
                video_id: self.video_id.clone(),
                generation: self.generation,
                kind,
            })
            .is_ok()
    }

    pub(crate) fn post_after(&self, kind: SessionEventKind, delay: Duration) -> JoinHandle<()> {
        let sink = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            sink.post(kind);
        })
    }
}

/// One live, single-use player bound to a video
pub trait PlayerInstance {
    fn play_video(&mut self) -> Result<()>;
    fn pause_video(&mut self) -> Result<()>;
    fn seek_to(&mut self, seconds: f64, allow_seek_ahead: bool) -> Result<()>;
    fn get_current_time(&self) -> Result<f64>;
    fn get_duration(&self) -> Result<f64>;
    fn get_player_state(&self) -> Result<PlayerStateCode>;
    fn mute(&mut self) -> Result<()>;
    fn unmute(&mut self) -> Result<()>;
    fn destroy(&mut self) -> Result<()>;
}

/// Entry point of the SDK: loads the API once and constructs instances.
pub trait PlayerSdk: Send + Sync + 'static {
    type Instance: PlayerInstance;

    /// Loads the SDK script. Called at most once per successful load by
    /// [`super::ApiBootstrap`].
    fn load_api(&self) -> BoxFuture<'static, Result<()>>;

    fn create(&self, options: &PlayerOptions, events: EventSink) -> Result<Self::Instance>;
}
