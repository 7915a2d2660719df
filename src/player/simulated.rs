//! In-process player backend used by the terminal dashboard
//!
//! Plays a silent, wall-clock driven timeline per video: a configurable API
//! load delay, a ready callback after construction, autoplay that only
//! starts while muted, and an ended transition at the end of the video.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use futures::future::BoxFuture;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::model::VideoId;
use super::sdk::{EventSink, PlayerInstance, PlayerOptions, PlayerSdk, PlayerStateCode, SdkEvent};

const MIN_DURATION_SECS: u64 = 90;
const DURATION_SPREAD_SECS: u64 = 510;

/// Error code raised for identifiers the simulated service rejects.
const INVALID_PARAMETER: i32 = 2;

#[derive(Clone, Debug)]
pub struct SimulatedSdk {
    api_latency: Duration,
    ready_latency: Duration,
}

impl SimulatedSdk {
    pub fn new(api_latency: Duration, ready_latency: Duration) -> Self {
        Self {
            api_latency,
            ready_latency,
        }
    }
}

/// Stable pseudo-duration so the same video always has the same length.
pub fn simulated_duration(id: &VideoId) -> f64 {
    // FNV-1a
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in id.as_str().bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    (MIN_DURATION_SECS + hash % DURATION_SPREAD_SECS) as f64
}

fn is_valid_video_id(id: &VideoId) -> bool {
    let id = id.as_str();
    !id.is_empty()
        && id.len() <= 64
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl PlayerSdk for SimulatedSdk {
    type Instance = SimulatedPlayer;

    fn load_api(&self) -> BoxFuture<'static, Result<()>> {
        let latency = self.api_latency;
        Box::pin(async move {
            tokio::time::sleep(latency).await;
            Ok(())
        })
    }

    fn create(&self, options: &PlayerOptions, events: EventSink) -> Result<SimulatedPlayer> {
        if options.video_id.as_str().is_empty() {
            bail!("missing video id");
        }

        let valid = is_valid_video_id(&options.video_id);
        let state = Arc::new(Mutex::new(SimState {
            status: PlayerStateCode::Unstarted,
            position: 0.0,
            anchor: None,
            duration: simulated_duration(&options.video_id),
            muted: options.mute,
            destroyed: false,
            end_timer: None,
        }));

        let sink = events.clone();
        let ready_latency = self.ready_latency;
        let announce = tokio::spawn(async move {
            tokio::time::sleep(ready_latency).await;
            if valid {
                sink.emit(SdkEvent::Ready);
            } else {
                sink.emit(SdkEvent::Error(INVALID_PARAMETER));
            }
        });

        Ok(SimulatedPlayer {
            state,
            events,
            announce: Some(announce),
        })
    }
}

struct SimState {
    status: PlayerStateCode,
    /// Position at `anchor`, or the frozen position when not playing.
    position: f64,
    anchor: Option<Instant>,
    duration: f64,
    muted: bool,
    destroyed: bool,
    end_timer: Option<JoinHandle<()>>,
}

impl SimState {
    fn current_position(&self) -> f64 {
        match self.anchor {
            Some(anchor) => (self.position + anchor.elapsed().as_secs_f64()).min(self.duration),
            None => self.position,
        }
    }

    fn cancel_end_timer(&mut self) {
        if let Some(timer) = self.end_timer.take() {
            timer.abort();
        }
    }
}

pub struct SimulatedPlayer {
    state: Arc<Mutex<SimState>>,
    events: EventSink,
    announce: Option<JoinHandle<()>>,
}

impl SimulatedPlayer {
    fn lock(&self) -> Result<MutexGuard<'_, SimState>> {
        let guard = self
            .state
            .lock()
            .map_err(|_| anyhow!("player state poisoned"))?;
        if guard.destroyed {
            bail!("player destroyed");
        }
        Ok(guard)
    }

    fn schedule_end(&self, state: &mut SimState) {
        state.cancel_end_timer();
        let remaining = (state.duration - state.position).max(0.0);
        let shared = self.state.clone();
        let sink = self.events.clone();
        state.end_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs_f64(remaining)).await;
            let ended = match shared.lock() {
                Ok(mut state) if !state.destroyed && state.status == PlayerStateCode::Playing => {
                    state.position = state.duration;
                    state.anchor = None;
                    state.status = PlayerStateCode::Ended;
                    state.end_timer = None;
                    true
                }
                _ => false,
            };
            if ended {
                sink.emit(SdkEvent::StateChange(PlayerStateCode::Ended));
            }
        }));
    }
}

impl PlayerInstance for SimulatedPlayer {
    fn play_video(&mut self) -> Result<()> {
        let mut state = self.lock()?;
        if state.status == PlayerStateCode::Playing {
            return Ok(());
        }
        // Autoplay policy: the first start must happen muted.
        if state.status == PlayerStateCode::Unstarted && !state.muted {
            tracing::debug!(video_id = %self.events.video_id(), "Simulated autoplay blocked while unmuted");
            return Ok(());
        }
        if state.status == PlayerStateCode::Ended {
            state.position = 0.0;
        }
        state.status = PlayerStateCode::Playing;
        state.anchor = Some(Instant::now());
        self.schedule_end(&mut state);
        drop(state);
        self.events.emit(SdkEvent::StateChange(PlayerStateCode::Playing));
        Ok(())
    }

    fn pause_video(&mut self) -> Result<()> {
        let mut state = self.lock()?;
        if state.status != PlayerStateCode::Playing {
            return Ok(());
        }
        state.position = state.current_position();
        state.anchor = None;
        state.status = PlayerStateCode::Paused;
        state.cancel_end_timer();
        drop(state);
        self.events.emit(SdkEvent::StateChange(PlayerStateCode::Paused));
        Ok(())
    }

    fn seek_to(&mut self, seconds: f64, _allow_seek_ahead: bool) -> Result<()> {
        if !seconds.is_finite() {
            bail!("invalid seek target {seconds}");
        }
        let mut state = self.lock()?;
        state.position = seconds.max(0.0).min(state.duration);
        let status = state.status;
        match status {
            PlayerStateCode::Playing => {
                state.anchor = Some(Instant::now());
                self.schedule_end(&mut state);
            }
            PlayerStateCode::Ended => {
                state.status = PlayerStateCode::Paused;
                drop(state);
                self.events.emit(SdkEvent::StateChange(PlayerStateCode::Paused));
            }
            _ => {}
        }
        Ok(())
    }

    fn get_current_time(&self) -> Result<f64> {
        Ok(self.lock()?.current_position())
    }

    fn get_duration(&self) -> Result<f64> {
        Ok(self.lock()?.duration)
    }

    fn get_player_state(&self) -> Result<PlayerStateCode> {
        Ok(self.lock()?.status)
    }

    fn mute(&mut self) -> Result<()> {
        self.lock()?.muted = true;
        Ok(())
    }

    fn unmute(&mut self) -> Result<()> {
        self.lock()?.muted = false;
        Ok(())
    }

    fn destroy(&mut self) -> Result<()> {
        if let Some(announce) = self.announce.take() {
            announce.abort();
        }
        let mut state = self
            .state
            .lock()
            .map_err(|_| anyhow!("player state poisoned"))?;
        state.cancel_end_timer();
        state.anchor = None;
        state.destroyed = true;
        Ok(())
    }
}

impl Drop for SimulatedPlayer {
    fn drop(&mut self) {
        let _ = self.destroy();
    }
}
