//! Player session state machine and the tasks bound to its lifetime

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::model::{PlayerError, VideoId};
use super::sdk::{EventSink, SessionEventKind};

/// Lifecycle of one player session.
///
/// `Uninitialized -> Initializing -> Ready`, any live phase `-> Error`, and
/// every phase `-> Destroyed` on teardown. `Error` and `Destroyed` release the
/// initialization guard so the same video can be initialized again.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionPhase {
    Uninitialized,
    /// Waiting for the SDK or for the instance's ready callback.
    Initializing { attempts: u32 },
    Ready,
    Error(PlayerError),
    Destroyed,
}

impl SessionPhase {
    pub fn holds_init_guard(&self) -> bool {
        matches!(self, Self::Uninitialized | Self::Initializing { .. } | Self::Ready)
    }

    pub fn attempts(&self) -> u32 {
        match self {
            Self::Initializing { attempts } => *attempts,
            _ => 0,
        }
    }
}

/// Periodic time poll with a skip-if-busy guard.
///
/// A tick is only posted when the previous one has been handled; the adapter
/// clears the flag after reading the clock.
pub(crate) struct Ticker {
    handle: JoinHandle<()>,
    in_flight: Arc<AtomicBool>,
}

impl Ticker {
    pub(crate) fn spawn(sink: EventSink, period: Duration) -> Self {
        let in_flight = Arc::new(AtomicBool::new(false));
        let flag = in_flight.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if flag.swap(true, Ordering::AcqRel) {
                    continue;
                }
                if !sink.post(SessionEventKind::Tick) {
                    break;
                }
            }
        });
        Self { handle, in_flight }
    }

    pub(crate) fn complete(&self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Pending timers of a session; all of them die with it.
#[derive(Default)]
pub(crate) struct SessionTasks {
    pub api_waiter: Option<JoinHandle<()>>,
    pub retry: Option<JoinHandle<()>>,
    pub autoplay: Option<JoinHandle<()>>,
    pub remount: Option<JoinHandle<()>>,
    pub ticker: Option<Ticker>,
}

impl SessionTasks {
    pub(crate) fn abort_all(&mut self) {
        for handle in [
            self.api_waiter.take(),
            self.retry.take(),
            self.autoplay.take(),
            self.remount.take(),
        ]
        .into_iter()
        .flatten()
        {
            handle.abort();
        }
        self.ticker = None;
    }
}

impl Drop for SessionTasks {
    fn drop(&mut self) {
        self.abort_all();
    }
}

pub(crate) struct Session<I> {
    pub id: VideoId,
    pub generation: u64,
    pub phase: SessionPhase,
    pub instance: Option<I>,
    pub sink: EventSink,
    pub tasks: SessionTasks,
    /// Set when a time read fails; cleared by the next state change.
    pub tick_halted: bool,
}

impl<I> Session<I> {
    pub(crate) fn new(id: VideoId, generation: u64, sink: EventSink) -> Self {
        Self {
            id,
            generation,
            phase: SessionPhase::Uninitialized,
            instance: None,
            sink,
            tasks: SessionTasks::default(),
            tick_halted: false,
        }
    }
}
