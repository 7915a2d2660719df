//! Scriptable SDK double shared by the player and controller tests

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use futures::future::BoxFuture;

use crate::model::VideoId;
use super::sdk::{EventSink, PlayerInstance, PlayerOptions, PlayerSdk, PlayerStateCode};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Play(VideoId),
    Pause(VideoId),
    Seek(VideoId, f64),
    Mute(VideoId),
    Unmute(VideoId),
    Destroy(VideoId),
}

pub struct FakeShared {
    pub load_calls: usize,
    pub api_fails: bool,
    pub fail_create: bool,
    pub fail_transport: bool,
    pub fail_time_read: bool,
    pub time: f64,
    pub duration: f64,
    pub state: PlayerStateCode,
    pub calls: Vec<Call>,
    pub created: Vec<VideoId>,
    pub options: Vec<PlayerOptions>,
    pub live: usize,
    pub sinks: Vec<EventSink>,
}

impl FakeShared {
    pub fn last_sink(&self) -> EventSink {
        self.sinks.last().cloned().expect("no instance created")
    }

    pub fn seeks(&self) -> Vec<f64> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Seek(_, time) => Some(*time),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| pred(call)).count()
    }
}

pub struct FakeSdk {
    shared: Arc<Mutex<FakeShared>>,
    api_latency: Duration,
}

impl FakeSdk {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Mutex::new(FakeShared {
                load_calls: 0,
                api_fails: false,
                fail_create: false,
                fail_transport: false,
                fail_time_read: false,
                time: 0.0,
                duration: 120.0,
                state: PlayerStateCode::Unstarted,
                calls: Vec::new(),
                created: Vec::new(),
                options: Vec::new(),
                live: 0,
                sinks: Vec::new(),
            })),
            api_latency: Duration::ZERO,
        }
    }

    pub fn with_api_latency(mut self, latency: Duration) -> Self {
        self.api_latency = latency;
        self
    }

    pub fn with_failing_api(self) -> Self {
        self.shared.lock().unwrap().api_fails = true;
        self
    }

    pub fn shared(&self) -> Arc<Mutex<FakeShared>> {
        self.shared.clone()
    }
}

impl PlayerSdk for FakeSdk {
    type Instance = FakeInstance;

    fn load_api(&self) -> BoxFuture<'static, Result<()>> {
        let shared = self.shared.clone();
        let latency = self.api_latency;
        Box::pin(async move {
            shared.lock().unwrap().load_calls += 1;
            tokio::time::sleep(latency).await;
            if shared.lock().unwrap().api_fails {
                Err(anyhow!("script blocked"))
            } else {
                Ok(())
            }
        })
    }

    fn create(&self, options: &PlayerOptions, events: EventSink) -> Result<FakeInstance> {
        let mut shared = self.shared.lock().unwrap();
        if shared.fail_create {
            return Err(anyhow!("container missing"));
        }
        shared.created.push(options.video_id.clone());
        shared.options.push(options.clone());
        shared.sinks.push(events);
        shared.live += 1;
        Ok(FakeInstance {
            id: options.video_id.clone(),
            shared: self.shared.clone(),
            destroyed: false,
        })
    }
}

pub struct FakeInstance {
    id: VideoId,
    shared: Arc<Mutex<FakeShared>>,
    destroyed: bool,
}

impl FakeInstance {
    fn transport(&self, call: Call, apply: impl FnOnce(&mut FakeShared)) -> Result<()> {
        let mut shared = self.shared.lock().unwrap();
        if shared.fail_transport {
            return Err(anyhow!("iframe detached"));
        }
        shared.calls.push(call);
        apply(&mut shared);
        Ok(())
    }
}

impl PlayerInstance for FakeInstance {
    fn play_video(&mut self) -> Result<()> {
        self.transport(Call::Play(self.id.clone()), |s| s.state = PlayerStateCode::Playing)
    }

    fn pause_video(&mut self) -> Result<()> {
        self.transport(Call::Pause(self.id.clone()), |s| s.state = PlayerStateCode::Paused)
    }

    fn seek_to(&mut self, seconds: f64, _allow_seek_ahead: bool) -> Result<()> {
        self.transport(Call::Seek(self.id.clone(), seconds), |s| s.time = seconds)
    }

    fn get_current_time(&self) -> Result<f64> {
        let shared = self.shared.lock().unwrap();
        if shared.fail_time_read {
            return Err(anyhow!("time unavailable"));
        }
        Ok(shared.time)
    }

    fn get_duration(&self) -> Result<f64> {
        Ok(self.shared.lock().unwrap().duration)
    }

    fn get_player_state(&self) -> Result<PlayerStateCode> {
        Ok(self.shared.lock().unwrap().state)
    }

    fn mute(&mut self) -> Result<()> {
        self.shared.lock().unwrap().calls.push(Call::Mute(self.id.clone()));
        Ok(())
    }

    fn unmute(&mut self) -> Result<()> {
        self.shared.lock().unwrap().calls.push(Call::Unmute(self.id.clone()));
        Ok(())
    }

    fn destroy(&mut self) -> Result<()> {
        if !self.destroyed {
            self.destroyed = true;
            let mut shared = self.shared.lock().unwrap();
            shared.live -= 1;
            shared.calls.push(Call::Destroy(self.id.clone()));
        }
        Ok(())
    }
}
