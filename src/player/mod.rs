//! Player module - embeddable player integration
//!
//! - `sdk`: Contract of the external player SDK and its callback events
//! - `bootstrap`: One-time SDK loading shared by all sessions
//! - `session`: Per-video session state machine and its timers
//! - `adapter`: Normalized playback API and event handling
//! - `simulated`: In-process SDK used by the terminal dashboard

mod sdk;
mod bootstrap;
mod session;
mod adapter;
mod simulated;

#[cfg(test)]
pub(crate) mod testing;

pub use sdk::{
    EventSink, PlayerInstance, PlayerOptions, PlayerSdk, PlayerStateCode, SdkEvent, SessionEvent,
    SessionEventKind,
};

pub use bootstrap::ApiBootstrap;

pub use session::SessionPhase;

pub use adapter::{PlayerAdapter, PlayerSettings};

pub use simulated::SimulatedSdk;
