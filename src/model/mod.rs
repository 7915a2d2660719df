//! Model module - Application state and data types
//!
//! - `types`: Core type definitions (video ids, UI state, track geometry)
//! - `trim`: Trim range and its clamping rules
//! - `playback`: Normalized playback state and player errors
//! - `catalog`: Static video catalog and search
//! - `storage`: Key-value storage backends
//! - `trim_store`: Persisted per-video trim ranges

mod types;
mod trim;
mod playback;
mod catalog;
mod storage;
mod trim_store;

pub use types::{ActiveSection, TrackGeometry, TrimHandle, UiState, VideoId};

pub use trim::{TrimRange, MIN_SEGMENT};

pub use playback::{PlaybackState, PlayerError};

pub use catalog::{Catalog, VideoEntry};

pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};

pub use trim_store::TrimStore;
