//! Static video catalog and search over it

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::types::VideoId;

/// One entry of the catalog
#[derive(Clone, Debug)]
pub struct VideoEntry {
    pub id: VideoId,
    pub title: String,
    pub description: String,
    pub channel: String,
    pub published_at: Option<DateTime<Utc>>,
}

impl VideoEntry {
    fn matches(&self, query_lower: &str) -> bool {
        self.title.to_lowercase().contains(query_lower)
            || self.description.to_lowercase().contains(query_lower)
    }
}

// Search-list response shape: items[].id.videoId + items[].snippet.*
#[derive(Deserialize)]
struct SearchListResponse {
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Snippet,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: VideoId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    channel_title: String,
    #[serde(default)]
    published_at: Option<DateTime<Utc>>,
}

/// Ordered, pre-loaded list of videos
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    entries: Vec<VideoEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<VideoEntry>) -> Self {
        Self { entries }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let response: SearchListResponse = serde_json::from_str(content)?;
        let entries = response
            .items
            .into_iter()
            .map(|item| VideoEntry {
                id: item.id.video_id,
                title: item.snippet.title,
                description: item.snippet.description,
                channel: item.snippet.channel_title,
                published_at: item.snippet.published_at,
            })
            .collect();
        Ok(Self { entries })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading catalog {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("parsing catalog {}", path.display()))
    }

    /// Loads the catalog at `path`, falling back to the built-in list.
    pub fn load_or_builtin(path: &Path) -> Self {
        if !path.exists() {
            tracing::info!(path = %path.display(), "No catalog file, using built-in list");
            return Self::builtin();
        }
        match Self::load(path) {
            Ok(catalog) => {
                tracing::info!(videos = catalog.len(), "Catalog loaded");
                catalog
            }
            Err(e) => {
                tracing::warn!(error = %e, "Catalog unreadable, using built-in list");
                Self::builtin()
            }
        }
    }

    pub fn builtin() -> Self {
        let entry = |id: &str, title: &str, description: &str, channel: &str| VideoEntry {
            id: VideoId::new(id),
            title: title.to_string(),
            description: description.to_string(),
            channel: channel.to_string(),
            published_at: None,
        };
        Self::new(vec![
            entry(
                "aqz-KE-bpKQ",
                "Big Buck Bunny",
                "A giant rabbit takes revenge on three bullying rodents.",
                "Blender",
            ),
            entry(
                "eRsGyueVLvQ",
                "Sintel",
                "A lonely young woman searches for her baby dragon.",
                "Blender",
            ),
            entry(
                "R6MlUcmOul8",
                "Tears of Steel",
                "Warriors and scientists gather in Amsterdam to save the world.",
                "Blender",
            ),
            entry(
                "WhWc3b3KhnY",
                "Spring",
                "A shepherd girl and her dog face ancient spirits.",
                "Blender",
            ),
            entry(
                "Z4C82eyhwgU",
                "Cosmos Laundromat",
                "A suicidal sheep meets a mysterious salesman.",
                "Blender",
            ),
        ])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &VideoId) -> Option<&VideoEntry> {
        self.entries.iter().find(|entry| entry.id == *id)
    }

    /// Case-insensitive search over title and description, in catalog order.
    pub fn search(&self, query: &str) -> Vec<&VideoEntry> {
        let query_lower = query.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|entry| query_lower.is_empty() || entry.matches(&query_lower))
            .collect()
    }
}
