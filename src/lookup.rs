use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const DEFAULT_EMOJI: &str = "💊";
pub const DEFAULT_PURPOSE: &str = "Tratamento";

#[derive(Debug, Clone, Deserialize)]
pub struct PictogramEntry {
    #[serde(rename = "medicamento")]
    pub keyword: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(rename = "finalidade")]
    pub purpose: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoEntry {
    #[serde(rename = "medicamento")]
    pub keyword: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pictogram {
    pub emoji: String,
    pub purpose: String,
}

/// Keyword tables mapping medication names to an icon, a purpose label and
/// an instructional video.
#[derive(Debug, Clone, Default)]
pub struct Lookup {
    pictograms: Vec<PictogramEntry>,
    videos: Vec<VideoEntry>,
}

impl Lookup {
    pub fn new(pictograms: Vec<PictogramEntry>, videos: Vec<VideoEntry>) -> Self {
        Lookup { pictograms, videos }
    }

    /// Load both tables from JSON files. An absent path means an empty table.
    pub fn load(pictograms: Option<&Path>, videos: Option<&Path>) -> Result<Self> {
        let pictograms: Vec<PictogramEntry> = match pictograms {
            Some(path) => read_table(path)?,
            None => Vec::new(),
        };
        let videos: Vec<VideoEntry> = match videos {
            Some(path) => read_table(path)?,
            None => Vec::new(),
        };
        info!(
            pictograms = pictograms.len(),
            videos = videos.len(),
            "keyword tables loaded"
        );
        Ok(Lookup::new(pictograms, videos))
    }

    pub fn pictogram(&self, name: &str) -> Pictogram {
        match find(&self.pictograms, name, |e| &e.keyword) {
            Some(entry) => Pictogram {
                emoji: if entry.emoji.is_empty() {
                    DEFAULT_EMOJI.to_string()
                } else {
                    entry.emoji.clone()
                },
                purpose: entry.purpose.clone(),
            },
            None => Pictogram {
                emoji: DEFAULT_EMOJI.to_string(),
                purpose: DEFAULT_PURPOSE.to_string(),
            },
        }
    }

    pub fn video(&self, name: &str) -> Option<String> {
        find(&self.videos, name, |e| &e.keyword).map(|e| e.url.clone())
    }
}

fn read_table<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read keyword table {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid keyword table {}", path.display()))
}

/// First entry (in table order) whose keyword occurs in `name`, ignoring case.
fn find<'a, T>(table: &'a [T], name: &str, keyword: impl Fn(&T) -> &String) -> Option<&'a T> {
    let name = name.to_lowercase();
    table.iter().find(|entry| {
        let kw = keyword(entry).trim().to_lowercase();
        !kw.is_empty() && name.contains(&kw)
    })
}
