//! Home page brand video.
//!
//! An uploaded video file takes precedence, then a YouTube link from the
//! backend, then the built-in default video.

use std::sync::LazyLock;

use regex::Regex;
use tracing::instrument;

use super::LoadState;
use crate::api::{StoreApi, VideoConfig};

/// YouTube video used when the backend has none configured.
pub const DEFAULT_YOUTUBE_ID: &str = "qNKKSujit94";

static YOUTUBE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*(youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*").expect("Invalid regex")
});

/// Extract the 11-character video id from a YouTube URL.
#[must_use]
pub fn youtube_id(url: &str) -> Option<&str> {
    let id = YOUTUBE_ID_RE.captures(url)?.get(2)?.as_str();
    (id.len() == 11).then_some(id)
}

/// What the video block plays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    /// Uploaded MP4.
    File { url: String },
    /// Embedded YouTube player.
    YouTube { id: String, title: String },
}

impl VideoSource {
    /// URL to load in the player element.
    #[must_use]
    pub fn embed_url(&self) -> String {
        match self {
            Self::File { url } => url.clone(),
            Self::YouTube { id, .. } => format!(
                "https://www.youtube.com/embed/{id}?autoplay=1&mute=1&loop=1&playlist={id}"
            ),
        }
    }
}

/// Resolve the source to play for `config` (absent when the fetch failed).
#[must_use]
pub fn resolve_source(config: Option<&VideoConfig>) -> VideoSource {
    if let Some(url) = config.and_then(|c| c.video_file.as_deref()).filter(|u| !u.is_empty()) {
        return VideoSource::File {
            url: url.to_string(),
        };
    }

    let id = config
        .and_then(|c| c.youtube_url.as_deref())
        .and_then(youtube_id)
        .unwrap_or(DEFAULT_YOUTUBE_ID);
    let title = config
        .and_then(|c| c.title.clone())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Video".to_string());

    VideoSource::YouTube {
        id: id.to_string(),
        title,
    }
}

/// Video section state.
#[derive(Debug, Default)]
pub struct VideoSection {
    state: LoadState<Option<VideoConfig>>,
}

impl VideoSection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the video configuration. Failure falls back to the default video.
    #[instrument(skip_all)]
    pub async fn load<A: StoreApi>(&mut self, api: &A) {
        self.state = LoadState::Loading;
        let config = match api.video_config().await {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch video config");
                None
            }
        };
        self.state = LoadState::Loaded(config);
    }

    /// Source to play; `None` until the fetch settles.
    #[must_use]
    pub fn source(&self) -> Option<VideoSource> {
        self.state
            .loaded()
            .map(|config| resolve_source(config.as_ref()))
    }

    /// Heading and description, when the backend provides a title.
    #[must_use]
    pub fn caption(&self) -> Option<(&str, Option<&str>)> {
        let config = self.state.loaded()?.as_ref()?;
        let title = config.title.as_deref().filter(|t| !t.is_empty())?;
        Some((title, config.description.as_deref()))
    }
}
