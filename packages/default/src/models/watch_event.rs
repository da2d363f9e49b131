use crate::error::SyncError;
use serde::Serialize;

/// The only content type that is synced.
pub const EPISODE: &str = "episode";

/// Number of trailing characters stripped from a filename to get the video id (`.mp4`).
pub const EXTENSION_WIDTH: usize = 4;

/// One "watched" notification from Tautulli.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    pub user_id: i64,
    pub content_type: String,
    pub filename: Option<String>,
}

impl WatchEvent {
    pub fn new(user_id: i64, content_type: impl Into<String>, filename: Option<String>) -> Self {
        Self {
            user_id,
            content_type: content_type.into(),
            filename,
        }
    }

    pub fn is_episode(&self) -> bool {
        self.content_type == EPISODE
    }

    /// TubeArchivist video id for this event's file.
    pub fn item_id(&self) -> Result<String, SyncError> {
        let filename = self.filename.as_deref().ok_or(SyncError::MissingFilename)?;
        item_id_from_filename(filename)
    }
}

/// Drops the last [`EXTENSION_WIDTH`] characters of `filename`.
///
/// This is a fixed-width trim, not extension aware: `clip.webm` becomes `clip.`. Filenames that would
/// leave nothing behind are rejected.
pub fn item_id_from_filename(filename: &str) -> Result<String, SyncError> {
    let len = filename.chars().count();
    if len <= EXTENSION_WIDTH {
        return Err(SyncError::FilenameTooShort(filename.to_string()));
    }
    Ok(filename.chars().take(len - EXTENSION_WIDTH).collect())
}

/// Body of `POST /api/watched/`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct WatchedPayload<'a> {
    pub id: &'a str,
    pub is_watched: bool,
}

impl<'a> WatchedPayload<'a> {
    pub fn watched(id: &'a str) -> Self {
        Self {
            id,
            is_watched: true,
        }
    }
}
