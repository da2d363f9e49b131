use crate::models::config::Settings;
use crate::models::watch_event::WatchEvent;
use anyhow::Result;
use tracing::{debug, info};

/// How a watch event was handled. Every variant is a normal exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The user is not in the allow-list.
    UserSkipped { user_id: i64 },
    /// Anything other than `episode`.
    UnsupportedContentType(String),
    MarkedWatched { item_id: String },
}

impl Outcome {
    /// Line printed for the operator.
    pub fn message(&self) -> String {
        match self {
            Outcome::UserSkipped { .. } => "We will not sync for this user".to_string(),
            Outcome::UnsupportedContentType(content_type) => {
                format!("ERROR: {} not found - invalid contentType", content_type)
            }
            Outcome::MarkedWatched { .. } => "Successfully logged as watched.".to_string(),
        }
    }

    /// Always 0, including for unsupported content types.
    pub fn exit_code(&self) -> u8 {
        0
    }
}

/// Filters `event` and, if it passes, marks its video watched through `mark_watched`.
///
/// `mark_watched` is called at most once, and only after the user and content type checks
/// pass and a video id could be derived from the filename.
pub fn dispatch<F>(event: &WatchEvent, settings: &Settings, mark_watched: F) -> Result<Outcome>
where
    F: FnOnce(&str) -> Result<()>,
{
    if !settings.sync_for_user(event.user_id) {
        debug!("user {} not in allow-list", event.user_id);
        return Ok(Outcome::UserSkipped {
            user_id: event.user_id,
        });
    }

    if !event.is_episode() {
        debug!("ignoring content type {}", event.content_type);
        return Ok(Outcome::UnsupportedContentType(event.content_type.clone()));
    }

    let item_id = event.item_id()?;
    info!("syncing {} for user {}", item_id, event.user_id);
    mark_watched(&item_id)?;

    Ok(Outcome::MarkedWatched { item_id })
}
