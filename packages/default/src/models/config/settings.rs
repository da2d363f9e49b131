use super::SyncConfig;
use crate::error::ConfigError;
use std::time::Duration;
use tracing::debug;

/// User id that bypasses the allow-list.
pub const SYNC_ALL_USER_ID: i64 = -1;

/// Validated settings, built once at startup and handed to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub allowed_user_ids: Vec<String>,
    pub base_url: String,
    pub api_token: String,
    pub timeout: Option<Duration>,
}

impl Settings {
    /// Returns whether watch events for `user_id` should be synced.
    pub fn sync_for_user(&self, user_id: i64) -> bool {
        if user_id == SYNC_ALL_USER_ID {
            return true;
        }
        let user_id = user_id.to_string();
        self.allowed_user_ids.iter().any(|id| *id == user_id)
    }

    /// `POST` target for marking a video watched.
    pub fn watched_endpoint(&self) -> String {
        format!("{}/api/watched/", self.base_url)
    }
}

impl TryFrom<&SyncConfig> for Settings {
    type Error = ConfigError;

    fn try_from(cfg: &SyncConfig) -> Result<Self, Self::Error> {
        let allowed_user_ids = cfg.allowed_user_ids()?;
        let api_token = cfg.api_token()?.to_string();
        let base_url = cfg.base_url()?.to_string();
        let timeout = cfg.tubearchivist.as_ref().and_then(|ta| ta.timeout);

        Ok(Self {
            allowed_user_ids,
            base_url,
            api_token,
            timeout,
        })
    }
}

pub fn debug_print_config(settings: &Settings) {
    let masked: String = "*".repeat(settings.api_token.chars().count());
    debug!("🔧 Loaded Configuration:");
    debug!("  [plex]");
    debug!("    user_ids = {}", settings.allowed_user_ids.join(","));
    debug!("  [tubearchivist]");
    debug!("    url = {}", settings.base_url);
    debug!("    api_token = {}", masked);
    match settings.timeout {
        Some(timeout) => debug!("    timeout = {:?}", timeout),
        None => debug!("    timeout = none"),
    }
}
