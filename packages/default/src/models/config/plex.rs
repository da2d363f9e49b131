use serde::Deserialize;

/// The `[plex]` section: whose watch events are synced.
#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PlexConfig {
    /// Comma separated Tautulli user ids, e.g. `5,9`
    pub user_ids: Option<String>,
}

impl PlexConfig {
    pub fn new(user_ids: impl Into<String>) -> Self {
        Self {
            user_ids: Some(user_ids.into()),
        }
    }

    /// Splits `user_ids` into individual ids, trimming whitespace and dropping empty entries.
    pub fn parsed_user_ids(&self) -> Option<Vec<String>> {
        self.user_ids.as_ref().map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect()
        })
    }
}
