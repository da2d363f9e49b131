use serde::Deserialize;
use std::time::Duration;

/// The `[tubearchivist]` section.
///
/// `url` is used verbatim as the API base; a trailing slash is not stripped.
#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TubeArchivistConfig {
    pub url: Option<String>,
    pub api_token: Option<String>,
    /// Request timeout, e.g. `30s`. No timeout when unset.
    #[serde(with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

impl TubeArchivistConfig {
    pub fn new(url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            api_token: Some(api_token.into()),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
