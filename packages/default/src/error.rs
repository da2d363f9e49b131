use std::path::PathBuf;
use thiserror::Error;

/// Problems with the settings file. All of them are operator errors and map to exit code 1.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{} not found", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to read {}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: config::ConfigError,
    },

    #[error("{file} not setup - missing user_ids")]
    MissingUserIds { file: String },

    #[error("{file} not setup - missing api_token")]
    MissingApiToken { file: String },

    #[error("{file} not setup - missing url")]
    MissingUrl { file: String },

    #[error("unable to write to {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to determine the location of {file}")]
    NoLocation {
        file: String,
        #[source]
        source: std::io::Error,
    },
}

/// Problems with the incoming watch event itself.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyncError {
    #[error("no filename given - pass --youtube_id for episodes")]
    MissingFilename,

    #[error("filename '{0}' is too short to derive a video id")]
    FilenameTooShort(String),
}
