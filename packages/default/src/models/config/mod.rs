mod plex;
mod settings;
mod tubearchivist;

pub use plex::*;
pub use settings::*;
pub use tubearchivist::*;

use crate::error::ConfigError;
use config::{Config, File, FileFormat};
use ini::Ini;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Fixed name of the settings file.
pub const SETTINGS_FILE: &str = "sync_settings.ini";

/// Raw contents of `sync_settings.ini`.
///
/// Every section and key is optional here so that a missing one can be reported by name;
/// [`Settings`] is the validated form the rest of the crate works with.
///
/// The capitalised section names written by older installs (`[Plex]`, `[TubeArchivist]`)
/// are accepted as well.
#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    #[serde(default, alias = "Plex")]
    pub plex: Option<PlexConfig>,
    #[serde(default, alias = "TubeArchivist")]
    pub tubearchivist: Option<TubeArchivistConfig>,
    #[serde(skip)]
    source: Option<PathBuf>,
}

impl SyncConfig {
    /// Reads and parses the INI settings file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("loading settings from {}", path.display());

        let contents = fs::read_to_string(path).map_err(|source| {
            let path = path.to_path_buf();
            match source.kind() {
                ErrorKind::NotFound => ConfigError::NotFound { path, source },
                _ => ConfigError::Unreadable { path, source },
            }
        })?;

        let malformed = |source: config::ConfigError| ConfigError::Malformed {
            path: path.to_path_buf(),
            source,
        };
        let settings = Config::builder()
            .add_source(File::from_str(&contents, FileFormat::Ini))
            .build()
            .map_err(malformed)?;

        let mut cfg = settings.try_deserialize::<Self>().map_err(malformed)?;
        cfg.source = Some(path.to_path_buf());
        Ok(cfg)
    }

    /// Writes the current settings back to `path`, replacing its contents.
    ///
    /// Sections and keys that are unset are left out of the file.
    pub fn persist(&self, path: &Path) -> Result<(), ConfigError> {
        let mut ini = Ini::new();

        if let Some(user_ids) = self.plex.as_ref().and_then(|p| p.user_ids.as_ref()) {
            ini.with_section(Some("plex")).set("user_ids", user_ids);
        }

        if let Some(ta) = &self.tubearchivist {
            if let Some(url) = &ta.url {
                ini.with_section(Some("tubearchivist")).set("url", url);
            }
            if let Some(api_token) = &ta.api_token {
                ini.with_section(Some("tubearchivist"))
                    .set("api_token", api_token);
            }
            if let Some(timeout) = ta.timeout {
                let timeout = humantime_serde::re::humantime::format_duration(timeout);
                ini.with_section(Some("tubearchivist"))
                    .set("timeout", timeout.to_string());
            }
        }

        ini.write_to_file(path).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("wrote settings to {}", path.display());
        Ok(())
    }

    /// Name used in diagnostics: the loaded file's name, or [`SETTINGS_FILE`].
    pub fn file_label(&self) -> String {
        self.source
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| SETTINGS_FILE.to_string())
    }

    pub fn allowed_user_ids(&self) -> Result<Vec<String>, ConfigError> {
        self.plex
            .as_ref()
            .and_then(PlexConfig::parsed_user_ids)
            .ok_or_else(|| ConfigError::MissingUserIds {
                file: self.file_label(),
            })
    }

    pub fn base_url(&self) -> Result<&str, ConfigError> {
        self.tubearchivist
            .as_ref()
            .and_then(|ta| ta.url.as_deref())
            .ok_or_else(|| ConfigError::MissingUrl {
                file: self.file_label(),
            })
    }

    pub fn api_token(&self) -> Result<&str, ConfigError> {
        self.tubearchivist
            .as_ref()
            .and_then(|ta| ta.api_token.as_deref())
            .ok_or_else(|| ConfigError::MissingApiToken {
                file: self.file_label(),
            })
    }

    pub fn with_plex(mut self, plex: PlexConfig) -> Self {
        self.plex = Some(plex);
        self
    }

    pub fn with_tubearchivist(mut self, tubearchivist: TubeArchivistConfig) -> Self {
        self.tubearchivist = Some(tubearchivist);
        self
    }
}
