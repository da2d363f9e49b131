use crate::error::ConfigError;
use crate::models::config::{SETTINGS_FILE, Settings, SyncConfig, debug_print_config};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming an explicit settings file.
pub const CONFIG_ENV: &str = "TUBEARCHIVIST_SYNC_CONFIG";

/// Works out where `sync_settings.ini` lives.
///
/// An explicit `--config` path wins, then `TUBEARCHIVIST_SYNC_CONFIG`, then the
/// directory containing the running executable.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    resolve_config_path_with(explicit, env::var_os(CONFIG_ENV).map(PathBuf::from), || {
        env::current_exe()
    })
}

fn resolve_config_path_with<F>(
    explicit: Option<&Path>,
    from_env: Option<PathBuf>,
    current_exe: F,
) -> Result<PathBuf, ConfigError>
where
    F: FnOnce() -> std::io::Result<PathBuf>,
{
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Some(path) = from_env.filter(|p| !p.as_os_str().is_empty()) {
        debug!("{} => {}", CONFIG_ENV, path.display());
        return Ok(path);
    }

    let no_location = |source: std::io::Error| ConfigError::NoLocation {
        file: SETTINGS_FILE.to_string(),
        source,
    };
    let exe = current_exe().map_err(no_location)?;
    let dir = exe.parent().ok_or_else(|| {
        no_location(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} has no parent directory", exe.display()),
        ))
    })?;
    Ok(dir.join(SETTINGS_FILE))
}

/// Loads and validates the settings used for one invocation.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
    let path = resolve_config_path(explicit)?;
    let raw = SyncConfig::load(&path)?;
    let settings = Settings::try_from(&raw)?;
    debug_print_config(&settings);
    Ok(settings)
}
