use crate::args::Args;
use crate::config::load_settings;
use crate::dispatch::{Outcome, dispatch};
use crate::error::ConfigError;
use crate::tubearchivist::TubeArchivistClient;
use anyhow::{Context, Result};

/// Exit code for any settings problem.
pub const EXIT_CONFIG: u8 = 1;
/// Exit code for a failed sync: bad filename, unreachable server, error response.
pub const EXIT_FAILURE: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    ConfigChecked,
    Dispatched(Outcome),
}

impl Report {
    pub fn message(&self) -> String {
        match self {
            Report::ConfigChecked => "Configuration OK".to_string(),
            Report::Dispatched(outcome) => outcome.message(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Report::ConfigChecked => 0,
            Report::Dispatched(outcome) => outcome.exit_code(),
        }
    }
}

/// Handles one invocation: load settings, then filter and dispatch the watch event.
pub fn run(args: &Args) -> Result<Report> {
    let settings = load_settings(args.config.as_deref())?;

    if args.check_config {
        return Ok(Report::ConfigChecked);
    }

    let event = args
        .watch_event()
        .context("--userId and --contentType are required")?;

    let outcome = dispatch(&event, &settings, |item_id| {
        TubeArchivistClient::new(&settings)?.mark_watched(item_id)
    })?;

    Ok(Report::Dispatched(outcome))
}

pub fn failure_exit_code(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<ConfigError>().is_some() {
        EXIT_CONFIG
    } else {
        EXIT_FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;
    use clap::Parser;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn args(config: &Path, extra: &[&str]) -> Args {
        let config = config.to_string_lossy().into_owned();
        let mut argv = vec!["tubearchivist-sync", "--config", config.as_str()];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    fn write_settings(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("sync_settings.ini");
        // Port 9 (discard) is never served, so any request made here would fail.
        fs::write(
            &path,
            "[plex]\nuser_ids = 5,9\n[tubearchivist]\nurl = http://127.0.0.1:9\napi_token = abc\n",
        )
        .unwrap();
        path
    }

    #[test]
    fn test_missing_settings_file_exits_1() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("sync_settings.ini");

        let err = run(&args(
            &missing,
            &["--userId", "5", "--contentType", "episode", "--youtube_id", "a.mp4"],
        ))
        .unwrap_err();

        assert!(err.downcast_ref::<ConfigError>().is_some());
        assert_eq!(failure_exit_code(&err), EXIT_CONFIG);
    }

    #[test]
    fn test_missing_key_exits_1() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sync_settings.ini");
        fs::write(&path, "[tubearchivist]\nurl = http://127.0.0.1:9\napi_token = abc\n").unwrap();

        let err = run(&args(&path, &["--userId", "5", "--contentType", "episode"])).unwrap_err();

        assert_eq!(failure_exit_code(&err), EXIT_CONFIG);
        assert_eq!(
            err.to_string(),
            "sync_settings.ini not setup - missing user_ids"
        );
    }

    #[test]
    fn test_unlisted_user_exits_0_without_request() {
        let dir = tempdir().unwrap();
        let path = write_settings(dir.path());

        let report = run(&args(
            &path,
            &["--userId", "7", "--contentType", "episode", "--youtube_id", "show.mp4"],
        ))
        .unwrap();

        assert_eq!(
            report,
            Report::Dispatched(Outcome::UserSkipped { user_id: 7 })
        );
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_movie_exits_0_without_request() {
        let dir = tempdir().unwrap();
        let path = write_settings(dir.path());

        let report = run(&args(&path, &["--userId", "5", "--contentType", "movie"])).unwrap();

        assert_eq!(
            report,
            Report::Dispatched(Outcome::UnsupportedContentType("movie".into()))
        );
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_short_filename_exits_2() {
        let dir = tempdir().unwrap();
        let path = write_settings(dir.path());

        let err = run(&args(
            &path,
            &["--userId", "5", "--contentType", "episode", "--youtube_id", "ab"],
        ))
        .unwrap_err();

        assert!(err.downcast_ref::<SyncError>().is_some());
        assert_eq!(failure_exit_code(&err), EXIT_FAILURE);
    }

    #[test]
    fn test_check_config() {
        let dir = tempdir().unwrap();
        let path = write_settings(dir.path());

        let report = run(&args(&path, &["--check-config"])).unwrap();

        assert_eq!(report, Report::ConfigChecked);
        assert_eq!(report.message(), "Configuration OK");
        assert_eq!(report.exit_code(), 0);
    }
}
