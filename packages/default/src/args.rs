use crate::models::watch_event::WatchEvent;
use anyhow::{Result, bail};
use clap::Parser;
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::warn;

/// Environment variable naming the encoding Tautulli passes arguments in.
pub const ENCODING_ENV: &str = "TAUTULLI_ENCODING";

/// Mark a TubeArchivist video as watched when Tautulli reports it finished.
///
/// Configure in Tautulli as a script notification on "Watched" with the arguments
/// `--userId {user_id} --contentType {media_type} <episode>--youtube_id {filename}</episode>`.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Tautulli user id of the viewer (-1 syncs regardless of the allow-list)
    #[arg(
        long = "userId",
        allow_negative_numbers = true,
        required_unless_present = "check_config"
    )]
    pub user_id: Option<i64>,

    /// Media type reported by Tautulli; only `episode` is synced
    #[arg(long = "contentType", required_unless_present = "check_config")]
    pub content_type: Option<String>,

    /// Filename of the watched video, e.g. `dQw4w9WgXcQ.mp4`
    #[arg(long = "youtube_id")]
    pub youtube_id: Option<String>,

    /// Settings file (default: sync_settings.ini next to the executable)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Validate the settings file and exit
    #[arg(long)]
    pub check_config: bool,
}

impl Args {
    /// Parses the process arguments, decoding them with `TAUTULLI_ENCODING`.
    pub fn from_env() -> Result<Self> {
        let encoding = env::var(ENCODING_ENV).unwrap_or_else(|_| "UTF-8".to_string());
        let args = decode_args(env::args_os(), &ArgEncoding::from_label(&encoding))?;
        Ok(Self::parse_from(args))
    }

    /// The watch event described by these arguments, if this is not a `--check-config` run.
    pub fn watch_event(&self) -> Option<WatchEvent> {
        let user_id = self.user_id?;
        let content_type = self.content_type.clone()?;
        Some(WatchEvent::new(
            user_id,
            content_type,
            self.youtube_id.clone(),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgEncoding {
    Utf8,
    Latin1,
    Unknown(String),
}

impl ArgEncoding {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => ArgEncoding::Utf8,
            "iso-8859-1" | "iso8859-1" | "latin-1" | "latin1" | "l1" => ArgEncoding::Latin1,
            _ => ArgEncoding::Unknown(label.to_string()),
        }
    }

    fn decode(&self, raw: &[u8]) -> Result<String> {
        match self {
            ArgEncoding::Utf8 => match std::str::from_utf8(raw) {
                Ok(s) => Ok(s.to_string()),
                Err(e) => bail!("argument is not valid UTF-8: {}", e),
            },
            ArgEncoding::Latin1 => Ok(raw.iter().map(|&b| b as char).collect()),
            ArgEncoding::Unknown(_) => Ok(String::from_utf8_lossy(raw).into_owned()),
        }
    }
}

/// Decodes raw process arguments to strings.
pub fn decode_args<I>(raw: I, encoding: &ArgEncoding) -> Result<Vec<String>>
where
    I: IntoIterator<Item = OsString>,
{
    if let ArgEncoding::Unknown(label) = encoding {
        warn!(
            "unsupported {} '{}', decoding arguments as UTF-8",
            ENCODING_ENV, label
        );
    }
    raw.into_iter()
        .map(|arg| encoding.decode(&os_bytes(&arg)))
        .collect()
}

#[cfg(unix)]
fn os_bytes(arg: &OsString) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    arg.as_os_str().as_bytes().to_vec()
}

#[cfg(not(unix))]
fn os_bytes(arg: &OsString) -> Vec<u8> {
    arg.to_string_lossy().into_owned().into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("tubearchivist-sync").chain(args.iter().copied()))
    }

    #[test]
    fn test_parses_tautulli_arguments() {
        let args = parse(&[
            "--userId",
            "5",
            "--contentType",
            "episode",
            "--youtube_id",
            "show.mp4",
        ])
        .unwrap();

        assert_eq!(
            args.watch_event(),
            Some(WatchEvent::new(5, "episode", Some("show.mp4".into())))
        );
        assert!(!args.check_config);
    }

    #[test]
    fn test_accepts_sentinel_user_id() {
        let args = parse(&["--userId", "-1", "--contentType", "episode"]).unwrap();
        assert_eq!(args.user_id, Some(-1));
        assert_eq!(args.youtube_id, None);
    }

    #[test]
    fn test_user_id_must_be_an_integer() {
        assert!(parse(&["--userId", "bob", "--contentType", "episode"]).is_err());
    }

    #[test]
    fn test_user_id_and_content_type_are_required() {
        assert!(parse(&["--contentType", "episode"]).is_err());
        assert!(parse(&["--userId", "5"]).is_err());
    }

    #[test]
    fn test_check_config_needs_no_event() {
        let args = parse(&["--check-config", "--config", "/tmp/sync.ini"]).unwrap();
        assert!(args.check_config);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/sync.ini")));
        assert_eq!(args.watch_event(), None);
    }

    #[test]
    fn test_encoding_labels() {
        assert_eq!(ArgEncoding::from_label("UTF-8"), ArgEncoding::Utf8);
        assert_eq!(ArgEncoding::from_label("utf8"), ArgEncoding::Utf8);
        assert_eq!(ArgEncoding::from_label("ISO-8859-1"), ArgEncoding::Latin1);
        assert_eq!(
            ArgEncoding::from_label("cp1252"),
            ArgEncoding::Unknown("cp1252".into())
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_decodes_latin1_arguments() {
        use std::os::unix::ffi::OsStringExt;
        let raw = vec![OsString::from_vec(b"caf\xe9.mp4".to_vec())];

        let decoded = decode_args(raw, &ArgEncoding::Latin1).unwrap();
        assert_eq!(decoded, vec!["café.mp4".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn test_invalid_utf8_is_rejected() {
        use std::os::unix::ffi::OsStringExt;
        let raw = vec![OsString::from_vec(b"caf\xe9.mp4".to_vec())];

        assert!(decode_args(raw.clone(), &ArgEncoding::Utf8).is_err());
        let lossy = decode_args(raw, &ArgEncoding::Unknown("cp1252".into())).unwrap();
        assert_eq!(lossy, vec!["caf\u{fffd}.mp4".to_string()]);
    }

    #[test]
    fn test_utf8_arguments_pass_through() {
        let raw = vec![OsString::from("--youtube_id"), OsString::from("ビデオ.mp4")];
        let decoded = decode_args(raw, &ArgEncoding::Utf8).unwrap();
        assert_eq!(decoded, vec!["--youtube_id", "ビデオ.mp4"]);
    }
}
