pub mod config;
pub mod watch_event;
