pub mod app;
pub mod args;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod log;
pub mod models;
pub mod tubearchivist;
