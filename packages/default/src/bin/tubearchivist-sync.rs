use std::process::ExitCode;
use tracing::debug;
use tubearchivist_sync::app::{self, EXIT_FAILURE};
use tubearchivist_sync::args::Args;
use tubearchivist_sync::log::init_tracing;

fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    init_tracing();
    if let Ok(path) = dotenv {
        debug!("loaded environment from {}", path.display());
    }

    let args = match Args::from_env() {
        Ok(args) => args,
        Err(err) => {
            println!("ERROR: {:#}", err);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    match app::run(&args) {
        Ok(report) => {
            println!("{}", report.message());
            ExitCode::from(report.exit_code())
        }
        Err(err) => {
            debug!("{:?}", err);
            println!("ERROR: {:#}", err);
            ExitCode::from(app::failure_exit_code(&err))
        }
    }
}
