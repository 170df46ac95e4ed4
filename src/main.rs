mod config;
mod error;
mod game;
mod input;
mod player;
mod render;
mod screen;
mod session;
mod sound;
mod track;

use std::fs::File;
use std::process::ExitCode;

use log::{error, info};

use crate::config::Layout;
use crate::screen::Terminal;
use crate::session::Phase;
use crate::sound::Speaker;
use crate::track::Spawner;

/// The game owns stdout, so logs go to a file, and only when asked for.
const LOG_FILE: &str = "jumping-jack.log";

fn init_logging() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    match File::create(LOG_FILE) {
        Ok(file) => {
            let _ = env_logger::Builder::from_default_env()
                .target(env_logger::Target::Pipe(Box::new(file)))
                .format_timestamp_millis()
                .try_init();
        }
        Err(e) => eprintln!("jumping-jack: cannot open {LOG_FILE}: {e}"),
    }
}

fn main() -> ExitCode {
    init_logging();

    let layout = Layout::default();
    let outcome = Terminal::acquire(layout.screen_width(), layout.height).and_then(|mut term| {
        let speaker = Speaker::open();
        game::run(&mut term, layout, Spawner::from_os(), &speaker)
    });

    // The terminal is restored by now.
    match outcome {
        Ok(Phase::Errored) => ExitCode::FAILURE,
        Ok(phase) => {
            info!("finished: {phase:?}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            eprintln!("jumping-jack: {e}");
            ExitCode::FAILURE
        }
    }
}
