use std::collections::TryReserveError;
use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// The terminal could not be switched into game mode.
    #[error("cannot acquire the terminal: {0}")]
    Surface(#[source] io::Error),

    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),

    #[error("cannot allocate {tiles} road tiles: {source}")]
    TrackAlloc {
        tiles: usize,
        #[source]
        source: TryReserveError,
    },

    /// The input thread died before the session ended.
    #[error("input reader stopped unexpectedly")]
    InputLost,
}

pub type Result<T, E = GameError> = std::result::Result<T, E>;
