//! Error types
//!
//! The simulation itself cannot fail. Everything here comes from the
//! collaborators around it: the terminal, the clock-driven loop and the
//! settings file.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A collaborator could not start. Fatal: the game never runs half-initialized.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("could not enable terminal raw mode: {0}")]
    RawMode(#[source] io::Error),
    #[error("could not enter the alternate screen: {0}")]
    Screen(#[source] io::Error),
    #[error("could not query terminal size: {0}")]
    Size(#[source] io::Error),
    #[error("terminal is too small ({cols}x{rows}, need at least {min_cols}x{min_rows})")]
    TooSmall {
        cols: u16,
        rows: u16,
        min_cols: u16,
        min_rows: u16,
    },
}

/// I/O failure while the game is running
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("reading input failed: {0}")]
    Input(#[source] io::Error),
    #[error("drawing frame failed: {0}")]
    Render(#[source] io::Error),
}

/// Settings file could not be used
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Anything that stops the binary
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Init(#[from] InitError),
    #[error(transparent)]
    Platform(#[from] PlatformError),
}
