//! Paddle Pong entry point
//!
//! Brings up the terminal collaborators and runs the game loop. Any
//! collaborator that fails to start aborts the program before play begins.

use std::process::ExitCode;

use paddle_pong::platform::SystemClock;
use paddle_pong::platform::terminal::{TerminalBell, TerminalRenderer, TerminalSession};
use paddle_pong::{Error, GameLoop, Settings};

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Paddle Pong starting...");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(rand::random);

    match run(&settings, seed) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("paddle-pong: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(settings: &Settings, seed: u64) -> Result<(), Error> {
    // Dropped on return, restoring the terminal before any error prints
    let session = TerminalSession::start()?;
    let mut game = GameLoop::new(
        seed,
        settings,
        session.keyboard(),
        SystemClock::new(),
        TerminalRenderer::new(),
        TerminalBell,
    );
    game.run()?;
    Ok(())
}
