//! Duck Hunt entry point
//!
//! Headless native driver: no window or audio. It walks the menus, then
//! lets a simple autoplayer shoot through the levels on a fixed frame clock
//! and logs what the session reports. Run with `RUST_LOG=info`.
//!
//! Usage: `duck-hunt [scale] [volume]`

use std::process::ExitCode;

use duck_hunt::{GameEvent, Input, Session, SessionState, Settings};
use glam::Vec2;

/// Frame length fed to the session (ms)
const FRAME_MS: u32 = 16;
/// Time between autoplayer shots (ms)
const SHOT_INTERVAL_MS: u32 = 600;
/// Every Nth shot is fired into the sky on purpose
const MISS_EVERY: u32 = 4;
/// Give up after this much simulated time (ms)
const MAX_RUN_MS: u32 = 10 * 60 * 1000;

struct Autoplayer {
    since_shot_ms: u32,
    shots: u32,
}

impl Autoplayer {
    fn new() -> Self {
        Self {
            since_shot_ms: 0,
            shots: 0,
        }
    }

    /// Pick an aim point when a shot is due
    fn aim(&mut self, session: &Session, dt_ms: u32) -> Option<Vec2> {
        self.since_shot_ms += dt_ms;
        if self.since_shot_ms < SHOT_INTERVAL_MS {
            return None;
        }
        self.since_shot_ms = 0;
        self.shots += 1;

        if self.shots % MISS_EVERY == 0 {
            return Some(Vec2::new(-1.0, -1.0));
        }
        let target = session
            .level()?
            .targets()
            .iter()
            .find(|t| t.is_hittable())?;
        Some(target.pos + target.size / 2.0)
    }
}

fn run(settings: Settings) -> duck_hunt::GameResult<()> {
    let mut session = Session::new(settings)?;
    let mut autoplayer = Autoplayer::new();

    // Title -> options -> level 1
    session.handle_input(Input::Confirm);
    session.handle_input(Input::Confirm);

    let mut elapsed_ms = 0;
    while elapsed_ms < MAX_RUN_MS {
        session.advance(FRAME_MS);
        elapsed_ms += FRAME_MS;

        match session.state() {
            SessionState::Playing(_) => {
                if let Some(aim) = autoplayer.aim(&session, FRAME_MS) {
                    session.click(aim);
                }
            }
            SessionState::LevelWon(_) => {
                session.handle_input(Input::Confirm);
            }
            SessionState::GameOver | SessionState::GameComplete => {
                for event in session.drain_events() {
                    log::info!("event: {:?}", event);
                }
                log::info!(
                    "Finished in {:?} after {} ms ({} shots)",
                    session.state(),
                    elapsed_ms,
                    autoplayer.shots
                );
                return Ok(());
            }
            SessionState::TitleMenu | SessionState::Options => {}
        }

        for event in session.drain_events() {
            match event {
                GameEvent::TargetHit(i) => log::info!("target {} down", i),
                other => log::info!("event: {:?}", other),
            }
        }
    }

    log::warn!("Stopped after {} ms without a result", elapsed_ms);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Duck Hunt (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings = match Settings::from_args(&args) {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("{}", err);
            eprintln!("usage: duck-hunt [scale] [volume]\n{}", err);
            return ExitCode::FAILURE;
        }
    };

    match run(settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
