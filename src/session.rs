//! Session controller
//!
//! Owns the screen-level state (title, options, playing, won, lost,
//! complete), builds levels, turns shot verdicts into transitions and queues
//! [`GameEvent`]s for presentation. Presentation feeds it three things:
//! elapsed time, key input and pointer clicks.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::GameResult;
use crate::settings::Settings;
use crate::sim::{Level, LevelIndex, Scene, ShotReport, Verdict};

/// Current screen of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    TitleMenu,
    /// Background / crosshair selection
    Options,
    Playing(LevelIndex),
    /// The given level was cleared; Confirm starts the next one
    LevelWon(LevelIndex),
    GameOver,
    GameComplete,
}

/// Key input understood by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Enter
    Confirm,
    /// Escape
    Back,
    Left,
    Right,
    Up,
    Down,
}

/// Whether the application should keep running after an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Notifications for presentation (sounds, HUD, overlays)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted(LevelIndex),
    AmmoChanged(u32),
    TargetHit(usize),
    LevelClear,
    OutOfAmmo,
    GameComplete,
    GameOver,
    ReturnedToTitle,
}

/// Where a decided level leads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    LevelAdvance(LevelIndex),
    GameComplete,
    GameOver,
}

impl Transition {
    /// Map a verdict for `level` to a transition; `Continue` has none
    pub fn from_verdict(level: LevelIndex, verdict: Verdict) -> Option<Self> {
        match verdict {
            Verdict::Continue => None,
            Verdict::OutOfAmmo => Some(Transition::GameOver),
            Verdict::LevelClear => Some(match level.next() {
                Some(next) => Transition::LevelAdvance(next),
                None => Transition::GameComplete,
            }),
        }
    }
}

pub struct Session {
    state: SessionState,
    settings: Settings,
    scene: Scene,
    level: Option<Level>,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl Session {
    /// Start at the title menu. Uses `settings.seed` when set.
    pub fn new(settings: Settings) -> GameResult<Self> {
        settings.validate()?;
        let scene = settings.scene()?;
        let seed = settings.seed.unwrap_or_else(rand::random::<u64>);
        log::info!(
            "Session seed {} (scene {}x{})",
            seed,
            scene.width(),
            scene.height()
        );

        Ok(Self {
            state: SessionState::TitleMenu,
            settings,
            scene,
            level: None,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The level on screen, if any (kept after it is decided)
    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Handle a key press
    pub fn handle_input(&mut self, input: Input) -> Flow {
        match (self.state, input) {
            (SessionState::TitleMenu, Input::Confirm) => {
                self.set_state(SessionState::Options);
            }
            (SessionState::TitleMenu, Input::Back) => {
                log::info!("Quit from title menu");
                return Flow::Quit;
            }

            (SessionState::Options, Input::Confirm) => self.start_level(LevelIndex::FIRST),
            (SessionState::Options, Input::Back) => self.return_to_title(),
            (SessionState::Options, Input::Right) => self.settings.next_background(),
            (SessionState::Options, Input::Left) => self.settings.previous_background(),
            (SessionState::Options, Input::Up) => self.settings.next_crosshair(),
            (SessionState::Options, Input::Down) => self.settings.previous_crosshair(),

            (
                SessionState::Playing(_)
                | SessionState::LevelWon(_)
                | SessionState::GameOver
                | SessionState::GameComplete,
                Input::Back,
            ) => self.return_to_title(),

            (SessionState::LevelWon(cleared), Input::Confirm) => match cleared.next() {
                Some(next) => self.start_level(next),
                None => self.start_level(LevelIndex::FIRST),
            },
            (SessionState::GameOver | SessionState::GameComplete, Input::Confirm) => {
                self.start_level(LevelIndex::FIRST)
            }
            (SessionState::Playing(level), Input::Confirm) => {
                log::debug!("Confirm ignored: level {} not complete", level);
            }

            (state, input) => {
                log::trace!("{:?} ignored in {:?}", input, state);
            }
        }
        Flow::Continue
    }

    /// Handle a pointer click at `pointer` (scene coordinates, already
    /// centered on the crosshair). Only acts while a level is being played.
    pub fn click(&mut self, pointer: Vec2) -> Option<ShotReport> {
        let SessionState::Playing(index) = self.state else {
            return None;
        };
        let report = self.level.as_mut()?.resolve_shot(pointer)?;

        self.events.push(GameEvent::AmmoChanged(report.ammo_remaining));
        if let Some(hit) = report.hit {
            self.events.push(GameEvent::TargetHit(hit));
        }

        match report.verdict {
            Verdict::LevelClear => self.events.push(GameEvent::LevelClear),
            Verdict::OutOfAmmo => self.events.push(GameEvent::OutOfAmmo),
            Verdict::Continue => {}
        }

        match Transition::from_verdict(index, report.verdict) {
            Some(Transition::LevelAdvance(_)) => {
                log::info!("Level {} complete", index);
                self.set_state(SessionState::LevelWon(index));
            }
            Some(Transition::GameComplete) => {
                log::info!("Game complete");
                self.events.push(GameEvent::GameComplete);
                self.set_state(SessionState::GameComplete);
            }
            Some(Transition::GameOver) => {
                log::info!("Game over on level {}", index);
                self.events.push(GameEvent::GameOver);
                self.set_state(SessionState::GameOver);
            }
            None => {}
        }
        Some(report)
    }

    /// Let `dt_ms` of game time pass for the level on screen
    pub fn advance(&mut self, dt_ms: u32) {
        if let Some(level) = self.level.as_mut() {
            level.advance(dt_ms);
        }
    }

    /// Replace the current level with a freshly spawned `index`
    fn start_level(&mut self, index: LevelIndex) {
        let level = Level::new(index, self.scene, &mut self.rng);
        self.events.push(GameEvent::LevelStarted(index));
        self.events.push(GameEvent::AmmoChanged(level.ammo_remaining()));
        self.level = Some(level);
        self.set_state(SessionState::Playing(index));
    }

    fn return_to_title(&mut self) {
        self.level = None;
        self.events.push(GameEvent::ReturnedToTitle);
        self.set_state(SessionState::TitleMenu);
    }

    fn set_state(&mut self, state: SessionState) {
        log::debug!("Session {:?} -> {:?}", self.state, state);
        self.state = state;
    }
}
