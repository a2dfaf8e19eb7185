//! Level progression around the World tick.
//!
//! The session decides what happens after a tick: keep playing, swap in the
//! next level's World, stop physics on death, or end.  Every transition and
//! every retry builds a brand-new World from level data.
//!
//! Carry-over policy: hp and the held state of jump and fire survive a portal
//! transition, the coin counter does not (it belongs to the level's World).
//! A retry after game over restarts the same level with a full-health player.

use tracing::info;

use crate::clock::Clock;
use crate::compute::{tick, TickOutcome};
use crate::config::GameConfig;
use crate::entities::{Controls, GameMode, World};
use crate::error::LevelError;
use crate::level::{build_world, LevelSource};
use crate::render::{compose_frame, Frame};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    /// The quit control was pressed.
    Quit,
    /// The portal of the last level was reached.
    Completed,
}

pub struct Session<S, C> {
    source: S,
    clock: C,
    config: GameConfig,
    level: u32,
    world: World,
    mode: GameMode,
}

impl<S: LevelSource, C: Clock> Session<S, C> {
    /// Load `config.levels.first` and start playing it.
    pub fn start(source: S, clock: C, config: GameConfig) -> Result<Self, LevelError> {
        let level = config.levels.first;
        let world = load_world(&source, &clock, &config, level)?;
        info!(level, "level started");
        Ok(Session {
            source,
            clock,
            config,
            level,
            world,
            mode: GameMode::Playing,
        })
    }

    /// Run one tick of the session with this tick's controls.
    pub fn step(&mut self, controls: &Controls) -> Result<SessionStatus, LevelError> {
        if controls.quit {
            info!(level = self.level, "quit requested");
            return Ok(SessionStatus::Quit);
        }

        match self.mode {
            GameMode::GameOver => {
                if controls.restart {
                    self.restart(controls)?;
                }
                Ok(SessionStatus::Running)
            }
            GameMode::Playing => {
                let now = self.clock.now();
                match tick(&mut self.world, controls, &self.config, now) {
                    TickOutcome::Continue => Ok(SessionStatus::Running),
                    TickOutcome::GameOver => {
                        info!(level = self.level, coins = self.world.coin_count, "game over");
                        self.mode = GameMode::GameOver;
                        Ok(SessionStatus::Running)
                    }
                    TickOutcome::LevelComplete => self.advance_level(),
                }
            }
        }
    }

    fn advance_level(&mut self) -> Result<SessionStatus, LevelError> {
        let next = self.level + 1;
        if next > self.config.levels.max {
            info!(level = self.level, "final level cleared");
            return Ok(SessionStatus::Completed);
        }

        let old = &self.world.player;
        let hp = old.hp;
        let (jump_held, fire_held) = (old.jump_held, old.fire_held);
        let mut world = load_world(&self.source, &self.clock, &self.config, next)?;
        world.player.hp = hp;
        world.player.jump_held = jump_held;
        world.player.fire_held = fire_held;

        info!(from = self.level, to = next, hp, "level transition");
        self.level = next;
        self.world = world;
        Ok(SessionStatus::Running)
    }

    /// Controls held on the restart tick count as already held, so the key
    /// that restarted does not also jump or fire.
    fn restart(&mut self, controls: &Controls) -> Result<(), LevelError> {
        self.world = load_world(&self.source, &self.clock, &self.config, self.level)?;
        self.world.player.jump_held = controls.jump;
        self.world.player.fire_held = controls.fire;
        self.mode = GameMode::Playing;
        info!(level = self.level, "level restarted");
        Ok(())
    }

    pub fn frame(&self) -> Frame {
        compose_frame(&self.world, self.mode, self.config.player.max_hp)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

fn load_world<S: LevelSource, C: Clock>(
    source: &S,
    clock: &C,
    config: &GameConfig,
    level: u32,
) -> Result<World, LevelError> {
    let bundle = source.load(level)?;
    build_world(level, &bundle, config, clock.now())
}
