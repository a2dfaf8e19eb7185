//! Per-tick World update.
//!
//! `tick` is the only place entities interact.  Phases run in a fixed order
//! and every phase that destroys entities removes them from their collection
//! before any later phase looks at that collection.

use std::time::Duration;

use tracing::debug;

use crate::camera;
use crate::collectible::{animate_coins, animate_portals};
use crate::config::GameConfig;
use crate::enemy::step_crab;
use crate::entities::{Controls, World};
use crate::player::{damage_player, fire_pressed, is_dead, step_player};
use crate::projectile::{advance_ball, is_out_of_bounds, spawn_ball};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// The player touched a portal; the World should be replaced.
    LevelComplete,
    /// The player's hp is zero; physics stops until a restart.
    GameOver,
}

/// Advance the World by one tick.
pub fn tick(world: &mut World, controls: &Controls, config: &GameConfig, now: Duration) -> TickOutcome {
    if is_dead(&world.player) {
        return TickOutcome::GameOver;
    }

    let map_size = (world.map_width, world.map_height);

    // ── 1. Player input & physics ────────────────────────────────────────────
    step_player(
        &mut world.player,
        controls,
        &world.platforms,
        map_size,
        &config.physics,
        now,
    );
    if fire_pressed(&mut world.player, controls) {
        world
            .balls
            .push(spawn_ball(&world.player.rect, world.player.direction, &config.ball));
    }

    // ── 2. Enemy patrol ──────────────────────────────────────────────────────
    for crab in &mut world.crabs {
        step_crab(crab, &world.platforms, config.crab.move_speed, config.crab.gravity, now);
    }

    // ── 3. Player ↔ enemy: damage with cooldown ──────────────────────────────
    let touching_enemy = world
        .crabs
        .iter()
        .any(|crab| crab.rect.overlaps(&world.player.rect));
    if touching_enemy && damage_player(&mut world.player, &config.player, now) {
        debug!(hp = world.player.hp, "player hit");
        if is_dead(&world.player) {
            return TickOutcome::GameOver;
        }
    }

    // ── 4. Player ↔ coins ────────────────────────────────────────────────────
    let player_rect = world.player.rect;
    let before = world.coins.len();
    world.coins.retain(|coin| !coin.rect.overlaps(&player_rect));
    world.coin_count += (before - world.coins.len()) as u32;

    // ── 5. Player ↔ portal ───────────────────────────────────────────────────
    if world.portals.iter().any(|portal| portal.rect.overlaps(&player_rect)) {
        return TickOutcome::LevelComplete;
    }

    // ── 6. Pickup animation ──────────────────────────────────────────────────
    animate_coins(&mut world.coins, now);
    animate_portals(&mut world.portals, now);

    // ── 7. Projectiles ───────────────────────────────────────────────────────
    let map_width = world.map_width;
    for ball in &mut world.balls {
        advance_ball(ball);
    }
    world.balls.retain(|ball| !is_out_of_bounds(ball, map_width));

    let mut killed_crabs = vec![false; world.crabs.len()];
    world.balls.retain(|ball| {
        let mut hit = false;
        for (i, crab) in world.crabs.iter().enumerate() {
            if ball.rect.overlaps(&crab.rect) {
                killed_crabs[i] = true;
                hit = true;
            }
        }
        !hit
    });
    if killed_crabs.iter().any(|&k| k) {
        let mut flags = killed_crabs.iter();
        world.crabs.retain(|_| !flags.next().copied().unwrap_or(false));
        debug!(remaining = world.crabs.len(), "crab destroyed");
    }

    let platforms = &world.platforms;
    world
        .balls
        .retain(|ball| !platforms.iter().any(|p| ball.rect.overlaps(p)));

    // ── 8. Camera ────────────────────────────────────────────────────────────
    world.camera = camera::follow(
        &world.player.rect,
        map_size,
        (config.screen.width, config.screen.height),
    );

    TickOutcome::Continue
}
