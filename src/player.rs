//! Player state machine: controls → velocity → axis-separated movement.
//!
//! Horizontal state is idle/running in a facing direction; `airborne` is
//! tracked orthogonally and is re-proved every tick by the vertical pass.

use std::time::Duration;

use crate::collision::{resolve_horizontal, resolve_vertical, VerticalContact};
use crate::config::{GameConfig, PhysicsConfig, PlayerConfig};
use crate::entities::{Animation, AnimationTrack, Controls, Direction, Player, Rect, Velocity};

// ── Constructors ─────────────────────────────────────────────────────────────

/// A fresh, full-health player centred on `start`, facing right.
pub fn spawn_player(start: (f32, f32), config: &GameConfig, now: Duration) -> Player {
    let mut rect = Rect::new(0.0, 0.0, config.player.width, config.player.height);
    rect.set_center(start.0, start.1);
    Player {
        rect,
        velocity: Velocity::default(),
        direction: Direction::Right,
        airborne: false,
        hp: config.player.max_hp,
        damage_cooldown_until: None,
        jump_held: false,
        fire_held: false,
        animation: Animation::new(AnimationTrack::IdleRight, config.animation_interval(), now),
    }
}

// ── Per-tick update ──────────────────────────────────────────────────────────

/// Advance the player one tick.
///
/// Order: jump edge → horizontal intent → horizontal move + resolve →
/// gravity → vertical move + resolve → animation → clamp to the map.
pub fn step_player(
    player: &mut Player,
    controls: &Controls,
    platforms: &[Rect],
    map_size: (f32, f32),
    physics: &PhysicsConfig,
    now: Duration,
) {
    let jump_pressed = controls.jump && !player.jump_held;
    player.jump_held = controls.jump;
    if jump_pressed && !player.airborne {
        player.velocity.vy = physics.jump_speed;
        player.airborne = true;
    }

    if controls.move_left {
        player.direction = Direction::Left;
        player.velocity.vx = -physics.move_speed;
        player.animation.switch(AnimationTrack::RunLeft);
    } else if controls.move_right {
        player.direction = Direction::Right;
        player.velocity.vx = physics.move_speed;
        player.animation.switch(AnimationTrack::RunRight);
    } else {
        player.velocity.vx = 0.0;
        switch_to_idle(player);
    }

    let horizontal = resolve_horizontal(player.rect, player.velocity.vx, platforms);
    player.rect = horizontal.rect;

    player.velocity.vy = (player.velocity.vy + physics.gravity).min(physics.max_fall_speed);
    let vertical = resolve_vertical(player.rect, player.velocity.vy, platforms);
    player.rect = vertical.rect;
    player.velocity.vy = vertical.velocity;
    player.airborne = vertical.contact != Some(VerticalContact::Landed);

    player.animation.advance(now);
    constrain_to_map(player, map_size);
}

/// Edge-detect the fire control.  Returns true on the tick it goes down.
pub fn fire_pressed(player: &mut Player, controls: &Controls) -> bool {
    let pressed = controls.fire && !player.fire_held;
    player.fire_held = controls.fire;
    pressed
}

/// Run tracks fall back to the idle track for the same facing.
fn switch_to_idle(player: &mut Player) {
    let idle = match player.animation.track {
        AnimationTrack::RunLeft => AnimationTrack::IdleLeft,
        AnimationTrack::RunRight => AnimationTrack::IdleRight,
        _ => return,
    };
    player.animation.switch(idle);
}

fn constrain_to_map(player: &mut Player, (map_width, map_height): (f32, f32)) {
    let rect = &mut player.rect;
    if rect.right() > map_width {
        rect.set_right(map_width);
    }
    if rect.left() < 0.0 {
        rect.set_left(0.0);
    }
    if rect.bottom() > map_height {
        rect.set_bottom(map_height);
    }
    if rect.top() < 0.0 {
        rect.set_top(0.0);
        player.velocity.vy = 0.0;
    }
}

// ── Damage ───────────────────────────────────────────────────────────────────

/// Apply one hit unless the invincibility window is still open.
///
/// A hit re-arms the window; contact inside it is ignored entirely.
/// Returns whether hp changed.
pub fn damage_player(player: &mut Player, config: &PlayerConfig, now: Duration) -> bool {
    if let Some(until) = player.damage_cooldown_until {
        if now <= until {
            return false;
        }
    }
    player.hp = player.hp.saturating_sub(config.damage_per_hit);
    player.damage_cooldown_until = Some(now + config.damage_cooldown());
    true
}

pub fn is_dead(player: &Player) -> bool {
    player.hp == 0
}
