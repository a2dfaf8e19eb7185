use std::time::Duration;

use platformer::config::GameConfig;
use platformer::entities::*;
use platformer::player::*;

const MAP: (f32, f32) = (1280.0, 640.0);
const GROUND_TOP: f32 = 576.0;

/// A full-width floor of 32px tiles with its top at y=576.
fn ground() -> Vec<Rect> {
    (0..40).map(|gx| Rect::new(gx as f32 * 32.0, GROUND_TOP, 32.0, 32.0)).collect()
}

/// A player standing on the ground, left edge at x=68.
fn make_player(config: &GameConfig) -> Player {
    spawn_player((100.0, 544.0), config, Duration::ZERO)
}

fn idle() -> Controls {
    Controls::default()
}

fn step(player: &mut Player, controls: Controls, platforms: &[Rect], config: &GameConfig) {
    step_player(player, &controls, platforms, MAP, &config.physics, Duration::ZERO);
}

// ── spawn_player ──────────────────────────────────────────────────────────────

#[test]
fn spawn_centres_player_with_full_hp() {
    let config = GameConfig::default();
    let p = make_player(&config);
    assert_eq!(p.rect, Rect::new(68.0, 512.0, 64.0, 64.0));
    assert_eq!(p.hp, 10);
    assert_eq!(p.direction, Direction::Right);
    assert_eq!(p.animation.track, AnimationTrack::IdleRight);
    assert!(p.damage_cooldown_until.is_none());
}

// ── Standing & horizontal movement ────────────────────────────────────────────

#[test]
fn standing_player_stays_grounded() {
    let config = GameConfig::default();
    let platforms = ground();
    let mut p = make_player(&config);
    for _ in 0..10 {
        step(&mut p, idle(), &platforms, &config);
        assert_eq!(p.rect.bottom(), GROUND_TOP);
        assert!(!p.airborne);
        assert_eq!(p.velocity.vy, 0.0);
    }
}

#[test]
fn move_right_sets_velocity_direction_and_track() {
    let config = GameConfig::default();
    let platforms = ground();
    let mut p = make_player(&config);
    step(&mut p, Controls { move_right: true, ..idle() }, &platforms, &config);
    assert_eq!(p.rect.x, 78.0);
    assert_eq!(p.velocity.vx, 10.0);
    assert_eq!(p.direction, Direction::Right);
    assert_eq!(p.animation.track, AnimationTrack::RunRight);
}

#[test]
fn move_left_sets_velocity_direction_and_track() {
    let config = GameConfig::default();
    let platforms = ground();
    let mut p = make_player(&config);
    step(&mut p, Controls { move_left: true, ..idle() }, &platforms, &config);
    assert_eq!(p.rect.x, 58.0);
    assert_eq!(p.velocity.vx, -10.0);
    assert_eq!(p.direction, Direction::Left);
    assert_eq!(p.animation.track, AnimationTrack::RunLeft);
}

#[test]
fn left_wins_when_both_directions_held() {
    let config = GameConfig::default();
    let platforms = ground();
    let mut p = make_player(&config);
    step(
        &mut p,
        Controls { move_left: true, move_right: true, ..idle() },
        &platforms,
        &config,
    );
    assert_eq!(p.direction, Direction::Left);
    assert_eq!(p.velocity.vx, -10.0);
}

#[test]
fn releasing_returns_to_idle_track_for_facing() {
    let config = GameConfig::default();
    let platforms = ground();
    let mut p = make_player(&config);
    step(&mut p, Controls { move_left: true, ..idle() }, &platforms, &config);
    step(&mut p, idle(), &platforms, &config);
    assert_eq!(p.velocity.vx, 0.0);
    assert_eq!(p.direction, Direction::Left);
    assert_eq!(p.animation.track, AnimationTrack::IdleLeft);
    assert_eq!(p.animation.frame, 0);
}

#[test]
fn wall_stops_horizontal_movement_without_changing_velocity() {
    let config = GameConfig::default();
    let mut platforms = ground();
    platforms.push(Rect::new(160.0, 512.0, 32.0, 32.0));
    let mut p = make_player(&config);
    for _ in 0..4 {
        step(&mut p, Controls { move_right: true, ..idle() }, &platforms, &config);
    }
    assert_eq!(p.rect.right(), 160.0);
    assert_eq!(p.velocity.vx, 10.0);
    assert!(!p.airborne);
}

#[test]
fn position_clamped_to_map_width() {
    let config = GameConfig::default();
    let platforms = ground();
    let mut p = spawn_player((1240.0, 544.0), &config, Duration::ZERO);
    for _ in 0..5 {
        step(&mut p, Controls { move_right: true, ..idle() }, &platforms, &config);
    }
    assert_eq!(p.rect.right(), MAP.0);

    let mut p = make_player(&config);
    for _ in 0..20 {
        step(&mut p, Controls { move_left: true, ..idle() }, &platforms, &config);
    }
    assert_eq!(p.rect.left(), 0.0);
}

// ── Jumping & gravity ─────────────────────────────────────────────────────────

#[test]
fn jump_from_ground() {
    let config = GameConfig::default();
    let platforms = ground();
    let mut p = make_player(&config);
    step(&mut p, Controls { jump: true, ..idle() }, &platforms, &config);
    // -20 jump impulse, then +1.5 gravity in the same tick
    assert_eq!(p.velocity.vy, -18.5);
    assert_eq!(p.rect.y, 512.0 - 18.5);
    assert!(p.airborne);
}

#[test]
fn holding_jump_does_not_bounce() {
    let config = GameConfig::default();
    let platforms = ground();
    let mut p = make_player(&config);
    let mut takeoffs = 0;
    for _ in 0..120 {
        let was_airborne = p.airborne;
        step(&mut p, Controls { jump: true, ..idle() }, &platforms, &config);
        if !was_airborne && p.airborne {
            takeoffs += 1;
        }
    }
    assert_eq!(takeoffs, 1);
    assert!(!p.airborne);
    assert_eq!(p.rect.bottom(), GROUND_TOP);
}

#[test]
fn pressing_jump_again_after_landing_jumps_again() {
    let config = GameConfig::default();
    let platforms = ground();
    let mut p = make_player(&config);
    step(&mut p, Controls { jump: true, ..idle() }, &platforms, &config);
    for _ in 0..60 {
        step(&mut p, idle(), &platforms, &config);
    }
    assert!(!p.airborne);
    step(&mut p, Controls { jump: true, ..idle() }, &platforms, &config);
    assert_eq!(p.velocity.vy, -18.5);
}

#[test]
fn no_jump_while_airborne() {
    let config = GameConfig::default();
    let platforms = ground();
    let mut p = spawn_player((100.0, 200.0), &config, Duration::ZERO);
    step(&mut p, idle(), &platforms, &config);
    assert!(p.airborne);
    step(&mut p, Controls { jump: true, ..idle() }, &platforms, &config);
    assert_eq!(p.velocity.vy, 3.0); // 1.5 + 1.5, no impulse
}

#[test]
fn fall_speed_is_capped() {
    let config = GameConfig::default();
    let platforms = ground();
    let mut p = spawn_player((100.0, 32.0), &config, Duration::ZERO);
    for _ in 0..12 {
        step(&mut p, idle(), &platforms, &config);
    }
    assert_eq!(p.velocity.vy, 14.0);
    assert!(p.airborne);
}

#[test]
fn hitting_map_ceiling_zeroes_vertical_velocity() {
    let config = GameConfig::default();
    let mut p = spawn_player((100.0, 37.0), &config, Duration::ZERO);
    p.velocity.vy = -20.0;
    step(&mut p, idle(), &[], &config);
    assert_eq!(p.rect.top(), 0.0);
    assert_eq!(p.velocity.vy, 0.0);
}

#[test]
fn bumping_a_platform_from_below_stops_the_jump() {
    let config = GameConfig::default();
    let mut platforms = ground();
    platforms.push(Rect::new(64.0, 448.0, 32.0, 32.0)); // bottom 480, 32px above the head
    let mut p = make_player(&config);
    step(&mut p, Controls { jump: true, ..idle() }, &platforms, &config);
    assert_eq!(p.rect.top(), 493.5);
    step(&mut p, Controls { jump: true, ..idle() }, &platforms, &config);
    assert_eq!(p.rect.top(), 480.0);
    assert_eq!(p.velocity.vy, 0.0);
    assert!(p.airborne);
}

// ── Fire edge detection ───────────────────────────────────────────────────────

#[test]
fn fire_triggers_once_per_press() {
    let config = GameConfig::default();
    let mut p = make_player(&config);
    let held = Controls { fire: true, ..idle() };
    assert!(fire_pressed(&mut p, &held));
    assert!(!fire_pressed(&mut p, &held));
    assert!(!fire_pressed(&mut p, &held));
    assert!(!fire_pressed(&mut p, &idle()));
    assert!(fire_pressed(&mut p, &held));
}

// ── Damage ────────────────────────────────────────────────────────────────────

#[test]
fn first_hit_applies_immediately() {
    let config = GameConfig::default();
    let mut p = make_player(&config);
    assert!(damage_player(&mut p, &config.player, Duration::ZERO));
    assert_eq!(p.hp, 5);
    assert_eq!(p.damage_cooldown_until, Some(Duration::from_millis(1000)));
}

#[test]
fn hits_inside_cooldown_count_once() {
    let config = GameConfig::default();
    let mut p = make_player(&config);
    damage_player(&mut p, &config.player, Duration::from_millis(100));
    assert!(!damage_player(&mut p, &config.player, Duration::from_millis(900)));
    assert_eq!(p.hp, 5);
}

#[test]
fn hits_past_cooldown_count_twice() {
    let config = GameConfig::default();
    let mut p = make_player(&config);
    damage_player(&mut p, &config.player, Duration::from_millis(100));
    assert!(damage_player(&mut p, &config.player, Duration::from_millis(1101)));
    assert_eq!(p.hp, 0);
    assert!(is_dead(&p));
}

#[test]
fn hp_saturates_at_zero() {
    let config = GameConfig::default();
    let mut p = make_player(&config);
    p.hp = 3;
    damage_player(&mut p, &config.player, Duration::ZERO);
    assert_eq!(p.hp, 0);
}
