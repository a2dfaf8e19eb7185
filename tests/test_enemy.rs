use std::time::Duration;

use platformer::config::GameConfig;
use platformer::enemy::*;
use platformer::entities::*;

const SPEED: f32 = 2.0;
const GRAVITY: f32 = 2.0;

fn ground() -> Vec<Rect> {
    (0..40).map(|gx| Rect::new(gx as f32 * 32.0, 576.0, 32.0, 32.0)).collect()
}

fn make_crab(start_x: f32, bottom: f32, final_x: f32) -> Crab {
    spawn_crab((start_x, bottom), final_x, &GameConfig::default(), Duration::ZERO)
}

fn step(crab: &mut Crab, platforms: &[Rect], now: Duration) {
    step_crab(crab, platforms, SPEED, GRAVITY, now);
}

#[test]
fn spawn_places_bottom_left_and_sets_patrol() {
    let crab = make_crab(64.0, 576.0, 192.0);
    assert_eq!(crab.rect, Rect::new(64.0, 512.0, 64.0, 64.0));
    assert_eq!(crab.patrol, PatrolBounds { left_edge: 64.0, right_edge: 256.0 });
    assert_eq!(crab.direction, Direction::Right);
    assert_eq!(crab.animation.track, AnimationTrack::Crab);
}

#[test]
fn patrol_stays_within_bounds_and_turns_both_ways() {
    let platforms = ground();
    let mut crab = make_crab(64.0, 576.0, 192.0);
    let mut went_left = false;
    let mut went_right = false;

    for _ in 0..500 {
        step(&mut crab, &platforms, Duration::ZERO);
        assert!(crab.rect.left() >= crab.patrol.left_edge - SPEED);
        assert!(crab.rect.right() <= crab.patrol.right_edge + SPEED);
        assert_eq!(crab.rect.bottom(), 576.0);
        match crab.direction {
            Direction::Left => went_left = true,
            Direction::Right => went_right = true,
        }
    }
    assert!(went_left && went_right);
}

#[test]
fn turns_around_at_the_right_edge() {
    let platforms = ground();
    let mut crab = make_crab(64.0, 576.0, 192.0);
    crab.rect.set_right(256.0);

    step(&mut crab, &platforms, Duration::ZERO);
    assert_eq!(crab.direction, Direction::Left);
    assert_eq!(crab.velocity.vx, -SPEED);
    assert_eq!(crab.rect.right(), 254.0);
}

#[test]
fn turns_around_at_the_left_edge() {
    let platforms = ground();
    let mut crab = make_crab(64.0, 576.0, 192.0);
    crab.direction = Direction::Left;

    step(&mut crab, &platforms, Duration::ZERO);
    assert_eq!(crab.direction, Direction::Right);
    assert_eq!(crab.rect.left(), 66.0);
}

#[test]
fn falls_until_it_lands() {
    let platforms = ground();
    let mut crab = make_crab(64.0, 400.0, 64.0);

    step(&mut crab, &platforms, Duration::ZERO);
    assert_eq!(crab.rect.bottom(), 402.0);
    assert_eq!(crab.velocity.vy, GRAVITY);

    for _ in 0..99 {
        step(&mut crab, &platforms, Duration::ZERO);
    }
    assert_eq!(crab.rect.bottom(), 576.0);
    assert_eq!(crab.velocity.vy, 0.0);
}

#[test]
fn wall_blocks_the_patrol() {
    let mut platforms = ground();
    platforms.push(Rect::new(256.0, 544.0, 32.0, 32.0));
    let mut crab = make_crab(64.0, 576.0, 600.0);

    for _ in 0..200 {
        step(&mut crab, &platforms, Duration::ZERO);
    }
    assert_eq!(crab.rect.right(), 256.0);
    assert_eq!(crab.direction, Direction::Right);
}

#[test]
fn animation_follows_the_clock() {
    let platforms = ground();
    let mut crab = make_crab(64.0, 576.0, 192.0);
    step(&mut crab, &platforms, Duration::from_millis(150));
    assert_eq!(crab.animation.frame, 0);
    step(&mut crab, &platforms, Duration::from_millis(200));
    assert_eq!(crab.animation.frame, 1);
    step(&mut crab, &platforms, Duration::from_millis(400));
    assert_eq!(crab.animation.frame, 0);
}
