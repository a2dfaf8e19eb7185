//! Crab patrol behaviour.
//!
//! A crab walks right until its right edge reaches `right_edge`, then left
//! until its left edge reaches `left_edge`, forever.  It only falls, never
//! jumps, and lands via the point-probe resolver.

use std::time::Duration;

use crate::collision::resolve_points;
use crate::config::GameConfig;
use crate::entities::{Animation, AnimationTrack, Crab, Direction, PatrolBounds, Rect, Velocity};

/// Place a crab with its bottom-left corner at `start` (pixels).  The patrol
/// runs from `start.x` to `final_x` plus one crab width.
pub fn spawn_crab(start: (f32, f32), final_x: f32, config: &GameConfig, now: Duration) -> Crab {
    let mut rect = Rect::new(start.0, 0.0, config.crab.width, config.crab.height);
    rect.set_bottom(start.1);
    Crab {
        rect,
        velocity: Velocity::default(),
        patrol: PatrolBounds {
            left_edge: start.0,
            right_edge: final_x + config.crab.width,
        },
        direction: Direction::Right,
        animation: Animation::new(AnimationTrack::Crab, config.animation_interval(), now),
    }
}

/// Advance one crab one tick.
pub fn step_crab(crab: &mut Crab, platforms: &[Rect], speed: f32, gravity: f32, now: Duration) {
    match crab.direction {
        Direction::Right if crab.rect.right() >= crab.patrol.right_edge => {
            crab.direction = Direction::Left;
        }
        Direction::Left if crab.rect.left() <= crab.patrol.left_edge => {
            crab.direction = Direction::Right;
        }
        _ => {}
    }

    crab.velocity.vx = crab.direction.sign() * speed;
    crab.velocity.vy = gravity;
    crab.rect = crab.rect.offset(crab.velocity.vx, crab.velocity.vy);

    let (rect, contacts) = resolve_points(crab.rect, platforms);
    crab.rect = rect;
    if contacts.bottom || contacts.top {
        crab.velocity.vy = 0.0;
    }

    crab.animation.advance(now);
}
