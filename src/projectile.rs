//! Fireballs: spawned at the player, fly straight, die off-map or on impact.

use crate::config::BallConfig;
use crate::entities::{Ball, Direction, Rect};

/// A ball launched from the player's rectangle.  It starts `spawn_offset`
/// pixels beside the player's left edge, vertically at the player's centre.
pub fn spawn_ball(player_rect: &Rect, direction: Direction, config: &BallConfig) -> Ball {
    let x = player_rect.left() + direction.sign() * config.spawn_offset;
    Ball {
        rect: Rect::new(x, player_rect.center_y(), config.width, config.height),
        speed: config.speed,
        direction,
    }
}

pub fn advance_ball(ball: &mut Ball) {
    ball.rect.x += ball.direction.sign() * ball.speed;
}

/// True once the ball is entirely outside `[0, bound_width]` horizontally.
pub fn is_out_of_bounds(ball: &Ball, bound_width: f32) -> bool {
    ball.rect.right() < 0.0 || ball.rect.left() > bound_width
}
