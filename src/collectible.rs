//! Coins and portals: static rectangles with a looping animation.

use std::time::Duration;

use crate::config::GameConfig;
use crate::entities::{Animation, AnimationTrack, Coin, Portal, Rect};

/// A coin whose top-left corner is at `(x, y)`.
pub fn spawn_coin(x: f32, y: f32, config: &GameConfig, now: Duration) -> Coin {
    let size = config.pickups.coin_size;
    Coin {
        rect: Rect::new(x, y, size, size),
        animation: Animation::new(AnimationTrack::Coin, config.animation_interval(), now),
    }
}

/// A portal whose bottom-left corner is at `(x, bottom)`.
pub fn spawn_portal(x: f32, bottom: f32, config: &GameConfig, now: Duration) -> Portal {
    let size = config.pickups.portal_size;
    let mut rect = Rect::new(x, 0.0, size, size);
    rect.set_bottom(bottom);
    Portal {
        rect,
        animation: Animation::new(AnimationTrack::Portal, config.animation_interval(), now),
    }
}

pub fn animate_coins(coins: &mut [Coin], now: Duration) {
    for coin in coins {
        coin.animation.advance(now);
    }
}

pub fn animate_portals(portals: &mut [Portal], now: Duration) {
    for portal in portals {
        portal.animation.advance(now);
    }
}
