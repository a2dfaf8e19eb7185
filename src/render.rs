//! What the core hands to the renderer each tick: camera-relative sprites
//! plus the HUD scalars.  Drawing itself lives in the binary.

use crate::entities::{AnimationTrack, Camera, GameMode, Rect, World};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visual {
    /// A map tile; `solid` tiles come from the platforms layer.
    Tile { gid: u32, solid: bool },
    Player { track: AnimationTrack, frame: usize },
    Crab { frame: usize },
    Coin { frame: usize },
    Portal { frame: usize },
    Ball,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub visual: Visual,
    /// Screen-space rectangle (already offset by the camera).
    pub rect: Rect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hud {
    pub hp: u32,
    pub max_hp: u32,
    pub coin_count: u32,
    pub coins_total: u32,
    pub level: u32,
    pub mode: GameMode,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub camera: Camera,
    pub sprites: Vec<Sprite>,
    pub hud: Hud,
}

/// Snapshot the World for drawing.
///
/// Sprites are in back-to-front order: map tiles, coins, portals, player,
/// crabs, balls.
pub fn compose_frame(world: &World, mode: GameMode, max_hp: u32) -> Frame {
    let camera = world.camera;
    let mut sprites = Vec::with_capacity(
        world.tiles.len()
            + world.coins.len()
            + world.portals.len()
            + world.crabs.len()
            + world.balls.len()
            + 1,
    );
    let mut push = |visual: Visual, rect: &Rect| {
        sprites.push(Sprite {
            visual,
            rect: camera.to_screen(rect),
        })
    };

    for tile in &world.tiles {
        push(Visual::Tile { gid: tile.gid, solid: tile.solid }, &tile.rect);
    }
    for coin in &world.coins {
        push(Visual::Coin { frame: coin.animation.frame }, &coin.rect);
    }
    for portal in &world.portals {
        push(Visual::Portal { frame: portal.animation.frame }, &portal.rect);
    }
    let player = &world.player;
    push(
        Visual::Player {
            track: player.animation.track,
            frame: player.animation.frame,
        },
        &player.rect,
    );
    for crab in &world.crabs {
        push(Visual::Crab { frame: crab.animation.frame }, &crab.rect);
    }
    for ball in &world.balls {
        push(Visual::Ball, &ball.rect);
    }

    Frame {
        camera,
        sprites,
        hud: Hud {
            hp: player.hp,
            max_hp,
            coin_count: world.coin_count,
            coins_total: world.coins_total,
            level: world.level,
            mode,
        },
    }
}
