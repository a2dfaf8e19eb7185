//! Game entity types.  Pure data; behaviour lives in the per-entity modules.
//!
//! Positions and extents are in level pixels (`f32`); velocities are in
//! pixels per tick.  Timestamps are `Duration`s measured from the session
//! clock's epoch (see `clock`).

use std::time::Duration;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle.  `x`/`y` are the top-left corner, y grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    pub fn set_left(&mut self, left: f32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: f32) {
        self.x = right - self.w;
    }

    pub fn set_top(&mut self, top: f32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.h;
    }

    pub fn set_center(&mut self, cx: f32, cy: f32) {
        self.x = cx - self.w / 2.0;
        self.y = cy - self.h / 2.0;
    }

    pub fn mid_bottom(&self) -> (f32, f32) {
        (self.center_x(), self.bottom())
    }

    pub fn mid_top(&self) -> (f32, f32) {
        (self.center_x(), self.top())
    }

    pub fn mid_left(&self) -> (f32, f32) {
        (self.left(), self.center_y())
    }

    pub fn mid_right(&self) -> (f32, f32) {
        (self.right(), self.center_y())
    }

    /// Strict overlap: rectangles that merely share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Half-open containment: the left/top edges are inside, right/bottom are not.
    pub fn contains_point(&self, (px, py): (f32, f32)) -> bool {
        px >= self.left() && px < self.right() && py >= self.top() && py < self.bottom()
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Rect {
        Rect { x: self.x + dx, y: self.y + dy, ..*self }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity {
    pub vx: f32,
    pub vy: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// -1.0 for left, 1.0 for right.
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

// ── Animation ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationTrack {
    IdleLeft,
    IdleRight,
    RunLeft,
    RunRight,
    Crab,
    Coin,
    Portal,
}

/// Per-entity animation cursor.  Advances on wall-clock time, not ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Animation {
    pub track: AnimationTrack,
    pub frame: usize,
    pub interval: Duration,
    pub next_advance_at: Duration,
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    pub velocity: Velocity,
    pub direction: Direction,
    /// True unless this tick's vertical resolution landed on a platform top.
    pub airborne: bool,
    pub hp: u32,
    /// `None` until the first hit; damage is ignored while `now` is not past it.
    pub damage_cooldown_until: Option<Duration>,
    /// Held state of the jump control on the previous tick (edge detection).
    pub jump_held: bool,
    /// Held state of the fire control on the previous tick (edge detection).
    pub fire_held: bool,
    pub animation: Animation,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PatrolBounds {
    pub left_edge: f32,
    pub right_edge: f32,
}

/// The patrolling crab enemy.
#[derive(Clone, Debug)]
pub struct Crab {
    pub rect: Rect,
    pub velocity: Velocity,
    pub patrol: PatrolBounds,
    pub direction: Direction,
    pub animation: Animation,
}

// ── Projectiles & pickups ─────────────────────────────────────────────────────

/// A fireball: constant-speed horizontal translation, no gravity.
#[derive(Clone, Debug, PartialEq)]
pub struct Ball {
    pub rect: Rect,
    pub speed: f32,
    pub direction: Direction,
}

#[derive(Clone, Debug)]
pub struct Coin {
    pub rect: Rect,
    pub animation: Animation,
}

#[derive(Clone, Debug)]
pub struct Portal {
    pub rect: Rect,
    pub animation: Animation,
}

/// A map tile kept for rendering.  Only `solid` tiles are in the collision registry.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    pub rect: Rect,
    pub gid: u32,
    pub solid: bool,
}

// ── Viewport & control input ──────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    Playing,
    GameOver,
}

/// Controls delivered by the input-polling boundary for one tick.
///
/// The four movement/action fields are "currently held"; `restart` and
/// `quit` are "just pressed" signals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub fire: bool,
    pub restart: bool,
    pub quit: bool,
}

// ── Level world ───────────────────────────────────────────────────────────────

/// Everything that exists while one level is active.  Rebuilt from level data
/// on every transition or retry; never reset in place.
#[derive(Clone, Debug)]
pub struct World {
    pub level: u32,
    pub map_width: f32,
    pub map_height: f32,
    /// Collision registry, in map order.  Immutable for the level's lifetime.
    pub platforms: Vec<Rect>,
    /// Render set for the map layers (platforms and decorations).
    pub tiles: Vec<Tile>,
    pub player: Player,
    pub crabs: Vec<Crab>,
    pub balls: Vec<Ball>,
    pub coins: Vec<Coin>,
    pub portals: Vec<Portal>,
    /// Coins collected in this level.
    pub coin_count: u32,
    /// Coins the level started with.
    pub coins_total: u32,
    pub camera: Camera,
}
