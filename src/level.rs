//! Level data as handed over by the map loader, and World construction.
//!
//! A level is two JSON documents: the materialised tile map
//! (`map{N}.json`) and the enemy roster (`crabs{N}.json`).  Tile layers are
//! lists of `[grid_x, grid_y, gid]`; a gid of 0 is an empty cell.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::camera;
use crate::collectible::{spawn_coin, spawn_portal};
use crate::config::GameConfig;
use crate::enemy::spawn_crab;
use crate::entities::{Rect, Tile, World};
use crate::error::LevelError;
use crate::player::spawn_player;

pub const CRAB_NAME: &str = "Crab";

// ── Wire format ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapData {
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    /// Player spawn centre in pixels; the config default applies when absent.
    #[serde(default)]
    pub player_start: Option<[f32; 2]>,
    pub layers: Vec<TileLayer>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileLayer {
    pub name: String,
    /// `(grid_x, grid_y, gid)`.
    pub tiles: Vec<(u32, u32, u32)>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EnemyRoster {
    pub enemies: Vec<EnemyPlacement>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyPlacement {
    pub name: String,
    /// Grid cell of the enemy's bottom-left corner.
    pub start_pos: [i32; 2],
    /// Grid cell where the patrol turns around.
    pub final_pos: [i32; 2],
}

#[derive(Clone, Debug, PartialEq)]
pub struct LevelBundle {
    pub map: MapData,
    pub roster: EnemyRoster,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerKind {
    Platforms,
    Decorations,
    Coin,
    Portal,
}

impl LayerKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "platforms" => Some(LayerKind::Platforms),
            "decorations" => Some(LayerKind::Decorations),
            "coin" => Some(LayerKind::Coin),
            "portal" => Some(LayerKind::Portal),
            _ => None,
        }
    }
}

impl MapData {
    /// Map extent in pixels, or `None` if it does not fit in a `u32`.
    pub fn pixel_size(&self) -> Option<(f32, f32)> {
        let width = self.width.checked_mul(self.tile_width)?;
        let height = self.height.checked_mul(self.tile_height)?;
        Some((width as f32, height as f32))
    }
}

// ── Sources ──────────────────────────────────────────────────────────────────

/// Where level data comes from, indexed from 1.
pub trait LevelSource {
    fn load(&self, level: u32) -> Result<LevelBundle, LevelError>;
}

/// Reads `map{N}.json` and `crabs{N}.json` from a directory.  A missing
/// roster file means the level has no enemies.
#[derive(Clone, Debug)]
pub struct DirLevelSource {
    root: PathBuf,
}

impl DirLevelSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirLevelSource { root: root.into() }
    }

    pub fn map_path(&self, level: u32) -> PathBuf {
        self.root.join(format!("map{level}.json"))
    }

    pub fn roster_path(&self, level: u32) -> PathBuf {
        self.root.join(format!("crabs{level}.json"))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LevelError> {
    let content = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| LevelError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl LevelSource for DirLevelSource {
    fn load(&self, level: u32) -> Result<LevelBundle, LevelError> {
        let map_path = self.map_path(level);
        if !map_path.exists() {
            return Err(LevelError::Missing(level));
        }
        let map = read_json(&map_path)?;

        let roster_path = self.roster_path(level);
        let roster = if roster_path.exists() {
            read_json(&roster_path)?
        } else {
            debug!(level, path = %roster_path.display(), "no enemy roster, level has no crabs");
            EnemyRoster::default()
        };

        Ok(LevelBundle { map, roster })
    }
}

/// Levels held in memory; `levels[0]` is level 1.
#[derive(Clone, Debug, Default)]
pub struct StaticLevels {
    pub levels: Vec<LevelBundle>,
}

impl StaticLevels {
    pub fn new(levels: Vec<LevelBundle>) -> Self {
        StaticLevels { levels }
    }
}

impl LevelSource for StaticLevels {
    fn load(&self, level: u32) -> Result<LevelBundle, LevelError> {
        level
            .checked_sub(1)
            .and_then(|i| self.levels.get(i as usize))
            .cloned()
            .ok_or(LevelError::Missing(level))
    }
}

// ── World construction ───────────────────────────────────────────────────────

/// Build a fresh World for `level` from its data.  Every call produces an
/// independent World; nothing is carried over from a previous one.
pub fn build_world(
    level: u32,
    bundle: &LevelBundle,
    config: &GameConfig,
    now: Duration,
) -> Result<World, LevelError> {
    let map = &bundle.map;
    if map.tile_width == 0 || map.tile_height == 0 {
        return Err(LevelError::Invalid {
            level,
            reason: "tile size must be positive".to_string(),
        });
    }

    let (map_width, map_height) = map.pixel_size().ok_or_else(|| LevelError::Invalid {
        level,
        reason: format!(
            "map of {}x{} tiles at {}x{} px is too large",
            map.width, map.height, map.tile_width, map.tile_height
        ),
    })?;
    let tile_w = map.tile_width as f32;
    let tile_h = map.tile_height as f32;

    let mut platforms = Vec::new();
    let mut tiles = Vec::new();
    let mut coins = Vec::new();
    let mut portals = Vec::new();

    for layer in &map.layers {
        let Some(kind) = LayerKind::from_name(&layer.name) else {
            warn!(level, layer = %layer.name, "ignoring unknown map layer");
            continue;
        };

        for &(gx, gy, gid) in &layer.tiles {
            if gid == 0 {
                continue;
            }
            if gx >= map.width || gy >= map.height {
                return Err(LevelError::Invalid {
                    level,
                    reason: format!("tile ({gx}, {gy}) in layer '{}' is outside the map", layer.name),
                });
            }

            let x = gx as f32 * tile_w;
            let y = gy as f32 * tile_h;
            match kind {
                LayerKind::Platforms => {
                    let rect = Rect::new(x, y, tile_w, tile_h);
                    platforms.push(rect);
                    tiles.push(Tile { rect, gid, solid: true });
                }
                LayerKind::Decorations => {
                    tiles.push(Tile {
                        rect: Rect::new(x, y, tile_w, tile_h),
                        gid,
                        solid: false,
                    });
                }
                LayerKind::Coin => coins.push(spawn_coin(x, y, config, now)),
                LayerKind::Portal => portals.push(spawn_portal(x, y, config, now)),
            }
        }
    }

    let mut crabs = Vec::new();
    for placement in &bundle.roster.enemies {
        if placement.name != CRAB_NAME {
            warn!(level, name = %placement.name, "ignoring unknown enemy kind");
            continue;
        }
        let start = (
            placement.start_pos[0] as f32 * tile_w,
            placement.start_pos[1] as f32 * tile_h,
        );
        let final_x = placement.final_pos[0] as f32 * tile_w;
        crabs.push(spawn_crab(start, final_x, config, now));
    }

    let [sx, sy] = map.player_start.unwrap_or(config.player.start);
    let player = spawn_player((sx, sy), config, now);
    let camera = camera::follow(
        &player.rect,
        (map_width, map_height),
        (config.screen.width, config.screen.height),
    );

    debug!(
        level,
        platforms = platforms.len(),
        tiles = tiles.len(),
        coins = coins.len(),
        portals = portals.len(),
        crabs = crabs.len(),
        "world built"
    );

    let coins_total = coins.len() as u32;
    Ok(World {
        level,
        map_width,
        map_height,
        platforms,
        tiles,
        player,
        crabs,
        balls: Vec::new(),
        coins,
        portals,
        coin_count: 0,
        coins_total,
        camera,
    })
}
