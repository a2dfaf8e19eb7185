//! Terminal drawing; the only module that touches the screen.
//!
//! Each function receives a mutable writer and an immutable `Frame`.  No
//! game logic is performed; this module only translates level pixels into
//! character cells and queues terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use platformer::entities::{AnimationTrack, GameMode, Rect};
use platformer::render::{Frame, Hud, Sprite, Visual};

// ── Cell geometry ─────────────────────────────────────────────────────────────

/// Level pixels covered by one character cell.  Cells are about twice as
/// tall as they are wide, so the cell is too.
pub const CELL_W: f32 = 16.0;
pub const CELL_H: f32 = 32.0;

/// The playfield starts below the HUD row.
const PLAYFIELD_TOP: u16 = 1;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_SKY: Color = Color::Reset;
const C_PLATFORM: Color = Color::DarkYellow;
const C_DECORATION: Color = Color::DarkGreen;
const C_PLAYER: Color = Color::White;
const C_CRAB: Color = Color::Red;
const C_COIN: Color = Color::Yellow;
const C_PORTAL: Color = Color::Green;
const C_BALL: Color = Color::Magenta;
const C_HUD_HP: Color = Color::Red;
const C_HUD_COINS: Color = Color::Yellow;
const C_HUD_LEVEL: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, frame: &Frame) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let rows = height.saturating_sub(PLAYFIELD_TOP + 1);

    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(style::SetBackgroundColor(C_SKY))?;

    for sprite in &frame.sprites {
        draw_sprite(out, sprite, width, rows)?;
    }

    draw_hud(out, &frame.hud, width)?;
    draw_controls_hint(out, height)?;

    if frame.hud.mode == GameMode::GameOver {
        draw_game_over(out, &frame.hud, width, height)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Sprites ───────────────────────────────────────────────────────────────────

/// Cell span `[start, end)` covered by the pixel interval `[lo, hi)`, at least
/// one cell wide.
fn cell_span(lo: f32, hi: f32, cell: f32) -> (i32, i32) {
    let start = (lo / cell).floor() as i32;
    let end = ((hi / cell).ceil() as i32).max(start + 1);
    (start, end)
}

fn sprite_look(visual: &Visual) -> (char, Color) {
    match *visual {
        Visual::Tile { solid: true, .. } => ('█', C_PLATFORM),
        Visual::Tile { solid: false, .. } => ('░', C_DECORATION),
        Visual::Player { track, frame } => {
            let glyph = match track {
                AnimationTrack::RunLeft | AnimationTrack::IdleLeft => '◄',
                _ => '►',
            };
            // Running flickers between two glyphs to show the stride.
            if track.is_running() && frame % 2 == 1 {
                ('▓', C_PLAYER)
            } else {
                (glyph, C_PLAYER)
            }
        }
        Visual::Crab { frame } => (if frame % 2 == 0 { 'ᴥ' } else { 'Ж' }, C_CRAB),
        Visual::Coin { frame } => (['●', '◐', '○', '◑'][frame % 4], C_COIN),
        Visual::Portal { frame } => (if frame % 2 == 0 { '▒' } else { '░' }, C_PORTAL),
        Visual::Ball => ('*', C_BALL),
    }
}

fn draw_sprite<W: Write>(
    out: &mut W,
    sprite: &Sprite,
    width: u16,
    rows: u16,
) -> std::io::Result<()> {
    let Rect { x, y, w, h } = sprite.rect;
    let (c0, c1) = cell_span(x, x + w, CELL_W);
    let (r0, r1) = cell_span(y, y + h, CELL_H);

    let c0 = c0.max(0);
    let c1 = c1.min(width as i32);
    let r0 = r0.max(0);
    let r1 = r1.min(rows as i32);
    if c0 >= c1 || r0 >= r1 {
        return Ok(());
    }

    let (glyph, color) = sprite_look(&sprite.visual);
    let line: String = std::iter::repeat(glyph).take((c1 - c0) as usize).collect();

    out.queue(style::SetForegroundColor(color))?;
    for row in r0..r1 {
        out.queue(cursor::MoveTo(c0 as u16, PLAYFIELD_TOP + row as u16))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, hud: &Hud, width: u16) -> std::io::Result<()> {
    // HP bar, left
    let filled = hud.hp.min(hud.max_hp) as usize;
    let empty = hud.max_hp as usize - filled;
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HP))?;
    out.queue(Print(format!("HP [{}{}]", "■".repeat(filled), "·".repeat(empty))))?;

    // Coins, centre
    let coins = format!("Coins: {}/{}", hud.coin_count, hud.coins_total);
    let cx = (width / 2).saturating_sub(coins.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(cx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_COINS))?;
    out.queue(Print(&coins))?;

    // Level, right
    let level = format!("Level {}", hud.level);
    let lx = width.saturating_sub(level.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(&level))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE / W : Jump   F : Fire   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    hud: &Hud,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let coin_line = format!("Coins collected: {}", hud.coin_count);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (coin_line.as_str(), Color::Yellow),
        ("Any key - Retry   Q - Quit", Color::White),
    ];

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
