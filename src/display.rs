//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable `RenderFrame`
//! snapshot.  No game logic is performed; this module only translates
//! simulation state into terminal commands.  Viewport pixels are scaled to
//! terminal cells here and nowhere else.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::entities::{Rect, RenderFrame, SessionConfig, SessionPhase};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_SHOULDER: Color = Color::DarkGreen;
const C_CENTERLINE: Color = Color::White;
const C_PLAYER: Color = Color::Blue;
const C_OPPONENT: Color = Color::Red;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_TITLE: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

// ── Pixel → cell mapping ──────────────────────────────────────────────────────

/// Scales viewport pixels onto the terminal grid.  Row 0 is the HUD and the
/// last row is the controls hint; the track occupies the rows in between.
struct CellMap {
    sx: f32,
    sy: f32,
    cols: u16,
    /// Number of track rows (HUD and hint rows excluded).
    rows: u16,
}

impl CellMap {
    fn new(config: &SessionConfig, term: (u16, u16)) -> Self {
        let (w, h) = term;
        let cols = w.max(1);
        let rows = h.saturating_sub(2).max(1);
        CellMap {
            sx: cols as f32 / config.viewport_width,
            sy: rows as f32 / config.viewport_height,
            cols,
            rows,
        }
    }

    fn col(&self, x: f32) -> u16 {
        ((x * self.sx) as i32).clamp(0, self.cols as i32 - 1) as u16
    }

    /// Track row for a pixel y.  May fall outside `1..=rows` for boxes that
    /// extend past the viewport; callers clip.
    fn row(&self, y: f32) -> i32 {
        (y * self.sy) as i32 + 1
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    frame: &RenderFrame,
    config: &SessionConfig,
    term: (u16, u16),
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let map = CellMap::new(config, term);

    draw_track(out, config, &map)?;
    for (_, rect) in &frame.opponents {
        draw_car(out, rect, C_OPPONENT, &map)?;
    }
    draw_car(out, &frame.player, C_PLAYER, &map)?;
    draw_hud(out, frame, term)?;
    draw_controls_hint(out, term)?;

    if frame.phase == SessionPhase::Over {
        draw_game_over(out, frame, term)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, term.1.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Track ─────────────────────────────────────────────────────────────────────

fn draw_track<W: Write>(
    out: &mut W,
    config: &SessionConfig,
    map: &CellMap,
) -> std::io::Result<()> {
    let left_edge = map.col(config.shoulder_width);
    let right_edge = map.col(config.viewport_width - config.shoulder_width);
    let center = map.col(config.viewport_width / 2.0);

    out.queue(style::SetForegroundColor(C_SHOULDER))?;
    for row in 1..=map.rows {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("█".repeat(left_edge as usize)))?;
        out.queue(cursor::MoveTo(right_edge, row))?;
        out.queue(Print("█".repeat((map.cols - right_edge) as usize)))?;
    }

    // Dashed centerline: two rows on, two rows off
    out.queue(style::SetForegroundColor(C_CENTERLINE))?;
    for row in 1..=map.rows {
        if row % 4 < 2 {
            out.queue(cursor::MoveTo(center, row))?;
            out.queue(Print("│"))?;
        }
    }

    Ok(())
}

// ── Cars ──────────────────────────────────────────────────────────────────────

fn draw_car<W: Write>(
    out: &mut W,
    rect: &Rect,
    color: Color,
    map: &CellMap,
) -> std::io::Result<()> {
    let c0 = map.col(rect.x);
    let c1 = map.col(rect.x + rect.w).max(c0 + 1);
    let width = (c1 - c0) as usize;

    // Clip to the track rows; boxes above the viewport start at negative y
    let r0 = map.row(rect.y).max(1);
    let r1 = map.row(rect.y + rect.h).min(map.rows as i32 + 1);

    out.queue(style::SetForegroundColor(color))?;
    for row in r0..r1 {
        out.queue(cursor::MoveTo(c0, row as u16))?;
        out.queue(Print("█".repeat(width)))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, frame: &RenderFrame, term: (u16, u16)) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>8}", frame.score)))?;

    let title = "F1 RACE";
    let tx = (term.0 / 2).saturating_sub(title.len() as u16 / 2);
    out.queue(cursor::MoveTo(tx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_TITLE))?;
    out.queue(Print(title))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, term: (u16, u16)) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, term.1.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Steer   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    frame: &RenderFrame,
    term: (u16, u16),
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", frame.score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (&score_line, Color::Yellow),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cx = term.0 / 2;
    let start_row = (term.1 / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
