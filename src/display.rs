/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands, and converts between playfield and cell
/// coordinates for the input side.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use glam::Vec2;

use bubble_pop::compute::{self, MAX_BUBBLES, TICKS_PER_SECOND};
use bubble_pop::entities::{Bubble, Fragment, GameState, GameStatus, Pace, ScorePopup};

// ── Colour palette ────────────────────────────────────────────────────────────

/// Retro 16-colour palette, indexed by the colour values the simulation
/// hands out.  Indexing out of range is a bug upstream and panics.
const PALETTE: [Color; 16] = [
    Color::Rgb { r: 0x00, g: 0x00, b: 0x00 },
    Color::Rgb { r: 0x2b, g: 0x33, b: 0x5f },
    Color::Rgb { r: 0x7e, g: 0x20, b: 0x72 },
    Color::Rgb { r: 0x19, g: 0x95, b: 0x9c },
    Color::Rgb { r: 0x8b, g: 0x48, b: 0x52 },
    Color::Rgb { r: 0x39, g: 0x5c, b: 0x98 },
    Color::Rgb { r: 0xa9, g: 0xc1, b: 0xff },
    Color::Rgb { r: 0xee, g: 0xee, b: 0xee },
    Color::Rgb { r: 0xd4, g: 0x18, b: 0x6c },
    Color::Rgb { r: 0xd3, g: 0x84, b: 0x41 },
    Color::Rgb { r: 0xe9, g: 0xc3, b: 0x5b },
    Color::Rgb { r: 0x70, g: 0xc6, b: 0xa9 },
    Color::Rgb { r: 0x76, g: 0x96, b: 0xde },
    Color::Rgb { r: 0x7f, g: 0x7f, b: 0x7f },
    Color::Rgb { r: 0xff, g: 0x97, b: 0x98 },
    Color::Rgb { r: 0xed, g: 0xc7, b: 0xb0 },
];

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_TIME: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;
const C_POPUP: Color = Color::Yellow;

fn palette(index: u8) -> Color {
    PALETTE[usize::from(index)]
}

// ── Coordinate mapping ────────────────────────────────────────────────────────

/// Playfield position → terminal cell (unclipped; callers clip).
fn to_cell(pos: Vec2, width: u16, height: u16) -> (i32, i32) {
    (
        (pos.x / compute::PLAYFIELD_W * f32::from(width)) as i32,
        (pos.y / compute::PLAYFIELD_H * f32::from(height)) as i32,
    )
}

/// Terminal cell (from a mouse event) → playfield position, centred on
/// the cell.
pub fn cell_to_playfield(col: u16, row: u16, width: u16, height: u16) -> Vec2 {
    Vec2::new(
        (f32::from(col) + 0.5) / f32::from(width.max(1)) * compute::PLAYFIELD_W,
        (f32::from(row) + 0.5) / f32::from(height.max(1)) * compute::PLAYFIELD_H,
    )
}

/// Play area rows sit between the HUD (row 0) and the hint row.
fn in_play_area(col: i32, row: i32, width: u16, height: u16) -> bool {
    col >= 0 && col < i32::from(width) && row >= 1 && row < i32::from(height) - 1
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    for bubble in &state.bubbles {
        draw_bubble(out, bubble, width, height)?;
    }
    for fragment in &state.fragments {
        draw_fragment(out, fragment, width, height)?;
    }
    for popup in &state.popups {
        draw_popup(out, popup, width, height)?;
    }

    draw_capacity_gauge(out, state, height)?;
    draw_hud(out, state, width)?;
    draw_controls_hint(out, height)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, state, width, height)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Rasterize a bubble as a filled disc, one chord run per terminal row.
/// The playfield is square but cells are not, so the two axes scale
/// independently.
fn draw_bubble<W: Write>(
    out: &mut W,
    bubble: &Bubble,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let (cx, cy) = to_cell(bubble.pos, width, height);
    let rx = (bubble.radius / compute::PLAYFIELD_W * f32::from(width)).max(0.5);
    let ry = (bubble.radius / compute::PLAYFIELD_H * f32::from(height)).max(0.5);

    out.queue(style::SetForegroundColor(palette(bubble.color)))?;

    for dy in -(ry as i32)..=(ry as i32) {
        let row = cy + dy;
        let chord = 1.0 - (dy as f32 / ry).powi(2);
        let half = (rx * chord.max(0.0).sqrt()) as i32;
        let left = (cx - half).max(0);
        let right = (cx + half).min(i32::from(width) - 1);
        if right < left || !in_play_area(left, row, width, height) {
            continue;
        }
        out.queue(cursor::MoveTo(left as u16, row as u16))?;
        out.queue(Print("█".repeat((right - left + 1) as usize)))?;
    }
    Ok(())
}

fn draw_fragment<W: Write>(
    out: &mut W,
    fragment: &Fragment,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let (col, row) = to_cell(fragment.pos, width, height);
    if !in_play_area(col, row, width, height) {
        return Ok(());
    }
    out.queue(cursor::MoveTo(col as u16, row as u16))?;
    out.queue(style::SetForegroundColor(palette(fragment.color)))?;
    out.queue(Print("·"))?;
    Ok(())
}

fn draw_popup<W: Write>(
    out: &mut W,
    popup: &ScorePopup,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let (col, row) = to_cell(popup.pos, width, height);
    if !in_play_area(col, row, width, height) {
        return Ok(());
    }
    out.queue(cursor::MoveTo(col as u16, row as u16))?;
    out.queue(style::SetForegroundColor(C_POPUP))?;
    out.queue(Print(format!("+{}", popup.value)))?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, width: u16) -> std::io::Result<()> {
    // Score and high score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    if state.high_score > 0 {
        out.queue(Print(format!(
            "Score:{:>6}  Hi:{:>6}",
            state.score, state.high_score
        )))?;
    } else {
        out.queue(Print(format!("Score:{:>6}", state.score)))?;
    }

    // Pace — centre
    let pace_str = match state.pace {
        Pace::Relaxed => "[ RELAXED ]",
        Pace::Classic => "[ CLASSIC ]",
        Pace::Frantic => "[ FRANTIC ]",
    };
    let pace_color = match state.pace {
        Pace::Relaxed => Color::Green,
        Pace::Classic => Color::Yellow,
        Pace::Frantic => Color::Red,
    };
    let px = (width / 2).saturating_sub(pace_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(px, 0))?;
    out.queue(style::SetForegroundColor(pace_color))?;
    out.queue(Print(pace_str))?;

    // Remaining whole seconds — right
    let time_str = format!("Time:{:>3}", state.remaining_time / TICKS_PER_SECOND);
    let tx = width.saturating_sub(time_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(tx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_TIME))?;
    out.queue(Print(&time_str))?;

    Ok(())
}

// ── Capacity gauge (left edge) ────────────────────────────────────────────────

/// Vertical fill bar: live bubble count against `MAX_BUBBLES`.  Hitting
/// the top means the next overflow ends the session.
fn draw_capacity_gauge<W: Write>(
    out: &mut W,
    state: &GameState,
    height: u16,
) -> std::io::Result<()> {
    let top: i32 = 1;
    let bottom = i32::from(height) - 2;
    if bottom < top {
        return Ok(());
    }
    let span = (bottom - top + 1) as usize;
    let filled = span * state.bubbles.len().min(MAX_BUBBLES) / MAX_BUBBLES;

    for i in 0..span {
        let row = (bottom - i as i32) as u16;
        out.queue(cursor::MoveTo(0, row))?;
        if i < filled {
            out.queue(style::SetForegroundColor(palette(8)))?;
            out.queue(Print("██"))?;
        } else {
            out.queue(style::SetForegroundColor(palette(5)))?;
            out.queue(Print("░░"))?;
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Click : Pop bubbles   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", state.final_score);
    let new_best = state.final_score >= state.high_score && state.final_score > 0;
    let best_line = if new_best {
        format!("★ NEW BEST: {:>6} ★", state.high_score)
    } else {
        format!("Best Score:  {:>6}", state.high_score)
    };

    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];
    let best_color = if new_best { Color::Yellow } else { Color::DarkGrey };

    let cx = width / 2;
    let total_rows = lines.len() + 3; // 3 box lines + score + best + hint
    let start_row = (height / 2).saturating_sub(total_rows as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let best_row = score_row + 1;
    let col = cx.saturating_sub(best_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, best_row))?;
    out.queue(style::SetForegroundColor(best_color))?;
    out.queue(Print(&best_line))?;

    let hint = "Click to Restart   Q - Quit";
    let hint_row = best_row + 1;
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, hint_row))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
