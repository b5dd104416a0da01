//! Terminal front end: every crossterm call the game makes lives here.
//!
//! Each function receives a mutable writer and an immutable `RenderFrame`.
//! No game logic is performed; this module only scales playfield pixels to
//! terminal cells and translates draw requests into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use zombie_coop::entities::{BossKind, EnemyKind, GameStatus, OrdinaryKind, PlayerId, Rect};
use zombie_coop::frame::{DrawRequest, PlayerHud, RenderFrame, SpriteKind, VisualState};
use zombie_coop::shop::{Weapon, SHOP_SLOTS};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkRed;
const C_HUD_STAGE: Color = Color::White;
const C_HUD_BOSS: Color = Color::Red;
const C_HUD_COINS: Color = Color::Yellow;
const C_PLAYER_ONE: Color = Color::White;
const C_PLAYER_TWO: Color = Color::Cyan;
const C_PLAYER_HURT: Color = Color::Red;
const C_DEAD: Color = Color::DarkGrey;
const C_WALKER: Color = Color::Green;
const C_RUNNER: Color = Color::Red;
const C_CRAWLER: Color = Color::Blue;
const C_BOSS: Color = Color::Magenta;
const C_ENEMY_HURT: Color = Color::White;
const C_ENEMY_SWING: Color = Color::Yellow;
const C_COIN: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

/// Terminal rows/columns available to the playfield, plus the playfield's
/// size in simulation pixels.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub world_width: f64,
    pub world_height: f64,
}

impl Viewport {
    /// Map a playfield point to a cell inside the border (rows 2 .. rows-3).
    fn cell(&self, x: f64, y: f64) -> (u16, u16) {
        let inner_w = f64::from(self.cols.saturating_sub(2).max(1));
        let inner_h = f64::from(self.rows.saturating_sub(4).max(1));
        let col = (x / self.world_width * inner_w).clamp(0.0, inner_w - 1.0) as u16 + 1;
        let row = (y / self.world_height * inner_h).clamp(0.0, inner_h - 1.0) as u16 + 2;
        (col, row)
    }

    fn on_field(&self, bounds: &Rect) -> bool {
        let (cx, cy) = bounds.center();
        cx >= 0.0 && cy >= 0.0 && cx <= self.world_width && cy <= self.world_height
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    frame: &RenderFrame,
    weapons: &[Weapon],
    shop_note: Option<&str>,
    view: &Viewport,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, frame, view)?;

    for sprite in &frame.sprites {
        if sprite.visible && view.on_field(&sprite.bounds) {
            draw_sprite(out, sprite, view)?;
        }
    }

    draw_controls_hint(out, view)?;

    match frame.status {
        GameStatus::StageTransition => draw_transition(out, frame, weapons, shop_note, view)?,
        GameStatus::GameOver => draw_banner(out, frame, "GAME  OVER", Color::Red, view)?,
        GameStatus::Victory => draw_banner(out, frame, " VICTORY! ", Color::Green, view)?,
        GameStatus::Menu | GameStatus::Playing => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

pub fn draw_menu<W: Write>(out: &mut W, cols: u16, rows: u16) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let cx = cols / 2;
    let cy = rows / 2;

    let lines: &[(&str, Color)] = &[
        ("☠  ATTACK  ON  HEEC  ☠", Color::Red),
        ("", Color::White),
        ("ENTER : Play     ESC : Quit", Color::White),
        ("", Color::White),
        ("Player 1   ← ↑ → ↓  move    M  attack", Color::Grey),
        ("Player 2   Q Z D S  move    A  attack", Color::Grey),
        ("", Color::White),
        ("Kill zombies, grab the coins, buy weapons between stages.", Color::DarkGrey),
    ];
    let top = cy.saturating_sub(lines.len() as u16 / 2);
    for (i, (text, color)) in lines.iter().enumerate() {
        centered(out, cx, top + i as u16, text, *color)?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn hud_text(hud: &PlayerHud) -> String {
    let label = match hud.id {
        PlayerId::One => "P1",
        PlayerId::Two => "P2",
    };
    format!("{} HP:{:>3}/{:<3} ${:<6}", label, hud.health, hud.max_health, hud.coins)
}

fn draw_hud<W: Write>(out: &mut W, frame: &RenderFrame, view: &Viewport) -> std::io::Result<()> {
    // Player 2 on the left, player 1 on the right, matching their keyboard halves
    let [p1, p2] = &frame.players;

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_PLAYER_TWO))?;
    out.queue(Print(hud_text(p2)))?;

    let stage_str = if frame.boss_stage {
        format!("[ STAGE {} · BOSS ]", frame.stage)
    } else {
        format!("[ STAGE {} ]", frame.stage)
    };
    let color = if frame.boss_stage { C_HUD_BOSS } else { C_HUD_STAGE };
    centered(out, view.cols / 2, 0, &stage_str, color)?;

    let right = hud_text(p1);
    let rx = view.cols.saturating_sub(right.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_PLAYER_ONE))?;
    out.queue(Print(&right))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(out: &mut W, sprite: &DrawRequest, view: &Viewport) -> std::io::Result<()> {
    let (cx, cy) = sprite.bounds.center();
    let (col, row) = view.cell(cx, cy);

    match sprite.sprite {
        SpriteKind::Coin { .. } => {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(C_COIN))?;
            out.queue(Print("$"))?;
        }
        SpriteKind::Player(id) => {
            let (glyph, base) = match id {
                PlayerId::One => ("1", C_PLAYER_ONE),
                PlayerId::Two => ("2", C_PLAYER_TWO),
            };
            let color = match sprite.visual {
                VisualState::Dead => C_DEAD,
                VisualState::Hurt => C_PLAYER_HURT,
                _ => base,
            };
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(color))?;
            out.queue(Print(if sprite.visual == VisualState::Dead { "x" } else { glyph }))?;

            if sprite.visual == VisualState::Attacking {
                // Swing arc on the facing side
                let (arc_col, arc) = if sprite.facing_right {
                    (col.saturating_add(1).min(view.cols.saturating_sub(2)), "⟩")
                } else {
                    (col.saturating_sub(1).max(1), "⟨")
                };
                out.queue(cursor::MoveTo(arc_col, row))?;
                out.queue(style::SetForegroundColor(Color::Yellow))?;
                out.queue(Print(arc))?;
            }
        }
        SpriteKind::Enemy(kind) => {
            let (glyph, base) = match kind {
                EnemyKind::Ordinary(OrdinaryKind::Walker) => ("z", C_WALKER),
                EnemyKind::Ordinary(OrdinaryKind::Runner) => ("z", C_RUNNER),
                EnemyKind::Ordinary(OrdinaryKind::Crawler) => ("ƶ", C_CRAWLER),
                EnemyKind::Boss(BossKind::Butcher) => ("B", C_BOSS),
                EnemyKind::Boss(BossKind::Abomination) => ("A", C_BOSS),
                EnemyKind::Boss(BossKind::Overlord) => ("Ω", C_BOSS),
            };
            let color = match sprite.visual {
                VisualState::Hurt => C_ENEMY_HURT,
                VisualState::Attacking => C_ENEMY_SWING,
                VisualState::Dead => C_DEAD,
                VisualState::Idle | VisualState::Walking => base,
            };
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(color))?;
            out.queue(Print(glyph))?;

            if let Some(ratio) = sprite.health_ratio {
                draw_health_bar(out, col, row, ratio, kind.is_boss())?;
            }
        }
    }
    Ok(())
}

/// Tiny bar one row above an enemy: 3 cells, 5 for bosses.
fn draw_health_bar<W: Write>(
    out: &mut W,
    col: u16,
    row: u16,
    ratio: f64,
    boss: bool,
) -> std::io::Result<()> {
    if row <= 2 {
        return Ok(());
    }
    let cells: usize = if boss { 5 } else { 3 };
    let filled = ((ratio.clamp(0.0, 1.0) * cells as f64).ceil() as usize).min(cells);
    let bar = format!("{}{}", "▰".repeat(filled), "▱".repeat(cells - filled));
    out.queue(cursor::MoveTo(col.saturating_sub(cells as u16 / 2).max(1), row - 1))?;
    out.queue(style::SetForegroundColor(if boss { Color::DarkYellow } else { Color::Green }))?;
    out.queue(Print(bar))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("P1: ←↑→↓ + M   P2: QZDS + A   ESC : Quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_transition<W: Write>(
    out: &mut W,
    frame: &RenderFrame,
    weapons: &[Weapon],
    shop_note: Option<&str>,
    view: &Viewport,
) -> std::io::Result<()> {
    let cx = view.cols / 2;
    let mut row = (view.rows / 2).saturating_sub(3 + weapons.len() as u16 / 2);

    if frame.boss_stage {
        centered(out, cx, row, "BOSS STAGE!", Color::Red)?;
    } else {
        centered(out, cx, row, &format!("Stage {}", frame.stage), Color::White)?;
    }
    row += 2;

    centered(out, cx, row, "── Armoury ──", C_HUD_COINS)?;
    row += 1;
    for (i, weapon) in weapons.iter().take(SHOP_SLOTS).enumerate() {
        let line = format!(
            "[{}/{}] {:<10} {:>3} DMG  {:>5} coins",
            i + 1,
            i + 1 + SHOP_SLOTS,
            weapon.name,
            weapon.damage,
            weapon.price
        );
        centered(out, cx, row, &line, Color::Grey)?;
        row += 1;
    }
    let hint = format!(
        "P1 buys with 1-{}, P2 with {}-{}",
        SHOP_SLOTS,
        SHOP_SLOTS + 1,
        2 * SHOP_SLOTS
    );
    centered(out, cx, row, &hint, C_HINT)?;
    row += 1;

    if let Some(note) = shop_note {
        centered(out, cx, row, note, Color::Yellow)?;
    }
    Ok(())
}

fn draw_banner<W: Write>(
    out: &mut W,
    frame: &RenderFrame,
    title: &str,
    color: Color,
    view: &Viewport,
) -> std::io::Result<()> {
    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(3);

    let top = format!("╔{}╗", "═".repeat(title.chars().count() + 8));
    let mid = format!("║    {}    ║", title);
    let bottom = format!("╚{}╝", "═".repeat(title.chars().count() + 8));
    centered(out, cx, start_row, &top, color)?;
    centered(out, cx, start_row + 1, &mid, color)?;
    centered(out, cx, start_row + 2, &bottom, color)?;

    let total: u32 = frame.players.iter().map(|p| p.coins).sum();
    centered(
        out,
        cx,
        start_row + 3,
        &format!("Reached stage {}   Coins banked: {}", frame.stage, total),
        C_HUD_COINS,
    )?;
    centered(out, cx, start_row + 4, "ENTER - Play Again  ESC - Quit", Color::White)?;
    Ok(())
}

fn centered<W: Write>(out: &mut W, cx: u16, row: u16, text: &str, color: Color) -> std::io::Result<()> {
    let col = cx.saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}
