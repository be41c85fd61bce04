/// All game entity types — pure data, no logic.

use glam::Vec2;

#[derive(Clone, Debug, PartialEq)]
pub enum Pace {
    Relaxed,
    Classic,
    Frantic,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

#[derive(Clone, Debug, PartialEq)]
pub enum BubbleKind {
    Regular,
    /// Strobes between two colours; popping it chain-pops every live bubble.
    Flashing { flash_timer: u32 },
}

// ── Bubbles ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Bubble {
    /// Current drawn centre.
    pub pos: Vec2,
    /// Spawn anchor, constant per instance.
    pub start_pos: Vec2,
    /// Destination, inset from the playfield edge by `target_radius`.
    pub target_pos: Vec2,
    pub radius: f32,
    pub target_radius: f32,
    /// Palette index (1..=15).
    pub color: u8,
    pub kind: BubbleKind,
    pub popped: bool,
    /// Set once `radius` reaches `target_radius`; position and radius
    /// freeze from then on.
    pub grown: bool,
}

// ── Pop debris ────────────────────────────────────────────────────────────────

/// A dot thrown outward by a popping bubble.
#[derive(Clone, Debug)]
pub struct Fragment {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Palette index inherited from the source bubble.
    pub color: u8,
    /// Frames left; pruned the frame this reaches zero.
    pub life: u32,
}

/// A floating score label left behind by a pop.  Ages without moving.
#[derive(Clone, Debug)]
pub struct ScorePopup {
    pub pos: Vec2,
    pub value: u32,
    pub life: u32,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Pointer state sampled once per frame by the shell.
#[derive(Clone, Debug)]
pub struct PointerInput {
    /// Pointer position in playfield coordinates.
    pub pos: Vec2,
    /// True for exactly one frame per physical press.
    pub pressed: bool,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire session state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Live bubbles in spawn order; click hit-testing scans front to back.
    pub bubbles: Vec<Bubble>,
    pub fragments: Vec<Fragment>,
    pub popups: Vec<ScorePopup>,
    pub score: u32,
    /// Best score seen across restarts within this process run.
    pub high_score: u32,
    /// Frames since the last regular bubble spawn.
    pub bubble_timer: u32,
    /// Frames since the last flashing bubble spawn.
    pub flash_spawn_timer: u32,
    /// Frames until the session ends.
    pub remaining_time: u32,
    /// Snapshot of `score` taken the instant the session ended.
    pub final_score: u32,
    pub status: GameStatus,
    pub pace: Pace,
}
