/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG.

use glam::Vec2;
use rand::Rng;

use crate::entities::{
    Bubble, BubbleKind, Fragment, GameState, GameStatus, Pace, PointerInput, ScorePopup,
};

// ── Playfield & tuning constants ─────────────────────────────────────────────

/// Simulation coordinates; the shell maps these onto whatever surface it has.
pub const PLAYFIELD_W: f32 = 256.0;
pub const PLAYFIELD_H: f32 = 256.0;

pub const TICKS_PER_SECOND: u32 = 30;

/// Live-bubble capacity; exceeding it ends the session.
pub const MAX_BUBBLES: usize = 20;

/// Frames between flashing-bubble spawns.
pub const FLASH_SPAWN_INTERVAL: u32 = 600;

/// Fragments thrown out by each popped bubble.
pub const FRAGMENTS_PER_POP: usize = 128;

/// Frames a fragment or score popup stays alive.
pub const DEBRIS_LIFE: u32 = 45;

/// Radius gained per frame while a bubble grows.
const GROWTH_SPEED: f32 = 0.5;

/// Fraction of the remaining drift distance covered each frame.
const DRIFT_RATE: f32 = 0.01;

const TARGET_RADIUS_MIN: f32 = 15.0;
const TARGET_RADIUS_MAX: f32 = 25.0;
const FRAGMENT_SPEED: f32 = 1.5;

/// Strobe duty cycle: `FLASH_ON` hot frames out of every `FLASH_CYCLE`.
const FLASH_CYCLE: u32 = 15;
const FLASH_ON: u32 = 7;
const FLASH_COLOR_HOT: u8 = 8;
const FLASH_COLOR_COLD: u8 = 7;

const SCORE_MIN: i64 = 10;
const SCORE_MAX: i64 = 100;

// ── Pace tables ──────────────────────────────────────────────────────────────

/// Frames between regular bubble spawns.
pub fn bubble_spawn_interval(pace: &Pace) -> u32 {
    match pace {
        Pace::Relaxed => 20,
        Pace::Classic => 20,
        Pace::Frantic => 10,
    }
}

/// Session length in frames.
pub fn game_duration(pace: &Pace) -> u32 {
    match pace {
        Pace::Relaxed => 60 * TICKS_PER_SECOND,
        Pace::Classic => 30 * TICKS_PER_SECOND,
        Pace::Frantic => 30 * TICKS_PER_SECOND,
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Every bubble starts life at the same anchor and drifts away from it.
fn spawn_anchor() -> Vec2 {
    Vec2::new(PLAYFIELD_W / 2.0, PLAYFIELD_H / 3.0)
}

/// Roll a fresh bubble: random destination (inset so the full-grown bubble
/// stays on the playfield), random target size and palette colour.
pub fn new_bubble(kind: BubbleKind, rng: &mut impl Rng) -> Bubble {
    let target_radius = rng.gen_range(TARGET_RADIUS_MIN..=TARGET_RADIUS_MAX);
    let start_pos = spawn_anchor();
    Bubble {
        pos: start_pos,
        start_pos,
        target_pos: Vec2::new(
            rng.gen_range(target_radius..=PLAYFIELD_W - target_radius),
            rng.gen_range(target_radius..=PLAYFIELD_H - target_radius),
        ),
        radius: 1.0,
        target_radius,
        color: rng.gen_range(1..=15),
        kind,
        popped: false,
        grown: false,
    }
}

fn new_fragment(pos: Vec2, color: u8, rng: &mut impl Rng) -> Fragment {
    Fragment {
        pos,
        vel: Vec2::new(
            rng.gen_range(-FRAGMENT_SPEED..=FRAGMENT_SPEED),
            rng.gen_range(-FRAGMENT_SPEED..=FRAGMENT_SPEED),
        ),
        color,
        life: DEBRIS_LIFE,
    }
}

/// Build a fresh session holding one bubble.  `high_score` carries over
/// from the previous session.
pub fn init_session(pace: Pace, high_score: u32, rng: &mut impl Rng) -> GameState {
    GameState {
        bubbles: vec![new_bubble(BubbleKind::Regular, rng)],
        fragments: Vec::new(),
        popups: Vec::new(),
        score: 0,
        high_score,
        bubble_timer: 0,
        flash_spawn_timer: 0,
        remaining_time: game_duration(&pace),
        final_score: 0,
        status: GameStatus::Playing,
        pace,
    }
}

// ── Scoring ──────────────────────────────────────────────────────────────────

/// Score for popping one bubble while `bubble_count` bubbles (the popped one
/// included) are in play.  An emptier screen pays better; the result is
/// clamped to [10, 100].
pub fn score_value(bubble_count: usize) -> u32 {
    let crowding = bubble_count as f32 / MAX_BUBBLES as f32;
    (((1.0 - crowding) * 100.0).round() as i64).clamp(SCORE_MIN, SCORE_MAX) as u32
}

// ── Per-entity updates (pure) ────────────────────────────────────────────────

/// Advance one bubble by one frame: drift covers `DRIFT_RATE` of the
/// remaining distance to the destination, the radius grows until it clamps
/// exactly at `target_radius`, and both freeze once grown.  The flashing
/// variant then advances its strobe, which keeps running after growth.
pub fn update_bubble(bubble: &Bubble) -> Bubble {
    let mut b = bubble.clone();
    if b.popped {
        return b;
    }
    if !b.grown {
        b.pos += (b.target_pos - b.pos) * DRIFT_RATE;
        if b.radius < b.target_radius {
            b.radius += GROWTH_SPEED;
        }
        if b.radius >= b.target_radius {
            b.radius = b.target_radius;
            b.grown = true;
        }
    }
    if let BubbleKind::Flashing { flash_timer } = b.kind {
        let t = flash_timer + 1;
        b.color = if t % FLASH_CYCLE < FLASH_ON {
            FLASH_COLOR_HOT
        } else {
            FLASH_COLOR_COLD
        };
        b.kind = BubbleKind::Flashing { flash_timer: t };
    }
    b
}

/// Index of the first un-popped bubble strictly containing `pointer`,
/// in spawn order.
pub fn hit_bubble(bubbles: &[Bubble], pointer: Vec2) -> Option<usize> {
    bubbles
        .iter()
        .position(|b| !b.popped && pointer.distance_squared(b.pos) < b.radius * b.radius)
}

/// Drop popped bubbles and debris whose life has run out.  Running this
/// twice without an intervening update removes nothing further.
pub fn prune(state: &GameState) -> GameState {
    let mut next = state.clone();
    next.bubbles.retain(|b| !b.popped);
    next.fragments.retain(|f| f.life > 0);
    next.popups.retain(|p| p.life > 0);
    next
}

/// Throw `FRAGMENTS_PER_POP` fragments out from a popped bubble.
fn burst(bubble: &Bubble, fragments: &mut Vec<Fragment>, rng: &mut impl Rng) {
    for _ in 0..FRAGMENTS_PER_POP {
        fragments.push(new_fragment(bubble.pos, bubble.color, rng));
    }
}

/// Freeze the session: snapshot the final score and fold it into the
/// running high score.
fn end_session(state: &GameState) -> GameState {
    GameState {
        status: GameStatus::GameOver,
        final_score: state.score,
        high_score: state.high_score.max(state.score),
        ..state.clone()
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ───────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// Frame order is fixed: countdown → spawn → update → click resolution →
/// prune → capacity check.  A finished session is frozen; the only input it
/// accepts is the restart press.
pub fn tick(state: &GameState, input: &PointerInput, rng: &mut impl Rng) -> GameState {
    if state.status == GameStatus::GameOver {
        if input.pressed {
            return init_session(state.pace.clone(), state.high_score, rng);
        }
        return state.clone();
    }

    // ── 1. Countdown — expiry freezes the frame before anything else runs ────
    let remaining_time = state.remaining_time - 1;
    if remaining_time == 0 {
        return end_session(&GameState {
            remaining_time,
            ..state.clone()
        });
    }

    // ── 2. Spawn on schedule ─────────────────────────────────────────────────
    let mut bubbles = state.bubbles.clone();
    let mut bubble_timer = state.bubble_timer + 1;
    if bubble_timer >= bubble_spawn_interval(&state.pace) {
        bubbles.push(new_bubble(BubbleKind::Regular, rng));
        bubble_timer = 0;
    }
    let mut flash_spawn_timer = state.flash_spawn_timer + 1;
    if flash_spawn_timer >= FLASH_SPAWN_INTERVAL {
        bubbles.push(new_bubble(BubbleKind::Flashing { flash_timer: 0 }, rng));
        flash_spawn_timer = 0;
    }

    // ── 3. Update all live entities ──────────────────────────────────────────
    let mut bubbles: Vec<Bubble> = bubbles.iter().map(update_bubble).collect();
    let mut fragments: Vec<Fragment> = state
        .fragments
        .iter()
        .map(|f| Fragment {
            pos: f.pos + f.vel,
            life: f.life - 1,
            ..f.clone()
        })
        .collect();
    let mut popups: Vec<ScorePopup> = state
        .popups
        .iter()
        .map(|p| ScorePopup {
            life: p.life - 1,
            ..p.clone()
        })
        .collect();

    // ── 4. Resolve at most one pop per click ─────────────────────────────────
    let mut score = state.score;
    if input.pressed {
        if let Some(i) = hit_bubble(&bubbles, input.pos) {
            match bubbles[i].kind {
                BubbleKind::Regular => {
                    let value = score_value(bubbles.len());
                    score += value;
                    popups.push(ScorePopup {
                        pos: bubbles[i].pos,
                        value,
                        life: DEBRIS_LIFE,
                    });
                    bubbles[i].popped = true;
                    burst(&bubbles[i], &mut fragments, rng);
                }
                BubbleKind::Flashing { .. } => {
                    // Chain pop: every live bubble goes at once, scored as a
                    // single aggregate award with one centred popup.
                    let value = score_value(bubbles.len()) * bubbles.len() as u32;
                    score += value;
                    popups.push(ScorePopup {
                        pos: Vec2::new(PLAYFIELD_W / 2.0, PLAYFIELD_H / 2.0),
                        value,
                        life: DEBRIS_LIFE,
                    });
                    for b in bubbles.iter_mut() {
                        b.popped = true;
                    }
                    for b in &bubbles {
                        burst(b, &mut fragments, rng);
                    }
                }
            }
        }
    }

    // ── 5. Prune popped bubbles and expired debris ───────────────────────────
    let next = prune(&GameState {
        bubbles,
        fragments,
        popups,
        score,
        bubble_timer,
        flash_spawn_timer,
        remaining_time,
        ..state.clone()
    });

    // ── 6. Capacity check ────────────────────────────────────────────────────
    if next.bubbles.len() > MAX_BUBBLES {
        return end_session(&next);
    }
    next
}
