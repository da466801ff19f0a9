//! Game state and core simulation types
//!
//! All state the tower game needs lives here: the stack of placed blocks,
//! the block in flight, score bookkeeping and the seeded RNG. No rendering
//! or platform dependencies.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::span::Span;
use crate::consts::*;

/// Block fill colors, bright and saturated
pub const PALETTE: [&str; 26] = [
    "#ff5252", "#ff9800", "#ffd600", "#69f0ae", "#00bcd4", "#448aff", "#7c4dff",
    "#e040fb", "#ff4081", "#ff1744", "#00e676", "#00bfae", "#2979ff", "#651fff",
    "#d500f9", "#ff80ab", "#ffea00", "#64dd17", "#1de9b6", "#00b8d4", "#304ffe",
    "#6200ea", "#c51162", "#ff3d00", "#aeea00", "#00bfae",
];

/// Index into [`PALETTE`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorToken(pub u8);

impl ColorToken {
    /// CSS color string for canvas fills
    pub fn css(self) -> &'static str {
        PALETTE[self.0 as usize % PALETTE.len()]
    }
}

/// A placed block in the tower
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Block {
    /// Center position (viewport units, y grows downward)
    pub center: Vec2,
    pub width: f32,
    pub color: ColorToken,
}

impl Block {
    /// Horizontal extent of the block
    pub fn span(&self) -> Span {
        Span::new(self.center.x, self.width)
    }
}

/// The block currently oscillating, awaiting a drop
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MovingBlock {
    pub center: Vec2,
    pub width: f32,
    /// Signed horizontal speed, viewport units per frame
    pub speed: f32,
}

impl MovingBlock {
    pub fn span(&self) -> Span {
        Span::new(self.center.x, self.width)
    }
}

/// How the in-flight block should be displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightRole {
    /// Oscillating, waiting for the drop
    Flying,
    /// Frozen where the missed drop left it
    Crashed,
}

/// Parameters for one celebratory confetti burst
///
/// Count and spread are sampled from the given ranges by the effect system;
/// the origin is in viewport fractions.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiSpec {
    pub particle_count: (u32, u32),
    pub spread_degrees: (f32, f32),
    pub origin: Vec2,
    pub palette: &'static [&'static str],
}

/// Events emitted by the simulation, drained by the shell each frame
///
/// Dispatching them (persistence, confetti, restart UI) is best-effort and
/// never feeds back into game state.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A perfect placement happened; fire the confetti collaborator
    PerfectPlacement(ConfettiSpec),
    /// The best score was beaten; persist the new value
    NewBestScore(u32),
    /// A missed drop ended the run
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Placed blocks, bottom to top
    pub stack: Vec<Block>,
    /// The block in flight (`None` before the first start)
    pub moving: Option<MovingBlock>,
    /// Blocks placed this run
    pub score: u32,
    /// Best score across runs, seeded from storage at startup
    pub best_score: u32,
    /// False after a missed drop, until the next start
    pub running: bool,
    /// Viewport dimensions (width, height)
    pub viewport: Vec2,
    /// Pending events for the shell
    pub events: Vec<GameEvent>,
    rng: Pcg32,
}

impl GameState {
    /// Create an idle simulation with the given seed and stored best score
    pub fn new(seed: u64, best_score: u32) -> Self {
        Self {
            seed,
            stack: Vec::new(),
            moving: None,
            score: 0,
            best_score,
            running: false,
            viewport: Vec2::ZERO,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Start (or restart) a run at the given viewport size
    ///
    /// Resets score and the stack, seeds the base block and launches the
    /// first moving block. Always succeeds.
    pub fn start(&mut self, w: f32, h: f32) {
        self.viewport = Vec2::new(w, h);
        self.score = 0;
        self.running = true;
        self.events.clear();

        let color = self.random_color();
        self.stack.clear();
        self.stack.push(Block {
            center: Vec2::new(w / 2.0, h - BLOCK_H / 2.0 - BOTTOM_MARGIN),
            width: BLOCK_W,
            color,
        });

        self.spawn(BLOCK_W);
    }

    /// Launch a new moving block one row above the stack top
    ///
    /// `width` is the just-placed block's trimmed width; each trim makes the
    /// next block harder to land.
    pub fn spawn(&mut self, width: f32) {
        let rightward = self.rng.random::<bool>();
        let speed = self.rng.random_range(SPEED_MIN..SPEED_MAX);
        let y = self.viewport.y
            - BLOCK_H / 2.0
            - BLOCK_H * self.stack.len() as f32
            - BOTTOM_MARGIN;

        self.moving = Some(MovingBlock {
            center: Vec2::new(if rightward { 0.0 } else { self.viewport.x }, y),
            width,
            speed: if rightward { speed } else { -speed },
        });
    }

    /// Adopt new viewport dimensions without resetting the run
    ///
    /// Existing blocks are not relocated; the moving block picks up the new
    /// bounce bounds on its next advance.
    pub fn set_viewport(&mut self, w: f32, h: f32) {
        self.viewport = Vec2::new(w, h);
    }

    /// Draw a fresh block color
    pub(crate) fn random_color(&mut self) -> ColorToken {
        ColorToken(self.rng.random_range(0..PALETTE.len() as u8))
    }

    /// Formatted score/best pair for the HUD
    pub fn score_line(&self) -> String {
        format!("Score: {}  |  Best: {}", self.score, self.best_score)
    }

    /// Read-only render view of the current frame
    pub fn scene(&self) -> Scene<'_> {
        let role = if self.running {
            FlightRole::Flying
        } else {
            FlightRole::Crashed
        };
        Scene {
            blocks: &self.stack,
            moving: self.moving.as_ref().map(|m| (m, role)),
            failed: !self.running && self.moving.is_some(),
        }
    }
}

/// Everything the presenter needs to paint one frame
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    /// Placed blocks, bottom to top
    pub blocks: &'a [Block],
    /// The in-flight block and its display role
    pub moving: Option<(&'a MovingBlock, FlightRole)>,
    /// Show the miss label
    pub failed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_idle() {
        let state = GameState::new(7, 12);
        assert!(!state.running);
        assert!(state.stack.is_empty());
        assert!(state.moving.is_none());
        assert_eq!(state.score, 0);
        assert_eq!(state.best_score, 12);
    }

    #[test]
    fn test_start_seeds_base_block() {
        let mut state = GameState::new(7, 0);
        state.start(360.0, 540.0);

        assert!(state.running);
        assert_eq!(state.score, 0);
        assert_eq!(state.stack.len(), 1);

        let base = &state.stack[0];
        assert_eq!(base.center.x, 180.0);
        assert_eq!(base.center.y, 540.0 - BLOCK_H / 2.0 - BOTTOM_MARGIN);
        assert_eq!(base.width, BLOCK_W);
    }

    #[test]
    fn test_spawn_starts_at_an_edge() {
        let mut state = GameState::new(7, 0);
        state.start(360.0, 540.0);

        let moving = state.moving.expect("start spawns a block");
        assert!(moving.center.x == 0.0 || moving.center.x == 360.0);
        assert!(moving.speed.abs() >= SPEED_MIN && moving.speed.abs() < SPEED_MAX);
        // Leftward spawns fly left, rightward spawns fly right
        if moving.center.x == 0.0 {
            assert!(moving.speed > 0.0);
        } else {
            assert!(moving.speed < 0.0);
        }
    }

    #[test]
    fn test_spawn_row_height() {
        let mut state = GameState::new(7, 0);
        state.start(360.0, 540.0);

        let first_row = state.moving.unwrap().center.y;
        let base = state.stack[0];
        state.stack.push(base);
        state.spawn(BLOCK_W);
        let second_row = state.moving.unwrap().center.y;

        assert_eq!(first_row - second_row, BLOCK_H);
    }

    #[test]
    fn test_spawn_inherits_width() {
        let mut state = GameState::new(7, 0);
        state.start(360.0, 540.0);
        state.spawn(90.0);
        assert_eq!(state.moving.unwrap().width, 90.0);
    }

    #[test]
    fn test_set_viewport_keeps_run() {
        let mut state = GameState::new(7, 0);
        state.start(360.0, 540.0);
        state.score = 4;

        state.set_viewport(420.0, 644.0);
        assert!(state.running);
        assert_eq!(state.score, 4);
        assert_eq!(state.stack.len(), 1);
        assert_eq!(state.viewport.x, 420.0);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = GameState::new(99, 0);
        let mut b = GameState::new(99, 0);
        a.start(360.0, 540.0);
        b.start(360.0, 540.0);

        let (ma, mb) = (a.moving.unwrap(), b.moving.unwrap());
        assert_eq!(ma.center, mb.center);
        assert_eq!(ma.speed, mb.speed);
        assert_eq!(a.stack[0].color, b.stack[0].color);
    }

    #[test]
    fn test_score_line_format() {
        let mut state = GameState::new(7, 9);
        state.score = 3;
        assert_eq!(state.score_line(), "Score: 3  |  Best: 9");
    }

    #[test]
    fn test_color_token_wraps() {
        assert_eq!(ColorToken(0).css(), PALETTE[0]);
        assert_eq!(ColorToken(26).css(), PALETTE[0]);
    }
}
