//! Per-frame simulation step
//!
//! The shell calls [`tick`] once per animation frame; the simulation owns no
//! timer of its own. Input handlers only set flags on [`TickInput`], which
//! the shell clears after each tick.

use glam::Vec2;

use super::state::{Block, ConfettiSpec, GameEvent, GameState, PALETTE};
use crate::consts::*;

/// Input flags for a single frame (cleared by the shell after processing)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Drop the block in flight (click/tap)
    pub drop: bool,
    /// Restart after a miss; ignored while a run is active
    pub restart: bool,
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.restart && !state.running {
        let (w, h) = (state.viewport.x, state.viewport.y);
        state.start(w, h);
    }
    if input.drop {
        drop_block(state);
    }
    advance(state);
}

/// Move the in-flight block by its signed speed, bouncing off both edges
pub fn advance(state: &mut GameState) {
    if !state.running {
        return;
    }
    let w = state.viewport.x;
    if let Some(moving) = state.moving.as_mut() {
        moving.center.x += moving.speed;
        let half = moving.width / 2.0;
        if moving.center.x < half {
            moving.center.x = half;
            moving.speed = -moving.speed;
        }
        if moving.center.x > w - half {
            moving.center.x = w - half;
            moving.speed = -moving.speed;
        }
    }
}

/// Resolve a player drop: trim to the overlap with the stack top, or end the
/// run when there is none
pub fn drop_block(state: &mut GameState) {
    if !state.running {
        return;
    }
    let Some(moving) = state.moving else {
        return;
    };
    let Some(prev) = state.stack.last().copied() else {
        return;
    };

    let dx = (moving.center.x - prev.center.x).abs();
    let overlap = prev.width - dx;

    if overlap <= 0.0 {
        // Miss: freeze the block where it is and stop the run
        state.running = false;
        state.events.push(GameEvent::GameOver);
        return;
    }

    let support = prev.span();
    let mut width = prev.width;
    let mut perfect = false;
    let mut x = moving.center.x;

    if dx <= AUTO_SNAP_TOLERANCE {
        // Close enough to centered: snap exactly, no width loss
        x = prev.center.x;
        perfect = true;
    } else if dx > NEAR_CENTER_EPSILON {
        // Trim to the intersection with the support
        width = overlap;
        x = support.clamp_center(x, width);
    } else {
        // Only reachable if AUTO_SNAP_TOLERANCE ever drops below
        // NEAR_CENTER_EPSILON; kept so scoring behavior survives retuning
        x = support.clamp_center(x, width);
        perfect = true;
    }

    let color = state.random_color();
    let placed = Block {
        center: Vec2::new(x, moving.center.y),
        width,
        color,
    };
    state.stack.push(placed);

    state.score += 1;
    if state.score > state.best_score {
        state.best_score = state.score;
        state.events.push(GameEvent::NewBestScore(state.best_score));
    }

    if perfect {
        state
            .events
            .push(GameEvent::PerfectPlacement(confetti_for(
                &placed,
                state.viewport.y,
            )));
    }

    state.spawn(width);
}

/// Confetti parameters for a perfect placement: a burst fanning out from the
/// placed block's lower edge, horizontally centered
fn confetti_for(placed: &Block, viewport_h: f32) -> ConfettiSpec {
    ConfettiSpec {
        particle_count: (40, 60),
        spread_degrees: (90.0, 120.0),
        origin: Vec2::new(0.5, (placed.center.y + BLOCK_H / 2.0) / viewport_h),
        palette: &PALETTE,
    }
}
