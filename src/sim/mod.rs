//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Driven externally, one tick per animation frame
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod span;
pub mod state;
pub mod tick;

pub use span::Span;
pub use state::{
    Block, ColorToken, ConfettiSpec, FlightRole, GameEvent, GameState, MovingBlock, Scene,
    PALETTE,
};
pub use tick::{advance, drop_block, tick, TickInput};
