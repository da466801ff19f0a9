//! Canvas2D rendering (wasm32 only)

pub mod canvas;

pub use canvas::CanvasRenderer;
