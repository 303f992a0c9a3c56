pub mod context;

pub use context::{Color, DrawCall, OverlayCanvas, RecordingCanvas};
