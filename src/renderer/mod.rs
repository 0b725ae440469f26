//! Rendering data
//!
//! The game describes each frame as plain rectangles and text; drawing them
//! is the rendering collaborator's job.

pub mod frame;
pub mod scene;

pub use frame::{DrawRect, DrawText, Frame, RectKind, TextAlign};
pub use scene::{Diagnostics, build_frame};
