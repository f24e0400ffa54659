//! Social-post preview cards.
//!
//! ```text
//! ContentRecord + RenderOptions
//!   → FontSet (platform)
//!   → Layout (engine::layouter)
//!   → DrawCommand list → PNG / JPEG / GIF / SVG
//!   → HTML document
//! ```
//!
//! The [`preview`] module is the entry point; `engine` and `platform` are
//! public for callers that want a single stage.

pub mod engine;
pub mod error;
pub mod platform;
pub mod preview;

pub use engine::content::ContentRecord;
pub use engine::layouter::{Layout, compute_layout, compute_layout_with};
pub use engine::options::{RenderOptions, Theme, WidthMode};
pub use error::{Error, Result};
pub use preview::{RenderFormat, RenderPayload, render_to_writer};
