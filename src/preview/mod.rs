//! Entry points: render a [`ContentRecord`](crate::ContentRecord) to bytes.

pub mod output;
pub mod payload;
pub mod render;

pub use output::{RenderFormat, render_to_writer};
pub use payload::RenderPayload;
pub use render::{render_html, render_image, render_svg};
