//! Outline fonts: loading per role, and glyph rasterisation onto a canvas.

pub mod fonts;
pub mod text;

pub use fonts::{
    BuiltinFace, FontOrigin, FontSource, load_builtin_font, load_font, load_font_source, load_fonts,
    resolve_font_source,
};
pub use text::{draw_text, draw_text_centered};
