//! CPU rasteriser for draw-command lists.
//!
//! ```text
//! DrawCommand → Canvas (ab_glyph_rasterizer coverage, fontdue glyphs) → RgbaImage → encoder
//! ```

pub mod canvas;
pub mod glyph;
pub mod image;
pub mod raster;
pub mod text_measurer;

pub use canvas::Canvas;
pub use self::image::{RasterFormat, encode_image, prepare_avatar};
pub use raster::paint;
pub use text_measurer::FontFace;
