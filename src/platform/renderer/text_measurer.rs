use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use fontdue::{Font as FontDue, LineMetrics};

use crate::engine::text::FontMetrics;

/// One outline font at one pixel size.
///
/// Several faces share the parsed font through the `Arc`; each face keeps
/// its own advance cache, so a face is not meant to be shared between
/// threads.
pub struct FontFace {
    font: Arc<FontDue>,
    size: f32,
    line: LineMetrics,
    // 文字幅 cache
    advances: RefCell<HashMap<char, Option<f32>>>,
}

impl FontFace {
    pub fn new(font: Arc<FontDue>, size: f32) -> Self {
        let size = size.max(1.0);
        // 行メトリクスを持たないフォントは 1.2 倍で近似する
        let line = font
            .horizontal_line_metrics(size)
            .unwrap_or(LineMetrics {
                ascent: size * 0.8,
                descent: -size * 0.2,
                line_gap: size * 0.2,
                new_line_size: size * 1.2,
            });
        Self {
            font,
            size,
            line,
            advances: RefCell::new(HashMap::new()),
        }
    }

    pub fn font(&self) -> &FontDue {
        &self.font
    }

    pub fn has_glyph(&self, ch: char) -> bool {
        self.font.lookup_glyph_index(ch) != 0
    }
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("name", &self.font.name())
            .field("size", &self.size)
            .finish()
    }
}

impl FontMetrics for FontFace {
    fn size(&self) -> f32 {
        self.size
    }

    fn advance(&self, ch: char) -> Option<f32> {
        *self.advances.borrow_mut().entry(ch).or_insert_with(|| {
            // glyph index 0 は .notdef
            let index = self.font.lookup_glyph_index(ch);
            (index != 0).then(|| self.font.metrics_indexed(index, self.size).advance_width)
        })
    }

    fn kern(&self, left: char, right: char) -> f32 {
        self.font
            .horizontal_kern(left, right, self.size)
            .unwrap_or(0.0)
    }

    fn line_height(&self) -> f32 {
        self.line.new_line_size
    }

    fn ascent(&self) -> f32 {
        self.line.ascent
    }

    fn descent(&self) -> f32 {
        self.line.descent
    }
}
