use super::{FontMetrics, is_wide};

/// Fallback face.
///
/// Does not rely on any font engine: every narrow character advances
/// `size * 0.6`, wide characters report no glyph and therefore measure one
/// line height. Intended for tests and environments without font files.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackMetrics {
    size: f32,
}

impl FallbackMetrics {
    pub fn new(size: f32) -> Self {
        Self {
            size: size.max(1.0),
        }
    }
}

impl FontMetrics for FallbackMetrics {
    fn size(&self) -> f32 {
        self.size
    }

    fn advance(&self, ch: char) -> Option<f32> {
        if is_wide(ch) {
            None
        } else {
            Some(self.size * 6.0 / 10.0)
        }
    }

    fn kern(&self, _left: char, _right: char) -> f32 {
        0.0
    }

    fn line_height(&self) -> f32 {
        self.size * 12.0 / 10.0
    }

    fn ascent(&self) -> f32 {
        self.size * 8.0 / 10.0
    }

    fn descent(&self) -> f32 {
        -self.size * 2.0 / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::text::measure;

    #[test]
    fn heuristic_widths() {
        let face = FallbackMetrics::new(10.0);
        assert_eq!(measure(&face, "abc"), 18.0);
        assert_eq!(measure(&face, "あい"), 24.0);
        assert_eq!(face.line_height(), 12.0);
    }
}
