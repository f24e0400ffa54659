use crate::engine::color::Color;
use crate::engine::text::{FontMetrics, char_positions, measure};
use crate::platform::renderer::canvas::Canvas;
use crate::platform::renderer::text_measurer::FontFace;

/// Draws `text` with its baseline at `baseline`, starting at `x`.
///
/// Glyph origins come from the same measurement the layout used, so a run
/// ends exactly where `measure` says it does. Characters the font has no
/// glyph for leave a gap of their fallback width.
pub fn draw_text(canvas: &mut Canvas, face: &FontFace, text: &str, x: f32, baseline: f32, color: Color) {
    for (ch, origin) in char_positions(face, text) {
        if ch.is_whitespace() || !face.has_glyph(ch) {
            continue;
        }
        let (metrics, coverage) = face.font().rasterize(ch, face.size());
        if metrics.width == 0 || metrics.height == 0 {
            continue;
        }
        // ymin はベースラインから下端までの距離 (上向き正)
        let left = (x + origin).round() as i32 + metrics.xmin;
        let top = baseline.round() as i32 - (metrics.height as i32 + metrics.ymin);
        canvas.fill_mask(left, top, metrics.width, &coverage, color);
    }
}

/// Centers `text` on (`cx`, `cy`), vertically between ascent and descent
pub fn draw_text_centered(canvas: &mut Canvas, face: &FontFace, text: &str, cx: f32, cy: f32, color: Color) {
    let x = cx - measure(face, text) / 2.0;
    let baseline = cy + (face.ascent() + face.descent()) / 2.0;
    draw_text(canvas, face, text, x, baseline, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::platform::renderer::glyph::{BuiltinFace, load_builtin_font};

    fn face(size: f32) -> FontFace {
        let font = load_builtin_font(BuiltinFace::Regular).unwrap();
        FontFace::new(Arc::new(font), size)
    }

    fn inked(canvas: &Canvas, x0: u32, y0: u32, x1: u32, y1: u32) -> usize {
        let mut n = 0;
        for y in y0..y1 {
            for x in x0..x1 {
                if canvas.pixel(x, y) != Color::WHITE {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn glyphs_land_above_the_baseline() {
        let face = face(28.0);
        let mut canvas = Canvas::new(200, 80, Color::WHITE);
        draw_text(&mut canvas, &face, "Hxxl", 10.0, 50.0, Color::BLACK);

        let above = inked(&canvas, 0, 0, 200, 50);
        let far_below = inked(&canvas, 0, 60, 200, 80);
        assert!(above > 0);
        assert_eq!(far_below, 0);
        // 計測幅より右には描かない
        let right = (10.0 + measure(&face, "Hxxl")).ceil() as u32 + 2;
        assert_eq!(inked(&canvas, right, 0, 200, 80), 0);
    }

    #[test]
    fn centered_text_is_balanced() {
        let face = face(28.0);
        let mut canvas = Canvas::new(100, 100, Color::WHITE);
        draw_text_centered(&mut canvas, &face, "HH", 50.0, 50.0, Color::BLACK);
        let left = inked(&canvas, 0, 0, 50, 100);
        let right = inked(&canvas, 50, 0, 100, 100);
        assert!(left > 0 && right > 0);
        assert_eq!(inked(&canvas, 0, 0, 100, 25), 0);
    }

    #[test]
    fn missing_glyphs_draw_nothing() {
        let face = face(20.0);
        let mut canvas = Canvas::new(60, 40, Color::WHITE);
        draw_text(&mut canvas, &face, "\u{10FFFD} ", 5.0, 30.0, Color::BLACK);
        assert_eq!(inked(&canvas, 0, 0, 60, 40), 0);
    }
}
