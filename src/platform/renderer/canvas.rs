use ab_glyph_rasterizer::{Rasterizer, point as rpoint};
use image::{Rgba, RgbaImage};

use crate::engine::color::Color;
use crate::engine::path::{Bounds, Path, Segment};

/// RGBA8 drawing surface. Everything is composited source-over.
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// A canvas filled with `background`
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        let Color(r, g, b, a) = background;
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba([r, g, b, a])),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let Rgba([r, g, b, a]) = *self.image.get_pixel(x, y);
        Color(r, g, b, a)
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Fills `path` (non-zero winding) with anti-aliased coverage
    pub fn fill_path(&mut self, path: &Path, color: Color) {
        let Some(area) = self.coverage(path) else {
            return;
        };
        let src = color.to_f32_array();
        area.for_each(|x, y, coverage| self.blend(x, y, src, coverage));
    }

    /// Copies `source` to (`x`, `y`), keeping only what lies inside `clip`
    pub fn draw_image_clipped(&mut self, source: &RgbaImage, x: i32, y: i32, clip: &Path) {
        let Some(area) = self.coverage(clip) else {
            return;
        };
        area.for_each(|cx, cy, coverage| {
            let (sx, sy) = (cx as i32 - x, cy as i32 - y);
            if sx < 0 || sy < 0 || sx >= source.width() as i32 || sy >= source.height() as i32 {
                return;
            }
            let Rgba([r, g, b, a]) = *source.get_pixel(sx as u32, sy as u32);
            self.blend(cx, cy, Color(r, g, b, a).to_f32_array(), coverage);
        });
    }

    /// Blends an 8-bit coverage mask (row-major, `width` wide) at (`left`, `top`)
    pub fn fill_mask(&mut self, left: i32, top: i32, width: usize, mask: &[u8], color: Color) {
        if width == 0 {
            return;
        }
        let src = color.to_f32_array();
        for (i, &value) in mask.iter().enumerate() {
            if value == 0 {
                continue;
            }
            let x = left + (i % width) as i32;
            let y = top + (i / width) as i32;
            if x < 0 || y < 0 || x >= self.width() as i32 || y >= self.height() as i32 {
                continue;
            }
            self.blend(x as u32, y as u32, src, value as f32 / 255.0);
        }
    }

    fn blend(&mut self, x: u32, y: u32, src: [f32; 4], coverage: f32) {
        let alpha = src[3] * coverage.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let px = self.image.get_pixel_mut(x, y);
        let dst = px.0.map(|c| c as f32 / 255.0);
        let out_a = alpha + dst[3] * (1.0 - alpha);
        let mut out = [0u8; 4];
        for c in 0..3 {
            let v = if out_a > 0.0 {
                (src[c] * alpha + dst[c] * dst[3] * (1.0 - alpha)) / out_a
            } else {
                0.0
            };
            out[c] = (v * 255.0).round().clamp(0.0, 255.0) as u8;
        }
        out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
        px.0 = out;
    }

    /// Rasterises `path` over the part of the canvas its bounds touch
    fn coverage(&self, path: &Path) -> Option<Coverage> {
        let Bounds { min, max } = path.bounds()?;
        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil().max(0.0) as u32).min(self.width());
        let y1 = (max.y.ceil().max(0.0) as u32).min(self.height());
        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        let (w, h) = (x1 - x0, y1 - y0);
        let mut rasterizer = Rasterizer::new(w as usize, h as usize);
        let (ox, oy) = (x0 as f32, y0 as f32);
        let p = |pt: crate::engine::path::Point| rpoint(pt.x - ox, pt.y - oy);
        for segment in path.segments() {
            match *segment {
                Segment::Line(a, b) => rasterizer.draw_line(p(a), p(b)),
                Segment::Quad(a, b, c) => rasterizer.draw_quad(p(a), p(b), p(c)),
                Segment::Cubic(a, b, c, d) => rasterizer.draw_cubic(p(a), p(b), p(c), p(d)),
            }
        }

        let mut values = vec![0.0f32; (w * h) as usize];
        rasterizer.for_each_pixel(|index, alpha| values[index] = alpha);
        Some(Coverage {
            x0,
            y0,
            width: w,
            values,
        })
    }
}

struct Coverage {
    x0: u32,
    y0: u32,
    width: u32,
    values: Vec<f32>,
}

impl Coverage {
    fn for_each(&self, mut f: impl FnMut(u32, u32, f32)) {
        for (i, &v) in self.values.iter().enumerate() {
            if v > 0.0 {
                let i = i as u32;
                f(self.x0 + i % self.width, self.y0 + i / self.width, v);
            }
        }
    }
}
