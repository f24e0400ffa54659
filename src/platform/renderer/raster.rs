use image::RgbaImage;
use log::warn;

use crate::engine::color::Color;
use crate::engine::icons::{ICON_VIEWBOX, IconName};
use crate::engine::path::Path;
use crate::engine::renderer_model::{DrawCommand, Stroke};
use crate::engine::text::FontSet;
use crate::platform::renderer::canvas::Canvas;
use crate::platform::renderer::glyph::{draw_text, draw_text_centered};
use crate::platform::renderer::text_measurer::FontFace;

/// Paints `commands` in order onto a `width`×`height` canvas cleared to
/// `background`.
///
/// `avatar` must already be cropped and scaled to the avatar size; without
/// it the avatar command paints the initials disc.
pub fn paint(
    commands: &[DrawCommand],
    width: u32,
    height: u32,
    background: Color,
    fonts: &FontSet<FontFace>,
    avatar: Option<&RgbaImage>,
) -> RgbaImage {
    let mut canvas = Canvas::new(width, height, background);

    for command in commands {
        match command {
            DrawCommand::RoundedRect {
                x,
                y,
                width,
                height,
                radius,
                fill,
                stroke,
            } => {
                if let Some(fill) = fill {
                    canvas.fill_path(&Path::rounded_rect(*x, *y, *width, *height, *radius), *fill);
                }
                if let Some(Stroke { color, width: w }) = stroke {
                    let ring = Path::rounded_rect_outline(*x, *y, *width, *height, *radius, *w);
                    canvas.fill_path(&ring, *color);
                }
            }
            DrawCommand::Avatar {
                x,
                y,
                size,
                initials,
                background,
                foreground,
            } => {
                let r = size / 2.0;
                let disc = Path::circle(x + r, y + r, r);
                match avatar {
                    Some(image) => {
                        canvas.draw_image_clipped(image, x.round() as i32, y.round() as i32, &disc)
                    }
                    None => {
                        canvas.fill_path(&disc, *background);
                        draw_text_centered(&mut canvas, &fonts.initials, initials, x + r, y + r, *foreground);
                    }
                }
            }
            DrawCommand::DrawText {
                x,
                y,
                text,
                role,
                color,
            } => draw_text(&mut canvas, fonts.get(*role), text, *x, *y, *color),
            DrawCommand::DrawIcon {
                icon,
                x,
                y,
                size,
                color,
            } => paint_icon(&mut canvas, *icon, *x, *y, *size, *color),
            DrawCommand::DrawLine {
                x1,
                y1,
                x2,
                y2,
                stroke,
            } => canvas.fill_path(&Path::line(*x1, *y1, *x2, *y2, stroke.width), stroke.color),
        }
    }

    canvas.into_image()
}

fn paint_icon(canvas: &mut Canvas, icon: IconName, x: f32, y: f32, size: f32, color: Color) {
    match icon.outline() {
        Ok(outline) => canvas.fill_path(&outline.transformed(size / ICON_VIEWBOX, x, y), color),
        // 壊れたアイコンは描かずに続行
        Err(e) => warn!("skipping icon {icon}: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::engine::content::{ContentRecord, initials};
    use crate::engine::layouter::compute_layout;
    use crate::engine::options::{RenderOptions, Theme};
    use crate::engine::renderer_model::generate_draw_commands;
    use crate::platform::renderer::glyph::{BuiltinFace, load_builtin_font};

    fn fonts() -> FontSet<FontFace> {
        let font = Arc::new(load_builtin_font(BuiltinFace::Regular).unwrap());
        FontSet::try_build(|role| Ok::<_, ()>(FontFace::new(font.clone(), role.size()))).unwrap()
    }

    fn render(content: &ContentRecord, avatar: Option<&RgbaImage>) -> RgbaImage {
        let fonts = fonts();
        let opts = RenderOptions::default();
        let layout = compute_layout(content, &opts, &fonts);
        let palette = Theme::light().palette().unwrap();
        let commands = generate_draw_commands(&layout, &palette, &initials(&content.name));
        paint(&commands, layout.width, layout.height, palette.background, &fonts, avatar)
    }

    #[test]
    fn paints_the_card() {
        let content = ContentRecord::new("Hello", "Ann Lee", "annlee");
        let img = render(&content, None);
        assert_eq!(img.width(), 960);
        // 背景色
        assert_eq!(img.get_pixel(480, 20).0, [255, 255, 255, 255]);
        // イニシャル円の左端、文字より外側は avatar_bg
        assert_eq!(img.get_pixel(37, 64).0, [0xD1, 0xD9, 0xDE, 255]);
    }

    #[test]
    fn avatar_image_fills_the_disc() {
        let content = ContentRecord::new("Hello", "Ann Lee", "annlee");
        let avatar = RgbaImage::from_pixel(64, 64, image::Rgba([0, 200, 0, 255]));
        let img = render(&content, Some(&avatar));
        assert_eq!(img.get_pixel(64, 64).0, [0, 200, 0, 255]);
        // 円の外側の角は背景のまま
        assert_eq!(img.get_pixel(33, 33).0, [255, 255, 255, 255]);
    }

    #[test]
    fn icons_are_filled_with_their_color() {
        let mut canvas = Canvas::new(40, 40, Color::WHITE);
        let accent = Color::from_hex("#1DA1F2").unwrap();
        paint_icon(&mut canvas, IconName::Info, 0.0, 0.0, 40.0, accent);
        // info の外周リングの左端
        assert_eq!(canvas.pixel(4, 20), accent);
        // 中の空白
        assert_eq!(canvas.pixel(10, 20), Color::WHITE);
    }
}
