//! One render call per output family.
//!
//! Every call runs the same steps in order and stops at the first error:
//! validate content → normalize options → parse the theme → load fonts →
//! load the phrase model → layout → draw. The font set lives for the call only.

use image::RgbaImage;
use log::{debug, warn};

use crate::engine::content::{ContentRecord, initials};
use crate::engine::layouter::{Layout, compute_layout_with};
use crate::engine::options::{Palette, RenderOptions};
use crate::engine::renderer::html::{HtmlContext, render_html as html_document};
use crate::engine::renderer::svg::render_svg as svg_document;
use crate::engine::renderer_model::generate_draw_commands;
use crate::engine::text::{FontSet, Segmenter};
use crate::error::Result;
use crate::platform::io::{fetch_avatar, load_segmenter};
use crate::platform::renderer::glyph::load_fonts;
use crate::platform::renderer::{FontFace, paint, prepare_avatar};

/// Checked, normalized inputs with the fonts loaded
struct Prepared {
    opts: RenderOptions,
    palette: Palette,
    fonts: FontSet<FontFace>,
    segmenter: Segmenter,
    layout: Layout,
}

fn prepare(content: &ContentRecord, options: &RenderOptions) -> Result<Prepared> {
    content.validate()?;
    let opts = options.normalized();
    // 色はフォントより先に検証する
    let palette = opts.theme.palette()?;
    let fonts = load_fonts(&opts)?;
    let segmenter = load_segmenter(&opts)?;
    let layout = compute_layout_with(content, &opts, &fonts, &segmenter);
    debug!("layout {}x{}, {} body lines", layout.width, layout.height, layout.body.lines.len());
    Ok(Prepared {
        opts,
        palette,
        fonts,
        segmenter,
        layout,
    })
}

/// Avatar as a `data:` URI. A reference that cannot be fetched is an error.
fn avatar_data_uri(content: &ContentRecord) -> Result<Option<String>> {
    content
        .avatar_ref()
        .map(|reference| fetch_avatar(reference).map(|avatar| avatar.to_data_uri()))
        .transpose()
}

/// RGBA raster of the card. An avatar that cannot be fetched or decoded
/// falls back to the initials disc.
pub fn render_image(content: &ContentRecord, options: &RenderOptions) -> Result<RgbaImage> {
    let Prepared {
        palette,
        fonts,
        layout,
        ..
    } = prepare(content, options)?;

    let avatar = content.avatar_ref().and_then(|reference| {
        let size = layout.avatar.size.round() as u32;
        match fetch_avatar(reference).and_then(|data| prepare_avatar(&data.bytes, size)) {
            Ok(img) => Some(img),
            Err(e) => {
                warn!("avatar unavailable, drawing initials: {e}");
                None
            }
        }
    });

    let commands = generate_draw_commands(&layout, &palette, &initials(&content.name));
    Ok(paint(
        &commands,
        layout.width,
        layout.height,
        palette.background,
        &fonts,
        avatar.as_ref(),
    ))
}

/// Standalone SVG document
pub fn render_svg(content: &ContentRecord, options: &RenderOptions) -> Result<String> {
    let Prepared {
        opts,
        palette,
        layout,
        ..
    } = prepare(content, options)?;
    let avatar = avatar_data_uri(content)?;
    let commands = generate_draw_commands(&layout, &palette, &initials(&content.name));
    Ok(svg_document(
        &commands,
        layout.width,
        layout.height,
        &opts.font_family,
        avatar.as_deref(),
    ))
}

/// Standalone HTML document
pub fn render_html(content: &ContentRecord, options: &RenderOptions) -> Result<String> {
    let Prepared {
        opts,
        palette,
        segmenter,
        layout,
        ..
    } = prepare(content, options)?;
    let avatar = avatar_data_uri(content)?;
    Ok(html_document(
        content,
        &HtmlContext {
            layout: &layout,
            options: &opts,
            palette: &palette,
            avatar: avatar.as_deref(),
            segmenter: &segmenter,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::options::Theme;
    use crate::error::Error;

    fn invalid_theme() -> RenderOptions {
        RenderOptions {
            theme: Theme {
                accent: "12345".into(),
                ..Theme::light()
            },
            // 存在しないフォントでも色の検証が先に失敗する
            font_path: Some("/no/such/font.ttf".into()),
            ..Default::default()
        }
    }

    #[test]
    fn missing_fields_fail_before_anything_else() {
        let content = ContentRecord::new("Hello", "", "annlee");
        for result in [
            render_image(&content, &invalid_theme()).map(|_| ()),
            render_svg(&content, &invalid_theme()).map(|_| ()),
            render_html(&content, &invalid_theme()).map(|_| ()),
        ] {
            assert!(matches!(result, Err(Error::MissingRequiredField("name"))));
        }
    }

    #[test]
    fn bad_color_fails_before_fonts_load() {
        let content = ContentRecord::new("Hello", "Ann Lee", "annlee");
        assert!(matches!(
            render_image(&content, &invalid_theme()),
            Err(Error::InvalidColor(c)) if c == "12345"
        ));
        assert!(matches!(render_svg(&content, &invalid_theme()), Err(Error::InvalidColor(_))));
    }

    #[test]
    fn unreadable_font_is_invalid_font() {
        let content = ContentRecord::new("Hello", "Ann Lee", "annlee");
        let opts = RenderOptions {
            font_path: Some("/no/such/font.ttf".into()),
            ..Default::default()
        };
        assert!(matches!(render_svg(&content, &opts), Err(Error::InvalidFont(_))));
    }

    #[test]
    fn unreadable_segment_model_fails_every_family() {
        let content = ContentRecord::new("今日はいい天気", "Ann Lee", "annlee");
        let opts = RenderOptions {
            segment_model: Some("/no/such/ja.json".into()),
            ..Default::default()
        };
        assert!(matches!(render_image(&content, &opts), Err(Error::InvalidSegmentModel(_))));
        assert!(matches!(render_html(&content, &opts), Err(Error::InvalidSegmentModel(_))));
    }
}
