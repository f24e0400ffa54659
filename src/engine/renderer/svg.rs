use std::fmt::{self, Write};

use super::escape;
use crate::engine::icons::icon_element;
use crate::engine::renderer_model::{DrawCommand, Stroke};

/// Standalone SVG 1.1 document for a draw-command list.
///
/// `avatar` is a `data:` URI; without one the avatar command is drawn as
/// the initials disc.
pub fn render_svg(
    commands: &[DrawCommand],
    width: u32,
    height: u32,
    font_family: &str,
    avatar: Option<&str>,
) -> String {
    let mut out = String::new();
    // String への書き込みは失敗しない
    let _ = write_document(&mut out, commands, width, height, font_family, avatar);
    out
}

fn write_document(
    out: &mut String,
    commands: &[DrawCommand],
    width: u32,
    height: u32,
    font_family: &str,
    avatar: Option<&str>,
) -> fmt::Result {
    let family = sanitize_font_family(font_family);

    writeln!(out, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
    writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
viewBox=\"0 0 {width} {height}\" role=\"img\" aria-label=\"X post preview\">"
    )?;

    for command in commands {
        out.push_str("  ");
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
                let fill = fill.map(|c| c.to_hex()).unwrap_or_else(|| "none".into());
                write!(
                    out,
                    "<rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" rx=\"{radius}\" ry=\"{radius}\" fill=\"{fill}\""
                )?;
                if let Some(stroke) = stroke {
                    write_stroke(out, stroke)?;
                }
                writeln!(out, " />")?;
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
                let (cx, cy) = (x + r, y + r);
                match avatar {
                    Some(uri) => {
                        writeln!(
                            out,
                            "<defs><clipPath id=\"avatar-clip\"><circle cx=\"{cx}\" cy=\"{cy}\" r=\"{r}\" /></clipPath></defs>"
                        )?;
                        writeln!(
                            out,
                            "  <image href=\"{}\" x=\"{x}\" y=\"{y}\" width=\"{size}\" height=\"{size}\" \
clip-path=\"url(#avatar-clip)\" preserveAspectRatio=\"xMidYMid slice\" />",
                            escape(uri)
                        )?;
                    }
                    None => {
                        writeln!(
                            out,
                            "<circle cx=\"{cx}\" cy=\"{cy}\" r=\"{r}\" fill=\"{}\" />",
                            background.to_hex()
                        )?;
                        writeln!(
                            out,
                            "  <text x=\"{cx}\" y=\"{cy}\" fill=\"{}\" font-family=\"{family}\" font-size=\"28\" \
font-weight=\"700\" text-anchor=\"middle\" dominant-baseline=\"central\">{}</text>",
                            foreground.to_hex(),
                            escape(initials)
                        )?;
                    }
                }
            }
            DrawCommand::DrawText {
                x,
                y,
                text,
                role,
                color,
            } => {
                write!(
                    out,
                    "<text x=\"{x}\" y=\"{y}\" fill=\"{}\" font-family=\"{family}\" font-size=\"{}\"",
                    color.to_hex(),
                    role.size()
                )?;
                if role.weight() != 400 {
                    write!(out, " font-weight=\"{}\"", role.weight())?;
                }
                writeln!(out, ">{}</text>", escape(text))?;
            }
            DrawCommand::DrawIcon {
                icon,
                x,
                y,
                size,
                color,
            } => {
                writeln!(out, "{}", icon_element(*icon, *x, *y, *size, &color.to_hex()))?;
            }
            DrawCommand::DrawLine {
                x1,
                y1,
                x2,
                y2,
                stroke,
            } => {
                write!(out, "<line x1=\"{x1}\" y1=\"{y1}\" x2=\"{x2}\" y2=\"{y2}\"")?;
                write_stroke(out, stroke)?;
                writeln!(out, " />")?;
            }
        }
    }

    writeln!(out, "</svg>")
}

fn write_stroke(out: &mut String, stroke: &Stroke) -> fmt::Result {
    write!(
        out,
        " stroke=\"{}\" stroke-width=\"{}\"",
        stroke.color.to_hex(),
        stroke.width
    )
}

/// Attribute-safe font-family list: double quotes become single quotes,
/// markup characters are escaped. Blank falls back to `sans-serif`.
pub fn sanitize_font_family(family: &str) -> String {
    if family.trim().is_empty() {
        return "sans-serif".to_string();
    }
    family
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::content::{ContentRecord, initials};
    use crate::engine::layouter::compute_layout;
    use crate::engine::options::{RenderOptions, Theme};
    use crate::engine::renderer_model::generate_draw_commands;
    use crate::engine::text::FontSet;

    fn svg_for(content: &ContentRecord, avatar: Option<&str>) -> String {
        let opts = RenderOptions::default();
        let layout = compute_layout(content, &opts, &FontSet::fallback());
        let palette = Theme::light().palette().unwrap();
        let commands = generate_draw_commands(&layout, &palette, &initials(&content.name));
        render_svg(&commands, layout.width, layout.height, &opts.font_family, avatar)
    }

    #[test]
    fn document_header_and_sizes() {
        let svg = svg_for(&ContentRecord::new("Hello", "Ann Lee", "annlee"), None);
        assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg "));
        assert!(svg.contains("width=\"960\" height=\"234\" viewBox=\"0 0 960 234\""));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(">@annlee</text>"));
        assert!(!svg.contains("currentColor"));
    }

    #[test]
    fn text_is_escaped() {
        let svg = svg_for(&ContentRecord::new("1 < 2 & \"quotes\"", "<b>", "h"), None);
        assert!(svg.contains(">1 &lt; 2 &amp; &#34;quotes&#34;</text>"));
        assert!(svg.contains(">&lt;b&gt;</text>"));
        assert!(!svg.contains("<b>"));
    }

    #[test]
    fn initials_disc_without_avatar() {
        let svg = svg_for(&ContentRecord::new("Hello", "Ann Lee", "annlee"), None);
        assert!(svg.contains("<circle cx=\"64\" cy=\"64\" r=\"32\" fill=\"#D1D9DE\" />"));
        assert!(svg.contains("dominant-baseline=\"central\">AL</text>"));
        assert!(!svg.contains("<image"));
    }

    #[test]
    fn avatar_is_embedded_and_clipped() {
        let uri = "data:image/png;base64,iVBORw0KGgo=";
        let svg = svg_for(&ContentRecord::new("Hello", "Ann Lee", "annlee"), Some(uri));
        assert!(svg.contains("<clipPath id=\"avatar-clip\">"));
        assert!(svg.contains(&format!("<image href=\"{uri}\" x=\"32\" y=\"32\"")));
        assert!(!svg.contains(">AL</text>"));
    }

    #[test]
    fn font_family_uses_single_quotes() {
        assert_eq!(sanitize_font_family("\"Noto Sans JP\", sans-serif"), "'Noto Sans JP', sans-serif");
        assert_eq!(sanitize_font_family(""), "sans-serif");
        let svg = svg_for(&ContentRecord::new("Hello", "Ann Lee", "annlee"), None);
        assert!(svg.contains("font-family=\"'Helvetica Neue', "));
    }

    #[test]
    fn bold_roles_carry_weight() {
        let mut content = ContentRecord::new("Hello", "Ann Lee", "annlee");
        content.cta = Some("Explore".into());
        let svg = svg_for(&content, None);
        assert!(svg.contains("font-size=\"28\" font-weight=\"700\">Ann Lee</text>"));
        assert!(svg.contains("font-size=\"20\" font-weight=\"600\">Explore</text>"));
        assert!(svg.contains("font-size=\"22\">@annlee</text>"));
    }
}
