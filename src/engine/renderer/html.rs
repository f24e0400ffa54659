use std::fmt::{self, Write};

use super::escape;
use crate::engine::content::{ContentRecord, initials};
use crate::engine::icons::{IconName, icon_markup};
use crate::engine::layouter::Layout;
use crate::engine::options::{Palette, RenderOptions};
use crate::engine::text::{Segmenter, contains_cjk};

/// Inputs of the HTML document besides the content itself
pub struct HtmlContext<'a> {
    pub layout: &'a Layout,
    /// Normalized options
    pub options: &'a RenderOptions,
    pub palette: &'a Palette,
    /// `data:` URI of the avatar image
    pub avatar: Option<&'a str>,
    pub segmenter: &'a Segmenter,
}

/// Standalone HTML document. The browser does the line breaking, so only
/// the card width comes from the layout.
pub fn render_html(content: &ContentRecord, ctx: &HtmlContext<'_>) -> String {
    let mut out = String::new();
    // String への書き込みは失敗しない
    let _ = write_document(&mut out, content, ctx);
    out
}

fn write_document(out: &mut String, content: &ContentRecord, ctx: &HtmlContext<'_>) -> fmt::Result {
    let p = ctx.palette;
    let opts = ctx.options;

    out.push_str(HEAD_START);
    writeln!(out, "    :root {{")?;
    for (var, color) in [
        ("bg", p.background),
        ("border", p.border),
        ("divider", p.divider),
        ("text", p.text),
        ("muted", p.muted),
        ("accent", p.accent),
        ("avatar-bg", p.avatar_bg),
        ("avatar-text", p.avatar_text),
    ] {
        writeln!(out, "      --{var}: {};", color.to_hex())?;
    }
    writeln!(out, "    }}")?;
    writeln!(
        out,
        "    body {{ margin: 0; padding: 0; background: var(--bg); font-family: {}; color: var(--text); }}",
        css_font_family(&opts.font_family)
    )?;
    writeln!(
        out,
        "    .card {{ width: {}px; box-sizing: border-box; padding: {}px; border: 1.5px solid var(--border); border-radius: 20px; background: var(--bg); }}",
        ctx.layout.width, opts.padding
    )?;
    writeln!(out, "    .header-left {{ display: flex; gap: {}px; align-items: flex-start; }}", opts.gap)?;
    writeln!(
        out,
        "    .avatar {{ width: {0}px; height: {0}px; border-radius: 999px; background: var(--avatar-bg); color: var(--avatar-text); display: flex; align-items: center; justify-content: center; font-size: 28px; font-weight: 700; overflow: hidden; flex: none; }}",
        opts.avatar_size
    )?;
    out.push_str(STATIC_STYLES);
    out.push_str("  </style>\n</head>\n<body>\n  <div class=\"card\">\n");

    // header
    out.push_str("    <div class=\"header\">\n      <div class=\"header-left\">\n        <div class=\"avatar\">");
    match ctx.avatar {
        Some(uri) => write!(out, "<img src=\"{}\" alt=\"avatar\" />", escape(uri))?,
        None => out.push_str(&escape(&initials(&content.name))),
    }
    out.push_str("</div>\n        <div class=\"header-text\">\n          <div class=\"name-row\">");
    write!(out, "<div class=\"name\">{}</div>", escape(content.name.trim()))?;
    if content.verified {
        write!(out, "<div class=\"verified icon\">{}</div>", icon_markup(IconName::Verified))?;
    }
    writeln!(out, "</div>")?;
    writeln!(
        out,
        "          <div class=\"handle\">{}</div>\n        </div>\n      </div>",
        escape(&content.handle_line())
    )?;
    writeln!(
        out,
        "      <div class=\"twitter icon\">{}</div>\n    </div>",
        icon_markup(IconName::TwitterMark)
    )?;

    writeln!(
        out,
        "    <div class=\"text\">{}</div>",
        format_text(&content.text, ctx.segmenter)
    )?;

    if !content.simple {
        write_footer(out, content)?;
    }

    out.push_str("  </div>\n</body>\n</html>\n");
    Ok(())
}

fn write_footer(out: &mut String, content: &ContentRecord) -> fmt::Result {
    let date_line = content.date_line();
    if date_line.is_empty() {
        writeln!(out, "    <div class=\"divider\" style=\"margin-top: 16px;\"></div>")?;
    } else {
        writeln!(
            out,
            "    <div class=\"date-row\"><div>{}</div><div class=\"info\">{}</div></div>",
            escape(&date_line),
            icon_markup(IconName::Info)
        )?;
        writeln!(out, "    <div class=\"divider\"></div>")?;
    }

    writeln!(out, "    <div class=\"actions\">")?;
    for (icon, label) in content.actions() {
        writeln!(
            out,
            "      <div class=\"action icon\">{}<span>{}</span></div>",
            icon_markup(icon),
            escape(&label)
        )?;
    }
    writeln!(out, "    </div>")?;

    if let Some(cta) = content.cta_label() {
        writeln!(out, "    <div class=\"cta\">{}</div>", escape(cta))?;
    }
    Ok(())
}

/// Escaped body text with `<wbr>` at every phrase boundary of CJK lines.
/// Newlines are kept; the stylesheet preserves them.
pub fn format_text(text: &str, segmenter: &Segmenter) -> String {
    if text.trim().is_empty() {
        return escape(text);
    }
    text.split('\n')
        .map(|segment| {
            if !contains_cjk(segment) {
                return escape(segment);
            }
            segmenter
                .segment(segment)
                .into_iter()
                .map(escape)
                .collect::<Vec<_>>()
                .join("<wbr>")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drops characters that could close the declaration or the style element
fn css_font_family(family: &str) -> String {
    let cleaned: String = family
        .chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '<' | '>'))
        .collect();
    if cleaned.trim().is_empty() {
        "sans-serif".to_string()
    } else {
        cleaned
    }
}

const HEAD_START: &str = "<!doctype html>
<html lang=\"ja\">
<head>
  <meta charset=\"utf-8\" />
  <title>X Post Preview</title>
  <style>
";

const STATIC_STYLES: &str = "    .header { display: flex; align-items: flex-start; justify-content: space-between; }
    .avatar img { width: 100%; height: 100%; object-fit: cover; display: block; }
    .name-row { display: flex; align-items: center; gap: 6px; }
    .name { font-size: 28px; font-weight: 700; line-height: 1.2; }
    .verified { color: var(--accent); }
    .handle { font-size: 22px; color: var(--muted); margin-top: 4px; }
    .twitter { color: var(--accent); }
    .text { margin-top: 16px; font-size: 28px; line-height: 1.45; white-space: pre-wrap; word-break: keep-all; overflow-wrap: break-word; }
    .date-row { margin-top: 16px; display: flex; align-items: center; justify-content: space-between; color: var(--muted); font-size: 22px; }
    .divider { margin-top: 12px; border-top: 1px solid var(--divider); }
    .actions { margin-top: 14px; display: flex; gap: 32px; align-items: center; color: var(--muted); font-size: 20px; }
    .action { display: inline-flex; align-items: center; gap: 8px; }
    .icon svg { width: 22px; height: 22px; display: block; }
    .twitter svg { width: 30px; height: 30px; display: block; }
    .verified svg, .info svg { width: 20px; height: 20px; display: block; }
    .cta { margin-top: 16px; height: 44px; border-radius: 999px; border: 1px solid var(--divider); display: flex; align-items: center; justify-content: center; color: var(--accent); font-weight: 600; font-size: 20px; }
";
