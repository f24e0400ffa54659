//! Card layout.
//!
//! `compute_layout` turns a content record, options and a font set into a
//! [`Layout`]: every absolute coordinate, every wrapped or truncated line,
//! and the final canvas size. It is a pure function of its inputs.
//!
//! Vertical order:
//!
//! ```text
//! padding
//! header (avatar | name / handle)          corner mark
//! 16
//! body text (1.45 leading)
//! ── footer, skipped in compact mode ──
//! 16  date · location                      info icon
//! divider
//! 16  like  reply  copy link
//! 16  [ call to action ]
//! padding
//! ```

pub mod types;

pub use types::*;

use log::debug;

use crate::engine::content::ContentRecord;
use crate::engine::icons::IconName;
use crate::engine::options::{RenderOptions, WidthMode};
use crate::engine::text::{FontMetrics, FontSet, Segmenter, ellipsize, measure, wrap_text_with};

pub const CORNER_MARK_SIZE: f32 = 30.0;
pub const INFO_ICON_SIZE: f32 = 20.0;
pub const ACTION_ICON_SIZE: f32 = 22.0;
pub const CTA_HEIGHT: f32 = 44.0;
pub const VERIFIED_SIZE: f32 = 30.0;
pub const VERIFIED_GAP: f32 = 6.0;
/// Floor of the tight-mode canvas width
pub const MIN_TIGHT_WIDTH: f32 = 600.0;

/// Badge allowance used when estimating the tight width
const VERIFIED_TIGHT_ALLOWANCE: f32 = 20.0;
/// Between an icon and the text next to it
const ICON_GAP: f32 = 8.0;
const ACTION_SPACING: f32 = 32.0;
const CTA_SIDE_ALLOWANCE: f32 = 40.0;
const HEADER_LINE_GAP: f32 = 4.0;
const SECTION_GAP: f32 = 16.0;
const TEXT_LEADING: f32 = 1.45;
/// Divider distance below the date baseline
const DIVIDER_OFFSET: f32 = 12.0;

/// [`compute_layout_with`] using the character-class segmenter
pub fn compute_layout<F: FontMetrics>(
    content: &ContentRecord,
    options: &RenderOptions,
    fonts: &FontSet<F>,
) -> Layout {
    compute_layout_with(content, options, fonts, &Segmenter::default())
}

pub fn compute_layout_with<F: FontMetrics>(
    content: &ContentRecord,
    options: &RenderOptions,
    fonts: &FontSet<F>,
    segmenter: &Segmenter,
) -> Layout {
    let opts = options.normalized();
    let padding = opts.padding as f32;
    let avatar_size = opts.avatar_size as f32;
    let gap = opts.gap as f32;

    let width = match opts.width_mode {
        WidthMode::Fixed => opts.width as f32,
        WidthMode::Tight => {
            let natural = tight_width(content, &opts, fonts);
            let width = clamp_tight_width(natural, opts.width);
            debug!("tight width: natural={natural} requested={} -> {width}", opts.width);
            width
        }
    };

    let text_x = padding + avatar_size + gap;

    // ヘッダーは右上のマーク分を空ける / 本文は右端の余白まで使う
    let header_available = (width - padding - text_x - CORNER_MARK_SIZE - ICON_GAP).max(1.0);
    let name_available = if content.verified {
        (header_available - VERIFIED_SIZE - VERIFIED_GAP).max(1.0)
    } else {
        header_available
    };
    let name_line = ellipsize(content.name.trim(), name_available, &fonts.name);
    let handle_line = ellipsize(&content.handle_line(), header_available, &fonts.handle);

    let text_available = (width - padding - text_x).max(1.0);
    let lines = wrap_text_with(segmenter, &content.text, text_available, &fonts.text);

    let name_height = fonts.name.line_height();
    let handle_height = fonts.handle.line_height();
    let text_height = fonts.text.line_height();
    let text_line_height = text_height * TEXT_LEADING;

    let header_height = avatar_size.max(name_height + HEADER_LINE_GAP + handle_height);
    let name_y = padding + name_height;
    let handle_y = name_y + HEADER_LINE_GAP + handle_height;

    let verified = content.verified.then(|| IconPlacement {
        icon: IconName::Verified,
        x: text_x + measure(&fonts.name, &name_line) + VERIFIED_GAP,
        y: name_y - name_height + (name_height - VERIFIED_SIZE) / 2.0,
        size: VERIFIED_SIZE,
    });

    let text_block_height = match lines.len() {
        0 | 1 => text_height,
        n => (n - 1) as f32 * text_line_height + text_height,
    };
    let body_bottom = padding + header_height + SECTION_GAP + text_block_height;

    let (footer, bottom) = if content.simple {
        (None, body_bottom)
    } else {
        let (footer, bottom) = layout_footer(content, fonts, width, padding, text_x, text_available, body_bottom);
        (Some(footer), bottom)
    };

    Layout {
        width: width as u32,
        height: (bottom + padding).ceil() as u32,
        padding,
        avatar: AvatarPlacement {
            x: padding,
            y: padding,
            size: avatar_size,
        },
        header_gap: gap,
        name: TextRun {
            x: text_x,
            y: name_y,
            text: name_line,
        },
        handle: TextRun {
            x: text_x,
            y: handle_y,
            text: handle_line,
        },
        verified,
        corner_mark: IconPlacement {
            icon: IconName::TwitterMark,
            x: width - padding - CORNER_MARK_SIZE,
            y: padding,
            size: CORNER_MARK_SIZE,
        },
        body: TextBlock {
            x: text_x,
            y: padding + header_height + SECTION_GAP + text_height,
            line_height: text_line_height,
            lines,
        },
        footer,
    }
}

/// Lays out date row, divider, actions and CTA below `top`.
/// Returns the footer and the y where it ends.
fn layout_footer<F: FontMetrics>(
    content: &ContentRecord,
    fonts: &FontSet<F>,
    width: f32,
    padding: f32,
    text_x: f32,
    text_available: f32,
    top: f32,
) -> (FooterLayout, f32) {
    let meta_height = fonts.meta.line_height();
    let action_height = fonts.action.line_height();
    let cta_font_height = fonts.cta.line_height();

    let mut date_available = text_available - INFO_ICON_SIZE - ICON_GAP;
    if date_available < 1.0 {
        date_available = text_available;
    }
    let date_line = ellipsize(&content.date_line(), date_available, &fonts.meta);

    let mut cursor = top;
    let date = if date_line.is_empty() {
        cursor += SECTION_GAP;
        None
    } else {
        let row_height = meta_height.max(INFO_ICON_SIZE);
        let date_y = cursor + SECTION_GAP + (row_height - meta_height) / 2.0 + meta_height;
        cursor = date_y + DIVIDER_OFFSET;
        Some(DateRow {
            text: TextRun {
                x: text_x,
                y: date_y,
                text: date_line,
            },
            info: IconPlacement {
                icon: IconName::Info,
                x: width - padding - INFO_ICON_SIZE,
                y: date_y - meta_height / 2.0 - INFO_ICON_SIZE / 2.0,
                size: INFO_ICON_SIZE,
            },
        })
    };

    let divider = DividerLine {
        x1: padding,
        x2: width - padding,
        y: cursor,
    };

    let actions_top = cursor + SECTION_GAP;
    let row_height = action_height.max(ACTION_ICON_SIZE);
    let baseline = actions_top + (row_height - action_height) / 2.0 + action_height;
    cursor = actions_top + row_height;

    let mut x = padding;
    let actions = content
        .actions()
        .into_iter()
        .map(|(icon, label)| {
            let label_width = measure(&fonts.action, &label);
            let action = ActionLayout {
                icon: IconPlacement {
                    icon,
                    x,
                    y: baseline - action_height / 2.0 - ACTION_ICON_SIZE / 2.0,
                    size: ACTION_ICON_SIZE,
                },
                label: TextRun {
                    x: x + ACTION_ICON_SIZE + ICON_GAP,
                    y: baseline,
                    text: label,
                },
            };
            x += ACTION_ICON_SIZE + ICON_GAP + label_width + ACTION_SPACING;
            action
        })
        .collect();

    let cta = content.cta_label().map(|label| {
        let cta_width = width - padding * 2.0;
        let y = cursor + SECTION_GAP;
        let label_width = measure(&fonts.cta, label);
        cursor = y + CTA_HEIGHT;
        CtaLayout {
            x: padding,
            y,
            width: cta_width,
            height: CTA_HEIGHT,
            label: TextRun {
                x: padding + (cta_width - label_width) / 2.0,
                y: y + (CTA_HEIGHT + cta_font_height) / 2.0 - 2.0,
                text: label.to_string(),
            },
        }
    });

    (
        FooterLayout {
            date,
            divider,
            actions,
            cta,
        },
        cursor,
    )
}

/// Floors the natural width at [`MIN_TIGHT_WIDTH`]. The requested width
/// caps the result only when it is itself above the floor.
pub fn clamp_tight_width(natural: f32, requested: i32) -> f32 {
    let requested = requested as f32;
    let width = natural.max(MIN_TIGHT_WIDTH);
    if requested > MIN_TIGHT_WIDTH && width > requested {
        requested
    } else {
        width
    }
}

/// Narrowest canvas that fits every row on one line (explicit newlines
/// excepted), rounded up to a whole pixel. `opts` must be normalized.
pub fn tight_width<F: FontMetrics>(
    content: &ContentRecord,
    opts: &RenderOptions,
    fonts: &FontSet<F>,
) -> f32 {
    let padding = opts.padding as f32;
    let lead = padding + opts.avatar_size as f32 + opts.gap as f32;

    let mut name_width = measure(&fonts.name, content.name.trim());
    if content.verified {
        name_width += VERIFIED_TIGHT_ALLOWANCE + VERIFIED_GAP;
    }
    let handle_width = measure(&fonts.handle, &content.handle_line());
    let header_width =
        lead + name_width.max(handle_width) + CORNER_MARK_SIZE + ICON_GAP + padding;

    let text_width = content
        .text
        .split('\n')
        .map(|line| measure(&fonts.text, line))
        .fold(0.0, f32::max);
    let mut widest = header_width.max(lead + text_width + padding);

    if !content.simple {
        let date_line = content.date_line();
        if !date_line.is_empty() {
            let date_width = measure(&fonts.meta, &date_line);
            widest = widest.max(lead + date_width + ICON_GAP + INFO_ICON_SIZE + padding);
        }

        let actions = content.actions();
        let labels: f32 = actions
            .iter()
            .map(|(_, label)| ACTION_ICON_SIZE + ICON_GAP + measure(&fonts.action, label))
            .sum();
        let spacing = ACTION_SPACING * (actions.len() - 1) as f32;
        widest = widest.max(padding + labels + spacing + padding);

        if let Some(cta) = content.cta_label() {
            let cta_width = padding * 2.0 + measure(&fonts.cta, cta) + CTA_SIDE_ALLOWANCE;
            widest = widest.max(cta_width);
        }
    }

    widest.ceil()
}
