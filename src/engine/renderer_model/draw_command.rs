use crate::engine::color::Color;
use crate::engine::icons::IconName;
use crate::engine::layouter::{IconPlacement, Layout, TextRun};
use crate::engine::options::Palette;
use crate::engine::text::FontRole;

/// Backend-neutral paint operations, in painting order.
///
/// Text positions are baselines; icon and shape positions are top-left.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    RoundedRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    /// Avatar disc. Backends draw the fetched image when they have one,
    /// otherwise `background` with centered `initials`.
    Avatar {
        x: f32,
        y: f32,
        size: f32,
        initials: String,
        background: Color,
        foreground: Color,
    },
    DrawText {
        x: f32,
        y: f32,
        text: String,
        role: FontRole,
        color: Color,
    },
    DrawIcon {
        icon: IconName,
        x: f32,
        y: f32,
        size: f32,
        color: Color,
    },
    DrawLine {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Stroke,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

const CARD_BORDER_WIDTH: f32 = 2.0;
const HAIRLINE: f32 = 1.0;

/// Card corner radius for a canvas of `height`
pub fn corner_radius(height: u32) -> f32 {
    (height as f32 / 12.0).min(20.0)
}

/// Layout + Palette → DrawCommand
pub fn generate_draw_commands(layout: &Layout, palette: &Palette, initials: &str) -> Vec<DrawCommand> {
    let mut commands = Vec::new();

    // 枠線の半分が切れないよう 1px 内側に描く
    commands.push(DrawCommand::RoundedRect {
        x: 1.0,
        y: 1.0,
        width: layout.width as f32 - 2.0,
        height: layout.height as f32 - 2.0,
        radius: corner_radius(layout.height),
        fill: Some(palette.background),
        stroke: Some(Stroke {
            color: palette.border,
            width: CARD_BORDER_WIDTH,
        }),
    });

    commands.push(DrawCommand::Avatar {
        x: layout.avatar.x,
        y: layout.avatar.y,
        size: layout.avatar.size,
        initials: initials.to_string(),
        background: palette.avatar_bg,
        foreground: palette.avatar_text,
    });

    commands.push(text(&layout.name, FontRole::Name, palette.text));
    if let Some(badge) = &layout.verified {
        commands.push(icon(badge, palette.accent));
    }
    commands.push(text(&layout.handle, FontRole::Handle, palette.muted));

    let body = &layout.body;
    for (i, line) in body.lines.iter().enumerate() {
        commands.push(DrawCommand::DrawText {
            x: body.x,
            y: body.y + i as f32 * body.line_height,
            text: line.clone(),
            role: FontRole::Text,
            color: palette.text,
        });
    }

    if let Some(footer) = &layout.footer {
        if let Some(date) = &footer.date {
            commands.push(text(&date.text, FontRole::Meta, palette.muted));
            commands.push(icon(&date.info, palette.muted));
        }

        commands.push(DrawCommand::DrawLine {
            x1: footer.divider.x1,
            y1: footer.divider.y,
            x2: footer.divider.x2,
            y2: footer.divider.y,
            stroke: Stroke {
                color: palette.divider,
                width: HAIRLINE,
            },
        });

        for action in &footer.actions {
            commands.push(icon(&action.icon, palette.muted));
            commands.push(text(&action.label, FontRole::Action, palette.muted));
        }

        if let Some(cta) = &footer.cta {
            commands.push(DrawCommand::RoundedRect {
                x: cta.x,
                y: cta.y,
                width: cta.width,
                height: cta.height,
                radius: cta.height / 2.0,
                fill: Some(palette.background),
                stroke: Some(Stroke {
                    color: palette.divider,
                    width: HAIRLINE,
                }),
            });
            commands.push(text(&cta.label, FontRole::Cta, palette.accent));
        }
    }

    commands.push(icon(&layout.corner_mark, palette.accent));

    commands
}

fn text(run: &TextRun, role: FontRole, color: Color) -> DrawCommand {
    DrawCommand::DrawText {
        x: run.x,
        y: run.y,
        text: run.text.clone(),
        role,
        color,
    }
}

fn icon(placement: &IconPlacement, color: Color) -> DrawCommand {
    DrawCommand::DrawIcon {
        icon: placement.icon,
        x: placement.x,
        y: placement.y,
        size: placement.size,
        color,
    }
}
