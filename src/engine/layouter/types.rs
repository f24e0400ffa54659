//! Computed card geometry.
//!
//! Plain data only. Every coordinate is absolute, in pixels, with the
//! origin at the top-left of the canvas. Text positions are baselines.

use crate::engine::icons::IconName;

// =========================
//          Layout
// =========================

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    pub padding: f32,
    pub avatar: AvatarPlacement,
    /// Gap between the avatar and the header text
    pub header_gap: f32,
    /// Display name, already ellipsized
    pub name: TextRun,
    /// `@handle`, already ellipsized
    pub handle: TextRun,
    pub verified: Option<IconPlacement>,
    /// Brand mark in the top-right corner
    pub corner_mark: IconPlacement,
    pub body: TextBlock,
    /// `None` in compact mode
    pub footer: Option<FooterLayout>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvatarPlacement {
    pub x: f32,
    pub y: f32,
    /// Diameter
    pub size: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f32,
    /// Baseline
    pub y: f32,
    pub text: String,
}

/// Square icon, top-left anchored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconPlacement {
    pub icon: IconName,
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

// =========================
//           Body
// =========================

#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub x: f32,
    /// Baseline of the first line
    pub y: f32,
    /// Baseline-to-baseline distance
    pub line_height: f32,
    pub lines: Vec<String>,
}

// =========================
//          Footer
// =========================

#[derive(Debug, Clone, PartialEq)]
pub struct FooterLayout {
    /// Absent when neither date nor location is set
    pub date: Option<DateRow>,
    pub divider: DividerLine,
    /// Always like, reply, link in this order
    pub actions: Vec<ActionLayout>,
    pub cta: Option<CtaLayout>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateRow {
    pub text: TextRun,
    pub info: IconPlacement,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DividerLine {
    pub x1: f32,
    pub x2: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionLayout {
    pub icon: IconPlacement,
    pub label: TextRun,
}

/// Pill-shaped call-to-action button
#[derive(Debug, Clone, PartialEq)]
pub struct CtaLayout {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontally centered label
    pub label: TextRun,
}
