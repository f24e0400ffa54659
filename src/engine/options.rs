//! Render options and themes.
//!
//! Options are never rejected: `normalized()` repairs every non-positive
//! number or empty string with the default value. Theme colors are only
//! parsed when a palette is requested, and a malformed color is fatal.

use std::path::PathBuf;

use crate::engine::color::Color;
use crate::error::Result;

pub const DEFAULT_WIDTH: i32 = 960;
pub const DEFAULT_PADDING: i32 = 32;
pub const DEFAULT_AVATAR_SIZE: i32 = 64;
pub const DEFAULT_GAP: i32 = 16;
pub const DEFAULT_FONT_FAMILY: &str = "\"Helvetica Neue\", \"SF Pro Text\", \"SF Pro Display\", \"Segoe UI\", Roboto, \"Noto Sans JP\", Arial, sans-serif";

/// How the canvas width is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidthMode {
    /// Exactly the requested width
    #[default]
    Fixed,
    /// Shrink to the content, floored at the minimum card width
    Tight,
}

impl WidthMode {
    /// `tight` (any case) selects tight mode, everything else is fixed.
    pub fn from_name(name: &str) -> WidthMode {
        if name.trim().eq_ignore_ascii_case("tight") {
            WidthMode::Tight
        } else {
            WidthMode::Fixed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WidthMode::Fixed => "fixed",
            WidthMode::Tight => "tight",
        }
    }
}

/// Named color slots, each a hex string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub background: String,
    pub border: String,
    pub divider: String,
    pub text: String,
    pub muted: String,
    pub accent: String,
    pub avatar_bg: String,
    pub avatar_text: String,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            background: "#FFFFFF".into(),
            border: "#E1E8ED".into(),
            divider: "#E6ECF0".into(),
            text: "#0F1419".into(),
            muted: "#536471".into(),
            accent: "#1DA1F2".into(),
            avatar_bg: "#D1D9DE".into(),
            avatar_text: "#FFFFFF".into(),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: "#15202B".into(),
            border: "#253341".into(),
            divider: "#2F3B44".into(),
            text: "#E7E9EA".into(),
            muted: "#8B98A5".into(),
            accent: "#1DA1F2".into(),
            avatar_bg: "#3E5463".into(),
            avatar_text: "#FFFFFF".into(),
        }
    }

    /// `light` (or blank) / `dark`
    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "" | "light" => Some(Self::light()),
            "dark" => Some(Self::dark()),
            _ => None,
        }
    }

    /// Parses every slot. The first malformed slot fails the whole theme.
    pub fn palette(&self) -> Result<Palette> {
        Ok(Palette {
            background: Color::from_hex(&self.background)?,
            border: Color::from_hex(&self.border)?,
            divider: Color::from_hex(&self.divider)?,
            text: Color::from_hex(&self.text)?,
            muted: Color::from_hex(&self.muted)?,
            accent: Color::from_hex(&self.accent)?,
            avatar_bg: Color::from_hex(&self.avatar_bg)?,
            avatar_text: Color::from_hex(&self.avatar_text)?,
        })
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

/// Parsed theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub border: Color,
    pub divider: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub avatar_bg: Color,
    pub avatar_text: Color,
}

/// Caller-supplied sizing, fonts and theme
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub width: i32,
    pub width_mode: WidthMode,
    pub padding: i32,
    pub avatar_size: i32,
    /// Gap between the avatar and the header text
    pub gap: i32,
    /// Regular face (.ttf/.otf). `None` means environment / system lookup.
    pub font_path: Option<PathBuf>,
    /// Bold face. Falls back to `font_path` when only that is set.
    pub bold_font_path: Option<PathBuf>,
    /// CSS font-family used by the SVG and HTML outputs
    pub font_family: String,
    pub theme: Theme,
    /// Phrase-break model (BudouX JSON). `None` means environment, then the built-in scorer.
    pub segment_model: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            width_mode: WidthMode::Fixed,
            padding: DEFAULT_PADDING,
            avatar_size: DEFAULT_AVATAR_SIZE,
            gap: DEFAULT_GAP,
            font_path: None,
            bold_font_path: None,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            theme: Theme::light(),
            segment_model: None,
        }
    }
}

impl RenderOptions {
    /// Total repair: non-positive numbers and empty strings take the default.
    /// A theme with an empty background is replaced as a whole.
    pub fn normalized(&self) -> RenderOptions {
        let mut opts = self.clone();
        if opts.width <= 0 {
            opts.width = DEFAULT_WIDTH;
        }
        if opts.padding <= 0 {
            opts.padding = DEFAULT_PADDING;
        }
        if opts.avatar_size <= 0 {
            opts.avatar_size = DEFAULT_AVATAR_SIZE;
        }
        if opts.gap <= 0 {
            opts.gap = DEFAULT_GAP;
        }
        if opts.font_family.trim().is_empty() {
            opts.font_family = DEFAULT_FONT_FAMILY.to_string();
        }
        if opts.font_path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            opts.font_path = None;
        }
        if opts
            .bold_font_path
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            opts.bold_font_path = None;
        }
        if opts.segment_model.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            opts.segment_model = None;
        }
        if opts.theme.background.trim().is_empty() {
            opts.theme = Theme::default();
        }
        opts
    }
}
