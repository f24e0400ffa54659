use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fontdue::Font as FontDue;
use log::debug;

use crate::engine::options::RenderOptions;
use crate::engine::text::FontSet;
use crate::error::{Error, Result};
use crate::platform::font::{FontCandidates, system_font_candidates};
use crate::platform::renderer::text_measurer::FontFace;

pub const FONT_ENV: &str = "XPOSTGEN_FONT";
pub const BOLD_FONT_ENV: &str = "XPOSTGEN_FONT_BOLD";

const BUILTIN_REGULAR: &[u8] = include_bytes!("../../../../assets/fonts/DejaVuSans.ttf");
const BUILTIN_BOLD: &[u8] = include_bytes!("../../../../assets/fonts/DejaVuSans-Bold.ttf");

/// Faces compiled into the binary (DejaVu Sans)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinFace {
    Regular,
    Bold,
}

impl BuiltinFace {
    pub fn bytes(self) -> &'static [u8] {
        match self {
            BuiltinFace::Regular => BUILTIN_REGULAR,
            BuiltinFace::Bold => BUILTIN_BOLD,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BuiltinFace::Regular => "DejaVu Sans",
            BuiltinFace::Bold => "DejaVu Sans Bold",
        }
    }
}

/// Where one face comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontOrigin {
    File(PathBuf),
    Builtin(BuiltinFace),
}

impl fmt::Display for FontOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontOrigin::File(path) => write!(f, "{}", path.display()),
            FontOrigin::Builtin(face) => write!(f, "builtin {}", face.name()),
        }
    }
}

/// Origins of the regular and bold faces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSource {
    pub regular: FontOrigin,
    pub bold: FontOrigin,
}

/// Options → 環境変数 → システムフォント → 内蔵フォント の順で決める
pub fn resolve_font_source(opts: &RenderOptions) -> FontSource {
    resolve_with(opts, |key| std::env::var(key).ok(), &system_font_candidates())
}

fn resolve_with(
    opts: &RenderOptions,
    env: impl Fn(&str) -> Option<String>,
    system: &FontCandidates,
) -> FontSource {
    let env_path = |key: &str| {
        env(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    };

    let explicit = opts.font_path.clone().or_else(|| env_path(FONT_ENV));
    // bold 未指定なら明示された regular を流用する
    let explicit_bold = opts
        .bold_font_path
        .clone()
        .or_else(|| env_path(BOLD_FONT_ENV))
        .or_else(|| explicit.clone());

    let regular = match (&explicit, system.first_regular()) {
        (Some(path), _) => FontOrigin::File(path.clone()),
        (None, Some(path)) => FontOrigin::File(path.clone()),
        (None, None) => FontOrigin::Builtin(BuiltinFace::Regular),
    };

    let bold = match (explicit_bold, &regular) {
        (Some(path), _) => FontOrigin::File(path),
        (None, FontOrigin::Builtin(_)) => FontOrigin::Builtin(BuiltinFace::Bold),
        (None, FontOrigin::File(path)) => {
            FontOrigin::File(system.first_bold().cloned().unwrap_or_else(|| path.clone()))
        }
    };

    FontSource { regular, bold }
}

/// Reads and parses one outline font (TrueType / OpenType, first face of a collection)
pub fn load_font(path: &Path) -> Result<FontDue> {
    let bytes = std::fs::read(path)
        .map_err(|e| Error::InvalidFont(format!("failed to read {}: {e}", path.display())))?;
    FontDue::from_bytes(bytes, fontdue::FontSettings::default())
        .map_err(|e| Error::InvalidFont(format!("failed to parse {}: {e}", path.display())))
}

pub fn load_builtin_font(face: BuiltinFace) -> Result<FontDue> {
    FontDue::from_bytes(face.bytes(), fontdue::FontSettings::default())
        .map_err(|e| Error::InvalidFont(format!("failed to parse {}: {e}", face.name())))
}

fn load_origin(origin: &FontOrigin) -> Result<FontDue> {
    match origin {
        FontOrigin::File(path) => load_font(path),
        FontOrigin::Builtin(face) => load_builtin_font(*face),
    }
}

/// One face per role, sized and weighted per role.
///
/// The returned set owns the parsed fonts; dropping it releases them.
pub fn load_fonts(opts: &RenderOptions) -> Result<FontSet<FontFace>> {
    load_font_source(&resolve_font_source(opts))
}

pub fn load_font_source(source: &FontSource) -> Result<FontSet<FontFace>> {
    debug!("fonts: regular={} bold={}", source.regular, source.bold);

    let regular = Arc::new(load_origin(&source.regular)?);
    let bold = if source.bold == source.regular {
        regular.clone()
    } else {
        Arc::new(load_origin(&source.bold)?)
    };

    FontSet::try_build(|role| {
        let font = if role.is_bold() { &bold } else { &regular };
        Ok(FontFace::new(font.clone(), role.size()))
    })
}
