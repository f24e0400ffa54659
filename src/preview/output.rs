use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use log::debug;

use crate::engine::content::ContentRecord;
use crate::engine::options::RenderOptions;
use crate::error::{Error, Result};
use crate::platform::renderer::{RasterFormat, encode_image};
use crate::preview::render::{render_html, render_image, render_svg};

/// Output encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderFormat {
    #[default]
    Png,
    Jpeg,
    Gif,
    Svg,
    Html,
}

impl RenderFormat {
    pub const ALL: [RenderFormat; 5] = [
        RenderFormat::Png,
        RenderFormat::Jpeg,
        RenderFormat::Gif,
        RenderFormat::Svg,
        RenderFormat::Html,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RenderFormat::Png => "png",
            RenderFormat::Jpeg => "jpeg",
            RenderFormat::Gif => "gif",
            RenderFormat::Svg => "svg",
            RenderFormat::Html => "html",
        }
    }

    /// Format implied by the file extension, if it names one
    pub fn from_path(path: &Path) -> Option<RenderFormat> {
        path.extension()?.to_str()?.parse().ok()
    }

    /// Encoder for the pixel formats, `None` for markup
    pub fn raster(&self) -> Option<RasterFormat> {
        match self {
            RenderFormat::Png => Some(RasterFormat::Png),
            RenderFormat::Jpeg => Some(RasterFormat::Jpeg),
            RenderFormat::Gif => Some(RasterFormat::Gif),
            RenderFormat::Svg | RenderFormat::Html => None,
        }
    }
}

impl FromStr for RenderFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(RenderFormat::Png),
            "jpg" | "jpeg" => Ok(RenderFormat::Jpeg),
            "gif" => Ok(RenderFormat::Gif),
            "svg" => Ok(RenderFormat::Svg),
            "html" | "htm" => Ok(RenderFormat::Html),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders the card in `format` and writes it to `writer`
pub fn render_to_writer<W: Write>(
    mut writer: W,
    content: &ContentRecord,
    options: &RenderOptions,
    format: RenderFormat,
) -> Result<()> {
    debug!("rendering {format}");
    match format.raster() {
        Some(raster) => {
            let img = render_image(content, options)?;
            encode_image(&mut writer, &img, raster)?;
        }
        None => {
            let markup = match format {
                RenderFormat::Svg => render_svg(content, options)?,
                _ => render_html(content, options)?,
            };
            writer.write_all(markup.as_bytes())?;
        }
    }
    writer.flush()?;
    Ok(())
}
