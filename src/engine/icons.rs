//! Bundled icon set.
//!
//! Every icon is a single 24x24 path filled with `currentColor`. The same
//! path data feeds both the markup outputs and the raster painter.

use std::fmt;
use std::str::FromStr;

use crate::engine::path::{Path, PathError};
use crate::error::{Error, Result};

/// Side of the square the path data is authored in
pub const ICON_VIEWBOX: f32 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconName {
    TwitterMark,
    Verified,
    Reply,
    Like,
    Link,
    Info,
}

impl IconName {
    pub const ALL: [IconName; 6] = [
        IconName::TwitterMark,
        IconName::Verified,
        IconName::Reply,
        IconName::Like,
        IconName::Link,
        IconName::Info,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IconName::TwitterMark => "twitter",
            IconName::Verified => "verified",
            IconName::Reply => "reply",
            IconName::Like => "like",
            IconName::Link => "link",
            IconName::Info => "info",
        }
    }

    pub fn path_data(&self) -> &'static str {
        match self {
            IconName::TwitterMark => TWITTER,
            IconName::Verified => VERIFIED,
            IconName::Reply => REPLY,
            IconName::Like => LIKE,
            IconName::Link => LINK,
            IconName::Info => INFO,
        }
    }

    /// Parsed outline in the 24x24 icon space
    pub fn outline(&self) -> std::result::Result<Path, PathError> {
        Path::parse(self.path_data())
    }
}

impl fmt::Display for IconName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IconName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        IconName::ALL
            .into_iter()
            .find(|icon| icon.as_str() == s)
            .ok_or_else(|| Error::UnknownIcon(s.to_string()))
    }
}

const TWITTER: &str = "M23 3 L19.86 4.53 C18.5 2.6 12 2.9 12 7.53 L12 8.53 C8.3 8.6 4.8 6.8 3 4 \
C2 9 2.5 14.5 8 17 Q5 18.6 1 19 C10 24 21 19 21 7.5 L20.92 6.67 Q22.4 5.3 23 3 Z";

// 塗りつぶした円からチェックを逆回りで抜く
const VERIFIED: &str = "M12 2 C17.52 2 22 6.48 22 12 C22 17.52 17.52 22 12 22 \
C6.48 22 2 17.52 2 12 C2 6.48 6.48 2 12 2 Z \
M7 12.2 L10.6 15.8 L17 9.4 L15.6 8 L10.6 13 L8.4 10.8 Z";

const REPLY: &str = "M5 3 H19 C20.66 3 22 4.34 22 6 V14 C22 15.66 20.66 17 19 17 H11 L6 21 V17 H5 \
C3.34 17 2 15.66 2 14 V6 C2 4.34 3.34 3 5 3 Z \
M5.3 4.8 C4.47 4.8 3.8 5.47 3.8 6.3 V13.7 C3.8 14.53 4.47 15.2 5.3 15.2 H18.7 \
C19.53 15.2 20.2 14.53 20.2 13.7 V6.3 C20.2 5.47 19.53 4.8 18.7 4.8 Z";

const LIKE: &str = "M12 21.35 L10.55 20.03 C5.4 15.36 2 12.28 2 8.5 C2 5.42 4.42 3 7.5 3 \
C9.24 3 10.91 3.81 12 5.09 C13.09 3.81 14.76 3 16.5 3 C19.58 3 22 5.42 22 8.5 \
C22 12.28 18.6 15.36 13.45 20.04 Z \
M12 19.38 L13.16 18.332 C17.28 14.588 20 12.124 20 9.1 C20 6.636 18.064 4.7 15.6 4.7 \
C14.208 4.7 12.872 5.348 12 6.372 C11.128 5.348 9.792 4.7 8.4 4.7 C5.936 4.7 4 6.636 4 9.1 \
C4 12.124 6.72 14.588 10.84 18.324 Z";

const LINK: &str = "M6 7 H10 C12.76 7 15 9.24 15 12 C15 14.76 12.76 17 10 17 H6 \
C3.24 17 1 14.76 1 12 C1 9.24 3.24 7 6 7 Z \
M6 9 C4.34 9 3 10.34 3 12 C3 13.66 4.34 15 6 15 H10 C11.66 15 13 13.66 13 12 \
C13 10.34 11.66 9 10 9 Z \
M14 7 H18 C20.76 7 23 9.24 23 12 C23 14.76 20.76 17 18 17 H14 \
C11.24 17 9 14.76 9 12 C9 9.24 11.24 7 14 7 Z \
M14 9 C12.34 9 11 10.34 11 12 C11 13.66 12.34 15 14 15 H18 C19.66 15 21 13.66 21 12 \
C21 10.34 19.66 9 18 9 Z";

const INFO: &str = "M12 2 C17.52 2 22 6.48 22 12 C22 17.52 17.52 22 12 22 \
C6.48 22 2 17.52 2 12 C2 6.48 6.48 2 12 2 Z \
M12 3.5 C7.31 3.5 3.5 7.31 3.5 12 C3.5 16.69 7.31 20.5 12 20.5 \
C16.69 20.5 20.5 16.69 20.5 12 C20.5 7.31 16.69 3.5 12 3.5 Z \
M12 6.25 C12.69 6.25 13.25 6.81 13.25 7.5 C13.25 8.19 12.69 8.75 12 8.75 \
C11.31 8.75 10.75 8.19 10.75 7.5 C10.75 6.81 11.31 6.25 12 6.25 Z \
M11 10.5 H13 V17 H11 Z";

/// Standalone `<svg>` markup for `name`, filled with `currentColor`
pub fn get_icon(name: &str) -> Result<String> {
    let icon: IconName = name.parse()?;
    Ok(icon_markup(icon))
}

/// `get_icon` with `currentColor` replaced by a concrete color
pub fn icon_with_color(name: &str, color: &str) -> Result<String> {
    Ok(get_icon(name)?.replace("currentColor", color))
}

/// Icon markup positioned inside a parent `<svg>`
pub fn icon_element(icon: IconName, x: f32, y: f32, size: f32, color: &str) -> String {
    let placement = format!("<svg x=\"{x:.2}\" y=\"{y:.2}\" width=\"{size:.2}\" height=\"{size:.2}\"");
    icon_markup(icon)
        .replace("currentColor", color)
        .replacen("<svg", &placement, 1)
}

/// Standalone `<svg>` markup for a known icon
pub fn icon_markup(icon: IconName) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 24 24\" aria-hidden=\"true\">\
<path fill=\"currentColor\" d=\"{}\"/></svg>",
        icon.path_data()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_icon_parses_and_stays_in_its_box() {
        for icon in IconName::ALL {
            let outline = icon.outline().unwrap_or_else(|e| panic!("{icon}: {e}"));
            let b = outline.bounds().unwrap();
            assert!(b.min.x >= 0.0 && b.min.y >= 0.0, "{icon} starts outside the box");
            assert!(
                b.max.x <= ICON_VIEWBOX && b.max.y <= ICON_VIEWBOX,
                "{icon} ends outside the box"
            );
        }
    }

    #[test]
    fn names_round_trip() {
        for icon in IconName::ALL {
            assert_eq!(icon.as_str().parse::<IconName>().unwrap(), icon);
        }
        assert!(matches!(get_icon("retweet"), Err(Error::UnknownIcon(n)) if n == "retweet"));
    }

    #[test]
    fn color_substitution_replaces_every_placeholder() {
        let svg = icon_with_color("like", "#536471").unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("fill=\"#536471\""));
        assert!(!svg.contains("currentColor"));
    }

    #[test]
    fn element_is_positioned() {
        let el = icon_element(IconName::Info, 900.0, 12.5, 20.0, "#000000");
        assert!(el.starts_with(
            "<svg x=\"900.00\" y=\"12.50\" width=\"20.00\" height=\"20.00\" xmlns="
        ));
        assert_eq!(el.matches("<svg").count(), 1);
    }
}
