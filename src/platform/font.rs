//! システムフォント候補の Facade

use std::path::PathBuf;

#[cfg(target_os = "linux")]
use crate::platform::os::linux as native;
#[cfg(target_os = "macos")]
use crate::platform::os::macos as native;
#[cfg(target_os = "windows")]
use crate::platform::os::windows as native;

/// OS ごとの候補パス。先頭から順に試す
#[derive(Debug, Clone, Default)]
pub struct FontCandidates {
    pub regular: Vec<PathBuf>,
    pub bold: Vec<PathBuf>,
}

impl FontCandidates {
    /// 実在する最初の regular
    pub fn first_regular(&self) -> Option<&PathBuf> {
        self.regular.iter().find(|p| p.is_file())
    }

    /// 実在する最初の bold
    pub fn first_bold(&self) -> Option<&PathBuf> {
        self.bold.iter().find(|p| p.is_file())
    }
}

#[allow(unreachable_code)]
pub fn system_font_candidates() -> FontCandidates {
    #[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
    {
        return FontCandidates {
            regular: native::font::regular_candidates(),
            bold: native::font::bold_candidates(),
        };
    }

    log::debug!("system font is not supported on this OS yet");
    FontCandidates::default()
}
