//! macOS のシステムフォント取得

use std::path::PathBuf;

pub fn regular_candidates() -> Vec<PathBuf> {
    vec![
        // 日本語（ヒラギノ）
        PathBuf::from("/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc"),
        // San Francisco（macOS 標準）
        PathBuf::from("/System/Library/Fonts/SFNS.ttf"),
        // fallback
        PathBuf::from("/System/Library/Fonts/Helvetica.ttc"),
        PathBuf::from("/Library/Fonts/Arial Unicode.ttf"),
    ]
}

pub fn bold_candidates() -> Vec<PathBuf> {
    vec![
        PathBuf::from("/System/Library/Fonts/ヒラギノ角ゴシック W6.ttc"),
        PathBuf::from("/System/Library/Fonts/Supplemental/Arial Bold.ttf"),
    ]
}
