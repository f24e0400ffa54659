//! Windows のシステムフォント取得

use std::path::PathBuf;

pub fn regular_candidates() -> Vec<PathBuf> {
    vec![
        // 日本語
        PathBuf::from(r"C:\Windows\Fonts\meiryo.ttc"),
        PathBuf::from(r"C:\Windows\Fonts\YuGothR.ttc"),
        PathBuf::from(r"C:\Windows\Fonts\msgothic.ttc"),
        // fallback
        PathBuf::from(r"C:\Windows\Fonts\segoeui.ttf"),
        PathBuf::from(r"C:\Windows\Fonts\arial.ttf"),
    ]
}

pub fn bold_candidates() -> Vec<PathBuf> {
    vec![
        PathBuf::from(r"C:\Windows\Fonts\meiryob.ttc"),
        PathBuf::from(r"C:\Windows\Fonts\YuGothB.ttc"),
        PathBuf::from(r"C:\Windows\Fonts\segoeuib.ttf"),
        PathBuf::from(r"C:\Windows\Fonts\arialbd.ttf"),
    ]
}
