//! Local files, avatar references and the phrase-break model.

pub mod avatar;
pub mod segmenter;

pub use avatar::{AvatarData, AvatarSource, fetch_avatar};
pub use segmenter::{SEGMENT_MODEL_ENV, load_phrase_model, load_segmenter};

use std::path::Path;

use crate::error::Result;

/// Whole file as bytes
pub fn load_local_file(path: &Path) -> Result<Vec<u8>> {
    Ok(std::fs::read(path)?)
}

/// MIME type implied by the file extension, for the image types a card can embed
pub fn content_type_from_ext(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_follows_the_extension() {
        assert_eq!(content_type_from_ext(Path::new("a/b.PNG")), Some("image/png"));
        assert_eq!(content_type_from_ext(Path::new("me.jpeg")), Some("image/jpeg"));
        assert_eq!(content_type_from_ext(Path::new("icon.svg")), Some("image/svg+xml"));
        assert_eq!(content_type_from_ext(Path::new("notes.txt")), None);
        assert_eq!(content_type_from_ext(Path::new("noext")), None);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_local_file(Path::new("/no/such/avatar.png")).unwrap_err();
        assert!(matches!(err, crate::error::Error::Io(_)));
    }
}
