//! Phrase-break model lookup.

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::engine::options::RenderOptions;
use crate::engine::text::segment::DEFAULT_THRESHOLD;
use crate::engine::text::{PhraseModel, Segmenter};
use crate::error::{Error, Result};

use super::load_local_file;

pub const SEGMENT_MODEL_ENV: &str = "XPOSTGEN_SEGMENT_MODEL";

/// option → `XPOSTGEN_SEGMENT_MODEL` → built-in class scorer
pub fn load_segmenter(opts: &RenderOptions) -> Result<Segmenter> {
    match model_path(opts, |key| std::env::var(key).ok()) {
        Some(path) => {
            let model = load_phrase_model(&path)?;
            info!("segmentation model: {} ({model:?})", path.display());
            Ok(Segmenter::with_model(model, DEFAULT_THRESHOLD))
        }
        None => {
            debug!("segmentation model: built-in");
            Ok(Segmenter::default())
        }
    }
}

fn model_path(opts: &RenderOptions, env: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    opts.segment_model.clone().or_else(|| {
        env(SEGMENT_MODEL_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    })
}

pub fn load_phrase_model(path: &Path) -> Result<PhraseModel> {
    let bytes = load_local_file(path)
        .map_err(|e| Error::InvalidSegmentModel(format!("{}: {e}", path.display())))?;
    let json = String::from_utf8(bytes)
        .map_err(|_| Error::InvalidSegmentModel(format!("{}: not UTF-8", path.display())))?;
    PhraseModel::from_json(&json)
}
