//! Text measurement, segmentation and wrapping.
//!
//! # Overview
//!
//! The layout engine never touches a font file. It talks to a face through
//! [`FontMetrics`], which the platform layer implements on top of a real
//! outline font and which [`FallbackMetrics`] implements with fixed
//! heuristics for tests.
//!
//! ```text
//! FontMetrics → measure / wrap / ellipsize → Layout
//! ```
//!
//! Widths are accumulated left to right: for every character the kerning
//! against its predecessor, then its advance. A character without an
//! advance measures one line height, and an East-Asian wide, fullwidth or
//! ambiguous character never measures less than that.

pub mod fallback;
pub mod font_set;
pub mod phrase_model;
pub mod segment;
pub mod wrap;

pub use fallback::FallbackMetrics;
pub use font_set::{FontRole, FontSet};
pub use phrase_model::PhraseModel;
pub use segment::{Segmenter, contains_cjk};
pub use wrap::{ELLIPSIS, ellipsize, wrap_text, wrap_text_with};

use unicode_width::UnicodeWidthChar;

/// Per-face metrics the layout engine needs. All values are in pixels.
pub trait FontMetrics {
    /// Nominal size the face was built for
    fn size(&self) -> f32;

    /// Horizontal advance of `ch`, `None` when the face has no glyph for it
    fn advance(&self, ch: char) -> Option<f32>;

    /// Pair adjustment between two adjacent characters (0 when unsupported)
    fn kern(&self, left: char, right: char) -> f32;

    /// Recommended baseline-to-baseline distance
    fn line_height(&self) -> f32;

    fn ascent(&self) -> f32;

    /// Below the baseline, negative
    fn descent(&self) -> f32;
}

/// East-Asian wide, fullwidth or ambiguous
pub fn is_wide(ch: char) -> bool {
    ch.width_cjk() == Some(2)
}

/// Width of a single character, kerning excluded
pub fn char_advance<F: FontMetrics + ?Sized>(face: &F, ch: char) -> f32 {
    let fallback = face.line_height();
    match face.advance(ch) {
        Some(adv) if is_wide(ch) => adv.max(fallback),
        Some(adv) => adv,
        None => fallback,
    }
}

/// Incremental measurement cursor.
///
/// Appending one character at a time yields exactly the width `measure`
/// would return for the whole prefix, so wrapping never re-measures.
pub struct Pen<'a, F: ?Sized> {
    face: &'a F,
    prev: Option<char>,
    width: f32,
}

impl<F: ?Sized> Clone for Pen<'_, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: ?Sized> Copy for Pen<'_, F> {}

impl<'a, F: FontMetrics + ?Sized> Pen<'a, F> {
    pub fn new(face: &'a F) -> Self {
        Self {
            face,
            prev: None,
            width: 0.0,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Origin x of `ch` if it were appended now
    pub fn origin_of(&self, ch: char) -> f32 {
        match self.prev {
            Some(prev) => self.width + self.face.kern(prev, ch),
            None => self.width,
        }
    }

    pub fn push(&mut self, ch: char) -> f32 {
        self.width = self.origin_of(ch) + char_advance(self.face, ch);
        self.prev = Some(ch);
        self.width
    }

    pub fn push_str(&mut self, text: &str) -> f32 {
        for ch in text.chars() {
            self.push(ch);
        }
        self.width
    }

    /// Width after appending `ch`, without moving the pen
    pub fn peek(&self, ch: char) -> f32 {
        let mut trial = *self;
        trial.push(ch)
    }
}

/// Width of `text` set in `face`. Empty text measures zero.
pub fn measure<F: FontMetrics + ?Sized>(face: &F, text: &str) -> f32 {
    Pen::new(face).push_str(text)
}

/// Origin x of every character, relative to the start of the run
pub fn char_positions<F: FontMetrics + ?Sized>(face: &F, text: &str) -> Vec<(char, f32)> {
    let mut pen = Pen::new(face);
    text.chars()
        .map(|ch| {
            let x = pen.origin_of(ch);
            pen.push(ch);
            (ch, x)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 既知の字幅と1組だけのカーニングを持つ検証用フェイス
    struct Fixed;

    impl FontMetrics for Fixed {
        fn size(&self) -> f32 {
            10.0
        }
        fn advance(&self, ch: char) -> Option<f32> {
            match ch {
                'A' | 'V' => Some(6.0),
                '中' => Some(3.0),
                'x' => Some(5.0),
                _ => None,
            }
        }
        fn kern(&self, left: char, right: char) -> f32 {
            if (left, right) == ('A', 'V') { -1.5 } else { 0.0 }
        }
        fn line_height(&self) -> f32 {
            12.0
        }
        fn ascent(&self) -> f32 {
            9.0
        }
        fn descent(&self) -> f32 {
            -3.0
        }
    }

    #[test]
    fn empty_text_is_zero() {
        assert_eq!(measure(&Fixed, ""), 0.0);
    }

    #[test]
    fn kerning_applies_between_pairs_only() {
        assert_eq!(measure(&Fixed, "AV"), 10.5);
        assert_eq!(measure(&Fixed, "VA"), 12.0);
    }

    #[test]
    fn missing_and_narrow_wide_glyphs_use_line_height() {
        // no glyph at all
        assert_eq!(measure(&Fixed, "?"), 12.0);
        // the face claims 3px for a wide character
        assert_eq!(measure(&Fixed, "中"), 12.0);
        assert_eq!(measure(&Fixed, "x中x"), 22.0);
    }

    #[test]
    fn wide_classification() {
        assert!(is_wide('あ'));
        assert!(is_wide('Ａ'));
        // ambiguous width
        assert!(is_wide('○'));
        assert!(!is_wide('a'));
    }

    #[test]
    fn pen_matches_measure_and_positions() {
        let mut pen = Pen::new(&Fixed);
        assert_eq!(pen.peek('A'), 6.0);
        assert_eq!(pen.width(), 0.0);
        pen.push_str("AVx");
        assert_eq!(pen.width(), measure(&Fixed, "AVx"));
        assert_eq!(
            char_positions(&Fixed, "AVx"),
            vec![('A', 0.0), ('V', 4.5), ('x', 10.5)]
        );
    }
}
