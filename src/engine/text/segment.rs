//! Phrase segmentation for text without spaces between words.
//!
//! With a [`PhraseModel`] loaded, boundaries are scored by the model.
//! Without one, every boundary gets a score from the classes of the
//! characters around it: positive weights favour a break, negative weights
//! glue the characters together. Either way a boundary whose score exceeds
//! the threshold becomes a break opportunity.

use std::sync::Arc;

use super::phrase_model::PhraseModel;

/// Default break threshold
pub const DEFAULT_THRESHOLD: i32 = -800;

const BASE_SCORE: i32 = -1000;
const PARTICLE_BONUS: i32 = 1200;
const COMPOUND_VERB_PENALTY: i32 = 1500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Hiragana,
    Katakana,
    Han,
    Alnum,
    Open,
    Close,
    Space,
    Other,
}

fn classify(ch: char) -> CharClass {
    use CharClass::*;
    match ch {
        '\u{3041}'..='\u{309F}' => Hiragana,
        '・' => Close,
        '\u{30A0}'..='\u{30FF}' | '\u{31F0}'..='\u{31FF}' | '\u{FF66}'..='\u{FF9F}' => Katakana,
        '\u{3005}'..='\u{3007}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{20000}'..='\u{2FA1F}' => Han,
        '「' | '『' | '（' | '(' | '［' | '[' | '【' | '〈' | '《' | '〔' | '｛' | '{' | '“'
        | '‘' => Open,
        '」' | '』' | '）' | ')' | '］' | ']' | '】' | '〉' | '》' | '〕' | '｝' | '}' | '”'
        | '’' | '、' | '。' | '，' | '．' | '！' | '？' | '!' | '?' | ',' | '.' | ':'
        | ';' | '：' | '；' | '…' => Close,
        c if c.is_whitespace() => Space,
        c if c.is_alphanumeric() => Alnum,
        _ => Other,
    }
}

/// Hiragana, Katakana or Han present
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(|ch| {
        matches!(
            classify(ch),
            CharClass::Hiragana | CharClass::Katakana | CharClass::Han
        )
    })
}

fn pair_weight(before: CharClass, after: CharClass) -> i32 {
    use CharClass::*;
    match (before, after) {
        (_, Close) => -5000,
        (Open, _) => -5000,
        (Close, Hiragana) => -300,
        (Close, _) => 3000,
        (_, Open) => 2000,
        (Space, _) => 2000,
        (_, Space) => -2000,
        (Alnum, Alnum) => -5000,
        (Alnum, Hiragana) => -300,
        (Alnum, _) | (_, Alnum) => 1000,
        (Katakana, Katakana) => -2000,
        (Hiragana, Han) => 1500,
        (Hiragana, Katakana) | (Han, Katakana) => 1200,
        (Katakana, Han) => 800,
        (Han, Hiragana) => -600,
        (Han, Han) => -400,
        (Hiragana, Hiragana) => -300,
        (Katakana, Hiragana) => -200,
        _ => 0,
    }
}

/// Case particles that usually end a phrase after a noun
fn is_phrase_particle(ch: char) -> bool {
    matches!(ch, 'は' | 'が' | 'を')
}

/// 連用形の送り仮名 (寄り添う, 書き込む)
fn is_continuative_okurigana(ch: char) -> bool {
    matches!(ch, 'き' | 'ぎ' | 'し' | 'じ' | 'ち' | 'び' | 'み' | 'り')
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segmenter {
    threshold: i32,
    model: Option<Arc<PhraseModel>>,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl Segmenter {
    /// Character-class scorer
    pub const fn new(threshold: i32) -> Self {
        Self {
            threshold,
            model: None,
        }
    }

    pub fn with_model(model: PhraseModel, threshold: i32) -> Self {
        Self {
            threshold,
            model: Some(Arc::new(model)),
        }
    }

    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    fn score(&self, before2: Option<char>, before: char, after: char) -> i32 {
        let (b, a) = (classify(before), classify(after));
        let mut score = BASE_SCORE + pair_weight(b, a);
        // 名詞 + 格助詞 の直後でひらがなが続く場合は文節境界
        if is_phrase_particle(before)
            && a == CharClass::Hiragana
            && before2
                .map(classify)
                .is_some_and(|c| matches!(c, CharClass::Han | CharClass::Katakana))
        {
            score += PARTICLE_BONUS;
        }
        if a == CharClass::Han
            && is_continuative_okurigana(before)
            && before2.map(classify) == Some(CharClass::Han)
        {
            score -= COMPOUND_VERB_PENALTY;
        }
        score
    }

    /// Splits `text` at every predicted break. Concatenating the pieces
    /// gives back `text`.
    pub fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        match &self.model {
            Some(model) => self.segment_with_model(model, text),
            None => self.segment_by_class(text),
        }
    }

    fn segment_with_model<'a>(&self, model: &PhraseModel, text: &'a str) -> Vec<&'a str> {
        let (offsets, chars): (Vec<usize>, Vec<char>) = text.char_indices().unzip();
        let mut pieces = Vec::new();
        let mut start = 0;
        for i in 1..chars.len() {
            if model.score(&chars, i) > i64::from(self.threshold) {
                pieces.push(&text[start..offsets[i]]);
                start = offsets[i];
            }
        }
        if start < text.len() {
            pieces.push(&text[start..]);
        }
        pieces
    }

    fn segment_by_class<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut pieces = Vec::new();
        let mut start = 0;
        let mut before2 = None;
        let mut before: Option<char> = None;

        for (idx, ch) in text.char_indices() {
            if let Some(prev) = before
                && self.score(before2, prev, ch) > self.threshold
            {
                pieces.push(&text[start..idx]);
                start = idx;
            }
            before2 = before;
            before = Some(ch);
        }

        if start < text.len() {
            pieces.push(&text[start..]);
        }
        pieces
    }
}
