//! BudouX phrase-break model.
//!
//! A model is a JSON object of feature groups, each mapping a short
//! character window to an integer weight:
//!
//! ```text
//! UW1..UW6  one character at offsets -3..+2 of the boundary
//! BW1..BW3  two characters ending before, straddling, starting at it
//! TW1..TW4  three characters, same idea
//! ```
//!
//! The score of a boundary is the base score (minus half the sum of every
//! weight) plus the weights of every feature present around it.

use std::collections::HashMap;

use crate::error::{Error, Result};

type FeatureGroup = HashMap<String, i64>;

#[derive(Clone, PartialEq, Eq, Default)]
pub struct PhraseModel {
    groups: HashMap<String, FeatureGroup>,
    base_score: i64,
}

impl std::fmt::Debug for PhraseModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let features: usize = self.groups.values().map(HashMap::len).sum();
        f.debug_struct("PhraseModel")
            .field("groups", &self.groups.len())
            .field("features", &features)
            .field("base_score", &self.base_score)
            .finish()
    }
}

impl PhraseModel {
    pub fn from_json(json: &str) -> Result<Self> {
        let groups: HashMap<String, FeatureGroup> =
            serde_json::from_str(json).map_err(|e| Error::InvalidSegmentModel(e.to_string()))?;
        Ok(Self::from_groups(groups))
    }

    pub fn from_groups(groups: HashMap<String, FeatureGroup>) -> Self {
        let total: i64 = groups.values().flat_map(HashMap::values).sum();
        Self {
            groups,
            base_score: -total / 2,
        }
    }

    pub fn base_score(&self) -> i64 {
        self.base_score
    }

    fn weight(&self, group: &str, window: &[char]) -> i64 {
        let Some(features) = self.groups.get(group) else {
            return 0;
        };
        let key: String = window.iter().collect();
        features.get(&key).copied().unwrap_or(0)
    }

    /// Score of the boundary just before `chars[i]` (`1 <= i < chars.len()`)
    pub fn score(&self, chars: &[char], i: usize) -> i64 {
        let n = chars.len();
        let mut score = self.base_score;

        if i > 2 {
            score += self.weight("UW1", &chars[i - 3..i - 2]);
        }
        if i > 1 {
            score += self.weight("UW2", &chars[i - 2..i - 1]);
        }
        score += self.weight("UW3", &chars[i - 1..i]);
        score += self.weight("UW4", &chars[i..i + 1]);
        if i + 1 < n {
            score += self.weight("UW5", &chars[i + 1..i + 2]);
        }
        if i + 2 < n {
            score += self.weight("UW6", &chars[i + 2..i + 3]);
        }

        if i > 1 {
            score += self.weight("BW1", &chars[i - 2..i]);
        }
        score += self.weight("BW2", &chars[i - 1..i + 1]);
        if i + 1 < n {
            score += self.weight("BW3", &chars[i..i + 2]);
        }

        if i > 2 {
            score += self.weight("TW1", &chars[i - 3..i]);
        }
        if i > 1 {
            score += self.weight("TW2", &chars[i - 2..i + 1]);
        }
        if i + 1 < n {
            score += self.weight("TW3", &chars[i - 1..i + 2]);
        }
        if i + 2 < n {
            score += self.weight("TW4", &chars[i..i + 3]);
        }
        score
    }
}
