//! Letter frequency models
//!
//! A [`FrequencyModel`] maps each of the 26 lowercase letters to an exact
//! share of a text's letter stream. Models are produced by training on a
//! reference corpus and consumed read-only when breaking shift ciphers.
//!
//! The persisted form is a JSON object of 26 `"numerator/denominator"`
//! strings keyed by letter, e.g. `{"a": "1/2", "b": "1/2", "c": "0", ...}`.

use std::collections::BTreeMap;

use num_traits::Zero;
use quill_core::{letter_counts, project_letters, Error, Ratio, Result, ALPHABET_LEN};
use serde::{Deserialize, Serialize};

/// Exact letter distribution over `a..=z`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, Ratio>", into = "BTreeMap<String, Ratio>")]
pub struct FrequencyModel {
    freqs: [Ratio; ALPHABET_LEN],
}

impl FrequencyModel {
    /// Letter frequencies of `text`, summing to exactly 1.
    ///
    /// Fails with [`Error::EmptyCorpus`] when `text` has no Latin letters.
    pub fn train(text: &str) -> Result<Self> {
        Self::from_counts(&letter_counts(&project_letters(text))).ok_or(Error::EmptyCorpus)
    }

    /// Normalise raw letter counts; `None` if every count is zero.
    pub fn from_counts(counts: &[u64; ALPHABET_LEN]) -> Option<Self> {
        let total: u64 = counts.iter().sum();
        if total == 0 {
            return None;
        }

        let freqs = counts.map(|count| Ratio::new(count as i128, total as i128));
        Some(Self { freqs })
    }

    /// Share of `letter` (case-insensitive); zero for anything that is not a Latin letter.
    pub fn get(&self, letter: char) -> Ratio {
        quill_core::letter_index(letter)
            .map(|i| self.freqs[i].clone())
            .unwrap_or_else(Ratio::zero)
    }

    /// `(letter, share)` pairs in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &Ratio)> + '_ {
        self.freqs
            .iter()
            .enumerate()
            .map(|(i, f)| (letter(i), f))
    }

    /// Sum of all shares; exactly 1 for trained models.
    pub fn total(&self) -> Ratio {
        self.freqs.iter().sum()
    }

    /// L1 distance: sum of absolute per-letter differences.
    pub fn distance(&self, other: &FrequencyModel) -> Ratio {
        self.freqs
            .iter()
            .zip(&other.freqs)
            .map(|(a, b)| (a - b).abs())
            .sum()
    }

    /// The model of the same text after a Caesar rotation by `shift`.
    ///
    /// Equal to training on the rotated text, without touching the text again.
    pub fn rotated(&self, shift: i64) -> Self {
        let shift = shift.rem_euclid(ALPHABET_LEN as i64) as usize;
        Self {
            freqs: std::array::from_fn(|i| {
                self.freqs[(i + ALPHABET_LEN - shift) % ALPHABET_LEN].clone()
            }),
        }
    }

    /// Serialize to the persisted byte form.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(|e| Error::InvalidModel(e.to_string()))
    }

    /// Parse the persisted byte form.
    ///
    /// Anything that is not a JSON object of exactly the 26 lowercase letters
    /// mapped to non-negative rationals is [`Error::InvalidModel`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| Error::InvalidModel(e.to_string()))
    }
}

fn letter(index: usize) -> char {
    (b'a' + index as u8) as char
}

/// L1 distance between two models.
pub fn distance(a: &FrequencyModel, b: &FrequencyModel) -> Ratio {
    a.distance(b)
}

impl TryFrom<BTreeMap<String, Ratio>> for FrequencyModel {
    type Error = Error;

    fn try_from(map: BTreeMap<String, Ratio>) -> Result<Self> {
        let mut freqs: [Option<Ratio>; ALPHABET_LEN] = Default::default();

        for (key, value) in map {
            let mut chars = key.chars();
            let idx = match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_lowercase() => (c as u8 - b'a') as usize,
                _ => return Err(Error::InvalidModel(format!("unexpected key {key:?}"))),
            };
            if value.is_negative() {
                return Err(Error::InvalidModel(format!(
                    "negative frequency {value} for {key:?}"
                )));
            }
            freqs[idx] = Some(value);
        }

        if let Some(i) = freqs.iter().position(Option::is_none) {
            return Err(Error::InvalidModel(format!("missing letter {:?}", letter(i))));
        }
        Ok(Self {
            freqs: freqs.map(Option::unwrap_or_default),
        })
    }
}

impl From<FrequencyModel> for BTreeMap<String, Ratio> {
    fn from(model: FrequencyModel) -> Self {
        model
            .freqs
            .into_iter()
            .enumerate()
            .map(|(i, f)| (letter(i).to_string(), f))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    #[test]
    fn test_train_aabb() {
        let model = FrequencyModel::train("aabb").unwrap();
        assert_eq!(model.get('a'), Ratio::new(1, 2));
        assert_eq!(model.get('b'), Ratio::new(1, 2));
        for c in 'c'..='z' {
            assert!(model.get(c).is_zero());
        }
    }

    #[test]
    fn test_train_sums_to_one() {
        let model = FrequencyModel::train("The quick brown fox, 3 times!").unwrap();
        assert!(model.total().is_one());
        assert_eq!(model.get('T'), Ratio::new(2, 21));
    }

    #[test]
    fn test_train_without_letters() {
        assert_eq!(FrequencyModel::train("123 ?!"), Err(Error::EmptyCorpus));
        assert_eq!(FrequencyModel::train(""), Err(Error::EmptyCorpus));
    }

    #[test]
    fn test_distance() {
        let a = FrequencyModel::train("aabb").unwrap();
        let b = FrequencyModel::train("abcd").unwrap();
        // |1/2-1/4| * 2 + 1/4 * 2
        assert!(a.distance(&b).is_one());
        assert!(distance(&a, &a).is_zero());
    }

    #[test]
    fn test_rotated_matches_rotated_text() {
        let model = FrequencyModel::train("Hello zebra").unwrap();
        assert_eq!(
            model.rotated(3),
            FrequencyModel::train(&crate::caesar::encode("Hello zebra", 3)).unwrap()
        );
        assert_eq!(model.rotated(-26), model);
    }

    #[test]
    fn test_bytes_roundtrip() {
        let model = FrequencyModel::train("It was the best of times").unwrap();
        let bytes = model.to_bytes().unwrap();
        assert_eq!(FrequencyModel::from_bytes(&bytes).unwrap(), model);
    }

    #[test]
    fn test_from_bytes_rejects_malformed() {
        assert!(matches!(
            FrequencyModel::from_bytes(b"not json"),
            Err(Error::InvalidModel(_))
        ));
        assert!(matches!(
            FrequencyModel::from_bytes(b"[1, 2, 3]"),
            Err(Error::InvalidModel(_))
        ));

        let mut map: BTreeMap<String, String> =
            ('a'..='z').map(|c| (c.to_string(), "0".to_string())).collect();
        map.remove("q");
        let bytes = serde_json::to_vec(&map).unwrap();
        let err = FrequencyModel::from_bytes(&bytes).unwrap_err();
        assert!(err.to_string().contains("missing letter 'q'"));

        map.insert("q".into(), "-1/2".into());
        let bytes = serde_json::to_vec(&map).unwrap();
        assert!(matches!(
            FrequencyModel::from_bytes(&bytes),
            Err(Error::InvalidModel(_))
        ));

        map.insert("q".into(), "0".into());
        map.insert("Q".into(), "0".into());
        let bytes = serde_json::to_vec(&map).unwrap();
        assert!(matches!(
            FrequencyModel::from_bytes(&bytes),
            Err(Error::InvalidModel(_))
        ));
    }
}
