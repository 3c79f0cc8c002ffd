//! Vigenère (polyalphabetic shift) cipher
//!
//! Each Latin letter is rotated by the alphabet position of the current key
//! letter; the key only advances on letters.
//!
//! Breaking it is done in three steps:
//! 1. the key length is the first block length whose average Index of
//!    Coincidence jumps above the running maximum ([`KeyRecovery::estimate_key_length`])
//! 2. the relative rotation between neighbouring key letters comes from the
//!    Mutual Index of Coincidence of their columns ([`KeyRecovery::guess_key_offsets`])
//! 3. the absolute rotation of the first letter can't be told apart
//!    statistically, so all 26 chained keys are returned ([`KeyRecovery::candidates`])

use num_traits::Zero;
use quill_core::{
    letter_index, project_letters, rotate, Error, Ratio, Result, Thresholds, ALPHABET_LEN,
};
use tracing::{debug, warn};

use crate::analysis::{column, index_of_coincidence, mutual_index_of_coincidence};
use crate::{caesar, Codec};

/// Vigenère key stored as rotations `0..26`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vigenere {
    shifts: Vec<u8>,
}

impl Vigenere {
    /// Accepts a non-empty key of Latin letters, either case.
    pub fn new(key: &str) -> Result<Self> {
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::InvalidKey(
                "You must enter a word, consisting of latin letters only".into(),
            ));
        }
        Ok(Self {
            shifts: key.chars().filter_map(letter_index).map(|i| i as u8).collect(),
        })
    }

    /// The key as lowercase letters.
    pub fn key(&self) -> String {
        self.shifts.iter().map(|&s| (b'a' + s) as char).collect()
    }

    /// Additive inverse key: encoding with it undoes encoding with `self`.
    pub fn inverse(&self) -> Self {
        Self {
            shifts: self
                .shifts
                .iter()
                .map(|&s| (ALPHABET_LEN as u8 - s) % ALPHABET_LEN as u8)
                .collect(),
        }
    }

    fn apply(&self, text: &str) -> String {
        let mut idx = 0;
        text.chars()
            .map(|c| {
                if c.is_ascii_alphabetic() {
                    let shifted = rotate(self.shifts[idx] as i64, c);
                    idx = (idx + 1) % self.shifts.len();
                    shifted
                } else {
                    c
                }
            })
            .collect()
    }
}

impl Codec for Vigenere {
    fn encode(&self, text: &str) -> String {
        self.apply(text)
    }

    fn decode(&self, text: &str) -> String {
        self.inverse().apply(text)
    }
}

pub fn encode(text: &str, key: &str) -> Result<String> {
    Ok(Vigenere::new(key)?.encode(text))
}

pub fn decode(text: &str, key: &str) -> Result<String> {
    Ok(Vigenere::new(key)?.decode(text))
}

/// A candidate key and the text it decodes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub key: String,
    pub plaintext: String,
}

/// Statistical key recovery for Vigenère ciphertext.
#[derive(Debug, Clone, Default)]
pub struct KeyRecovery {
    thresholds: Thresholds,
}

impl KeyRecovery {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Rows of the letter stream for the first plausible key length.
    ///
    /// Lengths `2..len/2` are tried in order, tracking the best Index of
    /// Coincidence so far. The first length whose index reaches
    /// `thresholds.coincidence` and beats the running best by more than
    /// `thresholds.growth` wins. `None` when nothing qualifies or the text
    /// has no letters.
    pub fn estimate_key_length(&self, text: &str) -> Option<Vec<String>> {
        let letters = project_letters(text);
        if letters.is_empty() {
            warn!("No latin alphabet symbols to decode");
            return None;
        }

        let mut best = Ratio::zero();
        for t in 2..letters.len() / 2 {
            let (ioc, blocks) = index_of_coincidence(&letters, t);
            if &ioc - &best > self.thresholds.growth && ioc >= self.thresholds.coincidence {
                debug!(key_length = t, ioc = %ioc, "key length found");
                return Some(blocks);
            }
            best = best.max(ioc);
        }

        debug!(letters = letters.len(), "no key length stands out");
        None
    }

    /// Relative rotations between neighbouring key letters.
    ///
    /// For each pair of adjacent columns the second is rotated by every
    /// `j` in `0..26`; whenever its Mutual Index of Coincidence with the first
    /// exceeds `thresholds.mutual`, `26 - j` is recorded. A pair can yield
    /// several offsets. Empty when the key length can't be estimated.
    pub fn guess_key_offsets(&self, text: &str) -> Vec<u8> {
        let Some(blocks) = self.estimate_key_length(text) else {
            return Vec::new();
        };

        let key_len = blocks[0].len();
        let mut offsets = Vec::new();
        let mut prev = column(&blocks, 0);

        for i in 1..key_len {
            let next = column(&blocks, i);
            for j in 0..ALPHABET_LEN as u8 {
                let shifted = caesar::encode(&next, j as i64);
                if mutual_index_of_coincidence(&prev, &shifted) > self.thresholds.mutual {
                    offsets.push(ALPHABET_LEN as u8 - j);
                }
            }
            prev = next;
        }

        debug!(?offsets, "key offsets");
        offsets
    }

    /// All 26 keys consistent with the recovered offsets, each with the
    /// decoding of `text`. The caller picks one.
    pub fn candidates(&self, text: &str) -> Result<Vec<Candidate>> {
        let offsets = self.guess_key_offsets(text);
        if offsets.is_empty() {
            warn!("no key offsets recovered");
            return Err(Error::UnhackableText(
                "no key length or key offsets could be recovered".into(),
            ));
        }

        candidate_keys(&offsets)
            .into_iter()
            .map(|key| {
                let plaintext = decode(text, &key)?;
                Ok(Candidate { key, plaintext })
            })
            .collect()
    }
}

/// One key per starting letter `a..=z`, each following letter obtained by
/// rotating the previous one by the next offset.
pub fn candidate_keys(offsets: &[u8]) -> Vec<String> {
    (0..ALPHABET_LEN as u8)
        .map(|start| {
            let mut letter = start;
            let mut key = String::with_capacity(offsets.len() + 1);
            key.push((b'a' + letter) as char);
            for &offset in offsets {
                letter = (letter + offset) % ALPHABET_LEN as u8;
                key.push((b'a' + letter) as char);
            }
            key
        })
        .collect()
}

/// Candidate keys and decodings using the default thresholds.
pub fn hack(text: &str) -> Result<Vec<Candidate>> {
    KeyRecovery::default().candidates(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_lemon() {
        assert_eq!(encode("attackatdawn", "lemon").unwrap(), "lxfopvefrnhr");
        assert_eq!(decode("lxfopvefrnhr", "lemon").unwrap(), "attackatdawn");
    }

    #[test]
    fn test_case_and_punctuation() {
        // key advances only on letters; text case kept, key case ignored
        assert_eq!(encode("HELLO", "KEY").unwrap(), "RIJVS");
        assert_eq!(encode("Attack at dawn!", "LeMoN").unwrap(), "Lxfopv ef rnhr!");
        assert_eq!(decode("Lxfopv ef rnhr!", "lemon").unwrap(), "Attack at dawn!");
    }

    #[test]
    fn test_invalid_keys() {
        for key in ["", "abc1", "two words", "ключ"] {
            assert!(
                matches!(encode("text", key), Err(Error::InvalidKey(_))),
                "{key:?} should be rejected"
            );
            assert!(matches!(decode("text", key), Err(Error::InvalidKey(_))));
        }
    }

    #[test]
    fn test_inverse_key() {
        let v = Vigenere::new("Bad").unwrap();
        assert_eq!(v.key(), "bad");
        assert_eq!(v.inverse().key(), "zax");
        assert_eq!(v.inverse().inverse(), v);
    }

    #[test]
    fn test_candidate_keys() {
        let keys = candidate_keys(&[1, 25, 26]);
        assert_eq!(keys.len(), 26);
        assert_eq!(keys[0], "abaa");
        assert_eq!(keys[25], "zazz");
    }

    #[test]
    fn test_estimate_key_length_without_letters() {
        let recovery = KeyRecovery::default();
        assert!(recovery.estimate_key_length("12345 !!!").is_none());
        assert!(recovery.guess_key_offsets("").is_empty());
        assert!(matches!(hack("... ---"), Err(Error::UnhackableText(_))));
    }
}
