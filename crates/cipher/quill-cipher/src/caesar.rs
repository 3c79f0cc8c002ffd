//! Caesar (shift) cipher
//!
//! Every Latin letter is rotated by the same amount; everything else is
//! copied. Breaking it compares the letter distribution of each of the 26
//! rotations against a trained [`FrequencyModel`].

use quill_core::{project_letters, rotate, Error, Ratio, Result, ALPHABET_LEN};
use tracing::debug;

use crate::frequency::FrequencyModel;
use crate::Codec;

/// Shift cipher with a key already reduced to `0..26`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caesar {
    shift: i64,
}

impl Caesar {
    pub fn new(shift: i64) -> Self {
        Self {
            shift: shift.rem_euclid(ALPHABET_LEN as i64),
        }
    }

    /// Parse an integer key of any size, see [`parse_shift`].
    pub fn from_key(key: &str) -> Result<Self> {
        parse_shift(key).map(Self::new)
    }

    pub fn shift(&self) -> i64 {
        self.shift
    }
}

impl Codec for Caesar {
    fn encode(&self, text: &str) -> String {
        encode(text, self.shift)
    }

    fn decode(&self, text: &str) -> String {
        decode(text, self.shift)
    }
}

/// Parse a signed decimal key, reducing it mod 26 digit by digit so keys
/// longer than any machine integer are still accepted.
pub fn parse_shift(key: &str) -> Result<i64> {
    let invalid = || {
        Error::InvalidKey(format!(
            "For Caesar cipher you should enter a number, got {key:?}"
        ))
    };

    let trimmed = key.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let modulus = ALPHABET_LEN as i64;
    let reduced = digits
        .bytes()
        .fold(0i64, |acc, b| (acc * 10 + (b - b'0') as i64) % modulus);

    Ok(if negative { -reduced } else { reduced })
}

pub fn encode(text: &str, shift: i64) -> String {
    text.chars()
        .map(|c| if c.is_ascii_alphabetic() { rotate(shift, c) } else { c })
        .collect()
}

pub fn decode(text: &str, shift: i64) -> String {
    // reduce first so negating can't overflow
    encode(text, -shift.rem_euclid(ALPHABET_LEN as i64))
}

/// Letter frequencies of `text`, see [`FrequencyModel::train`].
pub fn train(text: &str) -> Result<FrequencyModel> {
    FrequencyModel::train(text)
}

/// Outcome of breaking a shift cipher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftBreak {
    /// Rotation that, applied to the ciphertext, yields the plaintext.
    pub rotation: i64,
    /// Key the text was encoded with; `(26 - rotation) % 26`.
    pub key: i64,
    /// L1 distance between the decoded text's distribution and the model.
    pub distance: Ratio,
    pub plaintext: String,
}

/// Find the rotation whose letter distribution is closest to `model`.
///
/// Rotations are scanned `0..26`; only a strictly smaller distance replaces
/// the current best, so ties go to the smallest rotation.
pub fn crack(text: &str, model: &FrequencyModel) -> Result<ShiftBreak> {
    if project_letters(text).is_empty() {
        return Err(Error::UnhackableText("no latin letters to analyse".into()));
    }
    let observed = FrequencyModel::train(text)?;

    let (rotation, distance) = (0..ALPHABET_LEN as i64)
        .map(|rotation| {
            let distance = observed.rotated(rotation).distance(model);
            debug!(rotation, distance = %distance, "shift candidate");
            (rotation, distance)
        })
        .min_by(|(_, a), (_, b)| a.cmp(b))
        .ok_or_else(|| Error::UnhackableText("no rotation to score".into()))?;

    Ok(ShiftBreak {
        rotation,
        key: (ALPHABET_LEN as i64 - rotation) % ALPHABET_LEN as i64,
        distance,
        plaintext: encode(text, rotation),
    })
}

/// Decode `text` with the rotation [`crack`] selects.
pub fn hack(text: &str, model: &FrequencyModel) -> Result<String> {
    crack(text, model).map(|found| found.plaintext)
}
