//! Vernam (XOR) cipher over a 32-symbol alphabet
//!
//! Text and key symbols are mapped to their index in [`VERNAM_ALPHABET`],
//! XOR-ed, and mapped back. Five bits cover the alphabet exactly, so the
//! result is always a symbol of the alphabet and the cipher is its own
//! inverse. Matching is case-insensitive and output is lowercase: the
//! original case of the text is not restored.

use quill_core::{Error, Result};

use crate::Codec;

/// Space, `a`-`z`, then `.,:!?`; indices `0..32`.
pub const VERNAM_ALPHABET: &str = " abcdefghijklmnopqrstuvwxyz.,:!?";

const SYMBOLS: &[u8] = VERNAM_ALPHABET.as_bytes();

/// Index of `c` (case-folded) in [`VERNAM_ALPHABET`].
pub fn symbol_index(c: char) -> Option<u8> {
    let folded = c.to_ascii_lowercase();
    if !folded.is_ascii() {
        return None;
    }
    SYMBOLS
        .iter()
        .position(|&s| s == folded as u8)
        .map(|i| i as u8)
}

/// Vernam key as alphabet indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vernam {
    key: Vec<u8>,
}

impl Vernam {
    /// Every key character must be in the alphabet (case-insensitive) and
    /// the key must not be empty.
    pub fn new(key: &str) -> Result<Self> {
        let key: Option<Vec<u8>> = key.chars().map(symbol_index).collect();
        match key {
            Some(key) if !key.is_empty() => Ok(Self { key }),
            _ => Err(Error::InvalidKey(
                "Inappropriate key. It has to consist of latin letters or ? !:,.".into(),
            )),
        }
    }
}

impl Codec for Vernam {
    fn encode(&self, text: &str) -> String {
        let mut idx = 0;
        text.chars()
            .map(|c| match symbol_index(c) {
                Some(sym) => {
                    let locked = sym ^ self.key[idx];
                    idx = (idx + 1) % self.key.len();
                    SYMBOLS[locked as usize] as char
                }
                None => c,
            })
            .collect()
    }

    fn decode(&self, text: &str) -> String {
        self.encode(text)
    }
}

pub fn encode(text: &str, key: &str) -> Result<String> {
    Ok(Vernam::new(key)?.encode(text))
}

pub fn decode(text: &str, key: &str) -> Result<String> {
    Ok(Vernam::new(key)?.decode(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_layout() {
        assert_eq!(VERNAM_ALPHABET.len(), 32);
        assert_eq!(symbol_index(' '), Some(0));
        assert_eq!(symbol_index('a'), Some(1));
        assert_eq!(symbol_index('Z'), Some(26));
        assert_eq!(symbol_index('?'), Some(31));
        assert_eq!(symbol_index('-'), None);
        assert_eq!(symbol_index('é'), None);

        for (i, c) in VERNAM_ALPHABET.chars().enumerate() {
            assert_eq!(symbol_index(c), Some(i as u8));
        }
    }

    #[test]
    fn test_encode_known_vector() {
        assert_eq!(encode("attack", "cat").unwrap(), "bu bb?");
    }

    #[test]
    fn test_roundtrip() {
        let cipher = encode("attack", "cat").unwrap();
        assert_eq!(decode(&cipher, "cat").unwrap(), "attack");

        let text = "hello, world! are you there?";
        let key = "secret key.";
        assert_eq!(decode(&encode(text, key).unwrap(), key).unwrap(), text);
    }

    #[test]
    fn test_passthrough_and_case_folding() {
        // '-' and digits are outside the alphabet and don't advance the key
        assert_eq!(encode("a-1a", "b").unwrap(), "c-1c");
        assert_eq!(encode("ATTACK", "CAT").unwrap(), "bu bb?");
        assert_eq!(decode("bu bb?", "cat").unwrap(), "attack");
    }

    #[test]
    fn test_invalid_keys() {
        for key in ["", "key-1", "naïve"] {
            assert!(
                matches!(encode("text", key), Err(Error::InvalidKey(_))),
                "{key:?} should be rejected"
            );
        }
    }
}
