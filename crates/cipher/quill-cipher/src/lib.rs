//! quill cipher engine
//!
//! Classical ciphers and the statistics that break them.
//!
//! # Modules
//! - `caesar` - shift cipher, frequency-distance key recovery
//! - `vigenere` - polyalphabetic cipher, coincidence-based key recovery
//! - `vernam` - XOR cipher over a 32-symbol alphabet
//! - `frequency` - trained letter frequency models
//! - `analysis` - Index of Coincidence, Mutual Index of Coincidence
//!
//! Every operation is a pure function of its inputs. Failures come back as
//! [`Error`] values; nothing here prints, prompts or exits.

pub mod analysis;
pub mod caesar;
pub mod frequency;
pub mod vernam;
pub mod vigenere;

use std::fmt;
use std::str::FromStr;

pub use caesar::{Caesar, ShiftBreak};
pub use frequency::FrequencyModel;
pub use quill_core::{Error, Ratio, Result, Thresholds};
pub use vernam::{Vernam, VERNAM_ALPHABET};
pub use vigenere::{Candidate, KeyRecovery, Vigenere};

/// Something that can encode and decode text with a fixed key.
pub trait Codec {
    fn encode(&self, text: &str) -> String;
    fn decode(&self, text: &str) -> String;
}

/// The supported ciphers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherKind {
    Caesar,
    Vigenere,
    Vernam,
}

impl CipherKind {
    pub const ALL: [CipherKind; 3] = [CipherKind::Caesar, CipherKind::Vigenere, CipherKind::Vernam];

    pub fn name(&self) -> &'static str {
        match self {
            CipherKind::Caesar => "caesar",
            CipherKind::Vigenere => "vigenere",
            CipherKind::Vernam => "vernam",
        }
    }

    /// Build the codec for `key`, validating it.
    pub fn codec(&self, key: &str) -> Result<Box<dyn Codec>> {
        let codec: Box<dyn Codec> = match self {
            CipherKind::Caesar => Box::new(Caesar::from_key(key)?),
            CipherKind::Vigenere => Box::new(Vigenere::new(key)?),
            CipherKind::Vernam => Box::new(Vernam::new(key)?),
        };
        Ok(codec)
    }

    /// Whether keys can be recovered from ciphertext alone (or with a model).
    pub fn is_hackable(&self) -> bool {
        matches!(self, CipherKind::Caesar | CipherKind::Vigenere)
    }
}

impl fmt::Display for CipherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CipherKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "caesar" | "shift" => Ok(CipherKind::Caesar),
            "vigenere" | "vigenère" | "polyalphabetic" => Ok(CipherKind::Vigenere),
            "vernam" | "xor" => Ok(CipherKind::Vernam),
            _ => Err(Error::UnknownCipher(format!(
                "{s}. Use: caesar, vigenere, vernam"
            ))),
        }
    }
}

/// Encode `text` with `key` under the chosen cipher.
pub fn encode(kind: CipherKind, text: &str, key: &str) -> Result<String> {
    Ok(kind.codec(key)?.encode(text))
}

/// Decode `text` with `key` under the chosen cipher.
pub fn decode(kind: CipherKind, text: &str, key: &str) -> Result<String> {
    Ok(kind.codec(key)?.decode(text))
}

/// Train a letter frequency model for breaking shift ciphers.
pub fn train(text: &str) -> Result<FrequencyModel> {
    FrequencyModel::train(text)
}

/// Break a shift cipher against `model`, returning the decoded text.
pub fn hack_shift(text: &str, model: &FrequencyModel) -> Result<String> {
    caesar::hack(text, model)
}

/// Break a shift cipher against `model`, returning rotation, key and distance too.
pub fn break_shift(text: &str, model: &FrequencyModel) -> Result<ShiftBreak> {
    caesar::crack(text, model)
}

/// The 26 candidate keys for a polyalphabetic ciphertext, with decodings.
pub fn hack_polyalphabetic(text: &str) -> Result<Vec<Candidate>> {
    vigenere::hack(text)
}
