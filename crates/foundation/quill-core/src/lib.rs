//! # quill core
//!
//! Foundation shared by every quill crate:
//!
//! - [`Ratio`] - exact, always-reduced fractions used by all statistics
//! - [`alphabet`] - case-preserving rotation over the 26 Latin letters and
//!   projection of arbitrary text into a lowercase letter stream
//! - [`Thresholds`] - cut-offs for polyalphabetic key recovery
//! - [`Error`] - the failure kinds reported by the cipher engine
//!
//! Nothing in here performs I/O or keeps state between calls.

pub mod alphabet;
pub mod ratio;
pub mod thresholds;

pub use alphabet::{letter_counts, letter_index, project_letters, rotate, ALPHABET_LEN};
pub use ratio::{ParseRatioError, Ratio};
pub use thresholds::Thresholds;

/// Result type for quill operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the cipher engine.
///
/// None of these terminate the process; deciding what to do with them is the
/// caller's business.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The key cannot be parsed or contains symbols outside the cipher's alphabet.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Training text contains no Latin letters.
    #[error("Train text is incorrect: no latin letters")]
    EmptyCorpus,

    /// No letters to analyse, or no key could be recovered.
    #[error("The text is inappropriate for hacking: {0}")]
    UnhackableText(String),

    /// A supplied frequency model is malformed.
    #[error("Invalid frequency model: {0}")]
    InvalidModel(String),

    /// The cipher name is not one of the supported ciphers.
    #[error("Unknown cipher: {0}")]
    UnknownCipher(String),
}
