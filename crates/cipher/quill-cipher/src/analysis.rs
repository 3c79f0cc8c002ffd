//! Coincidence statistics
//!
//! Index of Coincidence over a column arrangement of a letter stream, and the
//! mutual index between two streams. All values are exact [`Ratio`]s.
//!
//! Inputs are letter streams as produced by [`quill_core::project_letters`]:
//! lowercase ASCII only.

use num_traits::Zero;
use quill_core::{letter_counts, Ratio};

/// Cut `letters` into consecutive blocks of `t` characters; the last block
/// may be shorter. A zero block length yields no blocks.
pub fn split_text(letters: &str, t: usize) -> Vec<String> {
    if t == 0 {
        return Vec::new();
    }
    let chars: Vec<char> = letters.chars().collect();
    chars.chunks(t).map(|block| block.iter().collect()).collect()
}

/// Characters at position `i` of every block long enough to have one.
pub fn column(blocks: &[String], i: usize) -> String {
    blocks
        .iter()
        .filter_map(|block| block.as_bytes().get(i))
        .map(|&b| b as char)
        .collect()
}

/// Average Index of Coincidence of the `t` columns formed by writing
/// `letters` in rows of length `t`, together with those rows.
///
/// Each column contributes `Σ c(c-1) / (n(n-1))` where `n` counts only the
/// rows that reach that column, so a short final row drops out of the
/// columns it doesn't cover. Columns with fewer than two characters add
/// nothing. The column sum is divided by `t`.
///
/// English text scores about 0.066 when `t` matches the key period of a
/// polyalphabetic cipher and close to 0.038 otherwise.
pub fn index_of_coincidence(letters: &str, t: usize) -> (Ratio, Vec<String>) {
    let blocks = split_text(letters, t);
    if blocks.is_empty() {
        return (Ratio::zero(), blocks);
    }

    let mut total = Ratio::zero();
    for i in 0..t {
        let col = column(&blocks, i);
        let n = col.len() as i128;
        if n < 2 {
            continue;
        }

        let pairs: i128 = letter_counts(&col)
            .iter()
            .map(|&c| {
                let c = c as i128;
                c * (c - 1)
            })
            .sum();
        total = total + Ratio::new(pairs, n * (n - 1));
    }

    (total / Ratio::from_integer(t as i128), blocks)
}

/// Mutual Index of Coincidence:
/// `Σ count₁(x)·count₂(x) / (|s1|·|s2|)` over the letters `x`.
///
/// Zero when either stream is empty.
pub fn mutual_index_of_coincidence(s1: &str, s2: &str) -> Ratio {
    let (l1, l2) = (s1.chars().count() as i128, s2.chars().count() as i128);
    if l1 == 0 || l2 == 0 {
        return Ratio::zero();
    }

    let (c1, c2) = (letter_counts(s1), letter_counts(s2));
    let matches: i128 = c1
        .iter()
        .zip(&c2)
        .map(|(&a, &b)| a as i128 * b as i128)
        .sum();

    Ratio::new(matches, l1 * l2)
}
