//! Latin alphabet helpers
//!
//! Rotation keeps the case of the letter it is applied to; projection drops
//! everything that is not a Latin letter and lowercases the rest.

/// Number of letters in the Latin alphabet.
pub const ALPHABET_LEN: usize = 26;

/// Shift `letter` by `offset` positions mod 26, preserving its case.
///
/// Offsets of any sign and magnitude are accepted. Characters outside
/// `[a-zA-Z]` come back unchanged.
pub fn rotate(offset: i64, letter: char) -> char {
    let base = if letter.is_ascii_lowercase() {
        b'a'
    } else if letter.is_ascii_uppercase() {
        b'A'
    } else {
        return letter;
    };

    let shift = offset.rem_euclid(ALPHABET_LEN as i64) as u8;
    ((letter as u8 - base + shift) % ALPHABET_LEN as u8 + base) as char
}

/// Lowercase Latin letters of `text` in their original order.
pub fn project_letters(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// 0-based alphabet position of a Latin letter, ignoring case.
pub fn letter_index(c: char) -> Option<usize> {
    if c.is_ascii_alphabetic() {
        Some((c.to_ascii_lowercase() as u8 - b'a') as usize)
    } else {
        None
    }
}

/// Occurrences of each letter `a..=z` in `letters`; other characters are ignored.
pub fn letter_counts(letters: &str) -> [u64; ALPHABET_LEN] {
    let mut counts = [0u64; ALPHABET_LEN];
    for idx in letters.chars().filter_map(letter_index) {
        counts[idx] += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_preserves_case() {
        assert_eq!(rotate(3, 'a'), 'd');
        assert_eq!(rotate(3, 'X'), 'A');
        assert_eq!(rotate(1, 'z'), 'a');
    }

    #[test]
    fn test_rotate_negative_and_large_offsets() {
        assert_eq!(rotate(-1, 'a'), 'z');
        assert_eq!(rotate(-27, 'B'), 'A');
        assert_eq!(rotate(26 * 1000 + 2, 'c'), 'e');
        assert_eq!(rotate(i64::MIN, 'a'), rotate(i64::MIN.rem_euclid(26), 'a'));
    }

    #[test]
    fn test_rotate_leaves_non_letters() {
        assert_eq!(rotate(5, '!'), '!');
        assert_eq!(rotate(5, 'é'), 'é');
    }

    #[test]
    fn test_project_letters() {
        assert_eq!(project_letters("Hello, World! 42"), "helloworld");
        assert_eq!(project_letters("...  ??"), "");
        assert_eq!(project_letters("Ünïcode"), "ncode");
    }

    #[test]
    fn test_letter_counts() {
        let counts = letter_counts("aabz");
        assert_eq!(counts[0], 2);
        assert_eq!(counts[1], 1);
        assert_eq!(counts[25], 1);
        assert_eq!(counts.iter().sum::<u64>(), 4);
    }
}
