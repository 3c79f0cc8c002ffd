//! Decision thresholds for polyalphabetic key recovery

use serde::{Deserialize, Serialize};

use crate::Ratio;

/// Exact cut-offs used while estimating the key length and the offsets
/// between key letters. Missing fields deserialize to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Minimum average Index of Coincidence for a key length (English ≈ 0.066).
    pub coincidence: Ratio,
    /// Required jump over the best Index of Coincidence seen at shorter lengths.
    pub growth: Ratio,
    /// Mutual Index of Coincidence above which two columns count as aligned.
    pub mutual: Ratio,
}

impl Thresholds {
    /// Name of the first negative threshold, if any.
    pub fn first_negative(&self) -> Option<(&'static str, &Ratio)> {
        [
            ("coincidence", &self.coincidence),
            ("growth", &self.growth),
            ("mutual", &self.mutual),
        ]
        .into_iter()
        .find(|(_, value)| value.is_negative())
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            coincidence: Ratio::new(3, 50),
            growth: Ratio::new(1, 200),
            mutual: Ratio::new(11, 200),
        }
    }
}
