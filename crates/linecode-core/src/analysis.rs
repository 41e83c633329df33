//! Signal analysis for encoded line codes
//!
//! Derives the DC balance curve viewers plot under a waveform: the cumulative
//! sum of every sample up to each point, and how often it strays beyond the
//! ±3 band.
//!
//! ```text
//!  signal       -1  -1  -1  -1  -1  -1   1   1   1   1   1   1
//!  running sum  -1  -2  -3  -4  -5  -6  -5  -4  -3  -2  -1   0
//!  violation                 ^   ^   ^   ^   ^
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::trace::VIOLATION_THRESHOLD;
use crate::types::Level;

/// Cumulative DC balance of a signal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceProfile {
    /// Running sum after each sample
    pub running_sum: Vec<i32>,
    /// Sum of the whole signal
    pub final_sum: i32,
    /// Largest absolute running sum reached
    pub peak_excursion: i32,
    /// Number of samples at which `|running sum| > 3`
    pub violations: usize,
    /// Index of the first such sample
    pub first_violation: Option<usize>,
}

impl BalanceProfile {
    pub fn compute(signal: &[Level]) -> Self {
        let running_sum: Vec<i32> = signal
            .iter()
            .scan(0i32, |acc, &s| {
                *acc += s as i32;
                Some(*acc)
            })
            .collect();

        let peak_excursion = running_sum.iter().map(|s| s.abs()).max().unwrap_or(0);
        let mut violating = running_sum
            .iter()
            .enumerate()
            .filter(|(_, s)| s.abs() > VIOLATION_THRESHOLD)
            .map(|(i, _)| i);
        let first_violation = violating.next();
        let violations = first_violation.map_or(0, |_| 1 + violating.count());

        Self {
            final_sum: running_sum.last().copied().unwrap_or(0),
            running_sum,
            peak_excursion,
            violations,
            first_violation,
        }
    }

    /// True if the running sum never leaves the ±3 band
    pub fn is_balanced(&self) -> bool {
        self.violations == 0
    }
}

/// Occurrence count of each level in a signal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelHistogram {
    /// Level → count, in ascending level order
    pub counts: BTreeMap<Level, usize>,
}

impl LevelHistogram {
    pub fn compute(signal: &[Level]) -> Self {
        let mut counts = BTreeMap::new();
        for &s in signal {
            *counts.entry(s).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Count for one level (0 if absent)
    pub fn count(&self, level: Level) -> usize {
        self.counts.get(&level).copied().unwrap_or(0)
    }

    /// Total number of samples
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}
