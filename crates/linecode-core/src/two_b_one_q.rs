//! 2B1Q Line Encoder
//!
//! 2B1Q (two binary, one quaternary) maps every pair of bits to one of four
//! signal levels. Which level a pair maps to depends on whether the
//! previously emitted level was positive:
//!
//! ```text
//! ┌──────┬─────────────────────┬─────────────────────────┐
//! │ pair │ previous positive   │ previous not positive   │
//! ├──────┼─────────────────────┼─────────────────────────┤
//! │  00  │         +1          │           -1            │
//! │  01  │         +3          │           -3            │
//! │  10  │         -1          │           +1            │
//! │  11  │         -3          │           +3            │
//! └──────┴─────────────────────┴─────────────────────────┘
//! ```
//!
//! Before the first pair the previous level is 0, which counts as *not*
//! positive.
//!
//! ## Example
//!
//! ```rust
//! use linecode_core::{validate, LineEncoder, PairEncoder, Scheme};
//!
//! let input = validate("0001", Scheme::TwoB1Q).unwrap();
//! let result = PairEncoder::new().encode(input.bits());
//! assert_eq!(result.signal, vec![-1, -3]);
//! ```

use crate::encoder::LineEncoder;
use crate::scheme::Scheme;
use crate::trace::{Step, TraceRecorder};
use crate::types::Level;
use crate::validate::BitSequence;

/// Carry state of the 2B1Q fold
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairState {
    /// Last emitted level (0 before the first pair)
    pub previous_level: Level,
}

/// Outcome of encoding one pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairEncoding {
    /// Input bits, first bit first
    pub pair: [u8; 2],
    /// Level carried in from the previous pair
    pub previous_level: Level,
    /// Emitted level
    pub level: Level,
}

impl PairEncoding {
    /// Qualitative state of the previous level, as shown in the trace
    pub fn previous_state(&self) -> &'static str {
        match self.previous_level {
            0 => "neutral",
            l if l > 0 => "positive",
            _ => "negative",
        }
    }

    fn pair_text(&self) -> String {
        format!("{}{}", self.pair[0], self.pair[1])
    }
}

/// Look up the level for a pair given the sign of the previous level
pub fn level_for(pair: [u8; 2], previous_positive: bool) -> Level {
    let magnitude = match pair {
        [0, 0] | [1, 0] => 1,
        _ => 3,
    };
    // 0x pairs follow the previous sign, 1x pairs oppose it
    let follows = pair[0] == 0;
    if follows == previous_positive {
        magnitude
    } else {
        -magnitude
    }
}

impl PairState {
    /// Encode one pair, returning the next state and the step outcome.
    pub fn step(self, pair: [u8; 2]) -> (PairState, PairEncoding) {
        let level = level_for(pair, self.previous_level > 0);
        let encoding = PairEncoding {
            pair,
            previous_level: self.previous_level,
            level,
        };
        (PairState { previous_level: level }, encoding)
    }
}

/// Stateless front end for the 2B1Q fold
///
/// Each call to [`LineEncoder::encode_into`] starts from a fresh
/// [`PairState`], so the encoder can be shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairEncoder;

impl PairEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl LineEncoder for PairEncoder {
    fn scheme(&self) -> Scheme {
        Scheme::TwoB1Q
    }

    fn encode_into(&self, bits: &BitSequence, recorder: &mut TraceRecorder) -> Vec<Level> {
        if bits.is_empty() {
            return Vec::new();
        }

        let pairs: Vec<[u8; 2]> = bits.symbols(2).map(|p| [p[0], p[1]]).collect();
        let _span = tracing::debug_span!("encode_2b1q", bits = bits.len(), pairs = pairs.len())
            .entered();

        recorder.record_with(|| {
            Step::new("Input Analysis").with_lines([
                format!("Binary Input: {}", bits),
                format!("Length: {} bits", bits.len()),
                format!("Number of pairs: {}", pairs.len()),
            ])
        });
        recorder.record_with(|| {
            Step::new("Grouping into Pairs").with_lines(
                pairs
                    .iter()
                    .enumerate()
                    .map(|(i, p)| format!("Pair {}: {}{}", i + 1, p[0], p[1])),
            )
        });

        let mut levels = Vec::with_capacity(pairs.len());
        let mut state = PairState::default();
        for (index, &pair) in pairs.iter().enumerate() {
            let (next, encoding) = state.step(pair);
            state = next;
            levels.push(encoding.level);

            tracing::trace!(
                pair = %encoding.pair_text(),
                previous = encoding.previous_level,
                level = encoding.level,
                "pair encoded"
            );
            recorder.record_with(|| {
                Step::new(format!("Converting Pair {}", index + 1))
                    .with_lines([
                        format!("Input pair: {}", encoding.pair_text()),
                        format!("Previous level: {}", encoding.previous_state()),
                        format!("Applied rule: {} → {}", encoding.pair_text(), encoding.level),
                        format!("Output level: {}", encoding.level),
                    ])
                    .with_data(levels.clone())
            });
        }

        tracing::debug!(levels = levels.len(), "2B1Q encoding complete");
        levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate;

    fn bits(s: &str) -> BitSequence {
        validate(s, Scheme::TwoB1Q).unwrap().bits().clone()
    }

    #[test]
    fn test_level_table() {
        assert_eq!(level_for([0, 0], true), 1);
        assert_eq!(level_for([0, 1], true), 3);
        assert_eq!(level_for([1, 0], true), -1);
        assert_eq!(level_for([1, 1], true), -3);
        assert_eq!(level_for([0, 0], false), -1);
        assert_eq!(level_for([0, 1], false), -3);
        assert_eq!(level_for([1, 0], false), 1);
        assert_eq!(level_for([1, 1], false), 3);
    }

    #[test]
    fn test_scenario_0001() {
        let result = PairEncoder::new().encode(&bits("0001"));
        assert_eq!(result.signal, vec![-1, -3]);

        let titles: Vec<_> = result.steps.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            ["Input Analysis", "Grouping into Pairs", "Converting Pair 1", "Converting Pair 2"]
        );
        assert_eq!(
            result.steps[0].content,
            ["Binary Input: 0001", "Length: 4 bits", "Number of pairs: 2"]
        );
        assert_eq!(result.steps[1].content, ["Pair 1: 00", "Pair 2: 01"]);
        assert_eq!(
            result.steps[2].content,
            [
                "Input pair: 00",
                "Previous level: neutral",
                "Applied rule: 00 → -1",
                "Output level: -1",
            ]
        );
        assert_eq!(result.steps[2].data, Some(vec![-1]));
        assert_eq!(result.steps[3].content[1], "Previous level: negative");
        assert_eq!(result.steps[3].data, Some(vec![-1, -3]));
    }

    #[test]
    fn test_previous_positive_branch() {
        // 11 from neutral → +3, then 00 after positive → +1, then 10 → -1
        let result = PairEncoder::new().encode(&bits("110010"));
        assert_eq!(result.signal, vec![3, 1, -1]);
        assert_eq!(result.steps[3].content[1], "Previous level: positive");
    }

    #[test]
    fn test_state_step_threads_previous_level() {
        let (state, enc) = PairState::default().step([1, 1]);
        assert_eq!(enc.previous_level, 0);
        assert_eq!(enc.previous_state(), "neutral");
        assert_eq!(state.previous_level, 3);
        let (_, enc) = state.step([0, 1]);
        assert_eq!(enc.level, 3);
    }

    #[test]
    fn test_empty_input_has_no_trace() {
        let result = PairEncoder::new().encode(&bits(""));
        assert!(result.signal.is_empty());
        assert!(result.steps.is_empty());
    }

    #[test]
    fn test_all_sequences_up_to_five_pairs() {
        for len in 1..=5 {
            for n in 0..(1u32 << (2 * len)) {
                let s: String = (0..2 * len)
                    .rev()
                    .map(|b| if n >> b & 1 == 1 { '1' } else { '0' })
                    .collect();
                let result = PairEncoder::new().encode(&bits(&s));
                assert_eq!(result.signal.len(), len);
                assert!(result.signal.iter().all(|l| [-3, -1, 1, 3].contains(l)));
                assert_eq!(result.steps.len(), len + 2);
            }
        }
    }
}
