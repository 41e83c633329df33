//! 8B6T Line Encoder
//!
//! 8B6T (eight binary, six ternary) maps every byte to a group of six trits.
//! The mapping is a base-3 decomposition followed by two DC balance passes
//! that depend on everything emitted before the byte:
//!
//! ```text
//!   byte ──► decompose ──► flip positives ──► invert if ──► emit
//!             (base 3)      (if sum > 0)      same sign as
//!                                             previous code
//!                 │               │                 │
//!                 └──── running sum updated ────────┘
//! ```
//!
//! ## Positive-sum correction
//!
//! The sum of the freshly decomposed code is captured once. If it is
//! positive, *every* `+1` trit in the code becomes `-1`; the captured sum is
//! not re-evaluated between flips. Each flip lowers the running sum by 2.
//!
//! ## Alternation correction
//!
//! If the corrected code's sum and the previous byte's final code sum are
//! both strictly positive or both strictly negative, all six trits are
//! negated and the running sum is lowered by twice the pre-inversion sum.
//! A zero sum on either side never triggers inversion; before the first byte
//! the previous sum is 0.
//!
//! Since the positive-sum pass leaves no `+1` trits behind, a corrected code
//! never has a positive sum, so in practice inversion fires on runs of
//! negative-sum codes.
//!
//! ## Example
//!
//! ```rust
//! use linecode_core::{validate, ByteEncoder, LineEncoder, Scheme};
//!
//! let input = validate("00000000", Scheme::EightB6T).unwrap();
//! let result = ByteEncoder::new().encode(input.bits());
//! assert_eq!(result.signal, vec![-1; 6]);
//! ```

use crate::encoder::LineEncoder;
use crate::scheme::Scheme;
use crate::trace::{Balance, Step, TraceRecorder};
use crate::types::{Level, TernaryCode};
use crate::validate::BitSequence;

/// Correction note for the positive-sum pass
pub const POSITIVE_CORRECTION_NOTE: &str = "Converted positive values to negative to reduce DC bias";

/// Correction note for the alternation pass
pub const INVERSION_NOTE: &str = "Inverted all values to prevent DC accumulation";

/// Record of a positive-sum correction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositiveCorrection {
    /// Sum of the decomposed code, captured before any flip
    pub original_sum: i32,
    /// Code before flipping
    pub before: TernaryCode,
    /// Code after flipping every `+1` to `-1`
    pub after: TernaryCode,
    /// Number of trits flipped
    pub flipped: usize,
}

/// Flip every `+1` trit to `-1` if the code's sum is positive.
///
/// Returns `None` (no correction) when the sum is zero or negative.
pub fn correct_positive_sum(code: TernaryCode) -> Option<PositiveCorrection> {
    let original_sum = code.sum();
    if original_sum <= 0 {
        return None;
    }

    let mut after = code;
    let mut flipped = 0;
    for trit in after.trits_mut().iter_mut() {
        if *trit == 1 {
            *trit = -1;
            flipped += 1;
        }
    }

    Some(PositiveCorrection {
        original_sum,
        before: code,
        after,
        flipped,
    })
}

/// Record of an alternation inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inversion {
    /// Final code sum of the previous byte
    pub previous_sum: i32,
    /// Sum of this byte's code before inversion
    pub current_sum: i32,
    /// Code before inversion
    pub before: TernaryCode,
    /// Code after negating every trit
    pub after: TernaryCode,
}

/// Invert the code if its sum and `previous_sum` are strictly same-signed.
pub fn correct_alternation(code: TernaryCode, previous_sum: i32) -> Option<Inversion> {
    let current_sum = code.sum();
    let same_sign = (current_sum > 0 && previous_sum > 0) || (current_sum < 0 && previous_sum < 0);
    if !same_sign {
        return None;
    }

    Some(Inversion {
        previous_sum,
        current_sum,
        before: code,
        after: code.inverted(),
    })
}

/// Carry state of the 8B6T fold
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DcState {
    /// Sum of every trit emitted so far
    pub running_sum: i32,
    /// Final code of the previous byte (`None` before the first byte)
    pub previous_code: Option<TernaryCode>,
}

/// Everything that happened while encoding one byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteEncoding {
    /// Byte value (bits read most significant first)
    pub value: u8,
    /// Code straight out of the base-3 decomposition
    pub initial: TernaryCode,
    /// Positive-sum pass, if it fired
    pub positive: Option<PositiveCorrection>,
    /// Running sum after the positive-sum pass
    pub sum_after_positive: i32,
    /// Alternation pass, if it fired
    pub inversion: Option<Inversion>,
    /// Code emitted for this byte
    pub code: TernaryCode,
    /// Running sum after this byte
    pub running_sum: i32,
}

impl DcState {
    /// Sum of the previous byte's final code, 0 before the first byte
    pub fn previous_sum(&self) -> i32 {
        self.previous_code.map_or(0, |c| c.sum())
    }

    /// Encode one byte, returning the next state and the step outcome.
    pub fn step(self, value: u8) -> (DcState, ByteEncoding) {
        let initial = TernaryCode::decompose(value);
        let mut running_sum = self.running_sum + initial.sum();

        let positive = correct_positive_sum(initial);
        let code = match &positive {
            Some(correction) => {
                running_sum -= 2 * correction.flipped as i32;
                correction.after
            }
            None => initial,
        };
        let sum_after_positive = running_sum;

        let inversion = correct_alternation(code, self.previous_sum());
        let code = match &inversion {
            Some(inv) => {
                running_sum -= inv.current_sum * 2;
                inv.after
            }
            None => code,
        };

        let encoding = ByteEncoding {
            value,
            initial,
            positive,
            sum_after_positive,
            inversion,
            code,
            running_sum,
        };
        let next = DcState {
            running_sum,
            previous_code: Some(code),
        };
        (next, encoding)
    }
}

fn byte_value(bits: &[u8]) -> u8 {
    bits.iter().fold(0u8, |acc, &b| (acc << 1) | b)
}

fn byte_text(bits: &[u8]) -> String {
    bits.iter().map(|&b| if b == 0 { '0' } else { '1' }).collect()
}

/// Stateless front end for the 8B6T fold
///
/// The [`DcState`] lives only for the duration of one
/// [`LineEncoder::encode_into`] call.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByteEncoder;

impl ByteEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl LineEncoder for ByteEncoder {
    fn scheme(&self) -> Scheme {
        Scheme::EightB6T
    }

    fn encode_into(&self, bits: &BitSequence, recorder: &mut TraceRecorder) -> Vec<Level> {
        if bits.is_empty() {
            return Vec::new();
        }

        let bytes: Vec<&[u8]> = bits.symbols(8).collect();
        let _span = tracing::debug_span!("encode_8b6t", bits = bits.len(), bytes = bytes.len())
            .entered();

        recorder.record_with(|| {
            Step::new("Input Analysis").with_lines([
                format!("Binary Input: {}", bits),
                format!("Length: {} bits", bits.len()),
                format!("Number of bytes: {}", bytes.len()),
            ])
        });
        recorder.record_with(|| {
            Step::new("Grouping into Bytes").with_lines(
                bytes
                    .iter()
                    .enumerate()
                    .map(|(i, b)| format!("Byte {}: {}", i + 1, byte_text(b))),
            )
        });

        let mut trits: Vec<Level> = Vec::with_capacity(bytes.len() * 6);
        let mut state = DcState::default();
        for (index, raw) in bytes.iter().enumerate() {
            let n = index + 1;
            let (next, enc) = state.step(byte_value(raw));
            state = next;

            recorder.record_with(|| {
                Step::new(format!("Converting Byte {}", n)).with_lines([
                    format!("Input byte: {}", byte_text(raw)),
                    format!("Decimal value: {}", enc.value),
                    format!("Initial ternary code: {}", enc.initial),
                ])
            });

            if let Some(correction) = &enc.positive {
                recorder.record_with(|| {
                    Step::new(format!("DC Balance for Byte {}", n))
                        .with_lines([
                            format!("Initial sum: {}", correction.original_sum),
                            format!("Original code: {}", correction.before),
                            format!("Balanced code: {}", correction.after),
                        ])
                        .with_balance(
                            Balance::measure(enc.sum_after_positive)
                                .with_correction(POSITIVE_CORRECTION_NOTE),
                        )
                });
            }

            if let Some(inv) = &enc.inversion {
                recorder.record_with(|| {
                    Step::new(format!("DC Accumulation Check for Byte {}", n))
                        .with_lines([
                            format!("Previous sum: {}", inv.previous_sum),
                            format!("Current sum: {}", inv.current_sum),
                            format!("Original code: {}", inv.before),
                            format!("Inverted code: {}", inv.after),
                        ])
                        .with_balance(
                            Balance::measure(enc.running_sum).with_correction(INVERSION_NOTE),
                        )
                });
            }

            trits.extend_from_slice(enc.code.trits());

            let balance = Balance::measure(enc.running_sum);
            if balance.is_violation {
                tracing::debug!(byte = n, running_sum = enc.running_sum, "DC balance violation");
            }
            tracing::trace!(
                byte = n,
                value = enc.value,
                flipped = enc.positive.map_or(0, |c| c.flipped),
                inverted = enc.inversion.is_some(),
                running_sum = enc.running_sum,
                "byte encoded"
            );
            recorder.record_with(|| {
                Step::new(format!("Final Output for Byte {}", n))
                    .with_line(format!("Final ternary code: {}", enc.code))
                    .with_data(trits.clone())
                    .with_balance(balance)
            });
        }

        tracing::debug!(
            trits = trits.len(),
            running_sum = state.running_sum,
            "8B6T encoding complete"
        );
        trits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate;

    fn bits(s: &str) -> BitSequence {
        validate(s, Scheme::EightB6T).unwrap().bits().clone()
    }

    fn code(trits: [i8; 6]) -> TernaryCode {
        TernaryCode::new(trits).unwrap()
    }

    #[test]
    fn test_byte_value_msb_first() {
        assert_eq!(byte_value(&[1, 1, 1, 1, 0, 0, 1, 0]), 242);
        assert_eq!(byte_value(&[0, 0, 0, 0, 0, 1, 0, 1]), 5);
    }

    #[test]
    fn test_positive_correction_flips_every_plus_one() {
        // sum = 1; flipping a single +1 would already balance it, but all go
        let correction = correct_positive_sum(code([1, 1, 0, -1, 0, 0])).unwrap();
        assert_eq!(correction.original_sum, 1);
        assert_eq!(correction.after, code([-1, -1, 0, -1, 0, 0]));
        assert_eq!(correction.flipped, 2);
    }

    #[test]
    fn test_positive_correction_skips_non_positive() {
        assert!(correct_positive_sum(code([1, -1, 0, 0, 0, 0])).is_none());
        assert!(correct_positive_sum(TernaryCode::decompose(0)).is_none());
    }

    #[test]
    fn test_alternation_requires_strict_same_sign() {
        let negative = code([-1, -1, 0, 0, 0, 0]);
        assert!(correct_alternation(negative, 0).is_none());
        assert!(correct_alternation(negative, 3).is_none());
        let inv = correct_alternation(negative, -1).unwrap();
        assert_eq!(inv.current_sum, -2);
        assert_eq!(inv.after, code([1, 1, 0, 0, 0, 0]));

        let positive = code([1, 0, 0, 0, 0, 0]);
        assert!(correct_alternation(positive, 2).is_some());
        assert!(correct_alternation(TernaryCode::ZERO, -4).is_none());
    }

    #[test]
    fn test_scenario_single_zero_byte() {
        let result = ByteEncoder::new().encode(&bits("00000000"));
        assert_eq!(result.signal, vec![-1; 6]);

        let titles: Vec<_> = result.steps.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            [
                "Input Analysis",
                "Grouping into Bytes",
                "Converting Byte 1",
                "Final Output for Byte 1",
            ]
        );
        assert_eq!(
            result.steps[2].content,
            [
                "Input byte: 00000000",
                "Decimal value: 0",
                "Initial ternary code: [-1, -1, -1, -1, -1, -1]",
            ]
        );
        let last = &result.steps[3];
        assert_eq!(last.content, ["Final ternary code: [-1, -1, -1, -1, -1, -1]"]);
        assert_eq!(last.data, Some(vec![-1; 6]));
        assert_eq!(last.balance, Some(Balance::measure(-6)));
        assert!(last.balance.as_ref().unwrap().is_violation);
        assert!(last.balance.as_ref().unwrap().correction.is_none());
    }

    #[test]
    fn test_positive_sum_bytes_alternate() {
        // 242 decomposes to [1, 1, 1, 1, 1, -1] (sum 4)
        let result = ByteEncoder::new().encode(&bits("1111001011110010"));
        assert_eq!(
            result.signal,
            vec![-1, -1, -1, -1, -1, -1, 1, 1, 1, 1, 1, 1]
        );

        let balance_1 = &result.steps[3];
        assert_eq!(balance_1.title, "DC Balance for Byte 1");
        assert_eq!(
            balance_1.content,
            [
                "Initial sum: 4",
                "Original code: [1, 1, 1, 1, 1, -1]",
                "Balanced code: [-1, -1, -1, -1, -1, -1]",
            ]
        );
        let b = balance_1.balance.as_ref().unwrap();
        assert_eq!(b.sum, -6);
        assert!(b.is_violation);
        assert_eq!(b.correction.as_deref(), Some(POSITIVE_CORRECTION_NOTE));

        let check = result
            .steps
            .iter()
            .find(|s| s.title == "DC Accumulation Check for Byte 2")
            .unwrap();
        assert_eq!(
            check.content,
            [
                "Previous sum: -6",
                "Current sum: -6",
                "Original code: [-1, -1, -1, -1, -1, -1]",
                "Inverted code: [1, 1, 1, 1, 1, 1]",
            ]
        );
        let b = check.balance.as_ref().unwrap();
        assert_eq!(b.sum, 0);
        assert!(!b.is_violation);
        assert_eq!(b.correction.as_deref(), Some(INVERSION_NOTE));
    }

    #[test]
    fn test_step_sequence_for_corrected_bytes() {
        let result = ByteEncoder::new().encode(&bits("1111001011110010"));
        let titles: Vec<_> = result.steps.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            [
                "Input Analysis",
                "Grouping into Bytes",
                "Converting Byte 1",
                "DC Balance for Byte 1",
                "Final Output for Byte 1",
                "Converting Byte 2",
                "DC Balance for Byte 2",
                "DC Accumulation Check for Byte 2",
                "Final Output for Byte 2",
            ]
        );
        // running sum after byte 2's positive pass: -6 + 4 - 10
        assert_eq!(result.steps[6].balance.as_ref().unwrap().sum, -12);
    }

    #[test]
    fn test_zero_bytes_alternate_by_inversion() {
        let (state, first) = DcState::default().step(0);
        assert!(first.inversion.is_none());
        assert_eq!(state.running_sum, -6);

        let (state, second) = state.step(0);
        let inv = second.inversion.unwrap();
        assert_eq!(inv.previous_sum, -6);
        assert_eq!(inv.current_sum, -6);
        assert_eq!(second.code, code([1; 6]));
        assert_eq!(state.running_sum, 0);

        // previous sum is now +6, so a third zero byte is left alone
        let (state, third) = state.step(0);
        assert!(third.inversion.is_none());
        assert_eq!(state.running_sum, -6);
    }

    #[test]
    fn test_running_sum_matches_emitted_trits() {
        let mut state = DcState::default();
        let mut emitted = 0;
        for value in (0..=255u8).chain((0..=255u8).rev()) {
            let (next, enc) = state.step(value);
            emitted += enc.code.sum();
            assert_eq!(next.running_sum, emitted, "after byte {}", value);
            assert!(enc.code.sum() <= 0 || enc.inversion.is_some());
            state = next;
        }
    }

    #[test]
    fn test_every_byte_as_first_byte() {
        for value in 0..=255u8 {
            let (state, enc) = DcState::default().step(value);
            assert!(enc.inversion.is_none());
            assert_eq!(enc.positive.is_some(), enc.initial.sum() > 0);
            assert!(enc.code.trits().iter().all(|&t| t != 1) || enc.initial.sum() <= 0);
            assert_eq!(state.previous_code, Some(enc.code));
        }
    }

    #[test]
    fn test_signal_length_and_alphabet() {
        let input = "0100100011111111000000001010101001111110";
        let result = ByteEncoder::new().encode(&bits(input));
        assert_eq!(result.signal.len(), input.len() / 8 * 6);
        assert!(result.signal.iter().all(|t| (-1..=1).contains(t)));
        let finals = result
            .steps
            .iter()
            .filter(|s| s.title.starts_with("Final Output"))
            .count();
        assert_eq!(finals, 5);
    }

    #[test]
    fn test_empty_input_has_no_trace() {
        let result = ByteEncoder::new().encode(&bits(""));
        assert!(result.signal.is_empty());
        assert!(result.steps.is_empty());
    }
}
