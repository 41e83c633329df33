//! Core types for line coding
//!
//! This module defines the signal alphabet shared by both encoders and the
//! error type returned by the public API.
//!
//! ## Signal Alphabets
//!
//! ```text
//!   2B1Q (quaternary)          8B6T (ternary)
//!
//!   +3 ─────                   +1 ─────
//!   +1 ─────                    0 ─────
//!   -1 ─────                   -1 ─────
//!   -3 ─────
//! ```
//!
//! A 2B1Q output sample is a [`Level`] in {-3, -1, +1, +3}. An 8B6T output
//! sample is a [`Trit`] in {-1, 0, +1}, always emitted in groups of six as a
//! [`TernaryCode`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ConfigError;

/// A signed signal amplitude
pub type Level = i8;

/// A single ternary digit (-1, 0 or +1)
pub type Trit = i8;

/// Number of trits in one 8B6T code group
pub const CODE_LEN: usize = 6;

/// Result type for line coding operations
pub type LineCodeResult<T> = Result<T, LineCodeError>;

/// Errors returned by the line coding API
#[derive(Debug, Clone, thiserror::Error)]
pub enum LineCodeError {
    #[error("Invalid character '{found}' at position {position}: only binary digits (0 or 1) are allowed")]
    InvalidCharacter { position: usize, found: char },

    #[error("For 2B1Q, input length must be even (got {length} bits)")]
    WrongLengthFor2B1Q { length: usize },

    #[error("For 8B6T, input length must be divisible by 8 (got {length} bits)")]
    WrongLengthFor8B6T { length: usize },

    #[error("Unknown line coding scheme: '{0}'. Expected 2B1Q or 8B6T")]
    UnknownScheme(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Discriminant of a [`LineCodeError`], for callers that branch on the
/// failure kind without matching on payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    InvalidCharacter,
    WrongLengthFor2B1Q,
    WrongLengthFor8B6T,
    UnknownScheme,
    Serialization,
    Config,
}

impl LineCodeError {
    /// Kind of this failure
    pub fn kind(&self) -> FailureKind {
        match self {
            LineCodeError::InvalidCharacter { .. } => FailureKind::InvalidCharacter,
            LineCodeError::WrongLengthFor2B1Q { .. } => FailureKind::WrongLengthFor2B1Q,
            LineCodeError::WrongLengthFor8B6T { .. } => FailureKind::WrongLengthFor8B6T,
            LineCodeError::UnknownScheme(_) => FailureKind::UnknownScheme,
            LineCodeError::Serialization(_) => FailureKind::Serialization,
            LineCodeError::Config(_) => FailureKind::Config,
        }
    }

    /// Check if this error was raised by input validation.
    ///
    /// Validation failures can be fixed by correcting the bit string and
    /// retrying; the core never retries on its own.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LineCodeError::InvalidCharacter { .. }
                | LineCodeError::WrongLengthFor2B1Q { .. }
                | LineCodeError::WrongLengthFor8B6T { .. }
        )
    }
}

/// A six-trit 8B6T code group
///
/// Every entry is in {-1, 0, +1}. Codes are produced by [`TernaryCode::decompose`]
/// and then only ever have entries negated, so the alphabet is closed under
/// every operation exposed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TernaryCode([Trit; CODE_LEN]);

impl TernaryCode {
    /// The all-zero code
    pub const ZERO: TernaryCode = TernaryCode([0; CODE_LEN]);

    /// Build a code from raw trits.
    ///
    /// Returns `None` if any entry lies outside {-1, 0, +1}.
    pub fn new(trits: [Trit; CODE_LEN]) -> Option<Self> {
        trits
            .iter()
            .all(|t| (-1..=1).contains(t))
            .then_some(Self(trits))
    }

    /// Base-3 decomposition of a byte, least significant digit first.
    ///
    /// `code[i] = floor(d / 3^i) mod 3 - 1`
    ///
    /// ```text
    /// d = 5  →  base 3: 000012  →  digits (LSD first) [2, 1, 0, 0, 0, 0]
    ///                          →  code               [1, 0, -1, -1, -1, -1]
    /// ```
    pub fn decompose(byte: u8) -> Self {
        let mut trits = [0; CODE_LEN];
        let mut d = byte as u16;
        for trit in trits.iter_mut() {
            *trit = (d % 3) as Trit - 1;
            d /= 3;
        }
        Self(trits)
    }

    /// Sum of all six trits (the code's DC contribution)
    pub fn sum(&self) -> i32 {
        self.0.iter().map(|&t| t as i32).sum()
    }

    /// Negate every trit
    pub fn inverted(&self) -> Self {
        Self(self.0.map(|t| -t))
    }

    /// The trits in transmission order
    pub fn trits(&self) -> &[Trit; CODE_LEN] {
        &self.0
    }

    pub(crate) fn trits_mut(&mut self) -> &mut [Trit; CODE_LEN] {
        &mut self.0
    }
}

impl fmt::Display for TernaryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, t) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", t)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose_zero() {
        let code = TernaryCode::decompose(0);
        assert_eq!(code.trits(), &[-1, -1, -1, -1, -1, -1]);
        assert_eq!(code.sum(), -6);
    }

    #[test]
    fn test_decompose_max() {
        // 255 = 100110 in base 3 (MSD first)
        let code = TernaryCode::decompose(255);
        assert_eq!(code.trits(), &[-1, 0, 0, -1, -1, 0]);
    }

    #[test]
    fn test_decompose_all_bytes_in_alphabet() {
        for d in 0..=255u8 {
            let code = TernaryCode::decompose(d);
            assert!(code.trits().iter().all(|t| (-1..=1).contains(t)), "byte {}", d);
        }
    }

    #[test]
    fn test_decompose_is_injective() {
        let mut seen = std::collections::HashSet::new();
        for d in 0..=255u8 {
            assert!(seen.insert(TernaryCode::decompose(d)));
        }
    }

    #[test]
    fn test_inverted() {
        let code = TernaryCode::decompose(5);
        assert_eq!(code.inverted().trits(), &[-1, 0, 1, 1, 1, 1]);
        assert_eq!(code.inverted().sum(), -code.sum());
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(TernaryCode::new([0, 0, 2, 0, 0, 0]).is_none());
        assert_eq!(TernaryCode::new([0; CODE_LEN]), Some(TernaryCode::ZERO));
    }

    #[test]
    fn test_display() {
        assert_eq!(TernaryCode::decompose(0).to_string(), "[-1, -1, -1, -1, -1, -1]");
    }

    #[test]
    fn test_error_kind() {
        let err = LineCodeError::WrongLengthFor8B6T { length: 7 };
        assert_eq!(err.kind(), FailureKind::WrongLengthFor8B6T);
        assert!(err.is_validation());
        assert!(!LineCodeError::UnknownScheme("NRZ".into()).is_validation());
        assert!(err.to_string().contains("divisible by 8"));
    }
}
