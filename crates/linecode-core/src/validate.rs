//! Input validation
//!
//! Turns raw text into a [`ValidInput`]: a [`BitSequence`] that is known to
//! split into whole symbols of the selected [`Scheme`]. Characters are checked
//! before length, so `"0a1"` under 2B1Q reports the bad character rather than
//! the odd length.

use std::fmt;

use crate::scheme::Scheme;
use crate::types::{LineCodeError, LineCodeResult};

/// An ordered, immutable sequence of bits (each 0 or 1)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitSequence(Vec<u8>);

impl BitSequence {
    /// Number of bits
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the empty sequence
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw bits in input order
    pub fn bits(&self) -> &[u8] {
        &self.0
    }

    /// Non-overlapping, order-preserving symbols of `width` bits.
    ///
    /// A trailing partial symbol is skipped; validated input never has one.
    pub fn symbols(&self, width: usize) -> impl Iterator<Item = &[u8]> + '_ {
        self.0.chunks_exact(width)
    }
}

impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit == 0 { "0" } else { "1" })?;
        }
        Ok(())
    }
}

/// Bits confirmed compatible with a scheme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidInput {
    scheme: Scheme,
    bits: BitSequence,
}

impl ValidInput {
    /// Scheme this input was validated for
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// The validated bits
    pub fn bits(&self) -> &BitSequence {
        &self.bits
    }

    /// Number of whole symbols in the input
    pub fn symbol_count(&self) -> usize {
        self.bits.len() / self.scheme.bits_per_symbol()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}

/// Validate `input` for `scheme`.
///
/// Empty input is accepted and encodes to an empty signal with an empty trace.
pub fn validate(input: &str, scheme: Scheme) -> LineCodeResult<ValidInput> {
    let bits = parse_bits(input)?;
    scheme.check_length(bits.len())?;
    Ok(ValidInput { scheme, bits })
}

/// Parse a string of `'0'`/`'1'` characters, reporting the first offender.
pub fn parse_bits(input: &str) -> LineCodeResult<BitSequence> {
    input
        .chars()
        .enumerate()
        .map(|(position, c)| match c {
            '0' => Ok(0),
            '1' => Ok(1),
            found => Err(LineCodeError::InvalidCharacter { position, found }),
        })
        .collect::<LineCodeResult<Vec<u8>>>()
        .map(BitSequence)
}
