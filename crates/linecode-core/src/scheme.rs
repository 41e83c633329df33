//! Line coding scheme catalogue
//!
//! ```text
//! ┌────────┬──────────────┬─────────────┬──────────────────────────┐
//! │ Scheme │ Input symbol │ Output      │ State carried            │
//! ├────────┼──────────────┼─────────────┼──────────────────────────┤
//! │ 2B1Q   │ 2 bits       │ 1 level     │ previous level           │
//! │ 8B6T   │ 8 bits       │ 6 trits     │ running sum, prev. code  │
//! └────────┴──────────────┴─────────────┴──────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::LineCodeError;

/// Information about a scheme for display and education
/// Note: Not Deserialize since it contains static references
#[derive(Debug, Clone, Serialize)]
pub struct SchemeInfo {
    /// Short name (e.g., "2B1Q")
    pub name: &'static str,
    /// Full name
    pub full_name: &'static str,
    /// Brief description
    pub description: &'static str,
    /// Output alphabet
    pub alphabet: &'static [i8],
    /// Key characteristics for education
    pub characteristics: &'static [&'static str],
    /// Where the code is used
    pub usage: &'static str,
}

/// Selectable line coding scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scheme {
    /// 2 binary, 1 quaternary
    #[serde(rename = "2B1Q")]
    TwoB1Q,
    /// 8 binary, 6 ternary
    #[serde(rename = "8B6T")]
    EightB6T,
}

impl Default for Scheme {
    fn default() -> Self {
        Scheme::TwoB1Q
    }
}

impl Scheme {
    /// All supported schemes
    pub fn all() -> &'static [Scheme] {
        &[Scheme::TwoB1Q, Scheme::EightB6T]
    }

    /// Canonical short name
    pub fn name(&self) -> &'static str {
        match self {
            Scheme::TwoB1Q => "2B1Q",
            Scheme::EightB6T => "8B6T",
        }
    }

    /// Number of input bits consumed per symbol
    pub fn bits_per_symbol(&self) -> usize {
        match self {
            Scheme::TwoB1Q => 2,
            Scheme::EightB6T => 8,
        }
    }

    /// Number of output samples produced per symbol
    pub fn outputs_per_symbol(&self) -> usize {
        match self {
            Scheme::TwoB1Q => 1,
            Scheme::EightB6T => crate::types::CODE_LEN,
        }
    }

    /// Expected signal length for an input of `bit_len` bits
    pub fn output_len(&self, bit_len: usize) -> usize {
        bit_len / self.bits_per_symbol() * self.outputs_per_symbol()
    }

    /// Check that an input length splits into whole symbols.
    pub fn check_length(&self, length: usize) -> Result<(), LineCodeError> {
        if length % self.bits_per_symbol() == 0 {
            return Ok(());
        }
        Err(match self {
            Scheme::TwoB1Q => LineCodeError::WrongLengthFor2B1Q { length },
            Scheme::EightB6T => LineCodeError::WrongLengthFor8B6T { length },
        })
    }

    /// Educational description of this scheme
    pub fn info(&self) -> SchemeInfo {
        match self {
            Scheme::TwoB1Q => SchemeInfo {
                name: "2B1Q",
                full_name: "2 Binary, 1 Quaternary",
                description: "Each pair of bits selects one of four levels; the sign \
                              of the previous level decides which half of the table is used.",
                alphabet: &[-3, -1, 1, 3],
                characteristics: &[
                    "Halves the symbol rate relative to NRZ",
                    "Level choice depends on the sign of the previous level",
                    "Initial state is neutral (treated as not positive)",
                ],
                usage: "ISDN basic rate interface (U interface), HDSL",
            },
            Scheme::EightB6T => SchemeInfo {
                name: "8B6T",
                full_name: "8 Binary, 6 Ternary",
                description: "Each byte is decomposed into six base-3 digits offset \
                              into {-1, 0, +1}, then corrected to limit DC bias.",
                alphabet: &[-1, 0, 1],
                characteristics: &[
                    "Positive-sum codes have all +1 digits flipped to -1",
                    "Consecutive same-signed codes trigger full inversion",
                    "Running sum beyond ±3 is flagged as a DC balance violation",
                ],
                usage: "100BASE-T4 Fast Ethernet",
            },
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = LineCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace(['-', '_'], "").as_str() {
            "2B1Q" => Ok(Scheme::TwoB1Q),
            "8B6T" => Ok(Scheme::EightB6T),
            _ => Err(LineCodeError::UnknownScheme(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scheme() {
        assert_eq!("2B1Q".parse::<Scheme>().unwrap(), Scheme::TwoB1Q);
        assert_eq!("8b6t".parse::<Scheme>().unwrap(), Scheme::EightB6T);
        assert_eq!("8-B-6-T".parse::<Scheme>().unwrap(), Scheme::EightB6T);
        assert!(matches!(
            "MLT-3".parse::<Scheme>(),
            Err(LineCodeError::UnknownScheme(_))
        ));
    }

    #[test]
    fn test_display_round_trip() {
        for scheme in Scheme::all() {
            assert_eq!(scheme.to_string().parse::<Scheme>().unwrap(), *scheme);
        }
    }

    #[test]
    fn test_check_length() {
        assert!(Scheme::TwoB1Q.check_length(0).is_ok());
        assert!(Scheme::TwoB1Q.check_length(4).is_ok());
        assert!(matches!(
            Scheme::TwoB1Q.check_length(3),
            Err(LineCodeError::WrongLengthFor2B1Q { length: 3 })
        ));
        assert!(Scheme::EightB6T.check_length(16).is_ok());
        assert!(matches!(
            Scheme::EightB6T.check_length(12),
            Err(LineCodeError::WrongLengthFor8B6T { length: 12 })
        ));
    }

    #[test]
    fn test_output_len() {
        assert_eq!(Scheme::TwoB1Q.output_len(10), 5);
        assert_eq!(Scheme::EightB6T.output_len(24), 18);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Scheme::EightB6T).unwrap(), "\"8B6T\"");
        let parsed: Scheme = serde_yaml::from_str("2B1Q").unwrap();
        assert_eq!(parsed, Scheme::TwoB1Q);
    }

    #[test]
    fn test_info_alphabet() {
        assert_eq!(Scheme::TwoB1Q.info().alphabet, &[-3, -1, 1, 3]);
        assert_eq!(Scheme::EightB6T.info().alphabet, &[-1, 0, 1]);
    }
}
