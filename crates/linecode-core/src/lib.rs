//! # Line Coding Library
//!
//! This crate encodes binary bit strings into multi-level line signals with
//! two classic block codes, and narrates every decision it takes along the
//! way so the conversion can be explained step by step.
//!
//! ## Overview
//!
//! - **2B1Q**: each pair of bits becomes one of four levels {-3, -1, +1, +3},
//!   chosen by the sign of the previous level
//! - **8B6T**: each byte becomes six trits {-1, 0, +1} by base-3
//!   decomposition, followed by two DC balance corrections driven by the
//!   running sum and the previous byte's code
//!
//! ## Signal Flow
//!
//! ```text
//! "0001..." → validate → BitSequence → PairEncoder (2B1Q) ─┐
//!                                    → ByteEncoder (8B6T) ─┴→ signal + trace steps
//! ```
//!
//! Both encoders are left-to-right folds over an explicit carry state
//! ([`PairState`], [`DcState`]); nothing persists between calls.
//!
//! ## Example
//!
//! ```rust
//! use linecode_core::{encode, BalanceProfile, Scheme};
//!
//! let result = encode("0000000000000000", Scheme::EightB6T).unwrap();
//! assert_eq!(result.signal.len(), 12);
//!
//! let last = result.steps.last().unwrap();
//! assert_eq!(last.title, "Final Output for Byte 2");
//! assert_eq!(last.balance.as_ref().unwrap().sum, 0);
//!
//! let profile = BalanceProfile::compute(&result.signal);
//! assert_eq!(profile.peak_excursion, 6);
//! ```

pub mod analysis;
pub mod config;
pub mod eight_b_six_t;
pub mod encoder;
pub mod logging;
pub mod scheme;
pub mod trace;
pub mod two_b_one_q;
pub mod types;
pub mod validate;

// Re-export main types
pub use analysis::{BalanceProfile, LevelHistogram};
pub use config::{ConfigError, LinecodeConfig, OutputFormat};
pub use eight_b_six_t::{ByteEncoder, ByteEncoding, DcState};
pub use encoder::{
    encode, encode_untraced, encode_valid, encoder_for, ConversionResult, LineEncoder,
};
pub use scheme::{Scheme, SchemeInfo};
pub use trace::{Balance, Step, TraceRecorder, VIOLATION_THRESHOLD};
pub use two_b_one_q::{PairEncoder, PairEncoding, PairState};
pub use types::{FailureKind, Level, LineCodeError, LineCodeResult, TernaryCode, Trit};
pub use validate::{validate, BitSequence, ValidInput};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::encoder::{encode, ConversionResult, LineEncoder};
    pub use crate::scheme::Scheme;
    pub use crate::trace::{Balance, Step};
    pub use crate::types::{Level, LineCodeError, TernaryCode};
    pub use crate::validate::validate;
}
