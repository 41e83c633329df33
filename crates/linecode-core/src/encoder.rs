//! Encoder dispatch
//!
//! ```text
//! ┌──────────┐     ┌────────────┐     ┌──────────────┐
//! │ &str     │────►│ validate   │────►│ LineEncoder  │────► ConversionResult
//! │ + Scheme │     │            │     │ 2B1Q / 8B6T  │      (signal + steps)
//! └──────────┘     └────────────┘     └──────┬───────┘
//!                                            │ record
//!                                            ▼
//!                                     ┌──────────────┐
//!                                     │TraceRecorder │
//!                                     └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use linecode_core::{encode, Scheme};
//!
//! let result = encode("0001", Scheme::TwoB1Q).unwrap();
//! assert_eq!(result.signal, vec![-1, -3]);
//! assert_eq!(result.steps[0].title, "Input Analysis");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::analysis::BalanceProfile;
use crate::eight_b_six_t::ByteEncoder;
use crate::scheme::Scheme;
use crate::trace::{Step, TraceRecorder};
use crate::two_b_one_q::PairEncoder;
use crate::types::{Level, LineCodeError, LineCodeResult};
use crate::validate::{validate, BitSequence, ValidInput};

/// Encoded signal together with its step-by-step trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Scheme that produced the signal
    pub scheme: Scheme,
    /// Levels (2B1Q) or concatenated ternary codes (8B6T), in input order
    pub signal: Vec<Level>,
    /// Trace steps, in recording order
    pub steps: Vec<Step>,
    /// DC balance profile of `signal`, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<BalanceProfile>,
}

impl ConversionResult {
    /// An empty result for `scheme`
    pub fn empty(scheme: Scheme) -> Self {
        Self {
            scheme,
            signal: Vec::new(),
            steps: Vec::new(),
            profile: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.signal.is_empty()
    }

    /// Attach the balance profile of the signal
    pub fn with_profile(mut self) -> Self {
        self.profile = Some(BalanceProfile::compute(&self.signal));
        self
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json(&self) -> LineCodeResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| LineCodeError::Serialization(e.to_string()))
    }

    /// Serialize as YAML
    pub fn to_yaml(&self) -> LineCodeResult<String> {
        serde_yaml::to_string(self).map_err(|e| LineCodeError::Serialization(e.to_string()))
    }
}

/// The trait both line coders implement
pub trait LineEncoder: Debug + Send + Sync {
    /// Scheme implemented by this encoder
    fn scheme(&self) -> Scheme;

    /// Encode `bits`, appending trace steps to `recorder`.
    ///
    /// Empty input yields an empty signal and records nothing.
    fn encode_into(&self, bits: &BitSequence, recorder: &mut TraceRecorder) -> Vec<Level>;

    /// Encode `bits` with a fresh recorder
    fn encode(&self, bits: &BitSequence) -> ConversionResult {
        let mut recorder = TraceRecorder::new();
        let signal = self.encode_into(bits, &mut recorder);
        ConversionResult {
            scheme: self.scheme(),
            signal,
            steps: recorder.into_steps(),
            profile: None,
        }
    }
}

/// Create the encoder for a scheme
pub fn encoder_for(scheme: Scheme) -> Box<dyn LineEncoder> {
    match scheme {
        Scheme::TwoB1Q => Box::new(PairEncoder::new()),
        Scheme::EightB6T => Box::new(ByteEncoder::new()),
    }
}

/// Validate and encode `input` with `scheme`.
pub fn encode(input: &str, scheme: Scheme) -> LineCodeResult<ConversionResult> {
    let valid = validate(input, scheme).map_err(|e| {
        tracing::debug!(%scheme, error = %e, "input rejected");
        e
    })?;
    Ok(encode_valid(&valid))
}

/// Encode already validated input, recording the full trace
pub fn encode_valid(input: &ValidInput) -> ConversionResult {
    encoder_for(input.scheme()).encode(input.bits())
}

/// Encode already validated input without recording a trace
pub fn encode_untraced(input: &ValidInput) -> ConversionResult {
    let mut recorder = TraceRecorder::disabled();
    let signal = encoder_for(input.scheme()).encode_into(input.bits(), &mut recorder);
    ConversionResult {
        scheme: input.scheme(),
        signal,
        steps: Vec::new(),
        profile: None,
    }
}
