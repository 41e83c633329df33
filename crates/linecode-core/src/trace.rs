//! Step-by-step conversion trace
//!
//! Every encoder narrates its work as an ordered list of [`Step`]s. A step
//! carries human-readable lines, optionally a snapshot of the signal emitted
//! so far, and optionally a DC balance diagnostic. Downstream viewers render
//! these as numbered cards and waveform plots.
//!
//! The [`TraceRecorder`] is a passive accumulator: it never inspects what it
//! stores and has no influence on the encoded signal.

use serde::{Deserialize, Serialize};

use crate::types::Level;

/// Absolute running sum above which a balance diagnostic is flagged
pub const VIOLATION_THRESHOLD: i32 = 3;

/// DC balance diagnostic attached to a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    /// Running sum of all trits after this step
    pub sum: i32,
    /// `|sum| > VIOLATION_THRESHOLD`
    pub is_violation: bool,
    /// Correction applied at this step, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correction: Option<String>,
}

impl Balance {
    /// Diagnose a running sum
    pub fn measure(sum: i32) -> Self {
        Self {
            sum,
            is_violation: sum.abs() > VIOLATION_THRESHOLD,
            correction: None,
        }
    }

    /// Attach a correction note
    pub fn with_correction(mut self, note: impl Into<String>) -> Self {
        self.correction = Some(note.into());
        self
    }
}

/// One recorded step of a conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Title (e.g., "Converting Pair 1")
    pub title: String,
    /// Description lines, in display order
    pub content: Vec<String>,
    /// Signal emitted so far (if applicable)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Level>>,
    /// Balance diagnostic (if applicable)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<Balance>,
}

impl Step {
    /// Create a new step with no content
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: Vec::new(),
            data: None,
            balance: None,
        }
    }

    /// Append a description line
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.content.push(line.into());
        self
    }

    /// Append several description lines
    pub fn with_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content.extend(lines.into_iter().map(Into::into));
        self
    }

    /// Attach a signal snapshot
    pub fn with_data(mut self, data: Vec<Level>) -> Self {
        self.data = Some(data);
        self
    }

    /// Attach a balance diagnostic
    pub fn with_balance(mut self, balance: Balance) -> Self {
        self.balance = Some(balance);
        self
    }
}

/// Ordered accumulator of steps
#[derive(Debug, Clone)]
pub struct TraceRecorder {
    steps: Vec<Step>,
    enabled: bool,
}

impl Default for TraceRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceRecorder {
    /// Create a recorder that keeps every step
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            enabled: true,
        }
    }

    /// Create a recorder that drops every step
    pub fn disabled() -> Self {
        Self {
            steps: Vec::new(),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record a step.
    ///
    /// The step is built lazily so a disabled recorder skips the formatting.
    pub fn record_with(&mut self, build: impl FnOnce() -> Step) {
        if !self.enabled {
            return;
        }
        let step = build();
        tracing::trace!(
            index = self.steps.len() + 1,
            title = %step.title,
            balance = ?step.balance.as_ref().map(|b| b.sum),
            "trace step"
        );
        self.steps.push(step);
    }

    /// Record an already built step
    pub fn record(&mut self, step: Step) {
        self.record_with(|| step);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps recorded so far
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Consume the recorder, yielding its steps
    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_threshold() {
        assert!(!Balance::measure(3).is_violation);
        assert!(!Balance::measure(-3).is_violation);
        assert!(Balance::measure(4).is_violation);
        assert!(Balance::measure(-6).is_violation);
    }

    #[test]
    fn test_step_builder() {
        let step = Step::new("Input Analysis")
            .with_line("Binary Input: 0001")
            .with_lines(["Length: 4 bits", "Number of pairs: 2"])
            .with_data(vec![-1]);
        assert_eq!(step.content.len(), 3);
        assert_eq!(step.data, Some(vec![-1]));
        assert!(step.balance.is_none());
    }

    #[test]
    fn test_recorder_order() {
        let mut recorder = TraceRecorder::new();
        recorder.record(Step::new("first"));
        recorder.record(Step::new("second"));
        let titles: Vec<_> = recorder.steps().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["first", "second"]);
    }

    #[test]
    fn test_disabled_recorder_skips_build() {
        let mut recorder = TraceRecorder::disabled();
        let mut built = false;
        recorder.record_with(|| {
            built = true;
            Step::new("never")
        });
        assert!(!built);
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_json_field_names() {
        let step = Step::new("Final Output for Byte 1")
            .with_balance(Balance::measure(-6).with_correction("note"));
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["balance"]["isViolation"], true);
        assert_eq!(json["balance"]["correction"], "note");
        assert!(json.get("data").is_none());
    }
}
