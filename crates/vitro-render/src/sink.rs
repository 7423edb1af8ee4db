#![forbid(unsafe_code)]

//! The narrow stage-attribute write interface.
//!
//! The sync pipeline mutates exactly the filter stages it owns, through
//! [`StageSink::set_stage_attr`] and nothing else. This confines the
//! mutation surface and lets tests drive the full pipeline against
//! [`RecordingSink`] instead of a live host.

use crate::filter::StageId;

/// Write access to the filter stages of one mounted surface.
pub trait StageSink {
    /// Set one attribute on one stage.
    ///
    /// Stage identities are stable; implementations map them to whatever
    /// handle the host uses (a DOM element, a test record).
    fn set_stage_attr(&mut self, stage: StageId, name: &str, value: &str);
}

/// A single recorded attribute write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageWrite {
    pub stage: StageId,
    pub name: String,
    pub value: String,
}

/// A [`StageSink`] that records writes for inspection.
///
/// The standard test double for the sync pipeline: scenario tests assert on
/// the exact write stream instead of a rendered result.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    /// Every write, in order.
    pub writes: Vec<StageWrite>,
}

impl RecordingSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all recorded writes.
    pub fn clear(&mut self) {
        self.writes.clear();
    }

    /// The most recent value written for `(stage, name)`, if any.
    #[must_use]
    pub fn last(&self, stage: StageId, name: &str) -> Option<&str> {
        self.writes
            .iter()
            .rev()
            .find(|w| w.stage == stage && w.name == name)
            .map(|w| w.value.as_str())
    }

    /// All writes that touched `stage`, in order.
    #[must_use]
    pub fn writes_for(&self, stage: StageId) -> Vec<&StageWrite> {
        self.writes.iter().filter(|w| w.stage == stage).collect()
    }
}

impl StageSink for RecordingSink {
    fn set_stage_attr(&mut self, stage: StageId, name: &str, value: &str) {
        self.writes.push(StageWrite {
            stage,
            name: name.to_string(),
            value: value.to_string(),
        });
    }
}
