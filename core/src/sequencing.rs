//! Sequencing rules for subject trackers.
//!
//! [`check`] is the single authority on which chain operation is legal from
//! which tracker state. It looks only at the action flags and whether the
//! subject type is known; it never mutates anything.

use std::fmt;

use avow_types::{Action, Actions, SubjectType};

use crate::error::SequencingError;

/// A chain operation that moves a tracker between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// `as_argument`, `as_operation_result`, `as_test_value`.
    Classify,
    ForRecording,
    Must,
    Each,
    And,
    /// A predicate applied to the whole subject.
    Verify,
    /// A predicate applied to every element of the subject.
    VerifyEach,
}

impl Transition {
    pub const ALL: [Transition; 7] = [
        Transition::Classify,
        Transition::ForRecording,
        Transition::Must,
        Transition::Each,
        Transition::And,
        Transition::Verify,
        Transition::VerifyEach,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Classify => "classify",
            Self::ForRecording => "for_recording",
            Self::Must => "must",
            Self::Each => "each",
            Self::And => "and",
            Self::Verify => "verify",
            Self::VerifyEach => "verify_each",
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which sequencing rule a rejected transition broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequencingViolation {
    /// Classification was requested for a value that is already a tracker.
    AlreadyTracked,
    /// The tracker was never initialized with a subject type.
    UninitializedTracker { transition: Transition },
    RecordingAfterCommitment,
    MustAfterCommitment,
    EachWithoutMust,
    EachAfterEach,
    AndWithoutVerification,
    VerifyWithoutCommitment,
    VerifyAfterEach,
    VerifyEachWithoutEach,
}

impl SequencingViolation {
    /// Fixed sentence describing the violation. The improper-use suffix is
    /// appended when the error is rendered.
    #[must_use]
    pub const fn sentence(self) -> &'static str {
        match self {
            Self::AlreadyTracked => {
                "Attempted to classify a value that is already being tracked; a subject is classified exactly once, when it enters the chain."
            }
            Self::UninitializedTracker { transition } => match transition {
                Transition::Classify => {
                    "Attempted to classify a tracker that was never initialized with a subject."
                }
                Transition::ForRecording => {
                    "Called for_recording() on a tracker that was never initialized with a subject type."
                }
                Transition::Must => {
                    "Called must() on a tracker that was never initialized with a subject type."
                }
                Transition::Each => {
                    "Called each() on a tracker that was never initialized with a subject type."
                }
                Transition::And => {
                    "Called and() on a tracker that was never initialized with a subject type."
                }
                Transition::Verify | Transition::VerifyEach => {
                    "Attempted to verify a tracker that was never initialized with a subject type."
                }
            },
            Self::RecordingAfterCommitment => {
                "Called for_recording() on a tracker that is already in recording mode or has already been committed to verification."
            }
            Self::MustAfterCommitment => {
                "Called must() on a tracker that is in recording mode or has already been committed to verification."
            }
            Self::EachWithoutMust => {
                "Called each() on a tracker that has not been committed via must()."
            }
            Self::EachAfterEach => "Called each() on a tracker that has already been committed via each().",
            Self::AndWithoutVerification => {
                "Called and() on a tracker that has not been committed via must() and successfully verified at least once."
            }
            Self::VerifyWithoutCommitment => {
                "Attempted to verify a tracker that has neither been committed via must() nor put into recording mode."
            }
            Self::VerifyAfterEach => {
                "Attempted to verify the whole subject of a tracker that has been committed via each(); verify its elements instead."
            }
            Self::VerifyEachWithoutEach => {
                "Attempted to verify the elements of a tracker that has not been committed via must() and each()."
            }
        }
    }
}

/// Decide whether `transition` is legal from the given tracker state.
pub fn check(
    actions: Actions,
    subject_type: Option<SubjectType>,
    transition: Transition,
) -> Result<(), SequencingError> {
    let violation = match transition {
        // Classification is only ever legal on a raw value.
        Transition::Classify => Some(SequencingViolation::AlreadyTracked),
        _ if subject_type.is_none() => {
            Some(SequencingViolation::UninitializedTracker { transition })
        }
        Transition::ForRecording => (actions.contains(Action::PutIntoRecordingMode)
            || actions.intersects(Actions::COMMITTED))
        .then_some(SequencingViolation::RecordingAfterCommitment),
        Transition::Must => (actions.contains(Action::PutIntoRecordingMode)
            || actions.intersects(Actions::COMMITTED))
        .then_some(SequencingViolation::MustAfterCommitment),
        Transition::Each => {
            if !actions.contains(Action::Musted) {
                Some(SequencingViolation::EachWithoutMust)
            } else if actions.contains(Action::Eached) {
                Some(SequencingViolation::EachAfterEach)
            } else {
                None
            }
        }
        Transition::And => (!actions.contains(Action::Musted)
            || !actions.contains(Action::VerifiedAtLeastOnce))
        .then_some(SequencingViolation::AndWithoutVerification),
        Transition::Verify => {
            if actions.contains(Action::Eached) {
                Some(SequencingViolation::VerifyAfterEach)
            } else if actions.contains(Action::Musted)
                || actions.contains(Action::PutIntoRecordingMode)
            {
                None
            } else {
                Some(SequencingViolation::VerifyWithoutCommitment)
            }
        }
        Transition::VerifyEach => (!actions.contains(Action::Musted)
            || !actions.contains(Action::Eached))
        .then_some(SequencingViolation::VerifyEachWithoutEach),
    };

    match violation {
        Some(violation) => {
            tracing::debug!(
                %transition,
                %actions,
                ?violation,
                "rejected subject tracker transition"
            );
            Err(SequencingError::new(violation))
        }
        None => Ok(()),
    }
}
