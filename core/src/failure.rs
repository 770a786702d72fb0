//! Projection of recording-mode trackers into plain failure records.

use serde::{Deserialize, Serialize};

use crate::error::AvowError;
use crate::tracker::{SubjectTracker, VerificationFailure};

/// A subject name paired with the message of the verification it failed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelfValidationFailure {
    name: String,
    message: String,
}

impl SelfValidationFailure {
    #[must_use]
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Read access to what a tracker recorded, independent of its value type.
///
/// Lets trackers of different value types be projected together as
/// `&dyn RecordedSubject`.
pub trait RecordedSubject {
    fn subject_name(&self) -> Option<&str>;
    fn verification_failure(&self) -> Option<&VerificationFailure>;
}

impl<T> RecordedSubject for SubjectTracker<T> {
    fn subject_name(&self) -> Option<&str> {
        SubjectTracker::subject_name(self)
    }

    fn verification_failure(&self) -> Option<&VerificationFailure> {
        SubjectTracker::verification_failure(self)
    }
}

/// Project one tracker. `Ok(None)` when it recorded no failure.
///
/// The tracker must be named with a non-blank name.
pub fn to_self_validation_failure<R>(
    tracker: &R,
) -> Result<Option<SelfValidationFailure>, AvowError>
where
    R: RecordedSubject + ?Sized,
{
    let name = match tracker.subject_name() {
        None => {
            return Err(AvowError::InvalidArgument {
                parameter: "tracker",
                reason: "has no subject name",
            });
        }
        Some(name) if name.trim().is_empty() => {
            return Err(AvowError::InvalidArgument {
                parameter: "tracker",
                reason: "has a subject name that is whitespace",
            });
        }
        Some(name) => name,
    };

    Ok(tracker
        .verification_failure()
        .map(|failure| SelfValidationFailure::new(name, failure.message())))
}

/// Project many trackers, in order, skipping those without a failure.
///
/// Items convert into `Option<&R>`, so both `&tracker` and `None` are
/// accepted; any `None` is rejected before anything is projected.
pub fn to_self_validation_failures<'a, I, R>(
    trackers: I,
) -> Result<Vec<SelfValidationFailure>, AvowError>
where
    I: IntoIterator,
    I::Item: Into<Option<&'a R>>,
    R: RecordedSubject + ?Sized + 'a,
{
    let trackers = trackers
        .into_iter()
        .map(Into::into)
        .collect::<Option<Vec<&R>>>()
        .ok_or(AvowError::InvalidArgument {
            parameter: "trackers",
            reason: "contains a missing element",
        })?;

    let mut failures = Vec::new();
    for tracker in trackers {
        if let Some(failure) = to_self_validation_failure(tracker)? {
            failures.push(failure);
        }
    }
    tracing::debug!(count = failures.len(), "projected self-validation failures");
    Ok(failures)
}
