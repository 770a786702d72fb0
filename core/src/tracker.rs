//! The subject tracker threaded through a fluent chain.
//!
//! A tracker is created once, when a raw value enters the chain, and then
//! moved through every call: each transition consumes it, checks the
//! sequencing rules, and hands back the same tracker with more actions set.

use std::any::type_name;

use avow_types::{Action, Actions, Classification, SubjectType};

use crate::entry::Named;
use crate::error::{AvowError, SequencingError, VerificationError};
use crate::sequencing::{self, SequencingViolation, Transition};

/// Failure captured by a recording-mode verification instead of being raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationFailure {
    subject_name: Option<String>,
    message: String,
}

impl VerificationFailure {
    #[must_use]
    pub fn subject_name(&self) -> Option<&str> {
        self.subject_name.as_deref()
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// One value under inspection.
///
/// `Default` produces an uninitialized tracker with no subject type; every
/// transition on it is a sequencing error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectTracker<T> {
    value: Option<T>,
    subject_type: Option<SubjectType>,
    subject_name: Option<String>,
    classification: Classification,
    actions: Actions,
    failure: Option<VerificationFailure>,
}

impl<T> Default for SubjectTracker<T> {
    fn default() -> Self {
        Self {
            value: None,
            subject_type: None,
            subject_name: None,
            classification: Classification::Unknown,
            actions: Actions::NONE,
            failure: None,
        }
    }
}

impl<T> SubjectTracker<T> {
    /// Start tracking a raw value. `Named` is set iff a name is known.
    ///
    /// A value that is itself a tracker, directly, by reference, or inside a
    /// `Named`, is rejected as already tracked.
    pub(crate) fn classify(
        value: T,
        classification: Classification,
        subject_name: Option<String>,
    ) -> Result<Self, AvowError> {
        if is_tracked_type::<T>() {
            tracing::debug!(subject_type = type_name::<T>(), "rejected classification of a tracker");
            return Err(AvowError::Sequencing(SequencingError::new(
                SequencingViolation::AlreadyTracked,
            )));
        }
        let mut actions = Actions::from(Action::Classified);
        if subject_name.is_some() {
            actions = actions.with(Action::Named);
        }
        let tracker = Self {
            value: Some(value),
            subject_type: Some(SubjectType::of::<T>()),
            subject_name,
            classification,
            actions,
            failure: None,
        };
        tracing::trace!(
            subject_type = %SubjectType::of::<T>(),
            %classification,
            actions = %tracker.actions,
            "tracking subject"
        );
        Ok(tracker)
    }

    #[must_use]
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    #[must_use]
    pub fn into_value(self) -> Option<T> {
        self.value
    }

    #[must_use]
    pub fn subject_type(&self) -> Option<SubjectType> {
        self.subject_type
    }

    #[must_use]
    pub fn subject_name(&self) -> Option<&str> {
        self.subject_name.as_deref()
    }

    #[must_use]
    pub fn classification(&self) -> Classification {
        self.classification
    }

    #[must_use]
    pub fn actions(&self) -> Actions {
        self.actions
    }

    #[must_use]
    pub fn has(&self, action: Action) -> bool {
        self.actions.contains(action)
    }

    #[must_use]
    pub fn verification_failure(&self) -> Option<&VerificationFailure> {
        self.failure.as_ref()
    }

    fn transition(
        mut self,
        transition: Transition,
        action: Option<Action>,
    ) -> Result<Self, AvowError> {
        sequencing::check(self.actions, self.subject_type, transition)?;
        if let Some(action) = action {
            self.actions = self.actions.with(action);
        }
        tracing::trace!(%transition, actions = %self.actions, "subject tracker transition");
        Ok(self)
    }

    /// Always fails: a tracker has already been classified.
    pub fn as_argument(self, _name: Option<&str>) -> Result<Self, AvowError> {
        self.transition(Transition::Classify, None)
    }

    /// Always fails: a tracker has already been classified.
    pub fn as_operation_result(self, _name: Option<&str>) -> Result<Self, AvowError> {
        self.transition(Transition::Classify, None)
    }

    /// Always fails: a tracker has already been classified.
    pub fn as_test_value(self, _name: Option<&str>) -> Result<Self, AvowError> {
        self.transition(Transition::Classify, None)
    }

    /// Switch to recording mode: failed verifications are captured on the
    /// tracker instead of being returned as errors.
    ///
    /// A tracker already carries its subject, so passing a name is an error.
    pub fn for_recording(self, name: Option<&str>) -> Result<Self, AvowError> {
        sequencing::check(self.actions, self.subject_type, Transition::ForRecording)?;
        if let Some(requested) = name {
            tracing::debug!(requested, "rejected rename of tracked subject");
            return Err(AvowError::Renamed {
                requested: requested.to_owned(),
            });
        }
        self.transition(Transition::ForRecording, Some(Action::PutIntoRecordingMode))
    }

    /// Commit to single-value verification.
    pub fn must(self) -> Result<Self, AvowError> {
        self.transition(Transition::Must, Some(Action::Musted))
    }

    /// Commit to verifying every element of the subject.
    pub fn each(self) -> Result<Each<T>, AvowError> {
        self.transition(Transition::Each, Some(Action::Eached))
            .map(Each)
    }

    /// Pass-through that allows another predicate after a successful one.
    pub fn and(self) -> Result<Self, AvowError> {
        self.transition(Transition::And, None)
    }

    /// Apply a predicate to the whole subject.
    ///
    /// `check` returns `Some(reason)` when the subject fails. In recording
    /// mode the first failure is captured and later checks are skipped.
    pub(crate) fn verify<F>(
        mut self,
        verification: &'static str,
        check: F,
    ) -> Result<Self, AvowError>
    where
        F: FnOnce(&T) -> Option<String>,
    {
        sequencing::check(self.actions, self.subject_type, Transition::Verify)?;
        if self.failure.is_some() {
            return Ok(self);
        }
        let Some(value) = self.value.as_ref() else {
            return Err(uninitialized(Transition::Verify));
        };
        match check(value) {
            None => {
                if !self.has(Action::PutIntoRecordingMode) {
                    self.actions = self.actions.with(Action::VerifiedAtLeastOnce);
                }
                tracing::trace!(verification, actions = %self.actions, "verification passed");
                Ok(self)
            }
            Some(reason) => self.fail(verification, &reason),
        }
    }

    fn fail(mut self, verification: &'static str, reason: &str) -> Result<Self, AvowError> {
        if self.has(Action::PutIntoRecordingMode) {
            let message = self.describe(self.classification, reason);
            tracing::debug!(verification, %message, "recorded verification failure");
            self.failure = Some(VerificationFailure {
                subject_name: self.subject_name.clone(),
                message,
            });
            return Ok(self);
        }
        let classification = match self.classification {
            Classification::Unknown => Classification::Argument,
            other => other,
        };
        let message = self.describe(classification, reason);
        Err(AvowError::Verification(VerificationError {
            classification,
            subject_name: self.subject_name,
            subject_type: self.subject_type.map_or("unknown", SubjectType::name),
            verification,
            message,
        }))
    }

    fn describe(&self, classification: Classification, reason: &str) -> String {
        let subject_type = self.subject_type.map_or("unknown", SubjectType::name);
        match &self.subject_name {
            Some(name) => format!(
                "Provided {} (name: '{name}', type: {subject_type}) {reason}.",
                classification.label()
            ),
            None => format!(
                "Provided {} (type: {subject_type}) {reason}.",
                classification.label()
            ),
        }
    }
}

/// Whether `T` is a tracker, seen through any number of references and
/// `Named` wrappers.
fn is_tracked_type<T: ?Sized>() -> bool {
    let tracker = generic_path(type_name::<SubjectTracker<()>>());
    let each = generic_path(type_name::<Each<()>>());
    let named = generic_path(type_name::<Named<()>>());
    let mut name = type_name::<T>();
    loop {
        if let Some(rest) = name.strip_prefix('&') {
            name = rest.strip_prefix("mut ").unwrap_or(rest);
        } else if let Some(inner) = opened(name, named) {
            name = inner;
        } else {
            return opened(name, tracker).is_some() || opened(name, each).is_some();
        }
    }
}

/// `path` without its generic arguments.
fn generic_path(path: &str) -> &str {
    path.split_once('<').map_or(path, |(base, _)| base)
}

/// The text after `path<` when `name` is an instantiation of `path`.
fn opened<'a>(name: &'a str, path: &str) -> Option<&'a str> {
    name.strip_prefix(path)?.strip_prefix('<')
}

fn uninitialized(transition: Transition) -> AvowError {
    AvowError::Sequencing(SequencingError::new(
        SequencingViolation::UninitializedTracker { transition },
    ))
}

/// A tracker committed to per-element verification.
///
/// Predicates called on an `Each` apply to every element of the subject; the
/// first failing element (by position) is the one reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Each<T>(SubjectTracker<T>);

impl<T> Each<T> {
    #[must_use]
    pub fn tracker(&self) -> &SubjectTracker<T> {
        &self.0
    }

    #[must_use]
    pub fn into_tracker(self) -> SubjectTracker<T> {
        self.0
    }

    #[must_use]
    pub fn actions(&self) -> Actions {
        self.0.actions
    }

    /// Always fails: the subject is already tracked.
    pub fn as_argument(self, _name: Option<&str>) -> Result<Self, AvowError> {
        self.0.as_argument(None).map(Each)
    }

    /// Always fails: the subject is already tracked.
    pub fn as_operation_result(self, _name: Option<&str>) -> Result<Self, AvowError> {
        self.0.as_operation_result(None).map(Each)
    }

    /// Always fails: the subject is already tracked.
    pub fn as_test_value(self, _name: Option<&str>) -> Result<Self, AvowError> {
        self.0.as_test_value(None).map(Each)
    }

    /// Always fails: an `Each` is committed to immediate-throw mode.
    pub fn for_recording(self, name: Option<&str>) -> Result<Self, AvowError> {
        self.0.for_recording(name).map(Each)
    }

    /// Always fails: an `Each` is already committed.
    pub fn must(self) -> Result<Self, AvowError> {
        self.0.must().map(Each)
    }

    /// Always fails: an `Each` is already committed via `each()`.
    pub fn each(self) -> Result<Self, AvowError> {
        self.0.each()
    }

    pub fn and(self) -> Result<Self, AvowError> {
        self.0.and().map(Each)
    }

    /// Apply a predicate to every element.
    pub(crate) fn verify_each<E, F>(
        self,
        verification: &'static str,
        check: F,
    ) -> Result<Self, AvowError>
    where
        for<'a> &'a T: IntoIterator<Item = &'a E>,
        F: Fn(&E) -> Option<String>,
    {
        let mut tracker = self.0;
        sequencing::check(tracker.actions, tracker.subject_type, Transition::VerifyEach)?;
        let Some(value) = tracker.value.as_ref() else {
            return Err(uninitialized(Transition::VerifyEach));
        };
        let failure = value
            .into_iter()
            .enumerate()
            .find_map(|(index, element)| check(element).map(|reason| (index, reason)));
        if let Some((index, reason)) = failure {
            let reason = format!("contains an element at index {index} that {reason}");
            return tracker.fail(verification, &reason).map(Each);
        }
        tracker.actions = tracker
            .actions
            .with(Action::EachedValueVerifiedForIteration)
            .with(Action::VerifiedAtLeastOnce);
        tracing::trace!(verification, actions = %tracker.actions, "element verification passed");
        Ok(Each(tracker))
    }
}
