//! Errors raised by subject trackers.
//!
//! Misuse of the chain (wrong call order, ambiguous wrappers, renaming) is a
//! programmer error in the calling code. A failed verification is the one
//! error the chain exists to produce.

use avow_types::{Classification, MessageCatalog};
use thiserror::Error;

use crate::sequencing::SequencingViolation;

/// A transition was attempted from a state that does not allow it.
///
/// The rendered text is always the violation's fixed sentence followed by the
/// improper-use suffix; [`SequencingError::violation`] identifies which rule
/// was broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{}", render_violation(.violation, &MessageCatalog::default()))]
pub struct SequencingError {
    violation: SequencingViolation,
}

impl SequencingError {
    #[must_use]
    pub const fn new(violation: SequencingViolation) -> Self {
        Self { violation }
    }

    #[must_use]
    pub const fn violation(self) -> SequencingViolation {
        self.violation
    }

    #[must_use]
    pub fn render(self, catalog: &MessageCatalog) -> String {
        render_violation(&self.violation, catalog)
    }
}

/// A predicate rejected the subject while the tracker was in immediate-throw
/// mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct VerificationError {
    pub(crate) classification: Classification,
    pub(crate) subject_name: Option<String>,
    pub(crate) subject_type: &'static str,
    pub(crate) verification: &'static str,
    pub(crate) message: String,
}

impl VerificationError {
    /// Argument, operation result, or test value. Unknown subjects report as
    /// arguments.
    #[must_use]
    pub fn classification(&self) -> Classification {
        self.classification
    }

    #[must_use]
    pub fn subject_name(&self) -> Option<&str> {
        self.subject_name.as_deref()
    }

    #[must_use]
    pub fn subject_type(&self) -> &'static str {
        self.subject_type
    }

    /// Name of the predicate that failed, e.g. `be_greater_than`.
    #[must_use]
    pub fn verification(&self) -> &'static str {
        self.verification
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AvowError {
    #[error(transparent)]
    Sequencing(#[from] SequencingError),
    #[error("{}", render_ambiguous(.field_names, &MessageCatalog::default()))]
    AmbiguousSubject { field_names: Vec<&'static str> },
    #[error("{}", render_renamed(.requested, &MessageCatalog::default()))]
    Renamed { requested: String },
    #[error("{parameter} {reason}")]
    InvalidArgument {
        parameter: &'static str,
        reason: &'static str,
    },
    #[error(transparent)]
    Verification(#[from] VerificationError),
}

impl AvowError {
    /// Render with overridden message fragments. Only misuse errors carry the
    /// improper-use suffix; other variants render as their `Display`.
    #[must_use]
    pub fn render(&self, catalog: &MessageCatalog) -> String {
        match self {
            Self::Sequencing(err) => err.render(catalog),
            Self::AmbiguousSubject { field_names } => render_ambiguous(field_names, catalog),
            Self::Renamed { requested } => render_renamed(requested, catalog),
            Self::InvalidArgument { .. } | Self::Verification(_) => self.to_string(),
        }
    }

    #[must_use]
    pub fn is_misuse(&self) -> bool {
        matches!(
            self,
            Self::Sequencing(_) | Self::AmbiguousSubject { .. } | Self::Renamed { .. }
        )
    }

    #[must_use]
    pub fn sequencing_violation(&self) -> Option<SequencingViolation> {
        match self {
            Self::Sequencing(err) => Some(err.violation()),
            _ => None,
        }
    }
}

fn render_violation(violation: &SequencingViolation, catalog: &MessageCatalog) -> String {
    catalog.improper_use(violation.sentence())
}

fn render_ambiguous(field_names: &[&'static str], catalog: &MessageCatalog) -> String {
    let sentence = format!(
        "Provided value is a wrapper with multiple fields ({}); wrap exactly one field so the subject can be identified.",
        field_names.join(", ")
    );
    catalog.improper_use(&sentence)
}

fn render_renamed(requested: &str, catalog: &MessageCatalog) -> String {
    let sentence = format!(
        "Attempted to name a tracked subject '{requested}', but a subject cannot be renamed once it is being tracked."
    );
    catalog.improper_use(&sentence)
}
