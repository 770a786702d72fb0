//! Entry points: how a raw value becomes a tracked subject.
//!
//! Any value can enter a chain through the [`Subject`] extension trait. The
//! [`subject!`](crate::subject) macro wraps a variable together with its name
//! so the name is derived instead of repeated. Inherent methods with the same
//! names on [`SubjectTracker`], [`Each`](crate::Each), [`Named`] and
//! [`FieldSet`] take precedence over the trait. Trackers reached through a
//! reference or a `Named` wrapper are rejected when the subject is created.

use avow_types::Classification;

use crate::error::AvowError;
use crate::tracker::SubjectTracker;

/// Extension methods that start a chain from a raw value.
pub trait Subject: Sized {
    fn as_argument(self, name: Option<&str>) -> Result<SubjectTracker<Self>, AvowError> {
        SubjectTracker::classify(self, Classification::Argument, name.map(str::to_owned))
    }

    fn as_operation_result(self, name: Option<&str>) -> Result<SubjectTracker<Self>, AvowError> {
        SubjectTracker::classify(
            self,
            Classification::OperationResult,
            name.map(str::to_owned),
        )
    }

    fn as_test_value(self, name: Option<&str>) -> Result<SubjectTracker<Self>, AvowError> {
        SubjectTracker::classify(self, Classification::TestValue, name.map(str::to_owned))
    }

    fn for_recording(self, name: Option<&str>) -> Result<SubjectTracker<Self>, AvowError> {
        SubjectTracker::classify(self, Classification::Unknown, name.map(str::to_owned))?
            .for_recording(None)
    }

    fn must(self) -> Result<SubjectTracker<Self>, AvowError> {
        SubjectTracker::classify(self, Classification::Unknown, None)?.must()
    }
}

impl<T> Subject for T {}

/// A value paired with the name of the variable it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Named<T> {
    name: &'static str,
    value: T,
}

impl<T> Named<T> {
    #[must_use]
    pub const fn new(name: &'static str, value: T) -> Self {
        Self { name, value }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn into_value(self) -> T {
        self.value
    }

    fn classify(
        self,
        classification: Classification,
        name: Option<&str>,
    ) -> Result<SubjectTracker<T>, AvowError> {
        let name = name.unwrap_or(self.name).to_owned();
        SubjectTracker::classify(self.value, classification, Some(name))
    }

    pub fn as_argument(self, name: Option<&str>) -> Result<SubjectTracker<T>, AvowError> {
        self.classify(Classification::Argument, name)
    }

    pub fn as_operation_result(self, name: Option<&str>) -> Result<SubjectTracker<T>, AvowError> {
        self.classify(Classification::OperationResult, name)
    }

    pub fn as_test_value(self, name: Option<&str>) -> Result<SubjectTracker<T>, AvowError> {
        self.classify(Classification::TestValue, name)
    }

    pub fn for_recording(self, name: Option<&str>) -> Result<SubjectTracker<T>, AvowError> {
        self.classify(Classification::Unknown, name)?.for_recording(None)
    }

    pub fn must(self) -> Result<SubjectTracker<T>, AvowError> {
        self.classify(Classification::Unknown, None)?.must()
    }
}

/// A wrapper around more than one variable. It cannot identify a single
/// subject, so every entry point on it fails and lists the field names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    field_names: Vec<&'static str>,
}

impl FieldSet {
    #[must_use]
    pub fn new(field_names: Vec<&'static str>) -> Self {
        Self { field_names }
    }

    #[must_use]
    pub fn field_names(&self) -> &[&'static str] {
        &self.field_names
    }

    fn ambiguous(self) -> AvowError {
        tracing::debug!(fields = ?self.field_names, "rejected ambiguous subject wrapper");
        AvowError::AmbiguousSubject {
            field_names: self.field_names,
        }
    }

    pub fn as_argument(self, _name: Option<&str>) -> Result<SubjectTracker<Self>, AvowError> {
        Err(self.ambiguous())
    }

    pub fn as_operation_result(
        self,
        _name: Option<&str>,
    ) -> Result<SubjectTracker<Self>, AvowError> {
        Err(self.ambiguous())
    }

    pub fn as_test_value(self, _name: Option<&str>) -> Result<SubjectTracker<Self>, AvowError> {
        Err(self.ambiguous())
    }

    pub fn for_recording(self, _name: Option<&str>) -> Result<SubjectTracker<Self>, AvowError> {
        Err(self.ambiguous())
    }

    pub fn must(self) -> Result<SubjectTracker<Self>, AvowError> {
        Err(self.ambiguous())
    }
}

/// Wrap one or more variables so the subject name is derived from the
/// variable name.
///
/// ```
/// use avow_core::subject;
///
/// let x = 5;
/// let tracker = subject!(x).must().unwrap();
/// assert_eq!(tracker.subject_name(), Some("x"));
///
/// let tracker = subject!(limit: 10).as_argument(None).unwrap();
/// assert_eq!(tracker.subject_name(), Some("limit"));
///
/// let (a, b) = (1, 2);
/// assert!(subject!(a, b).must().is_err());
/// ```
#[macro_export]
macro_rules! subject {
    ($field:ident) => {
        $crate::Named::new(stringify!($field), $field)
    };
    ($field:ident : $value:expr) => {
        $crate::Named::new(stringify!($field), $value)
    };
    ($($field:ident $(: $value:expr)?),+ $(,)?) => {{
        $( let _ = &$crate::__subject_field_value!($field $(: $value)?); )+
        $crate::FieldSet::new(vec![$(stringify!($field)),+])
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __subject_field_value {
    ($field:ident) => {
        $field
    };
    ($field:ident : $value:expr) => {
        $value
    };
}
