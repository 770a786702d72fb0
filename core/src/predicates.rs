//! The verification predicates.
//!
//! Every predicate is defined once, on [`Verify`], and works both on a
//! [`SubjectTracker`] (checking the whole subject) and on an [`Each`]
//! (checking every element). [`Verifiable`] is the seam between the two.

use std::any::{TypeId, type_name};
use std::fmt::Debug;

use crate::error::AvowError;
use crate::sequencing::{self, Transition};
use crate::tracker::{Each, SubjectTracker};

mod sealed {
    pub trait Sealed {}

    impl<T> Sealed for crate::tracker::SubjectTracker<T> {}
    impl<T> Sealed for crate::tracker::Each<T> {}
}

/// Something a predicate can be applied to, yielding values of type `V`.
///
/// Sealed: the predicate set is closed.
pub trait Verifiable<V>: sealed::Sealed + Sized {
    /// Whether a predicate may run now, without running one.
    fn check_sequencing(&self) -> Result<(), AvowError>;

    /// Run `check` against the subject. `check` returns `Some(reason)` on
    /// failure, phrased to follow "Provided value ...", e.g. `"is not positive"`.
    fn verify_with<F>(self, verification: &'static str, check: F) -> Result<Self, AvowError>
    where
        F: Fn(&V) -> Option<String>;
}

impl<T> Verifiable<T> for SubjectTracker<T> {
    fn check_sequencing(&self) -> Result<(), AvowError> {
        sequencing::check(self.actions(), self.subject_type(), Transition::Verify)?;
        Ok(())
    }

    fn verify_with<F>(self, verification: &'static str, check: F) -> Result<Self, AvowError>
    where
        F: Fn(&T) -> Option<String>,
    {
        self.verify(verification, check)
    }
}

impl<C, E> Verifiable<E> for Each<C>
where
    for<'a> &'a C: IntoIterator<Item = &'a E>,
{
    fn check_sequencing(&self) -> Result<(), AvowError> {
        let tracker = self.tracker();
        sequencing::check(tracker.actions(), tracker.subject_type(), Transition::VerifyEach)?;
        Ok(())
    }

    fn verify_with<F>(self, verification: &'static str, check: F) -> Result<Self, AvowError>
    where
        F: Fn(&E) -> Option<String>,
    {
        self.verify_each(verification, check)
    }
}

/// Types with a "no value" state checked by [`Verify::be_none`].
pub trait Nullable {
    fn is_none_value(&self) -> bool;
}

impl<T> Nullable for Option<T> {
    fn is_none_value(&self) -> bool {
        self.is_none()
    }
}

/// Types with an "empty" state checked by [`Verify::be_empty`].
pub trait Emptiable {
    fn is_empty_value(&self) -> bool;
}

impl Emptiable for String {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl Emptiable for &str {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Emptiable for Vec<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Emptiable for &[T] {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Emptiable for Option<T> {
    fn is_empty_value(&self) -> bool {
        self.is_none()
    }
}

/// The predicates. Implemented for every [`Verifiable`].
pub trait Verify<V>: Verifiable<V> {
    fn be_equal_to(self, expected: V) -> Result<Self, AvowError>
    where
        V: PartialEq + Debug,
    {
        self.verify_with("be_equal_to", move |actual| {
            (*actual != expected).then(|| {
                format!("is not equal to the comparison value; expected {expected:?}, found {actual:?}")
            })
        })
    }

    fn not_be_equal_to(self, unexpected: V) -> Result<Self, AvowError>
    where
        V: PartialEq + Debug,
    {
        self.verify_with("not_be_equal_to", move |actual| {
            (*actual == unexpected)
                .then(|| format!("is equal to the comparison value {unexpected:?}"))
        })
    }

    fn be_greater_than(self, bound: V) -> Result<Self, AvowError>
    where
        V: PartialOrd + Debug,
    {
        self.verify_with("be_greater_than", move |actual| {
            (*actual <= bound)
                .then(|| format!("is {actual:?}, which is not greater than {bound:?}"))
        })
    }

    fn be_less_than(self, bound: V) -> Result<Self, AvowError>
    where
        V: PartialOrd + Debug,
    {
        self.verify_with("be_less_than", move |actual| {
            (*actual >= bound).then(|| format!("is {actual:?}, which is not less than {bound:?}"))
        })
    }

    /// Inclusive on both ends. An inverted range is a caller error, reported
    /// only once the chain is in a state that allows a predicate.
    fn be_in_range(self, lower: V, upper: V) -> Result<Self, AvowError>
    where
        V: PartialOrd + Debug,
    {
        self.check_sequencing()?;
        if lower > upper {
            return Err(AvowError::InvalidArgument {
                parameter: "lower",
                reason: "is greater than upper",
            });
        }
        self.verify_with("be_in_range", move |actual| {
            (*actual < lower || *actual > upper).then(|| {
                format!("is {actual:?}, which is not within the range [{lower:?}, {upper:?}]")
            })
        })
    }

    fn be_default(self) -> Result<Self, AvowError>
    where
        V: Default + PartialEq + Debug,
    {
        self.verify_with("be_default", |actual| {
            (*actual != V::default()).then(|| format!("is {actual:?}, not the default value"))
        })
    }

    fn not_be_default(self) -> Result<Self, AvowError>
    where
        V: Default + PartialEq + Debug,
    {
        self.verify_with("not_be_default", |actual| {
            (*actual == V::default()).then(|| "is the default value".to_owned())
        })
    }

    fn be_true(self) -> Result<Self, AvowError>
    where
        V: PartialEq<bool>,
    {
        self.verify_with("be_true", |actual| {
            (*actual != true).then(|| "is false".to_owned())
        })
    }

    fn be_false(self) -> Result<Self, AvowError>
    where
        V: PartialEq<bool>,
    {
        self.verify_with("be_false", |actual| {
            (*actual != false).then(|| "is true".to_owned())
        })
    }

    fn be_none(self) -> Result<Self, AvowError>
    where
        V: Nullable,
    {
        self.verify_with("be_none", |actual| {
            (!actual.is_none_value()).then(|| "is not none".to_owned())
        })
    }

    fn not_be_none(self) -> Result<Self, AvowError>
    where
        V: Nullable,
    {
        self.verify_with("not_be_none", |actual| {
            actual.is_none_value().then(|| "is none".to_owned())
        })
    }

    fn be_empty(self) -> Result<Self, AvowError>
    where
        V: Emptiable,
    {
        self.verify_with("be_empty", |actual| {
            (!actual.is_empty_value()).then(|| "is not empty".to_owned())
        })
    }

    fn not_be_empty(self) -> Result<Self, AvowError>
    where
        V: Emptiable,
    {
        self.verify_with("not_be_empty", |actual| {
            actual.is_empty_value().then(|| "is empty".to_owned())
        })
    }

    /// Rejects empty and whitespace-only text.
    fn not_be_blank(self) -> Result<Self, AvowError>
    where
        V: AsRef<str>,
    {
        self.verify_with("not_be_blank", |actual| {
            let text = actual.as_ref();
            if text.is_empty() {
                Some("is empty".to_owned())
            } else if text.trim().is_empty() {
                Some("is whitespace".to_owned())
            } else {
                None
            }
        })
    }

    fn contain_element<E>(self, element: E) -> Result<Self, AvowError>
    where
        for<'a> &'a V: IntoIterator<Item = &'a E>,
        E: PartialEq + Debug,
    {
        self.verify_with("contain_element", move |actual| {
            (!actual.into_iter().any(|candidate| *candidate == element))
                .then(|| format!("does not contain the element {element:?}"))
        })
    }

    /// Whether the subject's type is exactly `U`. Useful from generic code,
    /// where the concrete type is only known to the caller.
    fn be_of_type<U: 'static>(self) -> Result<Self, AvowError>
    where
        V: 'static,
    {
        self.verify_with("be_of_type", |_| {
            (TypeId::of::<V>() != TypeId::of::<U>()).then(|| {
                format!(
                    "is of type {}, not of the expected type {}",
                    type_name::<V>(),
                    type_name::<U>()
                )
            })
        })
    }
}

impl<S, V> Verify<V> for S where S: Verifiable<V> {}
