//! Fluent verification chains for defensive checks.
//!
//! A value enters a chain through an entry point ([`Subject`] or the
//! [`subject!`] macro), is committed to verification with `must()` (and
//! optionally `each()`), and is then checked by the predicates on [`Verify`]:
//!
//! ```
//! use avow_core::{Subject, Verify, subject};
//!
//! # fn main() -> Result<(), avow_core::AvowError> {
//! let port = 8080u16;
//! subject!(port).as_argument(None)?.must()?.be_greater_than(1024)?;
//!
//! let tags = vec!["a".to_owned(), "b".to_owned()];
//! tags.as_argument(Some("tags"))?.must()?.each()?.not_be_blank()?;
//! # Ok(())
//! # }
//! ```
//!
//! Every chain call checks the tracker's sequencing rules first. Calling
//! things out of order (a predicate before `must()`, `and()` before any
//! predicate, classifying twice) is reported as [`AvowError::Sequencing`].
//! Trackers put into recording mode with `for_recording` capture the first
//! failure instead of returning it; [`to_self_validation_failures`] collects
//! those captures.

mod entry;
mod error;
mod failure;
mod predicates;
pub mod sequencing;
mod tracker;

pub use avow_types::{
    Action, Actions, Classification, MessageCatalog, MessageCatalogError, SubjectType,
};
pub use entry::{FieldSet, Named, Subject};
pub use error::{AvowError, SequencingError, VerificationError};
pub use failure::{
    RecordedSubject, SelfValidationFailure, to_self_validation_failure,
    to_self_validation_failures,
};
pub use predicates::{Emptiable, Nullable, Verifiable, Verify};
pub use sequencing::{SequencingViolation, Transition};
pub use tracker::{Each, SubjectTracker, VerificationFailure};
