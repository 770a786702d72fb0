//! Core domain types for avow.
//!
//! Pure types with no IO and minimal dependencies: the action bit-set a
//! subject tracker accumulates, the subject classification, the declared
//! subject type, and the message catalog used to render misuse errors.

mod actions;
mod classification;
pub mod messages;
mod subject_type;

pub use actions::{Action, Actions};
pub use classification::Classification;
pub use messages::{
    IMPROPER_USE_OF_FRAMEWORK, MESSAGE_SEPARATOR, MessageCatalog, MessageCatalogError,
};
pub use subject_type::SubjectType;
