use std::fmt;

use serde::{Deserialize, Serialize};

/// What role the subject plays at the call site.
///
/// Drives which error a failed verification reports: a bad argument, a bad
/// operation result, or a failed test expectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Classification {
    #[default]
    Unknown,
    Argument,
    OperationResult,
    TestValue,
}

impl Classification {
    /// Noun used when describing the subject in a failure message.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unknown => "value",
            Self::Argument => "argument",
            Self::OperationResult => "operation result",
            Self::TestValue => "test value",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
