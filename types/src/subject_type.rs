use std::any::type_name;
use std::fmt;

/// Declared type of a tracked subject.
///
/// Captured from the generic parameter when a value enters a chain, so it is
/// always the static type the caller wrote, never a runtime discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubjectType {
    name: &'static str,
}

impl SubjectType {
    #[must_use]
    pub fn of<T: ?Sized>() -> Self {
        Self {
            name: type_name::<T>(),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        self.name
    }
}

impl fmt::Display for SubjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
