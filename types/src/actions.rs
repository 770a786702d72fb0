//! Action flags recorded on a subject tracker.
//!
//! A tracker accumulates facts about what has happened to it as it moves
//! through a fluent chain. The set is monotonic: [`Actions`] exposes no way to
//! clear a flag once it is set.

use std::fmt;

/// One fact about a tracker's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Action {
    Classified = 1,
    Named = 1 << 1,
    PutIntoRecordingMode = 1 << 2,
    /// Committed to single-value verification.
    Musted = 1 << 3,
    /// Committed to per-element verification.
    Eached = 1 << 4,
    VerifiedAtLeastOnce = 1 << 5,
    EachedValueVerifiedForIteration = 1 << 6,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::Classified,
        Action::Named,
        Action::PutIntoRecordingMode,
        Action::Musted,
        Action::Eached,
        Action::VerifiedAtLeastOnce,
        Action::EachedValueVerifiedForIteration,
    ];

    #[must_use]
    pub const fn bit(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Classified => "Classified",
            Self::Named => "Named",
            Self::PutIntoRecordingMode => "PutIntoRecordingMode",
            Self::Musted => "Musted",
            Self::Eached => "Eached",
            Self::VerifiedAtLeastOnce => "VerifiedAtLeastOnce",
            Self::EachedValueVerifiedForIteration => "EachedValueVerifiedForIteration",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Monotonic set of [`Action`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Actions(u8);

impl Actions {
    pub const NONE: Actions = Actions(0);

    /// Actions that belong to immediate-throw mode and can never coexist with
    /// [`Action::PutIntoRecordingMode`].
    pub const COMMITTED: Actions = Actions(
        Action::Musted.bit()
            | Action::Eached.bit()
            | Action::VerifiedAtLeastOnce.bit()
            | Action::EachedValueVerifiedForIteration.bit(),
    );

    /// Build a set from raw bits. Bits that do not name an [`Action`] are dropped.
    #[must_use]
    pub const fn from_bits_truncate(bits: u8) -> Self {
        let mut known = 0;
        let mut i = 0;
        while i < Action::ALL.len() {
            known |= Action::ALL[i].bit();
            i += 1;
        }
        Self(bits & known)
    }

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn contains(self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    #[must_use]
    pub const fn intersects(self, other: Actions) -> bool {
        self.0 & other.0 != 0
    }

    /// Whether every action in `other` is also in `self`.
    #[must_use]
    pub const fn is_superset_of(self, other: Actions) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn with(self, action: Action) -> Self {
        Self(self.0 | action.bit())
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = Action> {
        Action::ALL
            .into_iter()
            .filter(move |action| self.contains(*action))
    }
}

impl From<Action> for Actions {
    fn from(action: Action) -> Self {
        Self(action.bit())
    }
}

impl FromIterator<Action> for Actions {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Actions::with)
    }
}

impl fmt::Display for Actions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("None");
        }
        for (index, action) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(" | ")?;
            }
            f.write_str(action.name())?;
        }
        Ok(())
    }
}
