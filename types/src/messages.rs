//! Fixed message fragments and the catalog that renders them.
//!
//! Misuse errors are a fixed sentence followed by the improper-use suffix,
//! joined by [`MESSAGE_SEPARATOR`]. The defaults here are the text every error
//! `Display`s with. A [`MessageCatalog`] loaded from TOML can override the
//! suffix and separator when a caller renders errors explicitly.
//!
//! ```toml
//! improper_use_suffix = "Fix the call site."
//! separator = " "
//! ```

use serde::Deserialize;
use thiserror::Error;

pub const IMPROPER_USE_OF_FRAMEWORK: &str =
    "The assertion framework is being used improperly; see method documentation for proper usage.";

pub const MESSAGE_SEPARATOR: &str = "  ";

#[derive(Debug, Error)]
pub enum MessageCatalogError {
    #[error("failed to parse message catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("improper_use_suffix must not be empty")]
    EmptySuffix,
    #[error("separator must not be empty")]
    EmptySeparator,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMessageCatalog {
    #[serde(default)]
    improper_use_suffix: Option<String>,
    #[serde(default)]
    separator: Option<String>,
}

/// Validated message overrides.
///
/// Invariant: both fragments are non-empty. Missing keys fall back to the
/// defaults, so an empty TOML document yields [`MessageCatalog::default`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawMessageCatalog")]
pub struct MessageCatalog {
    improper_use_suffix: String,
    separator: String,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self {
            improper_use_suffix: IMPROPER_USE_OF_FRAMEWORK.to_owned(),
            separator: MESSAGE_SEPARATOR.to_owned(),
        }
    }
}

impl TryFrom<RawMessageCatalog> for MessageCatalog {
    type Error = MessageCatalogError;

    fn try_from(raw: RawMessageCatalog) -> Result<Self, Self::Error> {
        let defaults = Self::default();
        let improper_use_suffix = match raw.improper_use_suffix {
            Some(suffix) if suffix.trim().is_empty() => {
                return Err(MessageCatalogError::EmptySuffix);
            }
            Some(suffix) => suffix,
            None => defaults.improper_use_suffix,
        };
        let separator = match raw.separator {
            Some(separator) if separator.is_empty() => {
                return Err(MessageCatalogError::EmptySeparator);
            }
            Some(separator) => separator,
            None => defaults.separator,
        };
        Ok(Self {
            improper_use_suffix,
            separator,
        })
    }
}

impl MessageCatalog {
    pub fn from_toml_str(source: &str) -> Result<Self, MessageCatalogError> {
        let raw: RawMessageCatalog = toml::from_str(source)?;
        Self::try_from(raw)
    }

    #[must_use]
    pub fn improper_use_suffix(&self) -> &str {
        &self.improper_use_suffix
    }

    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// `sentence` + separator + improper-use suffix.
    #[must_use]
    pub fn improper_use(&self, sentence: &str) -> String {
        let mut message = String::with_capacity(
            sentence.len() + self.separator.len() + self.improper_use_suffix.len(),
        );
        message.push_str(sentence);
        message.push_str(&self.separator);
        message.push_str(&self.improper_use_suffix);
        message
    }
}
