//! Tenant slug type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Slug`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// The input string is empty.
    #[error("slug cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("slug must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `[a-z0-9-.]`.
    #[error("slug contains invalid character {0:?}")]
    InvalidCharacter(char),
    /// A dot-separated label is empty (leading, trailing or doubled dot).
    #[error("slug contains an empty label")]
    EmptyLabel,
}

/// A tenant slug, the subdomain a storefront is served on.
///
/// ## Constraints
///
/// - Length: 1-253 characters (DNS name limit)
/// - Characters: ASCII letters, digits, `-` and `.` (letters are lowercased)
/// - No empty dot-separated labels
///
/// ## Examples
///
/// ```
/// use shopifake_core::Slug;
///
/// assert_eq!(Slug::parse("Acme").unwrap().as_str(), "acme");
/// assert!(Slug::parse("eu.acme").is_ok());
///
/// assert!(Slug::parse("").is_err());
/// assert!(Slug::parse("acme/../admin").is_err());
/// assert!(Slug::parse(".acme").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Maximum length of a slug.
    pub const MAX_LENGTH: usize = 253;

    /// Parse a `Slug` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, too long, contains a character
    /// that is not URL- and hostname-safe, or has an empty label.
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        if s.is_empty() {
            return Err(SlugError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(SlugError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(c) = s
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '.'))
        {
            return Err(SlugError::InvalidCharacter(c));
        }

        if s.split('.').any(str::is_empty) {
            return Err(SlugError::EmptyLabel);
        }

        Ok(Self(s.to_ascii_lowercase()))
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Slug` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
