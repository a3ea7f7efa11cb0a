//! Site lifecycle status.

use serde::{Deserialize, Serialize};

/// Publication status of a tenant site.
///
/// Only [`SiteStatus::Active`] sites are visible on their subdomain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SiteStatus {
    /// Created by an owner but not yet published.
    #[default]
    Draft,
    /// Published and reachable by shoppers.
    Active,
    /// Taken offline by the owner or an operator.
    Disabled,
}

impl SiteStatus {
    /// Whether shoppers may see the site.
    #[must_use]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for SiteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "DRAFT"),
            Self::Active => write!(f, "ACTIVE"),
            Self::Disabled => write!(f, "DISABLED"),
        }
    }
}

impl std::str::FromStr for SiteStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(Self::Draft),
            "ACTIVE" => Ok(Self::Active),
            "DISABLED" => Ok(Self::Disabled),
            _ => Err(format!("invalid site status: {s}")),
        }
    }
}
