//! Core types for Shopifake.
//!
//! This module provides type-safe wrappers for tenant concepts.

pub mod draft;
pub mod id;
pub mod site;
pub mod site_config;
pub mod slug;
pub mod status;

pub use draft::{DEFAULT_DRAFT_COLOR, SiteDraft};
pub use id::*;
pub use site::Site;
pub use site_config::{ConfigParseError, SiteConfig, VALUE_COUNT, Values};
pub use slug::{Slug, SlugError};
pub use status::SiteStatus;
