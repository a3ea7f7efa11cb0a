//! Shopifake Core - Shared types library.
//!
//! This crate provides the tenant types used across Shopifake components:
//! - `storefront` - Subdomain-routed storefront server
//! - `cli` - Operator tools for diagnosing tenant resolution
//!
//! # Architecture
//!
//! The core crate contains only types and pure parsing - no I/O, no HTTP
//! clients. Anything that talks to the sites backend lives in the storefront
//! crate.
//!
//! # Modules
//!
//! - [`types`] - Site records, slugs, statuses, site configuration and drafts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
