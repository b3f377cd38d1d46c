//! Vinsara Core - Shared types library.
//!
//! This crate provides common types used across the Vinsara components:
//! - `storefront` - Cart store, catalog and account view state
//! - `cli` - Command-line tools for inspecting client storage
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
