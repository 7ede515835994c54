//! Stagehand Core - catalog types and navigation logic.
//!
//! This crate is shared by every Stagehand component:
//! - `storefront` - Public catalog API consumed by the marketing site and the LINE portal
//! - `cli` - Migrations, catalog seeding and maintenance commands
//!
//! # Architecture
//!
//! The core crate performs no I/O of its own. Persistence is reached through
//! the [`catalog::CatalogReader`] trait, which the storefront implements over
//! `PostgreSQL` and [`catalog::InMemoryCatalog`] implements over plain vectors.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, publish status and slug paths
//! - [`catalog`] - Path resolution, breadcrumbs, the navigation menu and product projection

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod types;

pub use types::*;
