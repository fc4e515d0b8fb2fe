//! # Core Catalog Engine
//!
//! Everything behind the documentation browser. It knows nothing about how
//! the catalog is rendered.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │        service          │
//!                    │  actor: update(state)   │
//!                    └───────────┬─────────────┘
//!                                │ spawns
//!                    ┌───────────▼─────────────┐
//!                    │  scan  (CatalogSource)  │  only module doing I/O
//!                    └───────────┬─────────────┘
//!                                │ ScannedDir
//!                    ┌───────────▼─────────────┐
//!                    │ builder ◄── classify    │  pure
//!                    └───────────┬─────────────┘
//!                                │ Vec<Category>
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │   state    │      │   filter   │      │   stats    │
//!     │ (snapshot) │      │  (search)  │      │  (counts)  │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`classify`]: filename rules and category/document display tables
//! - [`catalog`]: `Document` and `Category`
//! - [`scan`]: directory walk with per-file failure tolerance
//! - [`builder`]: listing → sorted category tree
//! - [`filter`]: recursive search over a tree
//! - [`stats`]: document/category counts
//! - [`state`] / [`action`]: published state and its reducer
//! - [`service`]: the actor that ties it together

pub mod action;
pub mod builder;
pub mod catalog;
pub mod classify;
pub mod config;
pub mod error;
pub mod filter;
pub mod preview;
pub mod scan;
pub mod service;
pub mod source;
pub mod state;
pub mod stats;

// Re-export commonly used types for convenience
pub use catalog::{Category, ContentType, Document};
pub use error::CatalogError;
pub use service::CatalogHandle;
pub use source::{CatalogSource, FsSource};
pub use state::{CatalogState, LoadPhase};
