//! # Catalog State
//!
//! Everything a UI needs to render the documentation browser. This module
//! holds data only; transitions live in `action.rs`.
//!
//! ```text
//! CatalogState
//! ├── root_categories: Arc<Vec<Category>>  // last successful scan
//! ├── is_loading: bool                     // a scan is in flight
//! ├── error_message: Option<String>        // last scan failed
//! ├── requested_generation: u64            // newest load issued
//! └── settled_generation: u64              // newest load published
//! ```
//!
//! Cloning is cheap (the tree sits behind an `Arc`), so the service hands
//! out whole snapshots instead of guarded references.

use std::borrow::Cow;
use std::sync::Arc;

use serde::Serialize;

use crate::core::catalog::Category;
use crate::core::filter::filter_categories;
use crate::core::stats::{Statistics, statistics};

/// Where the load state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogState {
    pub root_categories: Arc<Vec<Category>>,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub requested_generation: u64,
    pub settled_generation: u64,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> LoadPhase {
        if self.is_loading {
            LoadPhase::Loading
        } else if self.settled_generation == 0 {
            LoadPhase::Idle
        } else if self.error_message.is_some() {
            LoadPhase::Failed
        } else {
            LoadPhase::Loaded
        }
    }

    pub fn filtered_categories(&self, query: &str) -> Cow<'_, [Category]> {
        filter_categories(&self.root_categories, query)
    }

    pub fn statistics(&self) -> Statistics {
        statistics(&self.root_categories)
    }
}
