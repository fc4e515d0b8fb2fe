//! # Actions
//!
//! Everything that can happen to the catalog becomes an `Action`.
//! UI asks for a load? That's `Action::LoadRequested`.
//! A scan finishes? That's `Action::ScanFinished`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing the I/O the caller should
//! start. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Every load carries a generation number. A scan result is only published
//! when its generation is still the newest one requested, so a slow older
//! scan can never overwrite a newer one.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::core::catalog::Category;
use crate::core::error::CatalogError;
use crate::core::state::CatalogState;

#[derive(Debug, Clone)]
pub enum Action {
    /// Start a scan tagged with `generation`.
    LoadRequested { generation: u64 },
    /// A scan tagged with `generation` completed.
    ScanFinished {
        generation: u64,
        result: Result<Vec<Category>, CatalogError>,
    },
}

/// Side effects the caller must perform after `update()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    SpawnScan { generation: u64 },
}

pub fn update(state: &mut CatalogState, action: Action) -> Effect {
    match action {
        Action::LoadRequested { generation } => {
            if generation <= state.requested_generation {
                debug!(
                    "Load {} already superseded by {}",
                    generation, state.requested_generation
                );
                return Effect::None;
            }
            state.requested_generation = generation;
            state.is_loading = true;
            Effect::SpawnScan { generation }
        }
        Action::ScanFinished { generation, result } => {
            if generation != state.requested_generation {
                debug!(
                    "Discarding stale scan {} (latest is {})",
                    generation, state.requested_generation
                );
                return Effect::None;
            }
            state.is_loading = false;
            state.settled_generation = generation;
            match result {
                Ok(categories) => {
                    info!("Catalog loaded: {} categories", categories.len());
                    state.root_categories = Arc::new(categories);
                    state.error_message = None;
                }
                Err(e) => {
                    warn!("Catalog load failed: {}", e);
                    state.error_message = Some(format!("Failed to load documents: {e}"));
                }
            }
            Effect::None
        }
    }
}
