//! # Catalog Service
//!
//! Single-writer actor around [`CatalogState`].
//!
//! ```text
//!   CatalogHandle::load() ──Action──►┐
//!                                    ▼
//!                          ┌───────────────────┐   spawn    ┌──────────┐
//!                          │  actor task       │──────────► │ scan task│
//!                          │  update(state, a) │ ◄──Action──│ (tokio)  │
//!                          └─────────┬─────────┘            └──────────┘
//!                                    │ watch::send_replace(snapshot)
//!                                    ▼
//!                     CatalogHandle::snapshot() / subscribe()
//! ```
//!
//! Only the actor task mutates state. Readers get cloned snapshots from a
//! `watch` channel and never wait on a scan.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, info, warn};
use tokio::sync::{mpsc, watch};

use crate::core::action::{Action, Effect, update};
use crate::core::builder::build_catalog;
use crate::core::catalog::Document;
use crate::core::error::CatalogError;
use crate::core::preview::{DocumentContent, open_document};
use crate::core::scan::{ScanOptions, scan};
use crate::core::source::CatalogSource;
use crate::core::state::CatalogState;

/// Cloneable handle to a running catalog actor.
#[derive(Clone)]
pub struct CatalogHandle {
    commands: mpsc::UnboundedSender<Action>,
    state: watch::Receiver<CatalogState>,
    next_generation: Arc<AtomicU64>,
    source: Arc<dyn CatalogSource>,
}

impl CatalogHandle {
    /// Spawns the actor on the current tokio runtime.
    pub fn spawn(source: Arc<dyn CatalogSource>, options: ScanOptions) -> Self {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (state_tx, state) = watch::channel(CatalogState::new());

        tokio::spawn(run_actor(
            command_rx,
            state_tx,
            source.clone(),
            Arc::new(options),
        ));

        Self {
            commands,
            state,
            next_generation: Arc::new(AtomicU64::new(0)),
            source,
        }
    }

    /// Requests a scan and returns its generation. Does not wait.
    pub fn load(&self) -> u64 {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
        if self
            .commands
            .send(Action::LoadRequested { generation })
            .is_err()
        {
            warn!("Catalog actor is gone; load {} dropped", generation);
        }
        generation
    }

    /// Requests a scan and waits until it (or a newer one) has published.
    pub async fn reload_and_wait(&self) -> CatalogState {
        let mut rx = self.state.clone();
        let generation = self.load();
        match rx.wait_for(|s| s.settled_generation >= generation).await {
            Ok(state) => state.clone(),
            Err(_) => self.snapshot(),
        }
    }

    /// Latest published state.
    pub fn snapshot(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    /// A receiver that is notified on every publish.
    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.state.clone()
    }

    /// Reads a document through the same source the catalog was scanned from.
    pub async fn open_document(
        &self,
        document: &Document,
    ) -> Result<DocumentContent, CatalogError> {
        open_document(self.source.as_ref(), document).await
    }
}

async fn run_actor(
    mut commands: mpsc::UnboundedReceiver<Action>,
    state_tx: watch::Sender<CatalogState>,
    source: Arc<dyn CatalogSource>,
    options: Arc<ScanOptions>,
) {
    let (results_tx, mut results) = mpsc::unbounded_channel::<Action>();
    let mut state = CatalogState::new();

    loop {
        let action = tokio::select! {
            command = commands.recv() => match command {
                Some(action) => action,
                None => break,
            },
            Some(finished) = results.recv() => finished,
        };

        debug!("Catalog actor received: {}", describe(&action));
        let effect = update(&mut state, action);
        state_tx.send_replace(state.clone());

        if let Effect::SpawnScan { generation } = effect {
            spawn_scan(
                generation,
                source.clone(),
                options.clone(),
                results_tx.clone(),
            );
        }
    }
    debug!("Catalog actor stopped");
}

fn spawn_scan(
    generation: u64,
    source: Arc<dyn CatalogSource>,
    options: Arc<ScanOptions>,
    tx: mpsc::UnboundedSender<Action>,
) {
    info!("Spawning scan {}", generation);
    tokio::spawn(async move {
        let result = scan(source.as_ref(), &options)
            .await
            .map(|listing| build_catalog(&listing, options.mode));
        if tx.send(Action::ScanFinished { generation, result }).is_err() {
            warn!("Scan {} finished after the catalog actor stopped", generation);
        }
    });
}

/// Short log line; the full `Debug` of a finished scan is the whole tree.
fn describe(action: &Action) -> String {
    match action {
        Action::LoadRequested { generation } => format!("LoadRequested({generation})"),
        Action::ScanFinished {
            generation,
            result: Ok(categories),
        } => format!("ScanFinished({generation}, {} categories)", categories.len()),
        Action::ScanFinished {
            generation,
            result: Err(e),
        } => format!("ScanFinished({generation}, error: {e})"),
    }
}
