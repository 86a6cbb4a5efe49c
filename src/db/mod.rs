//! Storage collaborator module.
//!
//! This module provides abstractions for entity storage via the Repository
//! pattern, allowing different backends to be swapped without touching the
//! scheduling or layout code.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Host application (rendering, routing, notifications)   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services/, views/) - Business Logic      │
//! │  - Shift validation and conflict detection               │
//! │  - Roster assignment rules                               │
//! │  - Grid layout and view aggregation                      │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌──────────────────────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! Each service invocation fetches its own snapshot through the repository;
//! no layout state is shared across invocations.

#[cfg(not(feature = "local-repo"))]
compile_error!("Enable at least one repository backend feature.");

pub mod repositories;
pub mod repository;

#[cfg(feature = "local-repo")]
pub use repositories::LocalRepository;
pub use repository::{
    ErrorContext, EventRepository, FullRepository, RepositoryError, RepositoryResult,
    RosterRepository, ShiftRepository,
};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn FullRepository>> = OnceLock::new();

#[cfg(feature = "local-repo")]
fn create_selected_repository() -> Arc<dyn FullRepository> {
    Arc::new(LocalRepository::new())
}

/// Initialize the global repository singleton for the selected backend.
pub fn init_repository() -> Result<()> {
    if REPOSITORY.get().is_some() {
        return Ok(());
    }

    let repo = create_selected_repository();
    let _ = REPOSITORY.set(repo);
    Ok(())
}

/// Get a reference to the global repository instance.
pub fn get_repository() -> Result<&'static Arc<dyn FullRepository>> {
    if REPOSITORY.get().is_none() {
        let _ = init_repository();
    }

    REPOSITORY
        .get()
        .context("Repository not initialized. Call init_repository() first.")
}
