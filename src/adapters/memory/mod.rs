//! In-memory adapters.
//!
//! Implementations of the persistence ports backed by `Mutex`-guarded
//! collections. Used by tests and by local runs without a database.
//! Nothing survives a restart.

mod activity_repository;
mod click_recorder;
mod company_repository;
mod favorite_repository;

pub use activity_repository::InMemoryActivityRepository;
pub use click_recorder::InMemoryClickRecorder;
pub use company_repository::InMemoryCompanyRepository;
pub use favorite_repository::InMemoryFavoriteRepository;

use std::sync::{Mutex, MutexGuard};

use crate::domain::foundation::DomainError;

/// Locks `mutex`, reporting a poisoned lock as a storage failure.
fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, DomainError> {
    mutex
        .lock()
        .map_err(|_| DomainError::database("in-memory store lock poisoned"))
}
