use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use glyph_panel::Session;

/// Shared state type, an `Arc<Mutex<Session>>` passed to every handler.
///
/// Training runs on the coordinator's own threads, so the lock is only held
/// for the duration of a single request.
pub type SharedState = Arc<Mutex<Session>>;

pub fn lock(state: &SharedState) -> MutexGuard<'_, Session> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
