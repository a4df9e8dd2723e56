//! Read-only table provider abstraction.

use std::sync::Arc;

use crate::models::{Claim, Encounter, Patient};

/// One immutable snapshot of the three source tables.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub encounters: Vec<Encounter>,
    pub claims: Vec<Claim>,
    pub patients: Vec<Patient>,
    /// SHA-256 over the source CSV bytes, identifying the snapshot in logs
    /// and the health endpoint.
    pub fingerprint: String,
}

/// Source of table snapshots.
///
/// The engine depends on this trait, never on a global, so tests can hand it
/// fixture tables and a future deployment can back it with a real database.
pub trait TableProvider: Send + Sync {
    /// Current snapshot. Cheap (an `Arc` clone); callers hold the snapshot
    /// for the duration of one request.
    fn tables(&self) -> Arc<Tables>;
}
