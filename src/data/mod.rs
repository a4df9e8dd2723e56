//! Table layer: loading, holding, and exposing the three source tables.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Engine / HTTP handlers                                  │
//! │  - take an Arc<Tables> snapshot per request              │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  TableProvider trait (provider.rs)                       │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  TableStore (store.rs)                                   │
//! │  - swap-and-publish reload, lock held only for the swap  │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  CSV loader (loader.rs, polars)                          │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Tables are loaded once at process start and treated as read-only for the
//! process lifetime. Reload replaces the whole snapshot behind the provider;
//! requests already in flight keep the snapshot they started with.

pub mod error;
pub mod fingerprint;
pub mod loader;
pub mod provider;
pub mod store;

pub use error::DataError;
pub use fingerprint::dataset_fingerprint;
pub use loader::load_tables;
pub use provider::{TableProvider, Tables};
pub use store::TableStore;
