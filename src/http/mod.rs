//! HTTP server module for the CareOps backend.
//!
//! Axum-based REST surface over the engine. Handlers parse and validate
//! parameters, grab one table snapshot, delegate to the engine, and
//! serialize the result; all business logic lives in [`crate::engine`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Parameter parsing and validation                       │
//! │  - JSON serialization, CORS, compression, tracing         │
//! │  - One boundary catch: 400 for bad dates, 500 otherwise   │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Engine (crate::engine)                                   │
//! │  - census, estimation, trends, forecasting                │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Table layer (crate::data)                                │
//! │  - immutable snapshots behind TableProvider               │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
