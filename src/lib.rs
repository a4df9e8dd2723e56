//! # CareOps Backend
//!
//! Operational analytics engine for a hospital network.
//!
//! This crate answers point-in-time questions over longitudinal
//! patient-encounter records: how many beds are occupied right now, how many
//! patients are in intensive care, how staffing should scale, and what ICU
//! demand will look like over the next few days. The backend exposes a REST
//! API via Axum for the React dashboard.
//!
//! ## Features
//!
//! - **Data Loading**: Parse Synthea-style CSV exports (patients, encounters,
//!   claims) into typed tables held in memory
//! - **Census**: Interval-overlap "active as of date" computation per
//!   encounter class
//! - **Estimation**: Heuristic bed capacity and staffing derivation with
//!   every constant exposed as configuration
//! - **Forecasting**: ARIMA(1,1,1) projection of daily ICU occupancy with a
//!   deterministic fallback when history is short or the fit fails
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Typed records for the three source tables plus the clock
//! - [`data`]: Table provider abstraction, CSV loader, and the
//!   swap-and-publish table store
//! - [`engine`]: The resource-utilization pipeline (filter/join, census, ICU
//!   classification, capacity, staffing, demographics, trends, forecast)
//! - [`config`]: TOML-backed application and engine configuration
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Request model
//!
//! Each request computes fresh views from an immutable table snapshot and
//! discards them after the response is assembled. Concurrent requests share
//! nothing but the snapshot `Arc`.

pub mod config;

pub mod data;
pub mod models;

pub mod engine;

pub mod http;
