//! Legacy Registry Export API Library
//!
//! Builds the fixed-width payment registry files (`CADTPG.txt` and
//! `CADTIPOPAG.txt`) consumed by a legacy batch importer, from the records
//! exposed by the upstream company API.
//!
//! # Modules
//!
//! - `padding`: Left/right padding primitives with their truncation rules.
//! - `payment_type`: CADTIPOPAG layout.
//! - `payment_term`: CADTPG layout.
//! - `export`: Shared file builder, record preparation and export kinds.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `circuit_breaker`: Circuit breaker for upstream calls.
//! - `upstream_client`: Upstream company/records API client.
//! - `handlers`: HTTP request handlers.
//! - `routes`: Router assembly.
//! - `whole_number`: Integer fields that may arrive as whole-number floats.

pub mod circuit_breaker;
pub mod config;
pub mod errors;
pub mod export;
pub mod handlers;
pub mod padding;
pub mod payment_term;
pub mod payment_type;
pub mod routes;
pub mod upstream_client;
pub mod whole_number;
