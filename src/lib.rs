//! Region Portal - region-scoped content gateway
//!
//! Serves a multi-country trade portal where every request carries a region
//! segment (`/br`, `/mx`, `/fr`). The region decides which rows are visible,
//! which translation table is used and which ads and downloads are offered.
//!
//! # Architecture
//! - `region` / `context`: region resolution and the per-request context
//! - `i18n`: static translation tables
//! - `storage`: region-isolated data access (SeaORM)
//! - `ads`: ad slots and buffered view/click counters
//! - `downloads` / `services`: gated downloads and lead capture
//! - `api`: HTTP services and middleware
//! - `interfaces`: command-line tooling
//! - `config`: configuration management
//! - `runtime`: application lifecycle and execution modes
//! - `system`: logging setup

pub mod ads;
pub mod api;
pub mod cli;
pub mod config;
pub mod context;
pub mod downloads;
pub mod errors;
pub mod i18n;
pub mod interfaces;
pub mod region;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
