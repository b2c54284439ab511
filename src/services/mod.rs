//! Service layer for business logic shared by HTTP handlers and the CLI

mod lead_service;

pub use lead_service::{DownloadGrant, LeadService};
