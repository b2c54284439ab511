//! CLI command implementations

mod config_gen;
mod leads;
mod locales;

pub use config_gen::config_generate;
pub use leads::export_leads;
pub use locales::{LocaleReport, check_locales, locale_report};
