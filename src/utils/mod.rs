pub mod links;

pub use links::{LinkError, is_site_path, validate_link};
