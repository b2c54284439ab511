//! HTTP 接口层

pub mod error_code;
pub mod helpers;
pub mod middleware;
pub mod services;
pub mod types;

pub use error_code::ErrorCode;
pub use helpers::{api_result, error_response, json_response, success_response};
pub use types::{ApiResponse, Page};
