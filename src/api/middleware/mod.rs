pub mod auth;
pub mod region;

pub use auth::AdminAuth;
pub use region::RegionScope;
