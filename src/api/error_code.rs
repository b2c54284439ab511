//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::PortalError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字，按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 2000-2099: 存储错误
/// - 3000-3099: 留资错误
/// - 4000-4099: 广告错误
/// - 5000-5099: 导出错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    Unauthorized = 1001,
    NotFound = 1004,
    InternalServerError = 1005,
    RateLimitExceeded = 1010,
    ServiceUnavailable = 1030,
    MissingRegionContext = 1031,
    UnsupportedRegion = 1032,

    // 存储错误 2000-2099
    DatabaseError = 2000,
    DatabaseConfigError = 2001,
    DatabaseConnectionError = 2002,

    // 留资错误 3000-3099
    InvalidEmail = 3000,
    LeadPersistenceFailed = 3001,
    SubmissionInProgress = 3002,

    // 广告错误 4000-4099
    AdInvalidLink = 4000,

    // 导出错误 5000-5099
    ExportFailed = 5000,
}

impl From<&PortalError> for ErrorCode {
    fn from(err: &PortalError) -> Self {
        match err {
            PortalError::DatabaseConfig(_) => ErrorCode::DatabaseConfigError,
            PortalError::DatabaseConnection(_) => ErrorCode::DatabaseConnectionError,
            PortalError::DatabaseOperation(_) => ErrorCode::DatabaseError,
            PortalError::FileOperation(_) | PortalError::Serialization(_) => {
                ErrorCode::ExportFailed
            }
            PortalError::Validation(_) => ErrorCode::BadRequest,
            PortalError::InvalidEmail(_) => ErrorCode::InvalidEmail,
            PortalError::NotFound(_) => ErrorCode::NotFound,
            PortalError::LeadPersistence(_) => ErrorCode::LeadPersistenceFailed,
            PortalError::SubmissionInProgress(_) => ErrorCode::SubmissionInProgress,
            PortalError::MissingRegionContext(_) => ErrorCode::MissingRegionContext,
            PortalError::UnsupportedRegion(_) => ErrorCode::UnsupportedRegion,
        }
    }
}
