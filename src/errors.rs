use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum PortalError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Validation(String),
    InvalidEmail(String),
    NotFound(String),
    Serialization(String),
    LeadPersistence(String),
    SubmissionInProgress(String),
    MissingRegionContext(String),
    UnsupportedRegion(String),
}

impl PortalError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            PortalError::DatabaseConfig(_) => "E001",
            PortalError::DatabaseConnection(_) => "E002",
            PortalError::DatabaseOperation(_) => "E003",
            PortalError::FileOperation(_) => "E004",
            PortalError::Validation(_) => "E005",
            PortalError::InvalidEmail(_) => "E006",
            PortalError::NotFound(_) => "E007",
            PortalError::Serialization(_) => "E008",
            PortalError::LeadPersistence(_) => "E009",
            PortalError::SubmissionInProgress(_) => "E010",
            PortalError::MissingRegionContext(_) => "E011",
            PortalError::UnsupportedRegion(_) => "E012",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            PortalError::DatabaseConfig(_) => "Database Configuration Error",
            PortalError::DatabaseConnection(_) => "Database Connection Error",
            PortalError::DatabaseOperation(_) => "Database Operation Error",
            PortalError::FileOperation(_) => "File Operation Error",
            PortalError::Validation(_) => "Validation Error",
            PortalError::InvalidEmail(_) => "Invalid Email",
            PortalError::NotFound(_) => "Resource Not Found",
            PortalError::Serialization(_) => "Serialization Error",
            PortalError::LeadPersistence(_) => "Lead Persistence Error",
            PortalError::SubmissionInProgress(_) => "Submission In Progress",
            PortalError::MissingRegionContext(_) => "Missing Region Context",
            PortalError::UnsupportedRegion(_) => "Unsupported Region",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            PortalError::DatabaseConfig(msg)
            | PortalError::DatabaseConnection(msg)
            | PortalError::DatabaseOperation(msg)
            | PortalError::FileOperation(msg)
            | PortalError::Validation(msg)
            | PortalError::InvalidEmail(msg)
            | PortalError::NotFound(msg)
            | PortalError::Serialization(msg)
            | PortalError::LeadPersistence(msg)
            | PortalError::SubmissionInProgress(msg)
            | PortalError::MissingRegionContext(msg)
            | PortalError::UnsupportedRegion(msg) => msg,
        }
    }

    /// 对应的 HTTP 状态码
    pub fn http_status(&self) -> StatusCode {
        match self {
            PortalError::Validation(_) | PortalError::UnsupportedRegion(_) => {
                StatusCode::BAD_REQUEST
            }
            PortalError::InvalidEmail(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PortalError::NotFound(_) => StatusCode::NOT_FOUND,
            PortalError::SubmissionInProgress(_) => StatusCode::CONFLICT,
            PortalError::LeadPersistence(_) => StatusCode::SERVICE_UNAVAILABLE,
            PortalError::DatabaseConfig(_)
            | PortalError::DatabaseConnection(_)
            | PortalError::DatabaseOperation(_)
            | PortalError::FileOperation(_)
            | PortalError::Serialization(_)
            | PortalError::MissingRegionContext(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for PortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PortalError {}

// 便捷的构造函数
impl PortalError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        PortalError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        PortalError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        PortalError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        PortalError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        PortalError::Validation(msg.into())
    }

    pub fn invalid_email<T: Into<String>>(msg: T) -> Self {
        PortalError::InvalidEmail(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        PortalError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        PortalError::Serialization(msg.into())
    }

    pub fn lead_persistence<T: Into<String>>(msg: T) -> Self {
        PortalError::LeadPersistence(msg.into())
    }

    pub fn submission_in_progress<T: Into<String>>(msg: T) -> Self {
        PortalError::SubmissionInProgress(msg.into())
    }

    pub fn missing_region_context<T: Into<String>>(msg: T) -> Self {
        PortalError::MissingRegionContext(msg.into())
    }

    pub fn unsupported_region<T: Into<String>>(msg: T) -> Self {
        PortalError::UnsupportedRegion(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for PortalError {
    fn from(err: sea_orm::DbErr) -> Self {
        PortalError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for PortalError {
    fn from(err: std::io::Error) -> Self {
        PortalError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        PortalError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for PortalError {
    fn from(err: csv::Error) -> Self {
        PortalError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PortalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(
            PortalError::invalid_email("x").http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            PortalError::lead_persistence("x").http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            PortalError::missing_region_context("x").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            PortalError::not_found("x").http_status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_format_simple() {
        let err = PortalError::not_found("ebook 3");
        assert_eq!(err.to_string(), "Resource Not Found: ebook 3");
        assert_eq!(err.code(), "E007");
    }
}
