//! 邮箱格式校验
//!
//! 只校验 `user@domain.tld` 形状，不做投递验证。

/// 邮箱校验错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailValidationError {
    Empty,
    ContainsWhitespace,
    MissingAt,
    MultipleAt,
    EmptyLocalPart,
    InvalidDomain(String),
    TooLong,
}

impl std::fmt::Display for EmailValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Email cannot be empty"),
            Self::ContainsWhitespace => write!(f, "Email cannot contain whitespace"),
            Self::MissingAt => write!(f, "Email must contain '@'"),
            Self::MultipleAt => write!(f, "Email must contain a single '@'"),
            Self::EmptyLocalPart => write!(f, "Email is missing the part before '@'"),
            Self::InvalidDomain(domain) => write!(f, "Invalid email domain: {}", domain),
            Self::TooLong => write!(f, "Email is too long"),
        }
    }
}

impl std::error::Error for EmailValidationError {}

/// RFC 5321 上限
const MAX_EMAIL_LEN: usize = 254;

/// 校验并返回去除首尾空白后的邮箱
pub fn validate_email(input: &str) -> Result<String, EmailValidationError> {
    let email = input.trim();

    if email.is_empty() {
        return Err(EmailValidationError::Empty);
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err(EmailValidationError::TooLong);
    }
    if email.chars().any(char::is_whitespace) {
        return Err(EmailValidationError::ContainsWhitespace);
    }

    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        (Some(_), None, _) => return Err(EmailValidationError::MissingAt),
        _ => return Err(EmailValidationError::MultipleAt),
    };

    if local.is_empty() {
        return Err(EmailValidationError::EmptyLocalPart);
    }
    if !is_valid_domain(domain) {
        return Err(EmailValidationError::InvalidDomain(domain.to_string()));
    }

    Ok(email.to_string())
}

/// 至少两段，每段非空且不以 '-' 开头或结尾，顶级域为 ≥2 个字母
fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    });

    let tld_ok = labels
        .last()
        .is_some_and(|tld| tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic));

    labels_ok && tld_ok
}
