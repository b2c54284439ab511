//! 广告链接与站内路径校验
//!
//! 广告的跳转地址与图片地址只允许 http(s) 绝对地址或站内路径，
//! 切换区域时的回跳路径只允许站内路径。

use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    Empty,
    BlockedScheme(String),
    UnsupportedScheme(String),
    ProtocolRelative,
    Malformed(String),
}

impl std::fmt::Display for LinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Link cannot be empty"),
            Self::BlockedScheme(scheme) => write!(f, "Blocked link scheme: {}", scheme),
            Self::UnsupportedScheme(scheme) => write!(
                f,
                "Unsupported link scheme: {}. Use http://, https:// or a path starting with /",
                scheme
            ),
            Self::ProtocolRelative => write!(f, "Protocol-relative links are not allowed"),
            Self::Malformed(msg) => write!(f, "Malformed link: {}", msg),
        }
    }
}

impl std::error::Error for LinkError {}

const BLOCKED_SCHEMES: &[&str] = &["javascript", "data", "file", "vbscript", "blob"];

/// 站内路径：以单个 `/` 开头，不含反斜杠与控制字符
pub fn is_site_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains('\\')
        && !path.chars().any(char::is_control)
}

/// 校验链接，返回去除首尾空白后的值
pub fn validate_link(input: &str) -> Result<String, LinkError> {
    let link = input.trim();
    if link.is_empty() {
        return Err(LinkError::Empty);
    }
    if link.starts_with("//") {
        return Err(LinkError::ProtocolRelative);
    }
    if is_site_path(link) {
        return Ok(link.to_string());
    }

    let parsed = Url::parse(link).map_err(|e| LinkError::Malformed(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {
            if parsed.host_str().is_none_or(str::is_empty) {
                return Err(LinkError::Malformed("missing host".to_string()));
            }
            Ok(link.to_string())
        }
        scheme if BLOCKED_SCHEMES.contains(&scheme) => {
            Err(LinkError::BlockedScheme(scheme.to_string()))
        }
        scheme => Err(LinkError::UnsupportedScheme(scheme.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_site_paths() {
        assert_eq!(
            validate_link(" https://acme.com.br/promo?utm=portal ").unwrap(),
            "https://acme.com.br/promo?utm=portal"
        );
        assert!(validate_link("HTTP://example.com").is_ok());
        assert_eq!(validate_link("/mx/eventos").unwrap(), "/mx/eventos");
    }

    #[test]
    fn test_rejects_scripts_and_other_schemes() {
        assert_eq!(
            validate_link("javascript:alert(1)"),
            Err(LinkError::BlockedScheme("javascript".to_string()))
        );
        assert!(matches!(
            validate_link("DATA:text/html,x"),
            Err(LinkError::BlockedScheme(_))
        ));
        assert!(matches!(
            validate_link("mailto:a@b.com"),
            Err(LinkError::UnsupportedScheme(_))
        ));
        assert_eq!(validate_link("//evil.com"), Err(LinkError::ProtocolRelative));
        assert_eq!(validate_link("  "), Err(LinkError::Empty));
        assert!(matches!(validate_link("no scheme"), Err(LinkError::Malformed(_))));
    }

    #[test]
    fn test_site_path() {
        assert!(is_site_path("/br/noticias?page=2"));
        assert!(!is_site_path("//evil.com"));
        assert!(!is_site_path("https://evil.com"));
        assert!(!is_site_path("/\\evil.com"));
        assert!(!is_site_path("relative"));
    }
}
