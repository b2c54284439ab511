//! 路径 → 区域 解析与区域段改写
//!
//! 解析永远不会失败：缺失、畸形或不支持的第一段都回落到主区域。

use tracing::trace;

use super::Region;

/// 拆分路径与查询串/片段（`?` 或 `#` 起始的尾部原样保留）
fn split_tail(path: &str) -> (&str, &str) {
    match path.find(['?', '#']) {
        Some(idx) => (&path[..idx], &path[idx..]),
        None => (path, ""),
    }
}

/// 路径的第一个非空段
pub fn first_segment(path: &str) -> Option<&str> {
    let (path, _) = split_tail(path);
    path.split('/').find(|s| !s.is_empty())
}

/// 解析区域；仅当第一段是受支持的代码时才返回 Some
pub fn resolve_strict(path: &str) -> Option<Region> {
    first_segment(path).and_then(Region::from_code)
}

/// 解析区域，不支持的输入回落到 `Region::PRIMARY`
pub fn resolve(path: &str) -> Region {
    match resolve_strict(path) {
        Some(region) => region,
        None => {
            trace!("No supported region segment in {:?}, using primary", path);
            Region::PRIMARY
        }
    }
}

/// 将路径的区域段替换为 `region`
///
/// 第一段是受支持的区域代码时替换它，否则在路径前插入区域段。
/// 其余路径、查询串和片段保持不变：
/// `/br/foo/bar?x=1` → `/mx/foo/bar?x=1`，`/` → `/mx`，`/br/` → `/mx/`。
pub fn rewrite(path: &str, region: Region) -> String {
    let (path_part, tail) = split_tail(path);
    let trimmed = path_part.trim_start_matches('/');

    let (first, rest) = match trimmed.find('/') {
        Some(idx) => (&trimmed[..idx], &trimmed[idx..]),
        None => (trimmed, ""),
    };

    let remainder = if Region::from_code(first).is_some() {
        rest.to_string()
    } else if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    };

    format!("/{}{}{}", region.code(), remainder, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_supported_segments() {
        assert_eq!(resolve("/br/noticias"), Region::Br);
        assert_eq!(resolve("/mx/ebooks"), Region::Mx);
        assert_eq!(resolve("/fr"), Region::Fr);
        assert_eq!(resolve("/fr?x=1"), Region::Fr);
        assert_eq!(resolve("//mx/a"), Region::Mx);
    }

    #[test]
    fn test_resolve_unsupported_defaults_to_primary() {
        for path in ["/", "", "/de/foo", "/MX/foo", "/mxx", "?mx", "/%20/mx", "#fr"] {
            assert_eq!(resolve(path), Region::PRIMARY, "path {:?}", path);
        }
    }

    #[test]
    fn test_resolve_strict() {
        assert_eq!(resolve_strict("/mx/x"), Some(Region::Mx));
        assert_eq!(resolve_strict("/xx/x"), None);
    }

    #[test]
    fn test_first_segment() {
        assert_eq!(first_segment("/mx/ebooks/3"), Some("mx"));
        assert_eq!(first_segment("/"), None);
        assert_eq!(first_segment("/?q=1"), None);
    }

    #[test]
    fn test_rewrite_replaces_region_segment() {
        assert_eq!(rewrite("/br/foo/bar?x=1", Region::Mx), "/mx/foo/bar?x=1");
        assert_eq!(rewrite("/br/foo#top", Region::Fr), "/fr/foo#top");
        assert_eq!(rewrite("/fr", Region::Br), "/br");
    }

    #[test]
    fn test_rewrite_root_and_trailing_slash() {
        assert_eq!(rewrite("/", Region::Mx), "/mx");
        assert_eq!(rewrite("", Region::Mx), "/mx");
        assert_eq!(rewrite("/br/", Region::Mx), "/mx/");
        assert_eq!(rewrite("/?q=1", Region::Fr), "/fr?q=1");
    }

    #[test]
    fn test_rewrite_inserts_when_first_segment_unsupported() {
        assert_eq!(rewrite("/ebooks/3", Region::Mx), "/mx/ebooks/3");
        assert_eq!(rewrite("/de/foo", Region::Fr), "/fr/de/foo");
    }

    #[test]
    fn test_rewrite_then_resolve() {
        for target in Region::all() {
            let path = rewrite("/br/busca?q=ferro", target);
            assert_eq!(resolve(&path), target);
        }
    }
}
