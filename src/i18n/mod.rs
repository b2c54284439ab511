//! 本地化字符串查询
//!
//! 查表失败时返回 key 本身，永不 panic。完整性（各区域 key 集合一致、
//! 值非空）只在测试与 `locales check` 中校验，运行时不做保护。

mod table;

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;

use crate::region::Region;

/// 区域 → (key → text) 索引
static TABLES: Lazy<HashMap<Region, HashMap<&'static str, &'static str>>> = Lazy::new(|| {
    Region::all()
        .map(|region| (region, raw_table(region).iter().copied().collect()))
        .collect()
});

fn raw_table(region: Region) -> &'static [(&'static str, &'static str)] {
    match region {
        Region::Br => table::PT_BR,
        Region::Mx => table::ES_MX,
        Region::Fr => table::FR_FR,
    }
}

/// 查询区域字符串，缺失时原样返回 key
pub fn translate<'a>(region: Region, key: &'a str) -> &'a str {
    TABLES
        .get(&region)
        .and_then(|table| table.get(key).copied())
        .unwrap_or(key)
}

/// 主区域的全部 key（按字典序）
pub fn keys() -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = raw_table(Region::PRIMARY).iter().map(|(k, _)| *k).collect();
    keys.sort_unstable();
    keys
}

/// 主区域存在而 `region` 缺失的 key
pub fn missing_keys(region: Region) -> Vec<&'static str> {
    let Some(table) = TABLES.get(&region) else {
        return keys();
    };
    keys()
        .into_iter()
        .filter(|k| !table.contains_key(k))
        .collect()
}

/// `region` 中值为空串的 key
pub fn empty_values(region: Region) -> Vec<&'static str> {
    raw_table(region)
        .iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| *k)
        .collect()
}

/// 整张表（有序），供前端一次性拉取
pub fn entries(region: Region) -> BTreeMap<&'static str, &'static str> {
    raw_table(region).iter().copied().collect()
}

/// 绑定到区域的翻译器，`Copy` 且无状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translator {
    region: Region,
}

impl Translator {
    pub fn new(region: Region) -> Self {
        Self { region }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        translate(self.region, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_region_has_every_key() {
        for region in Region::all() {
            assert!(
                missing_keys(region).is_empty(),
                "{} is missing {:?}",
                region,
                missing_keys(region)
            );
            let region_keys: HashSet<_> = raw_table(region).iter().map(|(k, _)| *k).collect();
            let primary_keys: HashSet<_> = keys().into_iter().collect();
            assert_eq!(region_keys, primary_keys, "extra keys in {}", region);
        }
    }

    #[test]
    fn test_no_empty_values() {
        for region in Region::all() {
            assert!(empty_values(region).is_empty(), "{}", region);
        }
    }

    #[test]
    fn test_no_duplicate_keys() {
        for region in Region::all() {
            let table = raw_table(region);
            let unique: HashSet<_> = table.iter().map(|(k, _)| *k).collect();
            assert_eq!(unique.len(), table.len(), "duplicate key in {}", region);
        }
    }

    #[test]
    fn test_translate_per_region() {
        assert_eq!(translate(Region::Br, "nav.news"), "Notícias");
        assert_eq!(translate(Region::Mx, "nav.news"), "Noticias");
        assert_eq!(translate(Region::Fr, "nav.news"), "Actualités");
    }

    #[test]
    fn test_missing_key_returns_key() {
        assert_eq!(translate(Region::Fr, "does.not.exist"), "does.not.exist");
        assert_eq!(Translator::new(Region::Mx).t(""), "");
    }

    #[test]
    fn test_entries_are_complete() {
        assert_eq!(entries(Region::Mx).len(), keys().len());
    }
}
