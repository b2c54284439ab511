//! 区域（市场）定义与 URL 解析
//!
//! 区域是 URL 的第一段路径（`/br/...`、`/mx/...`、`/fr/...`），
//! URL 是当前区域的唯一真实来源。

mod navigator;
mod resolver;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

pub use navigator::{FetchTicket, RegionNavigator};
pub use resolver::{first_segment, resolve, resolve_strict, rewrite};

/// 支持的区域，封闭集合
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    AsRefStr,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Region {
    Br,
    Mx,
    Fr,
}

impl Region {
    /// 主区域，解析失败时的默认值
    pub const PRIMARY: Region = Region::Br;

    /// URL 段 / 存储列使用的代码
    pub fn code(self) -> &'static str {
        match self {
            Region::Br => "br",
            Region::Mx => "mx",
            Region::Fr => "fr",
        }
    }

    /// BCP 47 语言标签
    pub fn locale(self) -> &'static str {
        match self {
            Region::Br => "pt-BR",
            Region::Mx => "es-MX",
            Region::Fr => "fr-FR",
        }
    }

    /// 精确匹配（区分大小写），不支持的代码返回 None
    pub fn from_code(code: &str) -> Option<Region> {
        code.parse().ok()
    }

    pub fn all() -> impl Iterator<Item = Region> {
        Region::iter()
    }

    pub fn is_primary(self) -> bool {
        self == Region::PRIMARY
    }
}

impl Default for Region {
    fn default() -> Self {
        Region::PRIMARY
    }
}
