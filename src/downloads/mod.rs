//! 留资下载
//!
//! 受控资产（电子书、技术资料、媒体包）只在留资记录写入成功后才交付文件地址。

pub mod email;
pub mod workflow;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::errors::Result;
use crate::region::Region;

use migration::entities::{ebook, lead, media_kit, technical_material};

pub use email::{EmailValidationError, validate_email};
pub use workflow::{DownloadState, FormError, GatedDownload, SubmitOutcome};

/// 留资来源
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    AsRefStr,
    Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum LeadSource {
    Newsletter,
    Ebook,
    Technical,
    MediaKit,
}

/// 一次下载所需的资产信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef {
    pub source: LeadSource,
    pub id: i32,
    pub title: String,
    pub file_url: String,
}

/// 受控资产
pub trait GatedAsset {
    fn asset_ref(&self) -> AssetRef;
}

impl GatedAsset for ebook::Model {
    fn asset_ref(&self) -> AssetRef {
        AssetRef {
            source: LeadSource::Ebook,
            id: self.id,
            title: self.title.clone(),
            file_url: self.file_url.clone(),
        }
    }
}

impl GatedAsset for technical_material::Model {
    fn asset_ref(&self) -> AssetRef {
        AssetRef {
            source: LeadSource::Technical,
            id: self.id,
            title: self.title.clone(),
            file_url: self.file_url.clone(),
        }
    }
}

impl GatedAsset for media_kit::Model {
    fn asset_ref(&self) -> AssetRef {
        AssetRef {
            source: LeadSource::MediaKit,
            id: self.id,
            title: self.title.clone(),
            file_url: self.file_url.clone(),
        }
    }
}

/// 待写入的留资
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLead {
    pub email: String,
    pub source: LeadSource,
    pub asset_name: Option<String>,
}

/// 留资写入；区域由实现强制写入，不由调用方携带
#[async_trait]
pub trait LeadStore: Send + Sync {
    async fn insert_lead(&self, region: Region, lead: NewLead) -> Result<lead::Model>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_source_codes() {
        assert_eq!(LeadSource::MediaKit.as_ref(), "media-kit");
        assert_eq!(LeadSource::Technical.to_string(), "technical");
        assert_eq!("ebook".parse::<LeadSource>().unwrap(), LeadSource::Ebook);
        assert_eq!(
            serde_json::to_string(&LeadSource::Newsletter).unwrap(),
            "\"newsletter\""
        );
    }

    #[test]
    fn test_asset_ref_from_ebook() {
        let model = ebook::Model {
            id: 3,
            region: "mx".to_string(),
            title: "Guía de moldeo".to_string(),
            description: String::new(),
            cover_url: None,
            file_url: "https://files.example.com/moldeo.pdf".to_string(),
            created_at: chrono::Utc::now(),
        };
        let asset = model.asset_ref();
        assert_eq!(asset.source, LeadSource::Ebook);
        assert_eq!(asset.title, "Guía de moldeo");

        // 公开 JSON 不包含文件地址
        let json = serde_json::to_value(&model).unwrap();
        assert!(json.get("file_url").is_none());
    }
}
