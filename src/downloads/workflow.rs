//! 留资下载流程
//!
//! `Closed → Editing → Validating → Persisting → Delivering → Success → Closed`
//!
//! 交付回调只会在留资写入被确认之后执行，且每次成功只执行一次。
//! 写入失败回到 `Editing` 并给出可重试的通用错误，不会交付文件。

use std::time::Duration;

use tracing::{debug, info, warn};

use super::{AssetRef, LeadStore, NewLead, validate_email};
use crate::errors::PortalError;
use crate::region::Region;

use migration::entities::lead;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadState {
    Closed,
    Editing,
    Validating,
    Persisting,
    Delivering,
    Success,
}

/// 表单内联错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    InvalidEmail,
    Generic,
}

impl FormError {
    /// 对应的本地化 key
    pub fn message_key(self) -> &'static str {
        match self {
            FormError::InvalidEmail => "download.error.invalid_email",
            FormError::Generic => "download.error.generic",
        }
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// 留资已写入并已交付
    Delivered(lead::Model),
    /// 邮箱格式错误，表单保持打开
    Invalid,
    /// 写入失败，可重试
    Failed(PortalError),
    /// 当前状态不接受提交（未打开或正在写入）
    Rejected,
}

#[derive(Debug)]
pub struct GatedDownload {
    region: Region,
    success_delay: Duration,
    asset: Option<AssetRef>,
    email: String,
    error: Option<FormError>,
    state: DownloadState,
}

impl GatedDownload {
    pub fn new(region: Region, success_delay: Duration) -> Self {
        Self {
            region,
            success_delay,
            asset: None,
            email: String::new(),
            error: None,
            state: DownloadState::Closed,
        }
    }

    pub fn state(&self) -> DownloadState {
        self.state
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn asset(&self) -> Option<&AssetRef> {
        self.asset.as_ref()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn error(&self) -> Option<FormError> {
        self.error
    }

    pub fn is_open(&self) -> bool {
        self.state != DownloadState::Closed
    }

    /// 为某个资产打开表单，之前的输入与错误全部清空
    pub fn open(&mut self, asset: AssetRef) {
        debug!("Opening download form for {} {}", asset.source, asset.id);
        self.asset = Some(asset);
        self.email.clear();
        self.error = None;
        self.state = DownloadState::Editing;
    }

    pub fn close(&mut self) {
        self.asset = None;
        self.email.clear();
        self.error = None;
        self.state = DownloadState::Closed;
    }

    /// 编辑邮箱会清除上一次的内联错误
    pub fn set_email(&mut self, email: impl Into<String>) {
        if self.state != DownloadState::Editing {
            return;
        }
        self.email = email.into();
        self.error = None;
    }

    pub fn can_submit(&self) -> bool {
        self.state == DownloadState::Editing && self.asset.is_some()
    }

    pub async fn submit<F>(&mut self, store: &dyn LeadStore, deliver: F) -> SubmitOutcome
    where
        F: FnOnce(&AssetRef),
    {
        if !self.can_submit() {
            debug!("Rejecting submit in state {:?}", self.state);
            return SubmitOutcome::Rejected;
        }
        let Some(asset) = self.asset.clone() else {
            return SubmitOutcome::Rejected;
        };

        self.state = DownloadState::Validating;
        let email = match validate_email(&self.email) {
            Ok(email) => email,
            Err(e) => {
                debug!("Email rejected: {}", e);
                self.error = Some(FormError::InvalidEmail);
                self.state = DownloadState::Editing;
                return SubmitOutcome::Invalid;
            }
        };

        self.state = DownloadState::Persisting;
        let new_lead = NewLead {
            email,
            source: asset.source,
            asset_name: Some(asset.title.clone()),
        };

        let lead = match store.insert_lead(self.region, new_lead).await {
            Ok(lead) => lead,
            Err(e) => {
                warn!(
                    "Failed to persist lead for {} {} in region {}: {}",
                    asset.source, asset.id, self.region, e
                );
                self.error = Some(FormError::Generic);
                self.state = DownloadState::Editing;
                return SubmitOutcome::Failed(e);
            }
        };

        self.state = DownloadState::Delivering;
        deliver(&asset);
        self.state = DownloadState::Success;

        info!(
            "Lead {} captured for {} {} in region {}",
            lead.id, asset.source, asset.id, self.region
        );
        SubmitOutcome::Delivered(lead)
    }

    /// 成功提示展示一段时间后关闭；非成功状态直接返回 false
    pub async fn settle(&mut self) -> bool {
        if self.state != DownloadState::Success {
            return false;
        }
        if !self.success_delay.is_zero() {
            tokio::time::sleep(self.success_delay).await;
        }
        self.close();
        true
    }
}
