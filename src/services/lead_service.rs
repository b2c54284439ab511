//! Lead capture service
//!
//! Drives the gated-download workflow for HTTP callers and collapses
//! double-submitted forms (same submission id) into a single lead row.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::LeadsConfig;
use crate::context::RegionContext;
use crate::downloads::{
    AssetRef, FormError, GatedDownload, LeadSource, LeadStore, NewLead, SubmitOutcome,
    validate_email,
};
use crate::errors::{PortalError, Result};
use crate::region::Region;

use migration::entities::lead;

/// Result of a successful gated download
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadGrant {
    pub lead_id: i32,
    pub asset_name: String,
    /// Only handed out after the lead row exists
    pub file_url: String,
    /// How long the front end shows the success message before closing
    pub display_ms: u64,
}

/// Submission cache key: region, asset, submission id and the validated email
type SubmissionKey = (Region, LeadSource, i32, String, String);

pub struct LeadService {
    store: Arc<dyn LeadStore>,
    success_display: Duration,
    submissions: Cache<SubmissionKey, DownloadGrant>,
}

impl LeadService {
    pub fn new(store: Arc<dyn LeadStore>, config: &LeadsConfig) -> Self {
        Self {
            store,
            success_display: Duration::from_millis(config.success_display_ms),
            submissions: Cache::builder()
                .time_to_live(Duration::from_secs(config.submission_ttl_secs))
                .max_capacity(10_000)
                .build(),
        }
    }

    /// Capture a lead for `asset` and return the download grant.
    ///
    /// The email is validated before the submission cache is consulted, and
    /// the validated email is part of the cache key: a cached grant is only
    /// shared with calls for the same email. Concurrent or repeated calls
    /// carrying the same `submission_id` and email run the workflow once and
    /// share its result. Failures are not cached, so a retry with the same id
    /// is allowed.
    pub async fn request_download(
        &self,
        ctx: RegionContext,
        asset: AssetRef,
        email: &str,
        submission_id: Option<&str>,
    ) -> Result<DownloadGrant> {
        let email = validate_email(email).map_err(|e| {
            debug!("Download email rejected: {}", e);
            PortalError::invalid_email(ctx.t(FormError::InvalidEmail.message_key()))
        })?;

        let Some(submission_id) = submission_id.filter(|id| !id.trim().is_empty()) else {
            return self.run_download(ctx, asset, &email).await;
        };

        let key = (
            ctx.region(),
            asset.source,
            asset.id,
            submission_id.to_string(),
            email.to_lowercase(),
        );
        self.submissions
            .try_get_with(key, self.run_download(ctx, asset, &email))
            .await
            .map_err(|e: Arc<PortalError>| {
                debug!("Submission {} failed: {}", submission_id, e);
                (*e).clone()
            })
    }

    async fn run_download(
        &self,
        ctx: RegionContext,
        asset: AssetRef,
        email: &str,
    ) -> Result<DownloadGrant> {
        let mut form = GatedDownload::new(ctx.region(), self.success_display);
        form.open(asset);
        form.set_email(email);

        let mut delivered: Option<AssetRef> = None;
        let outcome = form
            .submit(self.store.as_ref(), |asset| delivered = Some(asset.clone()))
            .await;

        match outcome {
            SubmitOutcome::Delivered(lead) => {
                let asset = delivered.ok_or_else(|| {
                    PortalError::lead_persistence(ctx.t(FormError::Generic.message_key()))
                })?;
                Ok(DownloadGrant {
                    lead_id: lead.id,
                    asset_name: asset.title,
                    file_url: asset.file_url,
                    display_ms: self.success_display.as_millis() as u64,
                })
            }
            SubmitOutcome::Invalid => Err(PortalError::invalid_email(
                ctx.t(FormError::InvalidEmail.message_key()),
            )),
            SubmitOutcome::Failed(_) => Err(PortalError::lead_persistence(
                ctx.t(FormError::Generic.message_key()),
            )),
            SubmitOutcome::Rejected => Err(PortalError::submission_in_progress(
                ctx.t("download.error.in_progress"),
            )),
        }
    }

    /// Newsletter signup: a lead without an asset
    pub async fn subscribe(&self, ctx: RegionContext, email: &str) -> Result<lead::Model> {
        let email = validate_email(email).map_err(|e| {
            debug!("Newsletter email rejected: {}", e);
            PortalError::invalid_email(ctx.t(FormError::InvalidEmail.message_key()))
        })?;

        let lead = self
            .store
            .insert_lead(
                ctx.region(),
                NewLead {
                    email,
                    source: LeadSource::Newsletter,
                    asset_name: None,
                },
            )
            .await
            .map_err(|e| {
                tracing::warn!("Failed to persist newsletter lead: {}", e);
                PortalError::lead_persistence(ctx.t(FormError::Generic.message_key()))
            })?;

        info!("Newsletter lead {} captured in region {}", lead.id, ctx.region());
        Ok(lead)
    }
}
