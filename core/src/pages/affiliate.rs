// storefront/src/pages/affiliate.rs

//! "Who is the current affiliate" query shared by every affiliate page.

use crate::core::{ContextData, PipelineControl};
use crate::error::{ApiError, ApiResult, PipelineError};
use crate::models::{AffiliateLink, AffiliateProfile, AffiliateStats, AffiliateStatus};
use crate::pipeline::Pipeline;
use crate::services::{AffiliateLinkService, AffiliateService};
use crate::session::Session;
use futures_util::future::try_join;
use tracing::{event, instrument, Level};

/// What the signed-in user may see on the affiliate pages.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AffiliateAccess {
  /// No customer token.
  #[default]
  Anonymous,
  /// Signed in, but no affiliate profile exists yet.
  NotRegistered,
  /// Profile exists but is pending, rejected or suspended.
  Inactive(AffiliateProfile),
  Active {
    profile: AffiliateProfile,
    stats: AffiliateStats,
    links: Vec<AffiliateLink>,
  },
}

#[derive(Debug, Clone, Default)]
pub struct AffiliateContext {
  pub profile: Option<AffiliateProfile>,
  pub access: AffiliateAccess,
}

pub fn affiliate_pipeline(
  session: Session,
  affiliates: AffiliateService,
  links: AffiliateLinkService,
) -> Result<Pipeline<AffiliateContext, ApiError>, PipelineError> {
  let mut pipeline = Pipeline::new(
    "affiliate_access",
    &["check_session", "load_profile", "gate_status", "load_dashboard"],
  );

  pipeline.on_root("check_session", move |ctx: ContextData<AffiliateContext>| {
    let signed_in = session.token().is_some();
    async move {
      if signed_in {
        return Ok::<_, ApiError>(PipelineControl::Continue);
      }
      ctx.update(|c| c.access = AffiliateAccess::Anonymous);
      Ok(PipelineControl::Stop)
    }
  })?;

  let profile_service = affiliates.clone();
  pipeline.on_root("load_profile", move |ctx: ContextData<AffiliateContext>| {
    let affiliates = profile_service.clone();
    async move {
      match affiliates.profile().await {
        Ok(profile) => {
          ctx.update(|c| c.profile = Some(profile));
          Ok(PipelineControl::Continue)
        }
        Err(e) if e.is_not_found() => {
          ctx.update(|c| c.access = AffiliateAccess::NotRegistered);
          Ok(PipelineControl::Stop)
        }
        Err(e) => Err::<PipelineControl, ApiError>(e),
      }
    }
  })?;

  pipeline.on_root("gate_status", |ctx: ContextData<AffiliateContext>| async move {
    let profile = ctx
      .read()
      .profile
      .clone()
      .ok_or_else(|| PipelineError::Internal("gate_status ran without a profile".to_string()))?;
    if profile.status == AffiliateStatus::Active {
      return Ok::<_, ApiError>(PipelineControl::Continue);
    }
    event!(Level::INFO, status = profile.status.as_str(), "Affiliate is not active.");
    ctx.update(|c| c.access = AffiliateAccess::Inactive(profile));
    Ok(PipelineControl::Stop)
  })?;

  pipeline.on_root("load_dashboard", move |ctx: ContextData<AffiliateContext>| {
    let affiliates = affiliates.clone();
    let link_service = links.clone();
    async move {
      let (stats, links) = try_join(affiliates.stats(), link_service.list()).await?;
      ctx.update(|c| {
        if let Some(profile) = c.profile.clone() {
          c.access = AffiliateAccess::Active { profile, stats, links };
        }
      });
      Ok::<_, ApiError>(PipelineControl::Continue)
    }
  })?;

  Ok(pipeline)
}

#[instrument(name = "pages::load_affiliate_access", skip_all, err(Display))]
pub async fn load_affiliate_access(
  session: &Session,
  affiliates: &AffiliateService,
  links: &AffiliateLinkService,
) -> ApiResult<AffiliateAccess> {
  let pipeline = affiliate_pipeline(session.clone(), affiliates.clone(), links.clone())?;
  let ctx = ContextData::new(AffiliateContext::default());
  pipeline.run(ctx.clone()).await?;
  let access = ctx.read().access.clone();
  Ok(access)
}
