//! Campaign use case implementation.
//!
//! `CampaignUseCase` is the campaign generation orchestrator: it creates the
//! profile/product/campaign trio as one logical unit (compensating on partial
//! failure), hands campaigns to the creative generator, applies
//! token-matched generator callbacks, and reconciles dispatches that never
//! received one.

use chrono::Utc;
use std::sync::Arc;

use adlift_core::campaign::{
    Campaign, CampaignFields, CampaignRepository, CreateCampaignRequest, CreativeOutput,
    DispatchToken,
};
use adlift_core::error::{AdliftError, Result};
use adlift_core::generator::{CreativeGenerator, GenerationJob};
use adlift_core::product::ProductRepository;
use adlift_core::profile::ProfileRepository;

/// Failure reason recorded when reconciliation times out a dispatch.
pub const GENERATION_TIMED_OUT: &str = "generation timed out";

/// Policy knobs for generation dispatch.
#[derive(Debug, Clone, Copy)]
pub struct GenerationPolicy {
    /// How long a dispatched campaign may wait for a callback before a
    /// reconciliation sweep fails it as timed out.
    pub timeout: chrono::Duration,
}

impl GenerationPolicy {
    pub fn with_timeout_minutes(minutes: i64) -> Self {
        Self {
            timeout: chrono::Duration::minutes(minutes),
        }
    }
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self::with_timeout_minutes(10)
    }
}

/// Use case for managing the campaign lifecycle end-to-end.
///
/// # Responsibilities
///
/// - Creating profile, product and campaign as one all-or-nothing unit
/// - Dispatching campaigns to the creative generator without blocking on it
/// - Applying generator callbacks with dispatch-token matching
/// - Reconciling dispatches whose callback never arrived
/// - Serving read-only campaign snapshots to dashboards
///
/// # Thread Safety
///
/// All collaborators are `Arc<dyn Trait>`; per-campaign mutations go through
/// the repository's versioned compare-and-set, so concurrent transitions on
/// one campaign cannot both apply. Callbacks may arrive from any task.
pub struct CampaignUseCase {
    /// Repository for target-user personas
    profile_repository: Arc<dyn ProfileRepository>,
    /// Repository for products under promotion
    product_repository: Arc<dyn ProductRepository>,
    /// Repository for campaigns (versioned conditional updates)
    campaign_repository: Arc<dyn CampaignRepository>,
    /// External creative generator
    generator: Arc<dyn CreativeGenerator>,
    /// Dispatch/reconciliation policy
    policy: GenerationPolicy,
}

impl CampaignUseCase {
    /// Creates a new `CampaignUseCase` instance.
    pub fn new(
        profile_repository: Arc<dyn ProfileRepository>,
        product_repository: Arc<dyn ProductRepository>,
        campaign_repository: Arc<dyn CampaignRepository>,
        generator: Arc<dyn CreativeGenerator>,
        policy: GenerationPolicy,
    ) -> Self {
        Self {
            profile_repository,
            product_repository,
            campaign_repository,
            generator,
            policy,
        }
    }

    // ========================================================================
    // Creation
    // ========================================================================

    /// Creates profile, product and campaign as one logical unit.
    ///
    /// Either all three entities exist afterwards or none do: if the product
    /// or campaign step fails, the entities already created in this call are
    /// deleted before the error is returned. Compensation never touches
    /// pre-existing records, and concurrent `create` calls are independent
    /// (each call builds a disjoint entity set).
    ///
    /// # Errors
    ///
    /// - `Validation` naming the first missing field
    /// - `Compensation` if the rollback itself failed (fatal inconsistency
    ///   requiring operator intervention)
    pub async fn create(&self, request: CreateCampaignRequest) -> Result<Campaign> {
        request.validate()?;

        let profile = request.profile.into_profile();
        self.profile_repository.insert(&profile).await?;

        let product = request.product.into_product();
        if let Err(err) = self.product_repository.insert(&product).await {
            self.compensate_profile(&profile.id).await?;
            return Err(err);
        }

        let campaign = request.campaign.into_campaign(&profile.id, &product.id);
        if let Err(err) = self.campaign_repository.insert(&campaign).await {
            self.compensate_product(&product.id).await?;
            self.compensate_profile(&profile.id).await?;
            return Err(err);
        }

        tracing::info!(
            target: "campaign",
            "Created campaign '{}' (profile '{}', product '{}')",
            campaign.id,
            profile.id,
            product.id
        );
        Ok(campaign)
    }

    async fn compensate_profile(&self, profile_id: &str) -> Result<()> {
        self.profile_repository.delete(profile_id).await.map_err(|e| {
            tracing::error!(
                target: "campaign",
                "Compensation failed: profile '{}' could not be rolled back: {}",
                profile_id,
                e
            );
            AdliftError::Compensation {
                entity_type: "profile",
                id: profile_id.to_string(),
                message: e.to_string(),
            }
        })
    }

    async fn compensate_product(&self, product_id: &str) -> Result<()> {
        self.product_repository.delete(product_id).await.map_err(|e| {
            tracing::error!(
                target: "campaign",
                "Compensation failed: product '{}' could not be rolled back: {}",
                product_id,
                e
            );
            AdliftError::Compensation {
                entity_type: "product",
                id: product_id.to_string(),
                message: e.to_string(),
            }
        })
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Hands a campaign to the creative generator.
    ///
    /// Allowed from `pending` (first attempt) and `failed` (retry — callers
    /// may retry an unbounded number of times). Mints a fresh dispatch token,
    /// transitions to `generating` under the versioned compare-and-set, then
    /// spawns the generator submit and returns without waiting for
    /// generation. A submit error is routed to the failure callback with the
    /// same token, leaving a retryable `failed` campaign.
    ///
    /// # Errors
    ///
    /// - `NotFound` for an unknown id
    /// - `InvalidState` while `generating` or `completed` (also reported by
    ///   the loser of a concurrent dispatch race)
    pub async fn dispatch(&self, campaign_id: &str) -> Result<Campaign> {
        let campaign = self.get_campaign(campaign_id).await?;

        // Snapshot the persona and product now so an in-flight attempt is
        // immune to later profile edits.
        let profile = self
            .profile_repository
            .find_by_id(&campaign.profile_id)
            .await?
            .ok_or_else(|| {
                AdliftError::internal(format!(
                    "campaign '{}' references missing profile '{}'",
                    campaign.id, campaign.profile_id
                ))
            })?;
        let product = self
            .product_repository
            .find_by_id(&campaign.product_id)
            .await?
            .ok_or_else(|| {
                AdliftError::internal(format!(
                    "campaign '{}' references missing product '{}'",
                    campaign.id, campaign.product_id
                ))
            })?;

        let token = DispatchToken::mint();
        let expected_version = campaign.version;
        let next = campaign.begin_generation(token.clone(), Utc::now())?;

        let stored = match self.campaign_repository.update(&next, expected_version).await {
            Ok(stored) => stored,
            Err(err) if err.is_conflict() => {
                // Another transition won the race; report the state it left.
                let fresh = self.get_campaign(campaign_id).await?;
                return Err(AdliftError::invalid_state(
                    campaign_id,
                    fresh.status().to_string(),
                    "dispatch",
                ));
            }
            Err(err) => return Err(err),
        };

        let job = GenerationJob {
            campaign_id: stored.id.clone(),
            dispatch_token: token.clone(),
            profile,
            product,
            fields: CampaignFields {
                objective: stored.objective.clone(),
                platform: stored.platform.clone(),
                duration_seconds: stored.duration_seconds,
                brand_tone: stored.brand_tone.clone(),
                cta_style: stored.cta_style.clone(),
                product_intent: stored.product_intent.clone(),
            },
        };

        tracing::info!(
            target: "campaign",
            "Dispatched campaign '{}' (token {})",
            stored.id,
            token
        );

        let generator = self.generator.clone();
        let campaign_repository = self.campaign_repository.clone();
        let campaign_id = stored.id.clone();
        tokio::spawn(async move {
            if let Err(err) = generator.submit(job).await {
                tracing::warn!(
                    target: "campaign",
                    "Generator submit for campaign '{}' failed: {}",
                    campaign_id,
                    err
                );
                let outcome = Self::apply_transition(
                    campaign_repository.as_ref(),
                    &campaign_id,
                    |campaign| campaign.fail(&token, format!("dispatch failed: {err}")),
                )
                .await;
                if let Err(apply_err) = outcome {
                    tracing::error!(
                        target: "campaign",
                        "Could not record submit failure for campaign '{}': {}",
                        campaign_id,
                        apply_err
                    );
                }
            }
        });

        Ok(stored)
    }

    // ========================================================================
    // Generator callbacks
    // ========================================================================

    /// Applies a success callback from the creative generator.
    ///
    /// Stores the outputs and transitions to `completed` iff the campaign is
    /// still `generating` under the echoed token. A stale token, a terminal
    /// state, or losing a concurrent-transition race all discard the result
    /// as a no-op: delayed duplicate callbacks are an expected race, not a
    /// fault.
    ///
    /// # Errors
    ///
    /// - `NotFound` for an unknown id
    pub async fn on_generation_success(
        &self,
        campaign_id: &str,
        token: &DispatchToken,
        creative_persona: serde_json::Value,
        prompt: String,
    ) -> Result<()> {
        let output = CreativeOutput {
            creative_persona,
            prompt,
        };
        let applied = Self::apply_transition(
            self.campaign_repository.as_ref(),
            campaign_id,
            move |campaign| campaign.complete(token, output.clone()),
        )
        .await?;
        if applied {
            tracing::info!(target: "campaign", "Campaign '{}' completed", campaign_id);
        }
        Ok(())
    }

    /// Applies a failure callback from the creative generator.
    ///
    /// Same token discipline as [`on_generation_success`]; on match the
    /// campaign becomes `failed` with the given reason and is retry-eligible
    /// via [`dispatch`].
    ///
    /// [`on_generation_success`]: CampaignUseCase::on_generation_success
    /// [`dispatch`]: CampaignUseCase::dispatch
    pub async fn on_generation_failure(
        &self,
        campaign_id: &str,
        token: &DispatchToken,
        reason: impl Into<String>,
    ) -> Result<()> {
        let reason = reason.into();
        let applied = Self::apply_transition(
            self.campaign_repository.as_ref(),
            campaign_id,
            |campaign| campaign.fail(token, reason.clone()),
        )
        .await?;
        if applied {
            tracing::warn!(
                target: "campaign",
                "Campaign '{}' failed: {}",
                campaign_id,
                reason
            );
        }
        Ok(())
    }

    /// Reads, transforms and conditionally writes one campaign.
    ///
    /// `transition` returns `None` when the change does not apply (stale
    /// token or wrong state); that and a version conflict are absorbed as
    /// no-ops. Returns whether the transition was applied.
    async fn apply_transition(
        repository: &dyn CampaignRepository,
        campaign_id: &str,
        transition: impl Fn(&Campaign) -> Option<Campaign>,
    ) -> Result<bool> {
        let campaign = repository
            .find_by_id(campaign_id)
            .await?
            .ok_or_else(|| AdliftError::not_found("campaign", campaign_id))?;

        let Some(next) = transition(&campaign) else {
            tracing::debug!(
                target: "campaign",
                "Discarded stale callback for campaign '{}' (status {})",
                campaign_id,
                campaign.status()
            );
            return Ok(false);
        };

        match repository.update(&next, campaign.version).await {
            Ok(_) => Ok(true),
            Err(err) if err.is_conflict() => {
                // The state advanced between our read and write, so the
                // callback's token no longer matches the current attempt.
                tracing::debug!(
                    target: "campaign",
                    "Discarded callback for campaign '{}' after version conflict",
                    campaign_id
                );
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Returns a snapshot of one campaign. Pure read, no side effects.
    pub async fn get_campaign(&self, campaign_id: &str) -> Result<Campaign> {
        self.campaign_repository
            .find_by_id(campaign_id)
            .await?
            .ok_or_else(|| AdliftError::not_found("campaign", campaign_id))
    }

    /// Returns snapshots of all campaigns. Pure read, no side effects.
    pub async fn list_campaigns(&self) -> Result<Vec<Campaign>> {
        self.campaign_repository.list_all().await
    }

    // ========================================================================
    // Reconciliation
    // ========================================================================

    /// Fails campaigns whose dispatch exceeded the policy timeout with no
    /// callback, making them retry-eligible.
    ///
    /// Uses the same token and version discipline as callbacks: a campaign
    /// that was re-dispatched since the sweep read it is left alone, and
    /// sweeping an already-`failed` campaign is a no-op. Returns the number
    /// of campaigns timed out.
    pub async fn reconcile(&self) -> Result<usize> {
        let now = Utc::now();
        let mut timed_out = 0usize;

        for campaign in self.campaign_repository.list_all().await? {
            if !campaign.is_dispatch_stale(now, self.policy.timeout) {
                continue;
            }
            // is_dispatch_stale only holds while generating, so a token is
            // present here.
            let Some(token) = campaign.dispatch_token().cloned() else {
                continue;
            };
            let campaign_id = campaign.id.clone();
            let applied =
                Self::apply_transition(self.campaign_repository.as_ref(), &campaign_id, |c| {
                    c.fail(&token, GENERATION_TIMED_OUT)
                })
                .await?;
            if applied {
                tracing::warn!(
                    target: "reconciler",
                    "Campaign '{}' timed out waiting for the generator",
                    campaign_id
                );
                timed_out += 1;
            }
        }

        Ok(timed_out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adlift_core::campaign::{
        CampaignFields, CampaignState, CampaignStatus, CreateCampaignRequest,
    };
    use adlift_core::product::{CreateProductRequest, Product};
    use adlift_core::profile::CreateProfileRequest;
    use adlift_infrastructure::{
        MemoryCampaignRepository, MemoryProductRepository, MemoryProfileRepository,
    };
    use std::sync::Mutex;

    /// Generator stub that records submitted jobs and never calls back.
    #[derive(Default)]
    struct RecordingGenerator {
        jobs: Mutex<Vec<GenerationJob>>,
    }

    #[async_trait::async_trait]
    impl CreativeGenerator for RecordingGenerator {
        async fn submit(&self, job: GenerationJob) -> Result<()> {
            self.jobs.lock().unwrap().push(job);
            Ok(())
        }
    }

    /// Generator stub whose submit always fails.
    struct BrokenGenerator;

    #[async_trait::async_trait]
    impl CreativeGenerator for BrokenGenerator {
        async fn submit(&self, _job: GenerationJob) -> Result<()> {
            Err(AdliftError::data_access("generator unreachable"))
        }
    }

    /// Product repository that rejects every insert, for compensation tests.
    struct RejectingProductRepository {
        inner: MemoryProductRepository,
    }

    #[async_trait::async_trait]
    impl ProductRepository for RejectingProductRepository {
        async fn insert(&self, _product: &Product) -> Result<()> {
            Err(AdliftError::data_access("product store unavailable"))
        }
        async fn find_by_id(&self, product_id: &str) -> Result<Option<Product>> {
            self.inner.find_by_id(product_id).await
        }
        async fn delete(&self, product_id: &str) -> Result<()> {
            self.inner.delete(product_id).await
        }
        async fn list_all(&self) -> Result<Vec<Product>> {
            self.inner.list_all().await
        }
    }

    struct Fixture {
        profiles: Arc<MemoryProfileRepository>,
        campaigns: Arc<MemoryCampaignRepository>,
        generator: Arc<RecordingGenerator>,
        usecase: CampaignUseCase,
    }

    fn fixture() -> Fixture {
        fixture_with_policy(GenerationPolicy::default())
    }

    fn fixture_with_policy(policy: GenerationPolicy) -> Fixture {
        let profiles = Arc::new(MemoryProfileRepository::new());
        let products = Arc::new(MemoryProductRepository::new());
        let campaigns = Arc::new(MemoryCampaignRepository::new());
        let generator = Arc::new(RecordingGenerator::default());
        let usecase = CampaignUseCase::new(
            profiles.clone(),
            products,
            campaigns.clone(),
            generator.clone(),
            policy,
        );
        Fixture {
            profiles,
            campaigns,
            generator,
            usecase,
        }
    }

    fn valid_request() -> CreateCampaignRequest {
        CreateCampaignRequest {
            profile: CreateProfileRequest {
                name: "Alex".to_string(),
                ..Default::default()
            },
            product: CreateProductRequest {
                name: "Widget".to_string(),
                description: "A compact widget".to_string(),
                features: vec!["compact".to_string()],
                ..Default::default()
            },
            campaign: CampaignFields {
                objective: "awareness".to_string(),
                platform: "instagram".to_string(),
                duration_seconds: 15,
                ..Default::default()
            },
        }
    }

    async fn drain_spawned_tasks() {
        for _ in 0..16 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_create_then_query_is_pending_without_outputs() {
        let fx = fixture();
        let campaign = fx.usecase.create(valid_request()).await.unwrap();

        let snapshot = fx.usecase.get_campaign(&campaign.id).await.unwrap();
        assert_eq!(snapshot.status(), CampaignStatus::Pending);
        assert!(snapshot.output().is_none());
        assert!(snapshot.failure_reason().is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input_without_persisting() {
        let fx = fixture();
        let mut request = valid_request();
        request.campaign.platform.clear();

        let err = fx.usecase.create(request).await.unwrap_err();
        assert!(err.is_validation());
        assert!(fx.usecase.list_campaigns().await.unwrap().is_empty());
        assert!(fx.profiles.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_compensates_when_product_step_fails() {
        let profiles = Arc::new(MemoryProfileRepository::new());
        let products = Arc::new(RejectingProductRepository {
            inner: MemoryProductRepository::new(),
        });
        let campaigns = Arc::new(MemoryCampaignRepository::new());
        let usecase = CampaignUseCase::new(
            profiles.clone(),
            products.clone(),
            campaigns.clone(),
            Arc::new(RecordingGenerator::default()),
            GenerationPolicy::default(),
        );

        let err = usecase.create(valid_request()).await.unwrap_err();
        assert!(!err.is_compensation());

        // nothing survived the failed creation
        assert!(profiles.list_all().await.unwrap().is_empty());
        assert!(products.list_all().await.unwrap().is_empty());
        assert!(campaigns.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_transitions_and_submits_job() {
        let fx = fixture();
        let campaign = fx.usecase.create(valid_request()).await.unwrap();

        let dispatched = fx.usecase.dispatch(&campaign.id).await.unwrap();
        assert_eq!(dispatched.status(), CampaignStatus::Generating);

        drain_spawned_tasks().await;
        let jobs = fx.generator.jobs.lock().unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].campaign_id, campaign.id);
        assert_eq!(Some(&jobs[0].dispatch_token), dispatched.dispatch_token());
        assert_eq!(jobs[0].profile.name, "Alex");
        assert_eq!(jobs[0].product.name, "Widget");
    }

    #[tokio::test]
    async fn test_second_dispatch_is_invalid_state() {
        let fx = fixture();
        let campaign = fx.usecase.create(valid_request()).await.unwrap();
        let dispatched = fx.usecase.dispatch(&campaign.id).await.unwrap();

        let err = fx.usecase.dispatch(&campaign.id).await.unwrap_err();
        assert!(err.is_invalid_state());

        // and the first dispatch is untouched
        let snapshot = fx.usecase.get_campaign(&campaign.id).await.unwrap();
        assert_eq!(snapshot.status(), CampaignStatus::Generating);
        assert_eq!(snapshot.dispatch_token(), dispatched.dispatch_token());
    }

    #[tokio::test]
    async fn test_dispatch_unknown_campaign_is_not_found() {
        let fx = fixture();
        let err = fx.usecase.dispatch("no-such-campaign").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_success_callback_stores_outputs() {
        let fx = fixture();
        let campaign = fx.usecase.create(valid_request()).await.unwrap();
        let dispatched = fx.usecase.dispatch(&campaign.id).await.unwrap();
        let token = dispatched.dispatch_token().unwrap().clone();

        fx.usecase
            .on_generation_success(
                &campaign.id,
                &token,
                serde_json::json!({"mood_and_tone": "upbeat"}),
                "prompt text".to_string(),
            )
            .await
            .unwrap();

        let snapshot = fx.usecase.get_campaign(&campaign.id).await.unwrap();
        assert_eq!(snapshot.status(), CampaignStatus::Completed);
        let output = snapshot.output().unwrap();
        assert_eq!(output.prompt, "prompt text");
        assert_eq!(output.creative_persona["mood_and_tone"], "upbeat");
    }

    #[tokio::test]
    async fn test_stale_token_callback_leaves_campaign_unchanged() {
        let fx = fixture();
        let campaign = fx.usecase.create(valid_request()).await.unwrap();
        fx.usecase.dispatch(&campaign.id).await.unwrap();
        let before = fx.usecase.get_campaign(&campaign.id).await.unwrap();

        let stale = DispatchToken::mint();
        fx.usecase
            .on_generation_success(
                &campaign.id,
                &stale,
                serde_json::json!({}),
                "stale prompt".to_string(),
            )
            .await
            .unwrap();
        fx.usecase
            .on_generation_failure(&campaign.id, &stale, "stale failure")
            .await
            .unwrap();

        let after = fx.usecase.get_campaign(&campaign.id).await.unwrap();
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn test_failure_callback_then_retry_mints_new_token() {
        let fx = fixture();
        let campaign = fx.usecase.create(valid_request()).await.unwrap();
        let first = fx.usecase.dispatch(&campaign.id).await.unwrap();
        let first_token = first.dispatch_token().unwrap().clone();

        fx.usecase
            .on_generation_failure(&campaign.id, &first_token, "model overloaded")
            .await
            .unwrap();
        let failed = fx.usecase.get_campaign(&campaign.id).await.unwrap();
        assert_eq!(failed.status(), CampaignStatus::Failed);
        assert_eq!(failed.failure_reason(), Some("model overloaded"));

        let retried = fx.usecase.dispatch(&campaign.id).await.unwrap();
        assert_eq!(retried.status(), CampaignStatus::Generating);
        assert_ne!(retried.dispatch_token(), Some(&first_token));

        // the original attempt's late success no longer applies
        fx.usecase
            .on_generation_success(
                &campaign.id,
                &first_token,
                serde_json::json!({}),
                "late".to_string(),
            )
            .await
            .unwrap();
        let snapshot = fx.usecase.get_campaign(&campaign.id).await.unwrap();
        assert_eq!(snapshot.status(), CampaignStatus::Generating);
    }

    #[tokio::test]
    async fn test_broken_generator_degrades_into_retryable_failure() {
        let profiles = Arc::new(MemoryProfileRepository::new());
        let products = Arc::new(MemoryProductRepository::new());
        let campaigns = Arc::new(MemoryCampaignRepository::new());
        let usecase = CampaignUseCase::new(
            profiles,
            products,
            campaigns,
            Arc::new(BrokenGenerator),
            GenerationPolicy::default(),
        );

        let campaign = usecase.create(valid_request()).await.unwrap();
        usecase.dispatch(&campaign.id).await.unwrap();
        drain_spawned_tasks().await;

        let snapshot = usecase.get_campaign(&campaign.id).await.unwrap();
        assert_eq!(snapshot.status(), CampaignStatus::Failed);
        assert!(snapshot.failure_reason().unwrap().contains("dispatch failed"));
    }

    #[tokio::test]
    async fn test_reconcile_times_out_stale_dispatch_only() {
        let fx = fixture_with_policy(GenerationPolicy::with_timeout_minutes(10));
        let stale = fx.usecase.create(valid_request()).await.unwrap();
        let fresh = fx.usecase.create(valid_request()).await.unwrap();
        fx.usecase.dispatch(&stale.id).await.unwrap();
        fx.usecase.dispatch(&fresh.id).await.unwrap();

        // age the first dispatch past the timeout by rewriting its timestamp
        let stored = fx.usecase.get_campaign(&stale.id).await.unwrap();
        let mut aged = stored.clone();
        if let CampaignState::Generating { dispatched_at, .. } = &mut aged.state {
            *dispatched_at = Utc::now() - chrono::Duration::minutes(30);
        }
        fx.campaigns.update(&aged, stored.version).await.unwrap();

        assert_eq!(fx.usecase.reconcile().await.unwrap(), 1);

        let timed_out = fx.usecase.get_campaign(&stale.id).await.unwrap();
        assert_eq!(timed_out.status(), CampaignStatus::Failed);
        assert_eq!(timed_out.failure_reason(), Some(GENERATION_TIMED_OUT));
        let untouched = fx.usecase.get_campaign(&fresh.id).await.unwrap();
        assert_eq!(untouched.status(), CampaignStatus::Generating);

        // a second sweep finds nothing left to fail
        assert_eq!(fx.usecase.reconcile().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_reconciled_campaign_is_retry_eligible() {
        let fx = fixture_with_policy(GenerationPolicy::with_timeout_minutes(10));
        let campaign = fx.usecase.create(valid_request()).await.unwrap();
        fx.usecase.dispatch(&campaign.id).await.unwrap();

        let stored = fx.usecase.get_campaign(&campaign.id).await.unwrap();
        let mut aged = stored.clone();
        if let CampaignState::Generating { dispatched_at, .. } = &mut aged.state {
            *dispatched_at = Utc::now() - chrono::Duration::hours(1);
        }
        fx.campaigns.update(&aged, stored.version).await.unwrap();
        fx.usecase.reconcile().await.unwrap();

        let retried = fx.usecase.dispatch(&campaign.id).await.unwrap();
        assert_eq!(retried.status(), CampaignStatus::Generating);
    }
}
