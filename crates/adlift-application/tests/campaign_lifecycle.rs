//! End-to-end campaign lifecycle test against the in-memory entity store.
//!
//! Plays the creation wizard and a creative generator against the
//! orchestrator: create as one unit, dispatch, fail, retry with a fresh
//! token, discard the stale callback, complete, and verify terminal state.

use std::sync::Arc;
use std::time::Duration;

use adlift_application::{CampaignUseCase, GenerationPolicy, MediaService};
use adlift_core::campaign::{CampaignFields, CampaignStatus, CreateCampaignRequest};
use adlift_core::error::Result;
use adlift_core::generator::{CreativeGenerator, GenerationJob};
use adlift_core::product::{CreateProductRequest, ProductRepository};
use adlift_core::profile::{AttributeMap, AttributeValue, CreateProfileRequest};
use adlift_infrastructure::{
    LocalBlobStore, MemoryCampaignRepository, MemoryProductRepository, MemoryProfileRepository,
};
use tokio::sync::mpsc;

/// Generator that forwards every submitted job to the test over a channel,
/// like a real generator picking work off its queue.
struct ChannelGenerator {
    sender: mpsc::UnboundedSender<GenerationJob>,
}

#[async_trait::async_trait]
impl CreativeGenerator for ChannelGenerator {
    async fn submit(&self, job: GenerationJob) -> Result<()> {
        self.sender.send(job).ok();
        Ok(())
    }
}

struct Harness {
    products: Arc<MemoryProductRepository>,
    usecase: CampaignUseCase,
    jobs: mpsc::UnboundedReceiver<GenerationJob>,
}

fn harness() -> Harness {
    let (sender, jobs) = mpsc::unbounded_channel();
    let products = Arc::new(MemoryProductRepository::new());
    let usecase = CampaignUseCase::new(
        Arc::new(MemoryProfileRepository::new()),
        products.clone(),
        Arc::new(MemoryCampaignRepository::new()),
        Arc::new(ChannelGenerator { sender }),
        GenerationPolicy::default(),
    );
    Harness {
        products,
        usecase,
        jobs,
    }
}

async fn next_job(jobs: &mut mpsc::UnboundedReceiver<GenerationJob>) -> GenerationJob {
    tokio::time::timeout(Duration::from_secs(1), jobs.recv())
        .await
        .expect("generator received no job within 1s")
        .expect("job channel closed")
}

fn wizard_request(image_url: Option<String>) -> CreateCampaignRequest {
    CreateCampaignRequest {
        profile: CreateProfileRequest {
            name: "Alex".to_string(),
            media_preferences: Some(AttributeMap::from([(
                "preferred_platforms".to_string(),
                AttributeValue::List(vec!["instagram".to_string()]),
            )])),
            ..Default::default()
        },
        product: CreateProductRequest {
            name: "Widget".to_string(),
            description: "d".to_string(),
            features: vec!["a".to_string()],
            image_url,
        },
        campaign: CampaignFields {
            objective: "awareness".to_string(),
            platform: "instagram".to_string(),
            duration_seconds: 15,
            ..Default::default()
        },
    }
}

#[tokio::test]
async fn full_lifecycle_with_failure_retry_and_stale_callback() {
    let mut h = harness();

    // create as one unit, starts pending
    let campaign = h.usecase.create(wizard_request(None)).await.unwrap();
    assert_eq!(campaign.status(), CampaignStatus::Pending);

    // first dispatch reaches the generator
    let dispatched = h.usecase.dispatch(&campaign.id).await.unwrap();
    assert_eq!(dispatched.status(), CampaignStatus::Generating);
    let first_job = next_job(&mut h.jobs).await;
    assert_eq!(first_job.campaign_id, campaign.id);
    assert_eq!(first_job.profile.name, "Alex");
    assert_eq!(first_job.fields.duration_seconds, 15);

    // the generator reports a failure; the campaign becomes retryable
    h.usecase
        .on_generation_failure(&campaign.id, &first_job.dispatch_token, "model overloaded")
        .await
        .unwrap();
    let failed = h.usecase.get_campaign(&campaign.id).await.unwrap();
    assert_eq!(failed.status(), CampaignStatus::Failed);
    assert_eq!(failed.failure_reason(), Some("model overloaded"));

    // retry re-enters generating with a fresh token
    h.usecase.dispatch(&campaign.id).await.unwrap();
    let second_job = next_job(&mut h.jobs).await;
    assert_ne!(second_job.dispatch_token, first_job.dispatch_token);

    // a late success from the first attempt is discarded
    h.usecase
        .on_generation_success(
            &campaign.id,
            &first_job.dispatch_token,
            serde_json::json!({"narrative_arc": "stale"}),
            "stale prompt".to_string(),
        )
        .await
        .unwrap();
    assert_eq!(
        h.usecase.get_campaign(&campaign.id).await.unwrap().status(),
        CampaignStatus::Generating
    );

    // the current attempt completes and stores its outputs
    h.usecase
        .on_generation_success(
            &campaign.id,
            &second_job.dispatch_token,
            serde_json::json!({"mood_and_tone": "upbeat"}),
            "prompt text".to_string(),
        )
        .await
        .unwrap();
    let completed = h.usecase.get_campaign(&campaign.id).await.unwrap();
    assert_eq!(completed.status(), CampaignStatus::Completed);
    assert_eq!(completed.output().unwrap().prompt, "prompt text");

    // completed is terminal success: no implicit regeneration
    assert!(
        h.usecase
            .dispatch(&campaign.id)
            .await
            .unwrap_err()
            .is_invalid_state()
    );

    let all = h.usecase.list_campaigns().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].status(), CampaignStatus::Completed);
}

#[tokio::test]
async fn uploaded_image_url_flows_into_the_product() {
    let h = harness();

    let dir = tempfile::tempdir().unwrap();
    let media = MediaService::new(Arc::new(LocalBlobStore::new(
        dir.path(),
        "http://127.0.0.1:8000",
    )));
    let url = media.upload_image(b"png bytes", "widget.png").await.unwrap();

    let campaign = h
        .usecase
        .create(wizard_request(Some(url.clone())))
        .await
        .unwrap();
    let product = h
        .products
        .find_by_id(&campaign.product_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.image_url, Some(url));
}
