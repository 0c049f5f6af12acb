use super::{gateway::Gateway, polling::wait_for_completion};
use crate::{
    clock::Clock,
    config::GeminiConfig,
    error::{GenerationError, Result},
    logger,
    models::{with_access_key, GenerateVideosRequest, GeneratedVideo},
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Clone)]
pub struct VideoClient {
    gateway: Arc<dyn Gateway>,
    config: Arc<GeminiConfig>,
    clock: Arc<dyn Clock>,
}

impl VideoClient {
    pub fn new(gateway: Arc<dyn Gateway>, config: Arc<GeminiConfig>, clock: Arc<dyn Clock>) -> Self {
        Self {
            gateway,
            config,
            clock,
        }
    }

    pub async fn generate(&self, prompt: &str) -> Result<GeneratedVideo> {
        self.generate_with_cancel(prompt, &CancellationToken::new())
            .await
    }

    /// Submits the job, then waits for it under the configured poll policy.
    pub async fn generate_with_cancel(
        &self,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<GeneratedVideo> {
        let _timer = logger::timer("video generation");
        let model = self.config.video_model.as_str();
        let request = GenerateVideosRequest::prompt(prompt);

        log::info!("Submitting video job to {}", model);

        let submitted = self
            .gateway
            .generate_videos(model, &request)
            .await
            .map_err(|e| {
                log::error!("Error generating video: {}", e);
                e
            })?;

        log::info!("Video job {} accepted", submitted.name);

        let (finished, status_checks) = wait_for_completion(
            self.gateway.as_ref(),
            self.clock.as_ref(),
            &self.config.poll,
            cancel,
            submitted,
        )
        .await
        .map_err(|e| {
            log::error!("Error generating video: {}", e);
            e
        })?;

        let uri = finished.video_uri().ok_or(GenerationError::NoVideoUri)?;
        let api_key = self.config.resolve_api_key()?;

        Ok(GeneratedVideo {
            uri: with_access_key(uri, &api_key),
            operation: finished.name.clone(),
            status_checks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::gemini::polling::DEFAULT_POLL_INTERVAL;
    use crate::gemini::testing::ScriptedGateway;
    use crate::models::VideoOperation;

    const URI: &str = "https://generativelanguage.googleapis.com/v1beta/files/abc:download?alt=media";

    fn client(gateway: Arc<ScriptedGateway>, clock: ManualClock) -> VideoClient {
        VideoClient::new(
            gateway,
            Arc::new(GeminiConfig::new().with_api_key("secret")),
            Arc::new(clock),
        )
    }

    #[tokio::test]
    async fn test_not_done_twice_then_done() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .with_submission(Ok(VideoOperation::pending("models/veo/operations/1")))
                .with_poll(Ok(VideoOperation::pending("models/veo/operations/1")))
                .with_poll(Ok(VideoOperation::completed(
                    "models/veo/operations/1",
                    Some(URI),
                ))),
        );
        let clock = ManualClock::new();

        let video = client(gateway.clone(), clock.clone())
            .generate("drone shot over a beach")
            .await
            .unwrap();

        assert_eq!(video.uri, format!("{}&key=secret", URI));
        assert_eq!(video.status_checks, 2);
        assert_eq!(clock.sleeps(), vec![DEFAULT_POLL_INTERVAL; 2]);

        let requests = gateway.video_requests();
        assert_eq!(requests[0].0, "veo-3.1-fast-generate-preview");
        assert_eq!(requests[0].1.parameters.resolution, "720p");
        assert_eq!(requests[0].1.parameters.aspect_ratio, "16:9");
    }

    #[tokio::test]
    async fn test_done_without_uri() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .with_submission(Ok(VideoOperation::pending("op")))
                .with_poll(Ok(VideoOperation::completed("op", None))),
        );
        let err = client(gateway, ManualClock::new())
            .generate("a cat")
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::NoVideoUri));
    }

    #[tokio::test]
    async fn test_poll_failure_is_not_retried() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .with_submission(Ok(VideoOperation::pending("op")))
                .with_poll(Err(GenerationError::Network("connection reset".into())))
                .with_poll(Ok(VideoOperation::completed("op", Some(URI)))),
        );
        let err = client(gateway.clone(), ManualClock::new())
            .generate("a cat")
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Network(_)));
        assert_eq!(gateway.poll_count(), 1);
    }

    #[tokio::test]
    async fn test_cancel_stops_waiting_on_job() {
        let cancel = CancellationToken::new();
        let gateway = Arc::new(
            ScriptedGateway::new()
                .with_submission(Ok(VideoOperation::pending("op")))
                .cancelling_on_poll(cancel.clone()),
        );
        let clock = ManualClock::new();

        let err = client(gateway.clone(), clock.clone())
            .generate_with_cancel("a cat", &cancel)
            .await
            .unwrap_err();

        assert!(matches!(err, GenerationError::Cancelled));
        assert_eq!(gateway.video_requests().len(), 1);
        assert_eq!(gateway.poll_count(), 1);
        assert_eq!(clock.sleep_count(), 1);
    }
}
