//! In-memory gateway that replays scripted responses.

use super::gateway::Gateway;
use crate::{
    error::{GenerationError, Result},
    models::{
        GenerateContentRequest, GenerateContentResponse, GenerateVideosRequest, InlineData,
        Candidate, Content, Part, VideoOperation,
    },
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

#[derive(Default)]
pub struct ScriptedGateway {
    content: Mutex<VecDeque<Result<GenerateContentResponse>>>,
    submissions: Mutex<VecDeque<Result<VideoOperation>>>,
    polls: Mutex<VecDeque<Result<VideoOperation>>>,
    content_requests: Mutex<Vec<(String, GenerateContentRequest)>>,
    video_requests: Mutex<Vec<(String, GenerateVideosRequest)>>,
    poll_count: Mutex<usize>,
    cancel_on_poll: Mutex<Option<CancellationToken>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(self, response: Result<GenerateContentResponse>) -> Self {
        self.content.lock().unwrap().push_back(response);
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.with_content(Ok(GenerateContentResponse::from_text(text)))
    }

    pub fn with_image(self, mime_type: &str, data: &str) -> Self {
        self.with_content(Ok(GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(Content {
                    role: Some("model".into()),
                    parts: vec![Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: mime_type.into(),
                            data: data.into(),
                        }),
                    }],
                }),
                finish_reason: Some("STOP".into()),
            }],
        }))
    }

    pub fn with_submission(self, operation: Result<VideoOperation>) -> Self {
        self.submissions.lock().unwrap().push_back(operation);
        self
    }

    pub fn with_poll(self, operation: Result<VideoOperation>) -> Self {
        self.polls.lock().unwrap().push_back(operation);
        self
    }

    /// The next status check cancels `token` and then never answers.
    pub fn cancelling_on_poll(self, token: CancellationToken) -> Self {
        *self.cancel_on_poll.lock().unwrap() = Some(token);
        self
    }

    pub fn content_requests(&self) -> Vec<(String, GenerateContentRequest)> {
        self.content_requests.lock().unwrap().clone()
    }

    pub fn video_requests(&self) -> Vec<(String, GenerateVideosRequest)> {
        self.video_requests.lock().unwrap().clone()
    }

    pub fn poll_count(&self) -> usize {
        *self.poll_count.lock().unwrap()
    }
}

fn exhausted() -> GenerationError {
    GenerationError::Network("no scripted response left".into())
}

#[async_trait]
impl Gateway for ScriptedGateway {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        self.content_requests
            .lock()
            .unwrap()
            .push((model.to_string(), request.clone()));
        self.content.lock().unwrap().pop_front().unwrap_or_else(|| Err(exhausted()))
    }

    async fn generate_videos(
        &self,
        model: &str,
        request: &GenerateVideosRequest,
    ) -> Result<VideoOperation> {
        self.video_requests
            .lock()
            .unwrap()
            .push((model.to_string(), request.clone()));
        self.submissions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(exhausted()))
    }

    async fn get_video_operation(&self, _operation: &VideoOperation) -> Result<VideoOperation> {
        *self.poll_count.lock().unwrap() += 1;
        let cancel = self.cancel_on_poll.lock().unwrap().take();
        if let Some(token) = cancel {
            token.cancel();
            std::future::pending::<()>().await;
        }
        self.polls.lock().unwrap().pop_front().unwrap_or_else(|| Err(exhausted()))
    }
}
