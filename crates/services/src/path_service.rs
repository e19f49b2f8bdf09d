use serde::{Deserialize, Serialize};

use guidance_core::model::{
    AssessmentQuestion, AssessmentSubmission, LearningPath, RegenerateReason, Topic,
    TopicResource,
};

use crate::client::ApiClient;
use crate::error::ApiError;

/// Learning-path endpoints: one typed function per backend action, fixed
/// method and path template, response body returned as decoded but otherwise
/// uninterpreted data.
#[derive(Clone)]
pub struct PathService {
    client: ApiClient,
}

#[derive(Debug, Serialize)]
struct CreatePathBody<'a> {
    domain: &'a str,
    path: &'a [Topic],
}

#[derive(Debug, Serialize)]
struct UpdatePathBody<'a> {
    path: &'a [Topic],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegenerateBody {
    from_index: usize,
    reason: RegenerateReason,
}

/// The explain endpoint answers either a bare string or `{"explanation": …}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExplainResponse {
    Wrapped { explanation: String },
    Plain(String),
    Other(serde_json::Value),
}

impl PathService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// All learning paths of the current user.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or decoding fails.
    pub async fn list_paths(&self) -> Result<Vec<LearningPath>, ApiError> {
        self.client.get("/api/paths").await
    }

    /// A single path by id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or decoding fails.
    pub async fn get_path(&self, path_id: i64) -> Result<LearningPath, ApiError> {
        self.client.get(&format!("/api/paths/{path_id}")).await
    }

    /// Creates a path. An empty `topics` slice asks the backend to generate
    /// the curriculum with AI; a non-empty one submits a manual plan.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or decoding fails.
    pub async fn create_path(
        &self,
        domain: &str,
        topics: &[Topic],
    ) -> Result<LearningPath, ApiError> {
        let body = CreatePathBody {
            domain,
            path: topics,
        };
        self.client.post("/api/paths", &body).await
    }

    /// Replaces the topic sequence of a path, returning the updated path.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or decoding fails.
    pub async fn update_path(
        &self,
        path_id: i64,
        topics: &[Topic],
    ) -> Result<LearningPath, ApiError> {
        let body = UpdatePathBody { path: topics };
        self.client.put(&format!("/api/paths/{path_id}"), &body).await
    }

    /// Generates a quiz for one topic.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or decoding fails.
    pub async fn generate_assessment(
        &self,
        path_id: i64,
        topic_index: usize,
    ) -> Result<Vec<AssessmentQuestion>, ApiError> {
        self.client
            .post_empty(&format!(
                "/api/paths/{path_id}/assessment?topicIndex={topic_index}"
            ))
            .await
    }

    /// Submits quiz answers for grading. The backend stores the result on
    /// the topic (possibly flipping its status) and returns the updated
    /// path.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or decoding fails.
    pub async fn evaluate_assessment(
        &self,
        path_id: i64,
        topic_index: usize,
        submission: &AssessmentSubmission,
    ) -> Result<LearningPath, ApiError> {
        self.client
            .post(
                &format!("/api/paths/{path_id}/assessment/evaluate?topicIndex={topic_index}"),
                submission,
            )
            .await
    }

    /// An AI explanation of one topic, as display text.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or decoding fails.
    pub async fn explain(&self, path_id: i64, topic_index: usize) -> Result<String, ApiError> {
        let response: ExplainResponse = self
            .client
            .post_empty(&format!(
                "/api/paths/{path_id}/explain?topicIndex={topic_index}"
            ))
            .await?;
        Ok(match response {
            ExplainResponse::Wrapped { explanation } => explanation,
            ExplainResponse::Plain(text) => text,
            ExplainResponse::Other(value) => value.to_string(),
        })
    }

    /// Suggested learning resources for one topic.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or decoding fails.
    pub async fn resources(
        &self,
        path_id: i64,
        topic_index: usize,
    ) -> Result<Vec<TopicResource>, ApiError> {
        self.client
            .post_empty(&format!(
                "/api/paths/{path_id}/resources?topicIndex={topic_index}"
            ))
            .await
    }

    /// Asks the backend to re-plan the remaining topics from `from_index`
    /// on, returning the re-scheduled path.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or decoding fails.
    pub async fn regenerate(
        &self,
        path_id: i64,
        from_index: usize,
        reason: RegenerateReason,
    ) -> Result<LearningPath, ApiError> {
        let body = RegenerateBody { from_index, reason };
        self.client
            .post(&format!("/api/paths/{path_id}/regenerate"), &body)
            .await
    }
}
