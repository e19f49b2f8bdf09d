use serde::{Deserialize, Serialize};

use guidance_core::model::{
    ChatMessage, ChatSession, ChatSessionSummary, Flashcard, FlashcardCollection,
    InterviewQuestion, MockInterview, Recommendation,
};

use crate::client::ApiClient;
use crate::error::ApiError;

/// Auxiliary AI endpoints: chat tutor, resume skill-gap analysis, mock
/// interviews, flashcards.
#[derive(Clone)]
pub struct AiService {
    client: ApiClient,
}

//
// ─── WIRE BODIES ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatBody<'a> {
    message: &'a ChatMessage,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_id: Option<i64>,
}

#[derive(Debug, Serialize)]
struct RenameBody<'a> {
    title: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SkillGapBody<'a> {
    resume: &'a str,
    target_role: &'a str,
}

#[derive(Debug, Serialize)]
struct MockInterviewBody<'a> {
    role: &'a str,
    rounds: u32,
}

#[derive(Debug, Serialize)]
struct FlashcardsBody<'a> {
    topic: &'a str,
    count: u32,
}

/// Generation endpoints answer either a bare array or `{"result": […]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GeneratedList<T> {
    Wrapped {
        #[serde(default = "Vec::new")]
        result: Vec<T>,
    },
    Plain(Vec<T>),
}

impl<T> GeneratedList<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            GeneratedList::Wrapped { result } => result,
            GeneratedList::Plain(items) => items,
        }
    }
}

//
// ─── RESPONSES ────────────────────────────────────────────────────────────────
//

/// A tutor reply. `session_id` names the (possibly freshly created) session
/// the exchange was stored under.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    #[serde(default)]
    pub session_id: Option<i64>,
    #[serde(default)]
    reply_markdown: Option<String>,
    #[serde(default)]
    reply: Option<String>,
}

impl ChatReply {
    /// The assistant's markdown content, whichever field carried it.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.reply_markdown
            .as_deref()
            .or(self.reply.as_deref())
            .filter(|text| !text.trim().is_empty())
    }
}

/// Skill-gap analysis output. The recommended path is an opaque document
/// rendered as formatted JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGapReport {
    #[serde(default)]
    pub recommended_path: Option<serde_json::Value>,
    #[serde(default)]
    pub recommendation_id: Option<i64>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl SkillGapReport {
    /// Pretty-printed body for display: the recommended path when present,
    /// the whole report otherwise.
    #[must_use]
    pub fn display_json(&self) -> String {
        let value = self.recommended_path.as_ref().unwrap_or(&self.extra);
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    }
}

impl AiService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Sends one user message; the backend builds context from the stored
    /// session history.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or decoding fails.
    pub async fn chat(
        &self,
        message: &ChatMessage,
        session_id: Option<i64>,
    ) -> Result<ChatReply, ApiError> {
        let body = ChatBody {
            message,
            session_id,
        };
        self.client.post("/api/ai/chat", &body).await
    }

    /// Saved tutor sessions, newest first as the backend orders them.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or decoding fails.
    pub async fn list_sessions(&self) -> Result<Vec<ChatSessionSummary>, ApiError> {
        self.client.get("/api/ai/sessions").await
    }

    /// A full session transcript.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or decoding fails.
    pub async fn get_session(&self, session_id: i64) -> Result<ChatSession, ApiError> {
        self.client
            .get(&format!("/api/ai/sessions/{session_id}"))
            .await
    }

    /// Renames a saved session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request fails.
    pub async fn rename_session(&self, session_id: i64, title: &str) -> Result<(), ApiError> {
        self.client
            .put_ignore_body(&format!("/api/ai/sessions/{session_id}"), &RenameBody { title })
            .await
    }

    /// Deletes a saved session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request fails.
    pub async fn delete_session(&self, session_id: i64) -> Result<(), ApiError> {
        self.client
            .delete(&format!("/api/ai/sessions/{session_id}"))
            .await
    }

    /// Analyzes resume text against a target role.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or decoding fails.
    pub async fn skill_gap(
        &self,
        resume: &str,
        target_role: &str,
    ) -> Result<SkillGapReport, ApiError> {
        let body = SkillGapBody {
            resume,
            target_role,
        };
        self.client.post("/api/ai/skill-gap", &body).await
    }

    /// Previously saved skill-gap recommendations.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or decoding fails.
    pub async fn list_recommendations(&self) -> Result<Vec<Recommendation>, ApiError> {
        self.client.get("/api/ai/recommendations").await
    }

    /// Generates a mock interview for a role.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or decoding fails.
    pub async fn mock_interview(
        &self,
        role: &str,
        rounds: u32,
    ) -> Result<Vec<InterviewQuestion>, ApiError> {
        let body = MockInterviewBody { role, rounds };
        let response: GeneratedList<InterviewQuestion> =
            self.client.post("/api/ai/mock-interview", &body).await?;
        Ok(response.into_items())
    }

    /// Previously generated mock interviews.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or decoding fails.
    pub async fn list_mock_interviews(&self) -> Result<Vec<MockInterview>, ApiError> {
        self.client.get("/api/ai/mock-interviews").await
    }

    /// Generates a flashcard deck for a topic.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or decoding fails.
    pub async fn flashcards(&self, topic: &str, count: u32) -> Result<Vec<Flashcard>, ApiError> {
        let body = FlashcardsBody { topic, count };
        let response: GeneratedList<Flashcard> =
            self.client.post("/api/ai/flashcards", &body).await?;
        Ok(response.into_items())
    }

    /// Previously saved flashcard collections.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request or decoding fails.
    pub async fn list_flashcard_collections(
        &self,
    ) -> Result<Vec<FlashcardCollection>, ApiError> {
        self.client.get("/api/ai/flashcards").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_reply_prefers_markdown_field() {
        let reply: ChatReply = serde_json::from_str(
            r#"{"sessionId":4,"replyMarkdown":"**hi**","reply":"hi"}"#,
        )
        .unwrap();
        assert_eq!(reply.session_id, Some(4));
        assert_eq!(reply.content(), Some("**hi**"));

        let legacy: ChatReply = serde_json::from_str(r#"{"reply":"plain"}"#).unwrap();
        assert_eq!(legacy.content(), Some("plain"));

        let empty: ChatReply = serde_json::from_str(r#"{"sessionId":1}"#).unwrap();
        assert_eq!(empty.content(), None);
    }

    #[test]
    fn generated_list_accepts_both_shapes() {
        let wrapped: GeneratedList<Flashcard> =
            serde_json::from_str(r#"{"result":[{"q":"?","a":"!"}],"flashcardCollectionId":9}"#)
                .unwrap();
        assert_eq!(wrapped.into_items().len(), 1);

        let plain: GeneratedList<Flashcard> =
            serde_json::from_str(r#"[{"q":"?","a":"!"}]"#).unwrap();
        assert_eq!(plain.into_items().len(), 1);
    }

    #[test]
    fn skill_gap_report_renders_recommended_path_when_present() {
        let report: SkillGapReport = serde_json::from_str(
            r#"{"recommendedPath":{"steps":["a"]},"recommendationId":3}"#,
        )
        .unwrap();
        assert!(report.display_json().contains("steps"));
    }
}
