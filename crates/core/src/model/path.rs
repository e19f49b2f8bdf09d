use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

//
// ─── TOPIC STATUS ─────────────────────────────────────────────────────────────
//

/// Completion state of a single topic.
///
/// The client requests transitions (mark done, submit an assessment), but the
/// backend is authoritative: evaluating an assessment may set either
/// `Completed` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicStatus {
    Pending,
    Completed,
    Failed,
}

impl TopicStatus {
    /// Lowercase wire/display label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TopicStatus::Pending => "pending",
            TopicStatus::Completed => "completed",
            TopicStatus::Failed => "failed",
        }
    }
}

//
// ─── TOPIC ────────────────────────────────────────────────────────────────────
//

/// One scheduled unit of study within a learning path.
///
/// Dates are calendar dates; manually created topics carry no schedule until
/// the backend assigns one. `assessment_result` is an opaque blob owned by the
/// backend, decoded on demand via [`super::AssessmentResult::parse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Scheduled length in days.
    #[serde(default)]
    pub duration: u32,
    #[serde(default = "default_status")]
    pub status: TopicStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment_result: Option<serde_json::Value>,
}

fn default_status() -> TopicStatus {
    TopicStatus::Pending
}

impl Topic {
    /// A manual draft topic: label and duration only, schedule left to the
    /// backend.
    #[must_use]
    pub fn draft(topic: impl Into<String>, duration: u32) -> Self {
        Self {
            topic: topic.into(),
            start_date: None,
            end_date: None,
            duration,
            status: TopicStatus::Pending,
            assessment_result: None,
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == TopicStatus::Completed
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == TopicStatus::Pending
    }
}

//
// ─── LEARNING PATH ────────────────────────────────────────────────────────────
//

/// An ordered curriculum of topics with scheduling metadata, generated by the
/// backend's AI or entered manually. Owned by the authenticated user; the
/// client never caches one beyond the current view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPath {
    pub id: i64,
    #[serde(default)]
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Topic sequence. The backend may omit the field entirely for a freshly
    /// created, not-yet-generated path.
    #[serde(default)]
    pub path: Vec<Topic>,
}

impl LearningPath {
    #[must_use]
    pub fn topic_count(&self) -> usize {
        self.path.len()
    }
}

//
// ─── REGENERATION ─────────────────────────────────────────────────────────────
//

/// Why a schedule regeneration was requested. Sent verbatim to the backend,
/// which re-plans the remaining topics from a given index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegenerateReason {
    Procrastination,
    Failure,
}

impl RegenerateReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RegenerateReason::Procrastination => "procrastination",
            RegenerateReason::Failure => "failure",
        }
    }
}
