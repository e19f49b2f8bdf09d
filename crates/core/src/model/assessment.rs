use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Topic;

//
// ─── QUIZ GENERATION ──────────────────────────────────────────────────────────
//

/// One AI-generated multiple-choice question. Option keys are the letters the
/// user picks from; `answer` holds the correct key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentQuestion {
    pub question: String,
    #[serde(default)]
    pub options: BTreeMap<String, String>,
    #[serde(default)]
    pub answer: String,
}

//
// ─── SUBMISSION ───────────────────────────────────────────────────────────────
//

/// One answered question, as the evaluation endpoint expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question: String,
    pub correct_answer: String,
    pub user_answer: String,
}

/// Body for `POST …/assessment/evaluate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentSubmission {
    pub topic: String,
    pub answers: Vec<AnswerRecord>,
}

impl AssessmentSubmission {
    /// Pairs generated questions with the user's selections. Unanswered
    /// questions are submitted with an empty answer.
    #[must_use]
    pub fn from_selections(
        topic: impl Into<String>,
        questions: &[AssessmentQuestion],
        selections: &BTreeMap<usize, String>,
    ) -> Self {
        let answers = questions
            .iter()
            .enumerate()
            .map(|(i, q)| AnswerRecord {
                question: q.question.clone(),
                correct_answer: q.answer.clone(),
                user_answer: selections.get(&i).cloned().unwrap_or_default(),
            })
            .collect();
        Self {
            topic: topic.into(),
            answers,
        }
    }
}

//
// ─── STORED RESULT ────────────────────────────────────────────────────────────
//

/// Per-question row of a stored evaluation. Field aliases cover the two
/// shapes the backend has emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRow {
    #[serde(default)]
    pub question: String,
    #[serde(default, alias = "selected")]
    pub user_answer: Option<String>,
    #[serde(default, alias = "answer")]
    pub correct_answer: Option<String>,
    #[serde(default)]
    pub is_correct: bool,
}

/// Decoded form of a topic's opaque `assessment_result` blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub evaluated_at: Option<String>,
    #[serde(default, alias = "evaluations")]
    pub evaluation: Vec<EvaluationRow>,
}

impl AssessmentResult {
    /// Decodes the stored result of a topic, if any.
    ///
    /// The backend stores the blob either as an inline object or as a
    /// string-encoded JSON document; both decode here. Returns `None` when no
    /// result is stored or the blob does not parse.
    #[must_use]
    pub fn parse(topic: &Topic) -> Option<Self> {
        let raw = topic.assessment_result.as_ref()?;
        match raw {
            serde_json::Value::String(text) => serde_json::from_str(text).ok(),
            other => serde_json::from_value(other.clone()).ok(),
        }
    }
}
