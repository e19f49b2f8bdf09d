use serde::{Deserialize, Serialize};

/// One question/answer flashcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub a: String,
}

/// A saved flashcard deck. `content_json` is a string-encoded card array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardCollection {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub content_json: Option<String>,
}

impl FlashcardCollection {
    #[must_use]
    pub fn display_title(&self) -> String {
        self.title
            .clone()
            .or_else(|| self.topic.clone())
            .unwrap_or_else(|| format!("Collection {}", self.id))
    }

    /// Decodes the saved card array, empty when absent or malformed.
    #[must_use]
    pub fn cards(&self) -> Vec<Flashcard> {
        self.content_json
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default()
    }
}

/// One generated interview question, optionally with follow-ups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    #[serde(default, alias = "prompt")]
    pub question: String,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub followups: Vec<String>,
}

/// A saved mock-interview run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockInterview {
    pub id: i64,
    #[serde(default, alias = "role")]
    pub role_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub content_json: Option<String>,
}

impl MockInterview {
    #[must_use]
    pub fn display_title(&self) -> String {
        self.role_name
            .clone()
            .unwrap_or_else(|| format!("Interview {}", self.id))
    }

    /// Decodes the saved question array, empty when absent or malformed.
    #[must_use]
    pub fn questions(&self) -> Vec<InterviewQuestion> {
        self.content_json
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default()
    }
}

/// A saved skill-gap recommendation from the resume analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: i64,
    #[serde(default)]
    pub target_role: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub content_json: Option<String>,
}

impl Recommendation {
    #[must_use]
    pub fn display_title(&self) -> String {
        self.target_role
            .clone()
            .unwrap_or_else(|| "Recommendation".to_string())
    }
}

/// A suggested learning resource for a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicResource {
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_cards_decode_from_content_json() {
        let collection = FlashcardCollection {
            id: 1,
            title: Some("React hooks".into()),
            topic: None,
            created_at: None,
            content_json: Some(r#"[{"q":"What is useState?","a":"A state hook."}]"#.into()),
        };
        let cards = collection.cards();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].q, "What is useState?");
    }

    #[test]
    fn malformed_content_json_yields_no_cards() {
        let collection = FlashcardCollection {
            id: 2,
            title: None,
            topic: Some("SQL".into()),
            created_at: None,
            content_json: Some("{broken".into()),
        };
        assert!(collection.cards().is_empty());
        assert_eq!(collection.display_title(), "SQL");
    }

    #[test]
    fn interview_question_accepts_prompt_alias() {
        let q: InterviewQuestion =
            serde_json::from_str(r#"{"prompt":"Tell me about yourself"}"#).unwrap();
        assert_eq!(q.question, "Tell me about yourself");
        assert!(q.followups.is_empty());
    }

    #[test]
    fn resource_type_key_maps_to_kind() {
        let r: TopicResource =
            serde_json::from_str(r#"{"title":"The Book","type":"book","url":"https://x"}"#)
                .unwrap();
        assert_eq!(r.kind.as_deref(), Some("book"));
    }
}
