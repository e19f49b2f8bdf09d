use guidance_core::model::{ChatMessage, ChatRole, ChatSessionSummary};

use crate::vm::markdown_vm::markdown_to_html;

/// One transcript bubble. Assistant content is rendered markdown; user
/// content stays plain text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageVm {
    pub role_class: &'static str,
    pub plain: Option<String>,
    pub html: Option<String>,
}

impl From<&ChatMessage> for MessageVm {
    fn from(message: &ChatMessage) -> Self {
        match message.role {
            ChatRole::User => Self {
                role_class: "bubble bubble--user",
                plain: Some(message.content.clone()),
                html: None,
            },
            ChatRole::Assistant => Self {
                role_class: "bubble bubble--assistant",
                plain: None,
                html: Some(markdown_to_html(&message.content)),
            },
        }
    }
}

#[must_use]
pub fn map_transcript(messages: &[ChatMessage]) -> Vec<MessageVm> {
    messages.iter().map(MessageVm::from).collect()
}

/// One entry of the saved-sessions sidebar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionRowVm {
    pub id: i64,
    pub title: String,
}

#[must_use]
pub fn map_session_rows(sessions: &[ChatSessionSummary]) -> Vec<SessionRowVm> {
    sessions
        .iter()
        .map(|s| SessionRowVm {
            id: s.id,
            title: s.display_title(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assistant_markdown_is_rendered_user_text_is_not() {
        let transcript = vec![
            ChatMessage::user("**not bold**"),
            ChatMessage::assistant("**bold**"),
        ];
        let vms = map_transcript(&transcript);
        assert_eq!(vms[0].plain.as_deref(), Some("**not bold**"));
        assert!(vms[0].html.is_none());
        assert!(vms[1].html.as_deref().unwrap().contains("<strong>"));
    }

    #[test]
    fn session_rows_use_display_titles() {
        let rows = map_session_rows(&[ChatSessionSummary { id: 7, title: None }]);
        assert_eq!(rows[0].title, "Chat 7");
    }
}
