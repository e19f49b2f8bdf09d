mod ai;
mod assessment;
mod chat;
mod path;

pub use ai::{
    Flashcard, FlashcardCollection, InterviewQuestion, MockInterview, Recommendation,
    TopicResource,
};
pub use assessment::{
    AnswerRecord, AssessmentQuestion, AssessmentResult, AssessmentSubmission, EvaluationRow,
};
pub use chat::{ChatMessage, ChatRole, ChatSession, ChatSessionSummary};
pub use path::{LearningPath, RegenerateReason, Topic, TopicStatus};
