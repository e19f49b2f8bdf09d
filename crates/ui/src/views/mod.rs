mod chat_tutor;
mod create_path;
mod dashboard;
mod flashcards;
mod interview;
mod login;
mod path_details;
mod resume;
mod signup;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use chat_tutor::ChatTutorView;
pub use create_path::CreatePathView;
pub use dashboard::DashboardView;
pub use flashcards::FlashcardsView;
pub use interview::InterviewView;
pub use login::LoginView;
pub use path_details::PathDetailsView;
pub use resume::ResumeView;
pub use signup::SignupView;
pub use state::{ViewError, ViewState, view_state_from_resource};
