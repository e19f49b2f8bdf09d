use dioxus::prelude::*;
use services::ApiError;

/// A view-facing failure: what to tell the user, plus whether the session is
/// gone and the page should bounce to login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewError {
    message: String,
    unauthorized: bool,
}

impl ViewError {
    #[must_use]
    pub fn from_api(err: &ApiError) -> Self {
        Self {
            message: err.to_string(),
            unauthorized: err.is_unauthorized(),
        }
    }

    /// A page-local problem (e.g. invalid form input) that never reached the
    /// network.
    #[must_use]
    pub fn local(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            unauthorized: false,
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.unauthorized
    }
}

impl From<ApiError> for ViewError {
    fn from(err: ApiError) -> Self {
        Self::from_api(&err)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::local("No data loaded.")),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
