use std::sync::Arc;

use services::{AiService, AuthService, Clock, PathService, TokenStore};

/// What the composition root must provide for the views to run.
pub trait UiApp: Send + Sync {
    fn auth(&self) -> Arc<AuthService>;
    fn paths(&self) -> Arc<PathService>;
    fn ai(&self) -> Arc<AiService>;
    fn tokens(&self) -> Arc<TokenStore>;
    fn clock(&self) -> Clock;
}

#[derive(Clone)]
pub struct AppContext {
    auth: Arc<AuthService>,
    paths: Arc<PathService>,
    ai: Arc<AiService>,
    tokens: Arc<TokenStore>,
    clock: Clock,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            auth: app.auth(),
            paths: app.paths(),
            ai: app.ai(),
            tokens: app.tokens(),
            clock: app.clock(),
        }
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn paths(&self) -> Arc<PathService> {
        Arc::clone(&self.paths)
    }

    #[must_use]
    pub fn ai(&self) -> Arc<AiService> {
        Arc::clone(&self.ai)
    }

    #[must_use]
    pub fn tokens(&self) -> Arc<TokenStore> {
        Arc::clone(&self.tokens)
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
