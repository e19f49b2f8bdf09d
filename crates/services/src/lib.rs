#![forbid(unsafe_code)]

pub mod ai_service;
pub mod auth_service;
pub mod client;
pub mod error;
pub mod path_service;
pub mod token_store;

pub use guidance_core::Clock;

pub use ai_service::{AiService, ChatReply, SkillGapReport};
pub use auth_service::{AuthService, AuthToken};
pub use client::ApiClient;
pub use error::{ApiError, TokenStoreError};
pub use path_service::PathService;
pub use token_store::TokenStore;
