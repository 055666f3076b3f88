//! Service layer providing business-oriented operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod article_service;
pub mod auth;
pub mod bookmark_service;
pub mod chatbot;
pub mod errors;
pub mod ids;
pub mod mentor_service;
pub mod opportunity_service;
pub mod user_service;

#[cfg(test)]
pub mod test_support;
