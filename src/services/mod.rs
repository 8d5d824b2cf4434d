/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Timer recovery scan replaying persisted timer state.
pub mod recovery_service;
