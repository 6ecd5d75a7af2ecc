//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Alias assignment, listing and deletion
//! - [`services::visit_service::VisitService`] - Visit counting and the visit log
//! - [`services::redirect_service::RedirectService`] - Short code resolution

pub mod services;
