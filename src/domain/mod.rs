//! Domain layer containing business entities and repository contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository traits are implemented in
//! [`crate::infrastructure::persistence`] and consumed by
//! [`crate::application::services`].
//!
//! # Redirect Flow
//!
//! 1. HTTP handler extracts [`entities::VisitorInfo`] from the request
//! 2. [`crate::application::services::RedirectService`] resolves the code
//! 3. [`crate::application::services::VisitService`] bumps the counter and
//!    appends a [`entities::Visit`]; failures are logged, not returned
//! 4. The handler answers with `307 Temporary Redirect`

pub mod entities;
pub mod repositories;
