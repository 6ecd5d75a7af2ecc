//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation.

pub mod generate;
pub mod health;
pub mod link;
pub mod pagination;
pub mod response;
pub mod visit;

pub use generate::GenerateRequest;
pub use link::LinkResponse;
pub use pagination::ListLinksParams;
pub use response::ApiResponse;
pub use visit::VisitResponse;
