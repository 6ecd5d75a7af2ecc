//! HTML template rendering handlers for the admin pages.

mod index;
mod visit_details;

pub use index::index_handler;
pub use visit_details::{PageError, visit_details_handler};
