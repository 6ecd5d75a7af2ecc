//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures. Creation inputs live in separate
//! `New*` structs so that store-assigned fields (ids, timestamps) never have
//! to be invented by callers.
//!
//! # Entity Types
//!
//! - [`Link`] - A short code mapped to a destination URL
//! - [`Visit`] - A recorded redirect against a link
//! - [`VisitorInfo`] - Client metadata captured from a redirect request

pub mod link;
pub mod visit;

pub use link::{Link, NewLink};
pub use visit::{NewVisit, Visit, VisitorInfo};
