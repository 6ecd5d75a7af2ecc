//! Admin pages for browser-based link management.
//!
//! Uses Askama templates for server-side rendering; the link manager page
//! talks to the JSON API from the browser.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`routes`] - Page route configuration

pub mod handlers;
pub mod routes;
