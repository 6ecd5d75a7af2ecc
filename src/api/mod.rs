//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into service calls and formats
//! responses in the `{"status", "message", "data"}` envelope.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`extractors`] - Request metadata extractors
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Authentication and tracing middleware
//! - [`routes`] - Route configuration and composition
//! - [`validation`] - Field-level validation error reporting

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod validation;
