//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Short code generation, validation and alias constants
//! - [`client_ip`] - Client IP extraction from request metadata
//! - [`db_error`] - Classification of database errors

pub mod client_ip;
pub mod code_generator;
pub mod db_error;
