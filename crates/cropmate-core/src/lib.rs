//! Domain layer for the CropMate client.
//!
//! Holds the session model and its invariants, the domain types for
//! recommendation, detection and history, the error taxonomy shared by every
//! layer, and the [`backend::AdvisoryBackend`] seam implemented by the HTTP
//! client.

pub mod advisory;
pub mod backend;
pub mod config;
pub mod error;
pub mod history;
pub mod session;
pub mod user;
pub mod validation;

// Re-export common error type
pub use error::CropmateError;
