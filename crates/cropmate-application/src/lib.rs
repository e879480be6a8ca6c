//! Application layer for the CropMate client.
//!
//! This crate provides use case implementations that coordinate between the
//! domain and infrastructure layers: the session lifecycle (including
//! cross-instance convergence), the form submission flow, and the dashboard
//! view.

pub mod dashboard;
pub mod session_service;
pub mod submission;

pub use dashboard::{DashboardData, DashboardService, HistoryScope, HistoryView};
pub use session_service::SessionService;
pub use submission::{SubmissionFlow, SubmissionState};
