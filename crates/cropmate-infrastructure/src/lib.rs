//! Infrastructure layer for the CropMate client: durable credential storage,
//! configuration loading, and path resolution.

pub mod atomic_json;
pub mod config_service;
pub mod credentials;
pub mod paths;

pub use crate::config_service::ConfigService;
pub use crate::credentials::FileCredentialStore;
pub use crate::paths::CropmatePaths;
