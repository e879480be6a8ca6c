//! The seam between the application layer and the remote advisory service.

use crate::advisory::{CropRecommendation, DiseaseDiagnosis, ImageUpload, SoilReadings};
use crate::error::Result;
use crate::history::HistoryEntry;
use crate::user::{AuthenticatedUser, UserAccount};
use async_trait::async_trait;

/// The six operations the advisory backend exposes.
///
/// Implemented by the HTTP client; application services and tests depend on
/// this trait so the network can be substituted.
#[async_trait]
pub trait AdvisoryBackend: Send + Sync {
    /// Exchanges credentials for a token and the resolved account.
    async fn login(&self, email: &str, password: &str) -> Result<AuthenticatedUser>;

    /// Creates an account; on success the user is logged in immediately.
    async fn register(&self, name: &str, email: &str, password: &str)
    -> Result<AuthenticatedUser>;

    /// Resolves the profile behind the attached token.
    async fn profile(&self) -> Result<UserAccount>;

    /// Submits soil readings for a ranked crop recommendation.
    async fn recommend(&self, readings: &SoilReadings) -> Result<CropRecommendation>;

    /// Submits a plant image for a disease diagnosis. Works without a
    /// session; a present token is still attached so the backend records
    /// history.
    async fn detect(&self, image: ImageUpload) -> Result<DiseaseDiagnosis>;

    /// Fetches the caller's history, newest first.
    async fn history(&self) -> Result<Vec<HistoryEntry>>;
}
