//! HTTP client layer for the CropMate client.
//!
//! [`AdvisoryClient`] owns the single configured request pipeline (bearer
//! attachment, 401 interception, error decoding) and exposes one typed
//! method per backend operation. It implements
//! [`cropmate_core::backend::AdvisoryBackend`] so the application layer can
//! substitute the network in tests.

mod advisory;
mod auth;
mod client;
mod history;

pub use client::AdvisoryClient;

use async_trait::async_trait;
use cropmate_core::advisory::{CropRecommendation, DiseaseDiagnosis, ImageUpload, SoilReadings};
use cropmate_core::backend::AdvisoryBackend;
use cropmate_core::error::Result;
use cropmate_core::history::HistoryEntry;
use cropmate_core::user::{AuthenticatedUser, UserAccount};

#[async_trait]
impl AdvisoryBackend for AdvisoryClient {
    async fn login(&self, email: &str, password: &str) -> Result<AuthenticatedUser> {
        AdvisoryClient::login(self, email, password).await
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser> {
        AdvisoryClient::register(self, name, email, password).await
    }

    async fn profile(&self) -> Result<UserAccount> {
        AdvisoryClient::profile(self).await
    }

    async fn recommend(&self, readings: &SoilReadings) -> Result<CropRecommendation> {
        AdvisoryClient::recommend(self, readings).await
    }

    async fn detect(&self, image: ImageUpload) -> Result<DiseaseDiagnosis> {
        AdvisoryClient::detect(self, image).await
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>> {
        AdvisoryClient::history(self).await
    }
}
