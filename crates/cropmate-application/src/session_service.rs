//! Session use case: login, registration, logout, and cross-instance
//! convergence.

use cropmate_core::backend::AdvisoryBackend;
use cropmate_core::error::Result;
use cropmate_core::session::SessionHub;
use cropmate_core::user::UserAccount;
use cropmate_core::validation;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Coordinates the backend's auth operations with the session hub.
pub struct SessionService {
    hub: Arc<SessionHub>,
    backend: Arc<dyn AdvisoryBackend>,
    watcher_running: AtomicBool,
}

impl SessionService {
    pub fn new(hub: Arc<SessionHub>, backend: Arc<dyn AdvisoryBackend>) -> Self {
        Self {
            hub,
            backend,
            watcher_running: AtomicBool::new(false),
        }
    }

    pub fn hub(&self) -> &Arc<SessionHub> {
        &self.hub
    }

    /// Validates the form, exchanges credentials, and persists the grant.
    /// The hub update is synchronous once the response arrives.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserAccount> {
        validation::validate_login_input(email, password)?;
        let auth = self.backend.login(email, password).await?;
        self.hub.login(auth.token, auth.account.clone())?;
        Ok(auth.account)
    }

    /// Registers an account; on success the user is logged in immediately.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<UserAccount> {
        validation::validate_register_input(name, email, password)?;
        let auth = self.backend.register(name, email, password).await?;
        self.hub.login(auth.token, auth.account.clone())?;
        Ok(auth.account)
    }

    /// Clears the session. The surface is responsible for leaving
    /// authenticated-only views afterwards.
    pub fn logout(&self) -> Result<()> {
        self.hub.logout()
    }

    /// Starts the background watcher that re-reads the credential store at
    /// the given interval and broadcasts any external change, so instances
    /// sharing a store converge on the same authentication state without
    /// issuing any API request.
    ///
    /// Starting an already-running watcher is a no-op.
    pub fn spawn_store_watcher(self: &Arc<Self>, interval_secs: u64) {
        if self.watcher_running.swap(true, Ordering::SeqCst) {
            tracing::warn!(target: "session_sync", "Store watcher already running, skipping");
            return;
        }

        let service = Arc::clone(self);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
            tracing::info!(target: "session_sync", "Store watcher started ({}s interval)", interval_secs);

            loop {
                ticker.tick().await;
                if service.hub.resync() {
                    tracing::info!(
                        target: "session_sync",
                        "Converged on external session change (authenticated: {})",
                        service.hub.is_authenticated()
                    );
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cropmate_core::CropmateError;
    use cropmate_core::advisory::{
        CropRecommendation, DiseaseDiagnosis, ImageUpload, SoilReadings,
    };
    use cropmate_core::history::HistoryEntry;
    use cropmate_core::session::{CredentialStore, Session};
    use cropmate_core::user::AuthenticatedUser;
    use cropmate_infrastructure::FileCredentialStore;
    use std::sync::atomic::AtomicUsize;
    use tempfile::TempDir;

    /// Backend stub that counts calls, so convergence tests can prove no
    /// API traffic happened.
    #[derive(Default)]
    struct StubBackend {
        calls: AtomicUsize,
    }

    impl StubBackend {
        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn grant(&self) -> AuthenticatedUser {
            AuthenticatedUser {
                token: "T1".to_string(),
                account: UserAccount {
                    id: 1,
                    name: "A".to_string(),
                    email: "a@b.com".to_string(),
                    location: None,
                },
            }
        }
    }

    #[async_trait]
    impl AdvisoryBackend for StubBackend {
        async fn login(&self, _email: &str, _password: &str) -> Result<AuthenticatedUser> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.grant())
        }

        async fn register(
            &self,
            _name: &str,
            _email: &str,
            _password: &str,
        ) -> Result<AuthenticatedUser> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.grant())
        }

        async fn profile(&self) -> Result<UserAccount> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.grant().account)
        }

        async fn recommend(&self, _readings: &SoilReadings) -> Result<CropRecommendation> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(CropRecommendation::from_suggestions(vec![]))
        }

        async fn detect(&self, _image: ImageUpload) -> Result<DiseaseDiagnosis> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(DiseaseDiagnosis {
                disease: "none".to_string(),
                confidence: 0.0,
            })
        }

        async fn history(&self) -> Result<Vec<HistoryEntry>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }
    }

    fn service_on(store: Arc<dyn CredentialStore>) -> (Arc<SessionService>, Arc<StubBackend>) {
        let backend = Arc::new(StubBackend::default());
        let hub = Arc::new(SessionHub::new(store));
        (
            Arc::new(SessionService::new(hub, backend.clone())),
            backend,
        )
    }

    #[tokio::test]
    async fn test_login_persists_grant() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credentials.json");
        let store: Arc<dyn CredentialStore> =
            Arc::new(FileCredentialStore::with_path(path.clone()));
        let (service, _) = service_on(store.clone());

        let account = service.login("a@b.com", "x").await.unwrap();
        assert_eq!(account.email, "a@b.com");

        let stored = store.read();
        assert_eq!(stored.token(), Some("T1"));
        assert_eq!(stored.user().unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_login_rejects_invalid_form_before_backend_call() {
        let temp_dir = TempDir::new().unwrap();
        let store: Arc<dyn CredentialStore> = Arc::new(FileCredentialStore::with_path(
            temp_dir.path().join("credentials.json"),
        ));
        let (service, backend) = service_on(store);

        let err = service.login("not-an-email", "x").await.unwrap_err();
        assert!(matches!(err, CropmateError::InvalidInput { .. }));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_two_instances_converge_on_logout_without_api_traffic() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credentials.json");

        let store_a: Arc<dyn CredentialStore> =
            Arc::new(FileCredentialStore::with_path(path.clone()));
        let store_b: Arc<dyn CredentialStore> = Arc::new(FileCredentialStore::with_path(path));
        let (service_a, _) = service_on(store_a);
        let (service_b, backend_b) = service_on(store_b);

        service_a.login("a@b.com", "x").await.unwrap();

        // Subscribe before the watcher starts so no transition is missed.
        let mut rx = service_b.hub().subscribe();
        service_b.spawn_store_watcher(1);

        // Instance B picks up the login on its next tick.
        tokio::time::timeout(Duration::from_secs(5), rx.changed())
            .await
            .expect("watcher should observe the login")
            .unwrap();
        assert!(service_b.hub().is_authenticated());

        // Instance A logs out; B converges without any request of its own.
        service_a.logout().unwrap();
        tokio::time::timeout(Duration::from_secs(5), rx.changed())
            .await
            .expect("watcher should observe the logout")
            .unwrap();
        assert!(!service_b.hub().is_authenticated());
        assert_eq!(backend_b.call_count(), 0);
    }

    #[tokio::test]
    async fn test_watcher_starts_only_once() {
        let temp_dir = TempDir::new().unwrap();
        let store: Arc<dyn CredentialStore> = Arc::new(FileCredentialStore::with_path(
            temp_dir.path().join("credentials.json"),
        ));
        let (service, _) = service_on(store);

        service.spawn_store_watcher(60);
        // Second start is a no-op rather than a duplicate task.
        service.spawn_store_watcher(60);
        assert!(service.watcher_running.load(Ordering::SeqCst));
    }
}
