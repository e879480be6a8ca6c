//! Authentication requests: login, register, profile.

use crate::client::{AdvisoryClient, AuthFailurePolicy};
use cropmate_core::error::Result;
use cropmate_core::user::{AuthenticatedUser, UserAccount};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct AuthResponse {
    token: String,
    id: i64,
    name: String,
    email: String,
    #[serde(default)]
    location: Option<String>,
}

impl From<AuthResponse> for AuthenticatedUser {
    fn from(response: AuthResponse) -> Self {
        AuthenticatedUser {
            token: response.token,
            account: UserAccount {
                id: response.id,
                name: response.name,
                email: response.email,
                location: response.location,
            },
        }
    }
}

impl AdvisoryClient {
    /// `POST /auth/login`. A 401 here means invalid credentials, not an
    /// expired session, so it passes through without clearing anything.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthenticatedUser> {
        let builder = self
            .client
            .post(self.endpoint("/auth/login"))
            .json(&LoginRequest { email, password });
        let response = self.execute(builder, AuthFailurePolicy::PassThrough).await?;
        let auth: AuthResponse = Self::decode(response).await?;
        Ok(auth.into())
    }

    /// `POST /auth/register`. Field-level validation errors (400 with a
    /// fields map) and duplicate-email conflicts (409) surface as their own
    /// variants for inline rendering.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser> {
        let builder = self
            .client
            .post(self.endpoint("/auth/register"))
            .json(&RegisterRequest {
                name,
                email,
                password,
            });
        let response = self.execute(builder, AuthFailurePolicy::PassThrough).await?;
        let auth: AuthResponse = Self::decode(response).await?;
        Ok(auth.into())
    }

    /// `GET /user/profile`. Requires the attached token; a 401 is handled by
    /// the global interceptor before it reaches the caller.
    pub async fn profile(&self) -> Result<UserAccount> {
        let builder = self.authorize(self.client.get(self.endpoint("/user/profile")));
        let response = self.execute(builder, AuthFailurePolicy::Intercept).await?;
        Self::decode(response).await
    }
}
