//! Login, signup and logout against `/api/auth`.

use crate::api::{check_password_rules, require};
use crate::error::Error;
use crate::fetch::Fetch;
use crate::session::{Role, Session, SessionStore};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    #[serde(rename = "userId")]
    user_id: String,
    name: String,
    email: String,
    role: Role,
}

impl LoginResponse {
    fn into_session(self) -> Session {
        Session {
            token: self.token,
            user_id: self.user_id,
            name: self.name,
            email: self.email,
            role: self.role,
        }
    }
}

/// Payload for registering a borrower account.
///
/// Phone and address are optional at the backend.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SignupRequest {
    #[serde(rename = "nama_Peminjam")]
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "no_Telp", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "alamat", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Authentication client for `/api/auth`.
pub struct AuthApi {
    base_url: String,
    http: Client,
    session: Arc<SessionStore>,
}

impl AuthApi {
    pub(crate) fn new(base_url: String, http: Client, session: Arc<SessionStore>) -> Self {
        Self {
            base_url,
            http,
            session,
        }
    }

    /// Log in with email and password.
    ///
    /// On success the returned session is also installed in the session
    /// store and persisted, so subsequent protected calls pick up the
    /// bearer token automatically.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, Error> {
        require(email, "Email is required.")?;
        require(password, "Password is required.")?;

        let response = Fetch::post(&self.http, &format!("{}/api/auth/login", self.base_url))
            .json(&LoginRequest { email, password })?
            .execute::<LoginResponse>()
            .await?;

        let session = response.into_session();
        self.session.login(session.clone());
        Ok(session)
    }

    /// Register a new borrower account.
    ///
    /// The backend answers a successful signup with the same payload as a
    /// login, so the new account is logged in immediately.
    pub async fn signup(
        &self,
        request: &SignupRequest,
        password_confirmation: &str,
    ) -> Result<Session, Error> {
        require(&request.name, "Full name is required.")?;
        require(&request.email, "Email is required.")?;
        check_password_rules(&request.password, password_confirmation)?;

        let response = Fetch::post(&self.http, &format!("{}/api/auth/signup", self.base_url))
            .json(request)?
            .execute::<LoginResponse>()
            .await?;

        let session = response.into_session();
        self.session.login(session.clone());
        Ok(session)
    }

    /// Drop the current session and its persisted record.
    ///
    /// Purely client-side; the token is forgotten, not revoked.
    pub fn logout(&self) {
        self.session.logout();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> AuthApi {
        AuthApi::new(
            "http://127.0.0.1:9".to_string(),
            Client::new(),
            Arc::new(SessionStore::in_memory()),
        )
    }

    #[test]
    fn signup_request_uses_backend_field_names() {
        let request = SignupRequest {
            name: "Budi".to_string(),
            email: "budi@example.com".to_string(),
            password: "secret1".to_string(),
            phone: Some("0812".to_string()),
            address: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["nama_Peminjam"], "Budi");
        assert_eq!(value["no_Telp"], "0812");
        assert!(value.get("alamat").is_none());
    }

    #[test]
    fn login_response_becomes_a_session() {
        let response: LoginResponse = serde_json::from_value(serde_json::json!({
            "token": "tok",
            "userId": "3",
            "name": "Budi",
            "email": "budi@example.com",
            "role": "User"
        }))
        .unwrap();
        let session = response.into_session();
        assert_eq!(session.user_id, "3");
        assert_eq!(session.role, Role::User);
    }

    #[tokio::test]
    async fn login_rejects_blank_credentials_before_any_request() {
        let api = api();
        let err = api.login("", "secret").await.unwrap_err();
        assert_eq!(err.user_message(), "Email is required.");
        let err = api.login("budi@example.com", " ").await.unwrap_err();
        assert_eq!(err.user_message(), "Password is required.");
    }

    #[tokio::test]
    async fn signup_applies_the_password_policy() {
        let api = api();
        let request = SignupRequest {
            name: "Budi".to_string(),
            email: "budi@example.com".to_string(),
            password: "short".to_string(),
            ..Default::default()
        };
        let err = api.signup(&request, "short").await.unwrap_err();
        assert_eq!(
            err.user_message(),
            "Password must be at least 6 characters long."
        );
    }
}
