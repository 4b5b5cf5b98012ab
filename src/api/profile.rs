//! Account profile management, `/api/users` for borrowers and `/api/admin`
//! for staff.
//!
//! The two roots expose the same operations over different profile shapes,
//! so each gets its own thin client.

use crate::api::{check_password_rules, require};
use crate::error::Error;
use crate::fetch::Fetch;
use crate::session::SessionStore;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A borrower's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "id_Peminjam")]
    pub id: i64,
    #[serde(rename = "nama_Peminjam")]
    pub name: String,
    pub email: String,
    #[serde(rename = "no_Telp", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "alamat", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Partial update of a borrower's profile; absent fields stay unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserProfileUpdate {
    #[serde(rename = "nama_Peminjam", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "no_Telp", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "alamat", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// An administrator's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminProfile {
    #[serde(rename = "id_Admin")]
    pub id: i64,
    #[serde(rename = "nama_Admin")]
    pub name: String,
    pub email: String,
    #[serde(rename = "no_Telp", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Partial update of an administrator's profile.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AdminProfileUpdate {
    #[serde(rename = "nama_Admin", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "no_Telp", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Serialize)]
struct EmailUpdate<'a> {
    #[serde(rename = "newEmail")]
    new_email: &'a str,
}

#[derive(Debug, Serialize)]
struct PasswordUpdate<'a> {
    #[serde(rename = "currentPassword")]
    current_password: &'a str,
    #[serde(rename = "newPassword")]
    new_password: &'a str,
}

/// Borrower profile client for `/api/users`.
pub struct UsersApi {
    base_url: String,
    http: Client,
    session: Arc<SessionStore>,
}

impl UsersApi {
    pub(crate) fn new(base_url: String, http: Client, session: Arc<SessionStore>) -> Self {
        Self {
            base_url,
            http,
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/users/profile{}", self.base_url, path)
    }

    /// Profile of the logged-in borrower.
    pub async fn profile(&self) -> Result<UserProfile, Error> {
        Fetch::get(&self.http, &self.url(""))
            .bearer_auth(&self.session.require_token()?)
            .execute()
            .await
    }

    /// Update name, phone or address.
    pub async fn update_profile(&self, update: &UserProfileUpdate) -> Result<(), Error> {
        Fetch::put(&self.http, &self.url(""))
            .bearer_auth(&self.session.require_token()?)
            .json(update)?
            .execute_empty()
            .await
    }

    /// Change the login email.
    pub async fn update_email(&self, new_email: &str) -> Result<(), Error> {
        require(new_email, "New email is required.")?;
        Fetch::put(&self.http, &self.url("/email"))
            .bearer_auth(&self.session.require_token()?)
            .json(&EmailUpdate { new_email })?
            .execute_empty()
            .await
    }

    /// Change the password, verifying the current one server-side.
    pub async fn update_password(
        &self,
        current_password: &str,
        new_password: &str,
        confirmation: &str,
    ) -> Result<(), Error> {
        require(current_password, "Current password is required.")?;
        check_password_rules(new_password, confirmation)?;
        Fetch::put(&self.http, &self.url("/password"))
            .bearer_auth(&self.session.require_token()?)
            .json(&PasswordUpdate {
                current_password,
                new_password,
            })?
            .execute_empty()
            .await
    }
}

/// Staff profile client for `/api/admin`.
pub struct AdminApi {
    base_url: String,
    http: Client,
    session: Arc<SessionStore>,
}

impl AdminApi {
    pub(crate) fn new(base_url: String, http: Client, session: Arc<SessionStore>) -> Self {
        Self {
            base_url,
            http,
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/admin/profile{}", self.base_url, path)
    }

    /// Profile of the logged-in administrator.
    pub async fn profile(&self) -> Result<AdminProfile, Error> {
        Fetch::get(&self.http, &self.url(""))
            .bearer_auth(&self.session.require_token()?)
            .execute()
            .await
    }

    /// Update name or phone.
    pub async fn update_profile(&self, update: &AdminProfileUpdate) -> Result<(), Error> {
        Fetch::put(&self.http, &self.url(""))
            .bearer_auth(&self.session.require_token()?)
            .json(update)?
            .execute_empty()
            .await
    }

    /// Change the login email.
    pub async fn update_email(&self, new_email: &str) -> Result<(), Error> {
        require(new_email, "New email is required.")?;
        Fetch::put(&self.http, &self.url("/email"))
            .bearer_auth(&self.session.require_token()?)
            .json(&EmailUpdate { new_email })?
            .execute_empty()
            .await
    }

    /// Change the password, verifying the current one server-side.
    pub async fn update_password(
        &self,
        current_password: &str,
        new_password: &str,
        confirmation: &str,
    ) -> Result<(), Error> {
        require(current_password, "Current password is required.")?;
        check_password_rules(new_password, confirmation)?;
        Fetch::put(&self.http, &self.url("/password"))
            .bearer_auth(&self.session.require_token()?)
            .json(&PasswordUpdate {
                current_password,
                new_password,
            })?
            .execute_empty()
            .await
    }
}
