//! Grant (hibah) registry against `/api/grants`. Admin only.

use crate::error::Error;
use crate::fetch::Fetch;
use crate::pagination::{PageEnvelope, PageRequest};
use crate::session::SessionStore;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A funding grant items can be acquired under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grant {
    #[serde(rename = "id_Hibah")]
    pub id: i64,
    #[serde(rename = "nama_Hibah")]
    pub name: String,
    #[serde(rename = "keterangan", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "tahun", skip_serializing_if = "Option::is_none")]
    pub year: Option<i16>,
    #[serde(rename = "penanggung_Jawab", skip_serializing_if = "Option::is_none")]
    pub person_in_charge: Option<String>,
}

/// Payload for creating or updating a grant.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GrantDraft {
    #[serde(rename = "nama_Hibah")]
    pub name: String,
    #[serde(rename = "keterangan", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "tahun", skip_serializing_if = "Option::is_none")]
    pub year: Option<i16>,
    #[serde(rename = "penanggung_Jawab", skip_serializing_if = "Option::is_none")]
    pub person_in_charge: Option<String>,
}

impl GrantDraft {
    /// Check the required fields and the year range without contacting the
    /// backend.
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("Grant Name is required."));
        }
        if let Some(year) = self.year {
            if !(1900..=3000).contains(&year) {
                return Err(Error::validation("Year must be between 1900 and 3000."));
            }
        }
        Ok(())
    }
}

/// Grants client for `/api/grants`.
pub struct GrantsApi {
    base_url: String,
    http: Client,
    session: Arc<SessionStore>,
}

impl GrantsApi {
    pub(crate) fn new(base_url: String, http: Client, session: Arc<SessionStore>) -> Self {
        Self {
            base_url,
            http,
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/grants{}", self.base_url, path)
    }

    /// Page of all grants.
    pub async fn list(&self, page: PageRequest) -> Result<PageEnvelope<Grant>, Error> {
        let envelope = Fetch::get(&self.http, &self.url(""))
            .bearer_auth(&self.session.require_token()?)
            .query(page.query())
            .execute::<PageEnvelope<Grant>>()
            .await?;
        Ok(envelope.normalized())
    }

    /// Details of one grant.
    pub async fn get(&self, id: i64) -> Result<Grant, Error> {
        Fetch::get(&self.http, &self.url(&format!("/{id}")))
            .bearer_auth(&self.session.require_token()?)
            .execute()
            .await
    }

    /// Create a grant and return it as stored.
    pub async fn create(&self, draft: &GrantDraft) -> Result<Grant, Error> {
        draft.validate()?;
        Fetch::post(&self.http, &self.url(""))
            .bearer_auth(&self.session.require_token()?)
            .json(draft)?
            .execute()
            .await
    }

    /// Replace a grant's fields.
    pub async fn update(&self, id: i64, draft: &GrantDraft) -> Result<(), Error> {
        draft.validate()?;
        Fetch::put(&self.http, &self.url(&format!("/{id}")))
            .bearer_auth(&self.session.require_token()?)
            .json(draft)?
            .execute_empty()
            .await
    }

    /// Remove a grant.
    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        Fetch::delete(&self.http, &self.url(&format!("/{id}")))
            .bearer_auth(&self.session.require_token()?)
            .execute_empty()
            .await
    }
}
