//! Inventory item catalog against `/api/inventory`.
//!
//! The available-items listing is public; everything else carries the
//! bearer token. Field names on the wire follow the backend schema
//! (`nama_Barang`, `status_Barang` and so on).

use crate::api::require;
use crate::error::Error;
use crate::fetch::Fetch;
use crate::pagination::{PageEnvelope, PageRequest};
use crate::session::SessionStore;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An inventory item as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "id_Barang")]
    pub id: i64,
    #[serde(rename = "nama_Barang")]
    pub name: String,
    #[serde(rename = "deskripsi_Barang", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Physical condition, "Good" or "Damaged"
    #[serde(rename = "status_Kondisi", skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// Availability, e.g. "Available", "Booked", "Maintenance"
    #[serde(rename = "status_Barang")]
    pub status: String,
    #[serde(rename = "tanggal_Perolehan")]
    pub acquired_on: String,
    #[serde(rename = "harga_Barang", skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(rename = "id_Hibah", skip_serializing_if = "Option::is_none")]
    pub grant_id: Option<i64>,
    /// Grant name joined in by the backend for display
    #[serde(rename = "nama_Hibah", skip_serializing_if = "Option::is_none")]
    pub grant_name: Option<String>,
    #[serde(rename = "latest_Booking_Date", skip_serializing_if = "Option::is_none")]
    pub latest_booking_date: Option<String>,
}

/// Payload for creating or updating an item.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ItemDraft {
    #[serde(rename = "nama_Barang")]
    pub name: String,
    #[serde(rename = "deskripsi_Barang", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "status_Kondisi", skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(rename = "tanggal_Perolehan")]
    pub acquired_on: String,
    #[serde(rename = "status_Barang")]
    pub status: String,
    #[serde(rename = "harga_Barang", skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(rename = "id_Hibah", skip_serializing_if = "Option::is_none")]
    pub grant_id: Option<i64>,
}

impl ItemDraft {
    /// Check the required fields without contacting the backend.
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty()
            || self.acquired_on.trim().is_empty()
            || self.status.trim().is_empty()
        {
            return Err(Error::validation(
                "Item Name, Acquisition Date, and Item Status are required.",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct StatusUpdate<'a> {
    #[serde(rename = "status_Barang")]
    status: &'a str,
}

/// Inventory client for `/api/inventory`.
pub struct InventoryApi {
    base_url: String,
    http: Client,
    session: Arc<SessionStore>,
}

impl InventoryApi {
    pub(crate) fn new(base_url: String, http: Client, session: Arc<SessionStore>) -> Self {
        Self {
            base_url,
            http,
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/inventory{}", self.base_url, path)
    }

    /// Page of currently borrowable items. Public, no token needed.
    pub async fn available(&self, page: PageRequest) -> Result<PageEnvelope<Item>, Error> {
        let envelope = Fetch::get(&self.http, &self.url(""))
            .query(page.query())
            .execute::<PageEnvelope<Item>>()
            .await?;
        Ok(envelope.normalized())
    }

    /// Page of every item regardless of status. Admin only.
    pub async fn all(&self, page: PageRequest) -> Result<PageEnvelope<Item>, Error> {
        let envelope = Fetch::get(&self.http, &self.url("/all"))
            .bearer_auth(&self.session.require_token()?)
            .query(page.query())
            .execute::<PageEnvelope<Item>>()
            .await?;
        Ok(envelope.normalized())
    }

    /// Details of one item.
    pub async fn get(&self, id: i64) -> Result<Item, Error> {
        Fetch::get(&self.http, &self.url(&format!("/{id}")))
            .bearer_auth(&self.session.require_token()?)
            .execute()
            .await
    }

    /// Create an item and return it as stored. Admin only.
    pub async fn create(&self, draft: &ItemDraft) -> Result<Item, Error> {
        draft.validate()?;
        Fetch::post(&self.http, &self.url(""))
            .bearer_auth(&self.session.require_token()?)
            .json(draft)?
            .execute()
            .await
    }

    /// Replace an item's fields. Admin only.
    pub async fn update(&self, id: i64, draft: &ItemDraft) -> Result<(), Error> {
        draft.validate()?;
        Fetch::put(&self.http, &self.url(&format!("/{id}")))
            .bearer_auth(&self.session.require_token()?)
            .json(draft)?
            .execute_empty()
            .await
    }

    /// Change only an item's availability status. Admin only.
    pub async fn update_status(&self, id: i64, status: &str) -> Result<(), Error> {
        require(status, "Item Status is required.")?;
        Fetch::put(&self.http, &self.url(&format!("/{id}/status")))
            .bearer_auth(&self.session.require_token()?)
            .json(&StatusUpdate { status })?
            .execute_empty()
            .await
    }

    /// Remove an item. Admin only.
    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        Fetch::delete(&self.http, &self.url(&format!("/{id}")))
            .bearer_auth(&self.session.require_token()?)
            .execute_empty()
            .await
    }
}
