//! Booking lifecycle against `/api/bookings`.
//!
//! Borrowers create requests and read their own history; admins review
//! pending requests, approve, decline or complete them and read the full
//! history. The admin dashboard aggregate issues its three reads
//! concurrently.

use crate::api::require;
use crate::error::Error;
use crate::fetch::Fetch;
use crate::pagination::{PageEnvelope, PageRequest};
use crate::session::SessionStore;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Payload for a new booking request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BookingDraft {
    #[serde(rename = "start_Date")]
    pub start_date: String,
    #[serde(rename = "end_Date")]
    pub end_date: String,
    /// Reason for borrowing
    #[serde(rename = "deskripsi")]
    pub description: String,
    #[serde(rename = "id_Barang")]
    pub item_id: i64,
}

impl BookingDraft {
    /// Check the required fields without contacting the backend.
    ///
    /// Date ordering is not checked here; the backend owns that rule.
    pub fn validate(&self) -> Result<(), Error> {
        if self.start_date.trim().is_empty()
            || self.end_date.trim().is_empty()
            || self.description.trim().is_empty()
        {
            return Err(Error::validation("Please fill all required fields."));
        }
        Ok(())
    }
}

/// One row of the borrower's own booking history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRecord {
    #[serde(rename = "id_Peminjaman")]
    pub id: i64,
    #[serde(rename = "start_Date")]
    pub start_date: String,
    #[serde(rename = "end_Date")]
    pub end_date: String,
    #[serde(rename = "deskripsi", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Lifecycle status, e.g. "Pending", "Approved", "Declined", "Returned"
    #[serde(rename = "status_Peminjaman")]
    pub status: String,
    #[serde(rename = "nama_Barang")]
    pub item_name: String,
    #[serde(rename = "denda", skip_serializing_if = "Option::is_none")]
    pub fine: Option<i64>,
    #[serde(rename = "alasan_Penolakan", skip_serializing_if = "Option::is_none")]
    pub decline_reason: Option<String>,
    #[serde(rename = "tanggal_Pengajuan", skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
    #[serde(rename = "tanggal_Approval", skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<String>,
    #[serde(
        rename = "tanggal_Pengembalian_Aktual",
        skip_serializing_if = "Option::is_none"
    )]
    pub returned_at: Option<String>,
}

/// A pending request as presented to admins for review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    #[serde(rename = "id_Peminjaman")]
    pub id: i64,
    #[serde(rename = "start_Date")]
    pub start_date: String,
    #[serde(rename = "end_Date")]
    pub end_date: String,
    #[serde(rename = "deskripsi", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "status_Peminjaman")]
    pub status: String,
    #[serde(rename = "nama_Barang")]
    pub item_name: String,
    #[serde(rename = "id_Barang")]
    pub item_id: i64,
    #[serde(rename = "nama_Peminjam")]
    pub borrower_name: String,
    #[serde(rename = "id_Peminjam")]
    pub borrower_id: i64,
    #[serde(rename = "peminjam_Email")]
    pub borrower_email: String,
    #[serde(rename = "peminjam_No_Telp", skip_serializing_if = "Option::is_none")]
    pub borrower_phone: Option<String>,
    #[serde(rename = "tanggal_Pengajuan", skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
}

/// One row of the full booking history as admins see it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingHistoryRecord {
    #[serde(rename = "id_Peminjaman")]
    pub id: i64,
    #[serde(rename = "start_Date")]
    pub start_date: String,
    #[serde(rename = "end_Date")]
    pub end_date: String,
    #[serde(rename = "deskripsi", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "status_Peminjaman")]
    pub status: String,
    #[serde(rename = "nama_Barang")]
    pub item_name: String,
    #[serde(rename = "id_Barang")]
    pub item_id: i64,
    #[serde(rename = "nama_Peminjam")]
    pub borrower_name: String,
    #[serde(rename = "id_Peminjam")]
    pub borrower_id: i64,
    /// Admin who approved or declined
    #[serde(rename = "nama_Admin", skip_serializing_if = "Option::is_none")]
    pub admin_name: Option<String>,
    #[serde(rename = "id_Admin", skip_serializing_if = "Option::is_none")]
    pub admin_id: Option<i64>,
    /// Admin who processed the return
    #[serde(
        rename = "nama_Admin_Pengembalian",
        skip_serializing_if = "Option::is_none"
    )]
    pub return_admin_name: Option<String>,
    #[serde(
        rename = "id_Admin_Pengembalian",
        skip_serializing_if = "Option::is_none"
    )]
    pub return_admin_id: Option<i64>,
    #[serde(rename = "denda", skip_serializing_if = "Option::is_none")]
    pub fine: Option<i64>,
    #[serde(rename = "alasan_Penolakan", skip_serializing_if = "Option::is_none")]
    pub decline_reason: Option<String>,
    #[serde(rename = "tanggal_Pengajuan", skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
    #[serde(rename = "tanggal_Approval", skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<String>,
    #[serde(
        rename = "tanggal_Pengembalian_Aktual",
        skip_serializing_if = "Option::is_none"
    )]
    pub returned_at: Option<String>,
}

/// Headline counters for the admin dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub pending_count: u32,
    pub todays_bookings_count: u32,
}

/// Payload for marking a booking as returned.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CompletionDraft {
    #[serde(rename = "denda", skip_serializing_if = "Option::is_none")]
    pub fine: Option<i64>,
    /// Condition on return, "Good" or "Damaged"
    #[serde(rename = "status_Kondisi_Pengembalian")]
    pub condition: String,
}

impl CompletionDraft {
    /// Check the return condition and fine without contacting the backend.
    pub fn validate(&self) -> Result<(), Error> {
        require(&self.condition, "Return condition is required.")?;
        if matches!(self.fine, Some(fine) if fine < 0) {
            return Err(Error::validation("Fine must not be negative."));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct DeclineBody<'a> {
    #[serde(rename = "alasan_Penolakan")]
    reason: &'a str,
}

/// Everything the admin dashboard shows, fetched in one call.
#[derive(Debug, Clone)]
pub struct AdminDashboard {
    pub stats: DashboardStats,
    /// First few pending requests for the review widget
    pub pending: PageEnvelope<BookingRequest>,
    /// Most recent processed bookings
    pub recent: PageEnvelope<BookingHistoryRecord>,
}

/// Bookings client for `/api/bookings`.
pub struct BookingsApi {
    base_url: String,
    http: Client,
    session: Arc<SessionStore>,
}

impl BookingsApi {
    pub(crate) fn new(base_url: String, http: Client, session: Arc<SessionStore>) -> Self {
        Self {
            base_url,
            http,
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/bookings{}", self.base_url, path)
    }

    /// Submit a new booking request for the current borrower.
    pub async fn create(&self, draft: &BookingDraft) -> Result<(), Error> {
        draft.validate()?;
        Fetch::post(&self.http, &self.url(""))
            .bearer_auth(&self.session.require_token()?)
            .json(draft)?
            .execute_empty()
            .await
    }

    /// Page of the current borrower's own bookings.
    pub async fn my_history(&self, page: PageRequest) -> Result<PageEnvelope<BookingRecord>, Error> {
        let envelope = Fetch::get(&self.http, &self.url("/my-history"))
            .bearer_auth(&self.session.require_token()?)
            .query(page.query())
            .execute::<PageEnvelope<BookingRecord>>()
            .await?;
        Ok(envelope.normalized())
    }

    /// Page of requests awaiting review. Admin only.
    pub async fn pending(&self, page: PageRequest) -> Result<PageEnvelope<BookingRequest>, Error> {
        let envelope = Fetch::get(&self.http, &self.url("/admin/pending"))
            .bearer_auth(&self.session.require_token()?)
            .query(page.query())
            .execute::<PageEnvelope<BookingRequest>>()
            .await?;
        Ok(envelope.normalized())
    }

    /// Page of the full booking history. Admin only.
    pub async fn history(
        &self,
        page: PageRequest,
    ) -> Result<PageEnvelope<BookingHistoryRecord>, Error> {
        let envelope = Fetch::get(&self.http, &self.url("/admin/all"))
            .bearer_auth(&self.session.require_token()?)
            .query(page.query())
            .execute::<PageEnvelope<BookingHistoryRecord>>()
            .await?;
        Ok(envelope.normalized())
    }

    /// Details of one request for the review screen. Admin only.
    pub async fn request(&self, id: i64) -> Result<BookingRequest, Error> {
        Fetch::get(&self.http, &self.url(&format!("/admin/requests/{id}")))
            .bearer_auth(&self.session.require_token()?)
            .execute()
            .await
    }

    /// Approve a pending request. Admin only.
    pub async fn approve(&self, id: i64) -> Result<(), Error> {
        Fetch::put(&self.http, &self.url(&format!("/admin/{id}/approve")))
            .bearer_auth(&self.session.require_token()?)
            .json(&serde_json::json!({}))?
            .execute_empty()
            .await
    }

    /// Decline a pending request with a reason. Admin only.
    pub async fn decline(&self, id: i64, reason: &str) -> Result<(), Error> {
        require(reason, "Reason for decline is required.")?;
        Fetch::put(&self.http, &self.url(&format!("/admin/{id}/decline")))
            .bearer_auth(&self.session.require_token()?)
            .json(&DeclineBody { reason })?
            .execute_empty()
            .await
    }

    /// Mark an approved booking as returned. Admin only.
    pub async fn complete(&self, id: i64, draft: &CompletionDraft) -> Result<(), Error> {
        draft.validate()?;
        Fetch::put(&self.http, &self.url(&format!("/admin/{id}/complete")))
            .bearer_auth(&self.session.require_token()?)
            .json(draft)?
            .execute_empty()
            .await
    }

    /// Headline counters. Admin only.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, Error> {
        Fetch::get(&self.http, &self.url("/admin/dashboard-stats"))
            .bearer_auth(&self.session.require_token()?)
            .execute()
            .await
    }

    /// Load the whole admin dashboard in one go.
    ///
    /// The counters, the first three pending requests and the five most
    /// recent history rows are fetched concurrently; the first failure
    /// cancels the rest.
    pub async fn admin_dashboard(&self) -> Result<AdminDashboard, Error> {
        let (stats, pending, recent) = tokio::try_join!(
            self.dashboard_stats(),
            self.pending(PageRequest::new(1, 3)),
            self.history(PageRequest::new(1, 5)),
        )?;
        Ok(AdminDashboard {
            stats,
            pending,
            recent,
        })
    }
}
