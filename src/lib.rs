//! Pinjam Client Library
//!
//! A Rust client for the Pinjam item-lending backend, covering the session
//! lifecycle, route guarding, paginated list fetching and typed wrappers for
//! the inventory, grant, booking and profile REST endpoints.
//!
//! The entry point is [`Pinjam`]. Construct it once, call
//! [`SessionStore::hydrate`](session::SessionStore::hydrate) at startup to
//! restore a persisted login, then use the per-resource clients:
//!
//! ```
//! use pinjam_client::Pinjam;
//!
//! let client = Pinjam::new("http://localhost:5000");
//! client.session().hydrate();
//! assert!(!client.session().is_authenticated());
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod fetch;
pub mod format;
pub mod guard;
pub mod list;
pub mod pagination;
pub mod session;

use reqwest::Client;
use std::sync::Arc;

use crate::api::auth::AuthApi;
use crate::api::bookings::BookingsApi;
use crate::api::grants::GrantsApi;
use crate::api::inventory::InventoryApi;
use crate::api::profile::{AdminApi, UsersApi};
use crate::config::ClientOptions;
use crate::guard::GuardOutcome;
use crate::pagination::PageRequest;
use crate::session::{
    FileSessionStorage, MemorySessionStorage, Role, SessionStorage, SessionStore,
};

/// The main entry point for the Pinjam client
pub struct Pinjam {
    /// Base URL of the backend, without a trailing slash
    pub url: String,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Client options
    pub options: ClientOptions,
    session: Arc<SessionStore>,
    auth: AuthApi,
    inventory: InventoryApi,
    grants: GrantsApi,
    bookings: BookingsApi,
    users: UsersApi,
    admin: AdminApi,
}

impl Pinjam {
    /// Create a client with default options.
    ///
    /// # Example
    ///
    /// ```
    /// use pinjam_client::Pinjam;
    ///
    /// let client = Pinjam::new("http://localhost:5000");
    /// ```
    pub fn new(base_url: &str) -> Self {
        Self::new_with_options(base_url, ClientOptions::default())
    }

    /// Create a client with custom options.
    ///
    /// Session persistence follows the options: disabled persistence or a
    /// missing session directory keep the session in memory only.
    ///
    /// # Example
    ///
    /// ```
    /// use pinjam_client::{config::ClientOptions, Pinjam};
    ///
    /// let options = ClientOptions::default().with_default_page_size(25);
    /// let client = Pinjam::new_with_options("http://localhost:5000", options);
    /// ```
    pub fn new_with_options(base_url: &str, options: ClientOptions) -> Self {
        let storage: Arc<dyn SessionStorage> = match (options.persist_session, &options.session_dir)
        {
            (true, Some(dir)) => Arc::new(FileSessionStorage::new(dir)),
            _ => Arc::new(MemorySessionStorage::new()),
        };
        Self::with_session_store(base_url, options, Arc::new(SessionStore::new(storage)))
    }

    /// Create a client around an existing session store.
    ///
    /// Useful when several clients should share one identity, or to inject a
    /// pre-seeded store in tests.
    pub fn with_session_store(
        base_url: &str,
        options: ClientOptions,
        session: Arc<SessionStore>,
    ) -> Self {
        let url = base_url.trim_end_matches('/').to_string();

        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().unwrap_or_else(|_| Client::new());

        Self {
            auth: AuthApi::new(url.clone(), http_client.clone(), session.clone()),
            inventory: InventoryApi::new(url.clone(), http_client.clone(), session.clone()),
            grants: GrantsApi::new(url.clone(), http_client.clone(), session.clone()),
            bookings: BookingsApi::new(url.clone(), http_client.clone(), session.clone()),
            users: UsersApi::new(url.clone(), http_client.clone(), session.clone()),
            admin: AdminApi::new(url.clone(), http_client.clone(), session.clone()),
            url,
            http_client,
            options,
            session,
        }
    }

    /// The session store holding the current identity
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Shared handle to the session store
    pub fn session_store(&self) -> Arc<SessionStore> {
        self.session.clone()
    }

    /// Authentication client for login, signup and logout
    pub fn auth(&self) -> &AuthApi {
        &self.auth
    }

    /// Inventory client for the item catalog
    pub fn inventory(&self) -> &InventoryApi {
        &self.inventory
    }

    /// Grants client for the funding registry
    pub fn grants(&self) -> &GrantsApi {
        &self.grants
    }

    /// Bookings client for requests, reviews and history
    pub fn bookings(&self) -> &BookingsApi {
        &self.bookings
    }

    /// Profile client for borrower accounts
    pub fn users(&self) -> &UsersApi {
        &self.users
    }

    /// Profile client for staff accounts
    pub fn admin(&self) -> &AdminApi {
        &self.admin
    }

    /// Evaluate the route guard for a view with the given role requirement.
    pub fn check_access(&self, required: Option<Role>) -> GuardOutcome {
        self.session.check_access(required)
    }

    /// First page with the configured default page size.
    pub fn default_page_request(&self) -> PageRequest {
        PageRequest::first(self.options.default_page_size)
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::guard::GuardOutcome;
    pub use crate::pagination::{PageEnvelope, PageRequest};
    pub use crate::session::{Role, Session};
    pub use crate::Pinjam;
}
