//! Configuration options for the Pinjam client

use std::path::PathBuf;
use std::time::Duration;

/// Configuration options for the Pinjam client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Whether login results are written to durable session storage
    pub persist_session: bool,

    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// Page size used when a caller does not specify one
    pub default_page_size: u32,

    /// Directory holding the file-backed session record; `None` keeps the
    /// session in memory for the lifetime of the client
    pub session_dir: Option<PathBuf>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            persist_session: true,
            request_timeout: Some(Duration::from_secs(30)),
            default_page_size: 10,
            session_dir: None,
        }
    }
}

impl ClientOptions {
    /// Set whether to persist the session
    pub fn with_persist_session(mut self, value: bool) -> Self {
        self.persist_session = value;
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the default page size for list requests
    pub fn with_default_page_size(mut self, value: u32) -> Self {
        self.default_page_size = value.max(1);
        self
    }

    /// Set the directory for the file-backed session record
    pub fn with_session_dir(mut self, value: impl Into<PathBuf>) -> Self {
        self.session_dir = Some(value.into());
        self
    }
}
