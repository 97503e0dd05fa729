//! Kubernetes API client constants.

/// Page size for namespace, secret and release list calls.
pub const LIST_PAGE_SIZE: u32 = 500;

/// Connect timeout for the API client, in seconds.
pub const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Read timeout for the API client, in seconds.
pub const READ_TIMEOUT_SECS: u64 = 30;
