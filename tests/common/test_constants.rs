//! Shared constants for integration tests.
//!
//! Integration tests are compiled as separate crates (one per top-level file in
//! `tests/`). Placing shared constants under `tests/common/` avoids creating an
//! additional integration test binary while still allowing reuse via:
//!
//! ```rust
//! #[path = "common/test_constants.rs"]
//! mod test_constants;
//! ```

/// Tenant used when a test needs credentials.
pub const TENANT_ID: &str = "10873218563681";

/// Token used when a test needs credentials.
pub const AUTH_TOKEN: &str = "HPAuth_4f6c1c9e0e3a";

/// Local compute endpoint that keeps tests off the real service.
pub const LOCAL_COMPUTE_URL: &str = "http://127.0.0.1:8774/v2/";
