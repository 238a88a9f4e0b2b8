//! Regional service endpoints.

use reqwest::Url;
use thiserror::Error;

/// Identity service root for the default region.
pub const IDENTITY_URL: &str = "https://region-b.geo-1.identity.hpcloudsvc.com:35357/v2.0/";

/// Token issuance endpoint, used by the external identity collaborator.
pub const TOKEN_URL: &str = "https://region-b.geo-1.identity.hpcloudsvc.com:35357/v2.0/tokens";

/// Tenant listing endpoint, used by the external identity collaborator.
pub const TENANT_URL: &str = "https://region-b.geo-1.identity.hpcloudsvc.com:35357/v2.0/tenants";

/// Compute service root for the default region.
pub const COMPUTE_URL: &str = "https://region-b.geo-1.compute.hpcloudsvc.com/v2/";

/// Raised when a compute endpoint cannot carry the server collection path.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("invalid compute endpoint {url}: {message}")]
pub struct EndpointError {
    /// Endpoint as configured.
    pub url: String,
    /// Reason the endpoint was rejected.
    pub message: String,
}

/// Builds the server collection URL for a tenant.
///
/// The base may be given with or without a trailing slash; exactly one
/// separator is placed between it and the tenant identifier. The tenant is
/// pushed as a single percent-encoded path segment.
///
/// # Errors
///
/// Returns [`EndpointError`] when the base is not an absolute hierarchical URL.
pub fn servers_url(compute_base: &str, tenant_id: &str) -> Result<Url, EndpointError> {
    let invalid = |message: String| EndpointError {
        url: compute_base.to_owned(),
        message,
    };
    let mut url = Url::parse(compute_base).map_err(|err| invalid(err.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| invalid(String::from("URL cannot be a base")))?
        .pop_if_empty()
        .push(tenant_id)
        .push("servers");
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn joined(base: &str, tenant: &str) -> String {
        servers_url(base, tenant)
            .map(String::from)
            .unwrap_or_else(|err| panic!("{base} should join: {err}"))
    }

    #[test]
    fn builds_servers_url_from_default_base() {
        assert_eq!(
            joined(COMPUTE_URL, "12345"),
            "https://region-b.geo-1.compute.hpcloudsvc.com/v2/12345/servers"
        );
    }

    #[test]
    fn builds_servers_url_without_trailing_slash() {
        assert_eq!(
            joined("http://localhost:8774/v2", "t1"),
            "http://localhost:8774/v2/t1/servers"
        );
    }

    #[test]
    fn builds_servers_url_from_bare_host() {
        assert_eq!(
            joined("http://localhost:8774", "t1"),
            "http://localhost:8774/t1/servers"
        );
    }

    #[rstest]
    #[case("a/b", "http://localhost:8774/v2/a%2Fb/servers")]
    #[case("a?b", "http://localhost:8774/v2/a%3Fb/servers")]
    #[case("a#b", "http://localhost:8774/v2/a%23b/servers")]
    #[case("a b", "http://localhost:8774/v2/a%20b/servers")]
    fn tenant_stays_a_single_segment(#[case] tenant: &str, #[case] expected: &str) {
        assert_eq!(joined("http://localhost:8774/v2/", tenant), expected);
    }

    #[rstest]
    #[case("not a url")]
    #[case("mailto:ops@example.com")]
    fn rejects_unusable_bases(#[case] base: &str) {
        let err = servers_url(base, "t1").expect_err("base should be rejected");
        assert_eq!(err.url, base);
    }

    #[test]
    fn identity_urls_share_root() {
        assert!(TOKEN_URL.starts_with(IDENTITY_URL));
        assert!(TENANT_URL.starts_with(IDENTITY_URL));
    }
}
