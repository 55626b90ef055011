//! Domain Restriction
//!
//! Decides whether a request's origin domain is on the allow list.

use axum::http::{header, HeaderMap};

// == Host Filter ==
/// Allow list of domains. A domain also admits its subdomains.
#[derive(Debug, Clone, Default)]
pub struct HostFilter {
    allowed: Vec<String>,
}

impl HostFilter {
    /// `allowed` should already be lowercased; see `config::parse_host_list`.
    pub fn new(allowed: Vec<String>) -> Self {
        Self { allowed }
    }

    /// True when no list is configured and every request passes.
    pub fn is_open(&self) -> bool {
        self.allowed.is_empty()
    }

    /// Checks the request's origin host.
    ///
    /// Looks at `Origin`, then `Referer`, then `Host`. A request without any of
    /// them is rejected once a list is configured.
    pub fn permits(&self, headers: &HeaderMap) -> bool {
        if self.is_open() {
            return true;
        }

        match request_host(headers) {
            Some(host) => self.permits_host(&host),
            None => false,
        }
    }

    /// Checks a bare hostname against the list, case-insensitively.
    ///
    /// `www.cutoffs.in` matches `cutoffs.in`; `evilcutoffs.in` does not.
    pub fn permits_host(&self, host: &str) -> bool {
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        self.allowed.iter().any(|allowed| {
            host == *allowed
                || host
                    .strip_suffix(allowed.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }
}

/// Extracts the bare hostname (no scheme, port or path) the request came from.
pub fn request_host(headers: &HeaderMap) -> Option<String> {
    [header::ORIGIN, header::REFERER, header::HOST]
        .iter()
        .filter_map(|name| headers.get(name))
        .filter_map(|value| value.to_str().ok())
        .filter_map(host_of)
        .next()
}

fn host_of(raw: &str) -> Option<String> {
    let rest = raw.split_once("://").map_or(raw, |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next()?;
    let authority = authority.rsplit('@').next()?;

    let host = if let Some(bracketed) = authority.strip_prefix('[') {
        bracketed.split(']').next()?
    } else {
        authority.split(':').next()?
    };

    if host.is_empty() || host == "null" {
        None
    } else {
        Some(host.to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn filter() -> HostFilter {
        HostFilter::new(vec!["cutoffs.in".to_string(), "localhost".to_string()])
    }

    fn headers(pairs: &[(header::HeaderName, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(name.clone(), HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_host_of() {
        assert_eq!(host_of("https://Cutoffs.in:8443/a?b").as_deref(), Some("cutoffs.in"));
        assert_eq!(host_of("localhost:3000").as_deref(), Some("localhost"));
        assert_eq!(host_of("http://[::1]:3000/").as_deref(), Some("::1"));
        assert_eq!(host_of("null"), None);
        assert_eq!(host_of(""), None);
    }

    #[test]
    fn test_open_filter_permits_all() {
        let open = HostFilter::default();
        assert!(open.is_open());
        assert!(open.permits(&HeaderMap::new()));
    }

    #[test]
    fn test_exact_and_subdomain_match() {
        let f = filter();
        assert!(f.permits_host("cutoffs.in"));
        assert!(f.permits_host("www.cutoffs.in"));
        assert!(f.permits_host("LOCALHOST"));
        assert!(!f.permits_host("evilcutoffs.in"));
        assert!(!f.permits_host("cutoffs.in.evil.com"));
    }

    #[test]
    fn test_origin_takes_precedence_over_host() {
        let f = filter();
        let h = headers(&[
            (header::ORIGIN, "https://evil.com"),
            (header::HOST, "cutoffs.in"),
        ]);
        assert!(!f.permits(&h));
    }

    #[test]
    fn test_falls_back_to_referer_then_host() {
        let f = filter();
        assert!(f.permits(&headers(&[(header::REFERER, "https://www.cutoffs.in/page")])));
        assert!(f.permits(&headers(&[(header::HOST, "localhost:3000")])));
    }

    #[test]
    fn test_missing_headers_rejected() {
        assert!(!filter().permits(&HeaderMap::new()));
    }
}
