use url::{Host, Url};

/// Checks whether a string is a well-formed, fetchable absolute URL
///
/// Accepts only http/https URLs whose host is a DNS-label domain with an
/// alphabetic TLD of 2-6 characters, `localhost`, or a dotted-quad IPv4
/// address. Port, path, and query are optional.
///
/// Performs no network access; parse failures map to `false`.
///
/// # Examples
///
/// ```
/// use page_harvest::url::is_valid_url;
///
/// assert!(is_valid_url("https://example.com/path"));
/// assert!(is_valid_url("http://localhost:8080"));
/// assert!(!is_valid_url("ftp://x.com"));
/// assert!(!is_valid_url("not a url"));
/// ```
pub fn is_valid_url(input: &str) -> bool {
    let parsed = match Url::parse(input) {
        Ok(url) => url,
        Err(_) => return false,
    };

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return false;
    }

    match parsed.host() {
        Some(Host::Domain(domain)) => is_valid_domain(domain),
        Some(Host::Ipv4(_)) => true,
        // IPv6 hosts and host-less URLs are not fetch targets here.
        Some(Host::Ipv6(_)) | None => false,
    }
}

/// Checks a DNS-style hostname: dot-separated labels plus an alphabetic TLD
fn is_valid_domain(domain: &str) -> bool {
    // A single trailing dot is the fully-qualified form of the same name.
    let domain = domain.strip_suffix('.').unwrap_or(domain);

    if domain.eq_ignore_ascii_case("localhost") {
        return true;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let tld = labels[labels.len() - 1];
    if tld.len() < 2 || tld.len() > 6 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }

    labels[..labels.len() - 1]
        .iter()
        .all(|label| is_valid_label(label))
}

/// Checks a single DNS label: 1-63 chars, alphanumeric ends, hyphens inside
fn is_valid_label(label: &str) -> bool {
    if label.is_empty() || label.len() > 63 {
        return false;
    }

    let first_ok = label
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric());
    let last_ok = label
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_alphanumeric());

    first_ok
        && last_ok
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_https_url() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("https://example.com/path"));
        assert!(is_valid_url("https://example.com/path?q=1&r=2"));
    }

    #[test]
    fn test_accepts_http_scheme() {
        assert!(is_valid_url("http://example.com"));
    }

    #[test]
    fn test_accepts_subdomains_and_port() {
        assert!(is_valid_url("https://blog.sub.example.com:8443/post"));
    }

    #[test]
    fn test_accepts_localhost() {
        assert!(is_valid_url("http://localhost"));
        assert!(is_valid_url("http://localhost:8080/admin"));
    }

    #[test]
    fn test_accepts_ipv4_host() {
        assert!(is_valid_url("http://192.168.1.1"));
        assert!(is_valid_url("http://127.0.0.1:3000/health"));
    }

    #[test]
    fn test_accepts_trailing_dot_domain() {
        assert!(is_valid_url("https://example.com./path"));
    }

    #[test]
    fn test_rejects_empty_string() {
        assert!(!is_valid_url(""));
    }

    #[test]
    fn test_rejects_missing_scheme() {
        assert!(!is_valid_url("example.com"));
        assert!(!is_valid_url("www.example.com/path"));
    }

    #[test]
    fn test_rejects_non_http_schemes() {
        assert!(!is_valid_url("ftp://x.com"));
        assert!(!is_valid_url("file:///etc/passwd"));
        assert!(!is_valid_url("mailto:user@example.com"));
    }

    #[test]
    fn test_rejects_free_text() {
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url("https://"));
    }

    #[test]
    fn test_rejects_single_label_host() {
        assert!(!is_valid_url("https://intranet"));
    }

    #[test]
    fn test_rejects_bad_tld() {
        assert!(!is_valid_url("https://example.c"));
        assert!(!is_valid_url("https://example.toolongtld"));
        assert!(!is_valid_url("https://example.c0m"));
    }

    #[test]
    fn test_rejects_malformed_labels() {
        assert!(!is_valid_url("https://-bad.example.com"));
        assert!(!is_valid_url("https://bad-.example.com"));
        assert!(!is_valid_url("https://exa_mple.com"));
    }

    #[test]
    fn test_rejects_ipv6_host() {
        assert!(!is_valid_url("http://[::1]/"));
    }

    #[test]
    fn test_label_length_limit() {
        let long_label = "a".repeat(64);
        assert!(!is_valid_url(&format!("https://{}.com", long_label)));
        let max_label = "a".repeat(63);
        assert!(is_valid_url(&format!("https://{}.com", max_label)));
    }
}
