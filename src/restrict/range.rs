//! IP range matching.
//!
//! # Responsibilities
//! - Match a client IP against one specification string
//! - Support exact IPs, CIDR blocks, `*` wildcards, and start-end ranges
//!
//! # Design Decisions
//! - Unrecognized spec formats degrade to exact string comparison, never error
//! - Dotted-quad validation is digit-count only; anything the address parser
//!   rejects collapses to integer 0 instead of failing the check
//! - IPv6 literals never enter the numeric branches; they only match via the
//!   localhost bypass or exact equality

use regex::Regex;
use std::borrow::Cow;
use std::net::Ipv4Addr;
use std::sync::LazyLock;

/// Loopback addresses covered by the localhost bypass.
const LOOPBACK_ADDRESSES: [&str; 2] = ["127.0.0.1", "::1"];

/// Dotted quad with an optional prefix length, each segment 1-3 digits.
static CIDR_SPEC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}(/\d{1,3})?$")
        .expect("CIDR spec regex is valid")
});

/// Returns true if `ip` is a loopback literal.
pub fn is_loopback(ip: &str) -> bool {
    LOOPBACK_ADDRESSES.contains(&ip)
}

/// Permissive dotted-quad conversion: anything unparsable becomes 0.
fn ipv4_to_u32(ip: &str) -> u32 {
    ip.parse::<Ipv4Addr>().map(u32::from).unwrap_or(0)
}

/// Check whether `ip` falls inside `spec`.
///
/// `spec` is one of: exact IP, CIDR (`10.0.0.0/8`), wildcard (`10.0.*.*`),
/// or inclusive range (`10.0.0.1-10.0.0.99`). With `localhost_bypass` set,
/// loopback clients match any spec unconditionally.
pub fn ip_in_range(ip: &str, spec: &str, localhost_bypass: bool) -> bool {
    if localhost_bypass && is_loopback(ip) {
        return true;
    }

    if CIDR_SPEC.is_match(spec) {
        let (base, prefix) = match spec.split_once('/') {
            Some((base, prefix)) => (base, prefix.parse::<u32>().unwrap_or(32)),
            None => (spec, 32),
        };
        // Prefix lengths at or past the address width degrade to an exact
        // integer comparison; /0 masks nothing and matches everything.
        let host_bits = 32u32.saturating_sub(prefix);
        let wildcard = if host_bits >= 32 {
            u32::MAX
        } else {
            (1u32 << host_bits) - 1
        };
        let netmask = !wildcard;
        return ipv4_to_u32(ip) & netmask == ipv4_to_u32(base) & netmask;
    }

    // 10.0.*.* is shorthand for the 10.0.0.0-10.0.255.255 range.
    let spec: Cow<'_, str> = if spec.contains('*') {
        Cow::Owned(format!(
            "{}-{}",
            spec.replace('*', "0"),
            spec.replace('*', "255")
        ))
    } else {
        Cow::Borrowed(spec)
    };

    if let Some((lower, upper)) = spec.split_once('-') {
        let ip_dec = ipv4_to_u32(ip);
        return ipv4_to_u32(lower) <= ip_dec && ip_dec <= ipv4_to_u32(upper);
    }

    // Unrecognized format: fall back to literal comparison.
    ip == spec.as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_ip() {
        assert!(ip_in_range("84.34.35.23", "84.34.35.23", false));
        assert!(!ip_in_range("84.34.35.23", "84.34.35.22", false));
    }

    #[test]
    fn test_cidr_range() {
        assert!(ip_in_range("84.34.35.2", "84.34.35.1/24", false));
        assert!(!ip_in_range("84.34.36.2", "84.34.35.1/24", false));
    }

    #[test]
    fn test_cidr_full_width_prefix_is_exact() {
        assert!(ip_in_range("84.34.35.1", "84.34.35.1/32", false));
        assert!(!ip_in_range("84.34.35.2", "84.34.35.1/32", false));
    }

    #[test]
    fn test_cidr_zero_prefix_matches_everything() {
        assert!(ip_in_range("1.2.3.4", "84.34.35.1/0", false));
        assert!(ip_in_range("255.255.255.255", "0.0.0.0/0", false));
    }

    #[test]
    fn test_start_end_range_inclusive() {
        let spec = "84.34.35.1-84.34.35.23";
        assert!(ip_in_range("84.34.35.22", spec, false));
        assert!(ip_in_range("84.34.35.1", spec, false));
        assert!(ip_in_range("84.34.35.23", spec, false));
        assert!(!ip_in_range("84.34.35.24", spec, false));
        assert!(!ip_in_range("84.34.35.0", spec, false));
    }

    #[test]
    fn test_wildcard_range() {
        assert!(ip_in_range("84.34.35.2", "84.34.35.*", false));
        assert!(ip_in_range("84.34.35.0", "84.34.35.*", false));
        assert!(ip_in_range("84.34.35.255", "84.34.35.*", false));
        assert!(!ip_in_range("84.34.36.5", "84.34.35.*", false));
    }

    #[test]
    fn test_localhost_bypass_matches_any_spec() {
        let specs = [
            "84.34.35.23",
            "84.34.35.1/24",
            "84.34.35.1-84.34.35.23",
            "84.34.35.*",
        ];
        for spec in specs {
            assert!(ip_in_range("127.0.0.1", spec, true), "spec {spec}");
            assert!(ip_in_range("::1", spec, true), "spec {spec}");
        }
    }

    #[test]
    fn test_bypass_off_leaves_loopback_ordinary() {
        assert!(!ip_in_range("127.0.0.1", "84.34.35.23", false));
        assert!(ip_in_range("127.0.0.1", "127.0.0.1", false));
    }

    #[test]
    fn test_ipv6_only_matches_exactly() {
        assert!(ip_in_range("::1", "::1", false));
        assert!(!ip_in_range("::1", "84.34.35.*", false));
        assert!(!ip_in_range("2001:db8::1", "84.34.35.1/24", false));
    }

    #[test]
    fn test_garbage_spec_falls_back_to_string_equality() {
        assert!(!ip_in_range("1.2.3.4", "garbage", false));
        assert!(ip_in_range("garbage", "garbage", false));
    }

    #[test]
    fn test_out_of_range_octets_are_not_rejected() {
        // 999 passes the digit-count check; the unparsable quad collapses
        // to 0 rather than erroring.
        assert!(!ip_in_range("84.34.35.2", "84.34.35.999/24", false));
        assert!(ip_in_range("0.0.0.2", "84.34.35.999/24", false));
    }
}
