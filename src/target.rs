// Gematria Finder Target Parser
// Parses target expressions such as "primary=74,quaternary=1000"

use crate::types::{Scheme, TargetError, TargetVector};
use regex::Regex;
use std::sync::OnceLock;

/// One `scheme=value` (or `scheme:value`) pair
const PAIR_PATTERN: &str = r"^\s*([A-Za-z]+)\s*[=:]\s*(\S+)\s*$";

/// Parse a comma-separated target expression
///
/// # Pattern Syntax
/// - Pairs are separated by `,`
/// - Each pair is `scheme=value`; `scheme:value` is also accepted
/// - Scheme names: `primary`, `secondary`, `tertiary`, `quaternary`, their
///   aliases `simple`, `english`, `reverse`, `jewish`, or the first letter
/// - Schemes that are not named stay disabled
///
/// # Examples
/// ```
/// # use gematria_finder::target::parse_target;
/// # use gematria_finder::types::Scheme;
/// let target = parse_target("simple=74, jewish=1000").unwrap();
/// assert_eq!(target.value(Scheme::Primary), Some(74));
/// assert_eq!(target.value(Scheme::Quaternary), Some(1000));
/// assert!(!target.is_enabled(Scheme::Secondary));
/// ```
pub fn parse_target(expr: &str) -> Result<TargetVector, TargetError> {
    let expr = expr.trim();
    if expr.is_empty() {
        return Err(TargetError::EmptyTarget);
    }

    let pattern = pair_regex()?;
    let mut target = TargetVector::new();

    for pair in expr.split(',') {
        let caps = pattern
            .captures(pair)
            .ok_or_else(|| TargetError::MalformedPair {
                pair: pair.trim().to_string(),
            })?;

        let name = &caps[1];
        let scheme = Scheme::from_name(name).ok_or_else(|| TargetError::UnknownScheme {
            name: name.to_string(),
        })?;
        if target.is_enabled(scheme) {
            return Err(TargetError::DuplicateScheme { scheme });
        }

        let raw = &caps[2];
        let value = parse_value(raw).ok_or_else(|| TargetError::InvalidValue {
            scheme,
            value: raw.to_string(),
        })?;
        target = target.with(scheme, value);
    }

    Ok(target)
}

/// Pair pattern, compiled on first use
fn pair_regex() -> Result<&'static Regex, TargetError> {
    static PAIR_REGEX: OnceLock<Result<Regex, String>> = OnceLock::new();
    PAIR_REGEX
        .get_or_init(|| Regex::new(PAIR_PATTERN).map_err(|e| e.to_string()))
        .as_ref()
        .map_err(|e| TargetError::RegexError(e.clone()))
}

/// Non-negative integer, `_` allowed as a digit separator
fn parse_value(raw: &str) -> Option<u64> {
    let digits: String = raw.chars().filter(|c| *c != '_').collect();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============ Accepted Forms ============

    #[test]
    fn test_single_pair() {
        let target = parse_target("primary=6").unwrap();
        assert_eq!(target.value(Scheme::Primary), Some(6));
        assert_eq!(target.enabled_schemes().count(), 1);
    }

    #[test]
    fn test_aliases_and_letters() {
        let target = parse_target("english=444,t:74,q = 1_000").unwrap();
        assert_eq!(target.value(Scheme::Secondary), Some(444));
        assert_eq!(target.value(Scheme::Tertiary), Some(74));
        assert_eq!(target.value(Scheme::Quaternary), Some(1000));
        assert!(!target.is_enabled(Scheme::Primary));
    }

    #[test]
    fn test_case_insensitive_names() {
        let target = parse_target("Simple=12").unwrap();
        assert_eq!(target.value(Scheme::Primary), Some(12));
    }

    #[test]
    fn test_zero_value_is_enabled() {
        let target = parse_target("tertiary=0").unwrap();
        assert_eq!(target.value(Scheme::Tertiary), Some(0));
    }

    #[test]
    fn test_pair_regex_compiled_once() {
        let first = pair_regex().unwrap();
        let second = pair_regex().unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_max_value_accepted() {
        let target = parse_target("primary=18446744073709551615,secondary=1").unwrap();
        assert_eq!(target.value(Scheme::Primary), Some(u64::MAX));
        assert_eq!(target.value(Scheme::Secondary), Some(1));
        assert!(target.mean() > 9.0e18);
    }

    // ============ Errors ============

    #[test]
    fn test_empty() {
        assert_eq!(parse_target("  "), Err(TargetError::EmptyTarget));
    }

    #[test]
    fn test_malformed_pair() {
        assert_eq!(
            parse_target("primary=6,,secondary=36"),
            Err(TargetError::MalformedPair { pair: String::new() })
        );
        assert!(matches!(
            parse_target("primary"),
            Err(TargetError::MalformedPair { .. })
        ));
    }

    #[test]
    fn test_unknown_scheme() {
        assert_eq!(
            parse_target("chaldean=6"),
            Err(TargetError::UnknownScheme {
                name: "chaldean".to_string()
            })
        );
    }

    #[test]
    fn test_duplicate_scheme() {
        assert_eq!(
            parse_target("primary=6,simple=7"),
            Err(TargetError::DuplicateScheme {
                scheme: Scheme::Primary
            })
        );
    }

    #[test]
    fn test_invalid_value() {
        assert_eq!(
            parse_target("primary=-6"),
            Err(TargetError::InvalidValue {
                scheme: Scheme::Primary,
                value: "-6".to_string()
            })
        );
        assert!(matches!(
            parse_target("q=99999999999999999999999"),
            Err(TargetError::InvalidValue { .. })
        ));
    }
}
