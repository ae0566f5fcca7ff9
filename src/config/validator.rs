//! Chainable field checks.
//!
//! Every check consumes the [`Field`] and hands back a new one. Once a check
//! fails the recorded error is carried through unchanged and the remaining
//! checks are skipped, so the first violation is the one reported.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use super::error::{ConfigError, Violation};

/// Cloud region style tags, e.g. `eu-west-1`.
pub static GEO_TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z\-\d]*$").expect("geo tag regex"));

/// Host names such as `ns1.example.com`.
pub static HOST_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(([a-zA-Z0-9]|[a-zA-Z0-9][a-zA-Z0-9\-]*[a-zA-Z0-9])\.)*([A-Za-z0-9]|[A-Za-z0-9][A-Za-z0-9\-]*[A-Za-z0-9])$",
    )
    .expect("host name regex")
});

pub static IP_ADDRESS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(([0-9]|[1-9][0-9]|1[0-9]{2}|2[0-4][0-9]|25[0-5])\.){3}([0-9]|[1-9][0-9]|1[0-9]{2}|2[0-4][0-9]|25[0-5])$",
    )
    .expect("ip address regex")
});

/// `d`, `d.d` or `d.d.d`, last segment may be `*`.
pub static VERSION_NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+\.)?(\d+\.)?(\*|\d+)$").expect("version number regex"));

pub static K8S_NAMESPACE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z\d]([-a-zA-Z\d]*[a-zA-Z\d])?$").expect("k8s namespace regex")
});

/// A named value under validation together with the first recorded failure.
#[derive(Debug)]
pub struct Field<'a, T: ?Sized> {
    key: String,
    value: &'a T,
    err: Option<ConfigError>,
}

pub fn field<'a, T: ?Sized>(key: impl Into<String>, value: &'a T) -> Field<'a, T> {
    Field {
        key: key.into(),
        value,
        err: None,
    }
}

impl<'a, T: ?Sized> Field<'a, T> {
    fn check(
        mut self,
        passes: impl FnOnce(&T) -> bool,
        violation: impl FnOnce() -> Violation,
    ) -> Self {
        if self.err.is_none() && !passes(self.value) {
            self.err = Some(ConfigError::Field {
                key: self.key.clone(),
                violation: violation(),
            });
        }
        self
    }

    /// Terminal accessor; `Ok` when every check passed.
    pub fn result(self) -> Result<(), ConfigError> {
        match self.err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<'a, T: AsRef<str> + ?Sized> Field<'a, T> {
    pub fn is_not_empty(self) -> Self {
        self.check(|v| !v.as_ref().is_empty(), || Violation::Empty)
    }

    pub fn match_regexp(self, regex: &Regex) -> Self {
        self.check(
            |v| regex.is_match(v.as_ref()),
            || Violation::NoMatch {
                pattern: regex.as_str().to_string(),
            },
        )
    }

    /// Passes when at least one of the patterns matches.
    pub fn match_regexps(self, regexes: &[&Regex]) -> Self {
        self.check(
            |v| regexes.iter().any(|r| r.is_match(v.as_ref())),
            || Violation::NoMatchAny {
                patterns: regexes.iter().map(|r| r.as_str().to_string()).collect(),
            },
        )
    }
}

impl<'a, T: PartialEq + Display + ?Sized> Field<'a, T> {
    pub fn is_not_equal_to(self, other: &T) -> Self {
        self.check(
            |v| v != other,
            || Violation::EqualTo {
                other: other.to_string(),
            },
        )
    }
}

impl<'a, T: PartialOrd + Display + Default> Field<'a, T> {
    pub fn is_higher_than_zero(self) -> Self {
        self.check(|v| *v > T::default(), || Violation::NotPositive)
    }

    pub fn is_higher_or_equal_to_zero(self) -> Self {
        self.check(|v| *v >= T::default(), || Violation::Negative)
    }

    pub fn is_higher_than(self, limit: T) -> Self {
        let rendered = limit.to_string();
        self.check(|v| *v > limit, || Violation::NotHigherThan { limit: rendered })
    }

    pub fn is_less_or_equal_to(self, limit: T) -> Self {
        let rendered = limit.to_string();
        self.check(|v| *v <= limit, || Violation::HigherThan { limit: rendered })
    }
}

impl<'a, E: Eq + Hash + Display> Field<'a, [E]> {
    pub fn has_items(self) -> Self {
        self.check(|v| !v.is_empty(), || Violation::Empty)
    }

    pub fn has_unique_items(self) -> Self {
        let items: &'a [E] = self.value;
        let mut seen = HashSet::with_capacity(items.len());
        let duplicate = items.iter().find(|item| !seen.insert(*item));
        self.check(
            |_| duplicate.is_none(),
            || Violation::NotUnique {
                item: duplicate.map(ToString::to_string).unwrap_or_default(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_failure_wins() {
        let err = field("KEY", "")
            .is_not_empty()
            .match_regexp(&GEO_TAG_REGEX)
            .result()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Field {
                key: "KEY".to_string(),
                violation: Violation::Empty
            }
        );
    }

    #[test]
    fn test_patterns() {
        assert!(GEO_TAG_REGEX.is_match("eu-west-1"));
        assert!(!GEO_TAG_REGEX.is_match("eu_west"));
        assert!(HOST_NAME_REGEX.is_match("ns1.example.com"));
        assert!(!HOST_NAME_REGEX.is_match("-bad.example.com"));
        assert!(IP_ADDRESS_REGEX.is_match("10.0.0.255"));
        assert!(!IP_ADDRESS_REGEX.is_match("10.0.0.256"));
        assert!(VERSION_NUMBER_REGEX.is_match("2.3.1"));
        assert!(VERSION_NUMBER_REGEX.is_match("2.*"));
        assert!(!VERSION_NUMBER_REGEX.is_match("v2"));
        assert!(K8S_NAMESPACE_REGEX.is_match("k8gb"));
        assert!(!K8S_NAMESPACE_REGEX.is_match("k8gb-"));
    }
}
