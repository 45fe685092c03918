//! Environment overrides for property-test sizing.
//!
//! `PROGTEST_CASES` scales every suite at once; `HYPERPATH_PBT_FORK` moves
//! cases into subprocesses when a run needs crash isolation.

use std::{env, fmt};

/// Environment variable controlling proptest case counts.
pub const PROGTEST_CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Environment variable controlling proptest process forking.
pub const HYPERPATH_PBT_FORK_ENV_KEY: &str = "HYPERPATH_PBT_FORK";

/// Resolved case count and fork mode for one property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Resolves the profile, falling back to the given defaults when a
    /// variable is unset or unparsable.
    ///
    /// # Examples
    ///
    /// ```
    /// use hyperpath_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(32, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: resolve(PROGTEST_CASES_ENV_KEY, default_cases, case_count),
            fork: resolve(HYPERPATH_PBT_FORK_ENV_KEY, default_fork, switch),
        }
    }

    #[must_use]
    #[rustfmt::skip]
    pub fn cases(&self) -> u32 { self.cases }

    #[must_use]
    #[rustfmt::skip]
    pub fn fork(&self) -> bool { self.fork }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Rejection {
    NotANumber(String),
    ZeroCases,
    NotASwitch,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber(reason) => write!(f, "not a case count: {reason}"),
            Self::ZeroCases => f.write_str("case count must be positive"),
            Self::NotASwitch => f.write_str("expected true/false, 1/0, yes/no, or on/off"),
        }
    }
}

fn resolve<T: Copy>(key: &'static str, default: T, parse: fn(&str) -> Result<T, Rejection>) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|rejection| {
        tracing::warn!(
            env = key,
            raw = %raw,
            %rejection,
            "ignoring property-test override",
        );
        default
    })
}

fn case_count(raw: &str) -> Result<u32, Rejection> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err(Rejection::ZeroCases),
        Ok(cases) => Ok(cases),
        Err(err) => Err(Rejection::NotANumber(err.to_string())),
    }
}

fn switch(raw: &str) -> Result<bool, Rejection> {
    let raw = raw.trim();
    ["1", "true", "yes", "on"]
        .iter()
        .any(|word| raw.eq_ignore_ascii_case(word))
        .then_some(true)
        .or_else(|| {
            ["0", "false", "no", "off"]
                .iter()
                .any(|word| raw.eq_ignore_ascii_case(word))
                .then_some(false)
        })
        .ok_or(Rejection::NotASwitch)
}
