//! Environment-driven tuning for the property suites.
//!
//! CI runs the partition and closure properties with more cases than a local
//! `cargo test`; both read their budget from the same variables so one
//! override applies to every suite.

use std::env;

/// Environment variable overriding the number of generated cases.
pub const PBT_CASES_ENV_KEY: &str = "COREFCHECK_PBT_CASES";
/// Environment variable toggling forked execution of property cases.
pub const PBT_FORK_ENV_KEY: &str = "COREFCHECK_PBT_FORK";

/// Case budget and execution mode for one property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertyRunProfile {
    cases: u32,
    fork: bool,
}

impl PropertyRunProfile {
    /// Reads overrides from the environment, keeping the supplied defaults
    /// for variables that are unset or malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use corefcheck_test_support::ci::property_test_profile::PropertyRunProfile;
    ///
    /// let profile = PropertyRunProfile::from_env(32, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn from_env(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: read_override(PBT_CASES_ENV_KEY, parse_cases).unwrap_or(default_cases),
            fork: read_override(PBT_FORK_ENV_KEY, parse_flag).unwrap_or(default_fork),
        }
    }

    /// Number of cases to generate per property.
    #[must_use]
    pub const fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether each case runs in a forked child process.
    #[must_use]
    pub const fn fork(&self) -> bool {
        self.fork
    }
}

fn read_override<T>(key: &'static str, parse: fn(&str) -> Result<T, String>) -> Option<T> {
    let raw = env::var(key).ok()?;
    parse(&raw)
        .inspect_err(|reason| {
            tracing::warn!(
                env = key,
                raw = %raw,
                reason = %reason,
                "ignoring malformed property-test override",
            );
        })
        .ok()
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err("case count must be positive".to_owned()),
        Ok(cases) => Ok(cases),
        Err(error) => Err(format!("not a case count: {error}")),
    }
}

fn parse_flag(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("`{other}` is not a boolean flag")),
    }
}
