//! Shared test utilities for `corefcheck-core`.

use corefcheck_test_support::ci::property_test_profile::PropertyRunProfile;
use proptest::test_runner::Config as ProptestConfig;

/// Builds a proptest configuration from the shared CI profile so every
/// property suite honours `COREFCHECK_PBT_CASES` and `COREFCHECK_PBT_FORK`.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = PropertyRunProfile::from_env(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}
