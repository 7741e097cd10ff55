//! Platform and environment detection.

/// Environment variables that indicate a CI runner.
const CI_ENV_VARS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TRAVIS",
    "JENKINS_URL",
    "BUILDKITE",
];

/// Check if running in a CI environment.
///
/// Used to force the non-interactive UI in `main()`, which prints plain
/// lines instead of spinners.
pub fn is_ci() -> bool {
    is_ci_with(|key| std::env::var(key).is_ok())
}

/// Check for CI with a custom env var lookup.
///
/// This allows testing without modifying actual environment variables.
pub fn is_ci_with<F>(is_set: F) -> bool
where
    F: Fn(&str) -> bool,
{
    CI_ENV_VARS.iter().any(|&var| is_set(var))
}
