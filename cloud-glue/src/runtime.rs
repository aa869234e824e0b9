//! Execution context of the running cloud function.

use std::env;

/// Environment variable the platform sets to the deployed function's name.
pub const FUNCTION_NAME_ENV: &str = "FUNCTION_NAME";

/// Identity of the function the current process runs as.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct FunctionContext {
    name: String,
}

impl FunctionContext {
    /// Captures the context from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self { name: env::var(FUNCTION_NAME_ENV).unwrap_or_default() }
    }

    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Deployed name of the function, empty when the process does not run on
    /// the platform.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the function is a test deployment, judged by `test` appearing
    /// anywhere in its name.
    ///
    /// The check is a plain substring match, so a name like `get-latest`
    /// also counts as a test deployment.
    #[must_use]
    pub fn is_test(&self) -> bool {
        self.name.contains("test")
    }
}

/// Deployed name of the running function, empty when the process does not
/// run on the platform.
#[must_use]
pub fn function_name() -> String {
    FunctionContext::from_env().name
}

/// Whether the running function is a test deployment.
///
/// See [`FunctionContext::is_test`] for how names are matched.
#[must_use]
pub fn is_test() -> bool {
    FunctionContext::from_env().is_test()
}

#[cfg(test)]
mod tests {
    use super::{function_name, is_test, FunctionContext, FUNCTION_NAME_ENV};

    #[test]
    fn test_function_name_from_env() {
        temp_env::with_var(FUNCTION_NAME_ENV, Some("report-generator"), || {
            assert_eq!(function_name(), "report-generator");
        });
    }

    #[test]
    fn test_function_name_defaults_to_empty() {
        temp_env::with_var_unset(FUNCTION_NAME_ENV, || {
            assert_eq!(function_name(), "");
        });
    }

    #[test]
    fn test_is_test_matches_substring() {
        temp_env::with_var(FUNCTION_NAME_ENV, Some("report-generator-test"), || {
            assert!(is_test());
        });

        temp_env::with_var(FUNCTION_NAME_ENV, Some("report-generator"), || {
            assert!(!is_test());
        });
    }

    #[test]
    fn test_is_test_matches_anywhere_in_name() {
        assert!(FunctionContext::new("test-report").is_test());
        assert!(FunctionContext::new("report-test-v2").is_test());
        assert!(FunctionContext::new("get-latest").is_test());
    }

    #[test]
    fn test_is_test_empty_name_is_not_test() {
        assert!(!FunctionContext::new("").is_test());
    }

    #[test]
    fn test_context_name() {
        let context = FunctionContext::new("report-generator");

        assert_eq!(context.name(), "report-generator");
    }
}
