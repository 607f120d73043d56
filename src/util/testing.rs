// src/util/testing.rs

use std::env;
use std::sync::OnceLock;
use tracing::{debug, info, instrument};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::config::{ENV_BASE_URL, ENV_TIMEOUT};

/// Global test configuration, initialized exactly once via OnceLock.
#[derive(Debug)]
pub struct TestEnv {
    /// Base URL that is guaranteed to refuse connections
    pub unreachable_url: &'static str,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            unreachable_url: "http://127.0.0.1:9/",
        }
    }
}

static TEST_ENV: OnceLock<TestEnv> = OnceLock::new();

/// Initializes the global test environment exactly once.
/// - Sets up logging
/// Returns a reference to the fully-initialized TestEnv.
pub fn init_test_env() -> &'static TestEnv {
    TEST_ENV.get_or_init(|| {
        let data = TestEnv::new();
        setup_test_logging();
        info!("Test environment initialized");
        data
    })
}

/// Logging setup only runs once; subsequent calls do nothing if `tracing` is already set.
fn setup_test_logging() {
    debug!("Attempting logger init from testing.rs");
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
        return;
    }

    let noisy_modules = ["reqwest", "mio", "want", "hyper_util", "rustyline"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    subscriber.try_init().unwrap_or_else(|e| {
        eprintln!("Error: Failed to set up logging: {}", e);
    });
}

/// Restores the client's environment variables on drop.
#[derive(Debug, Clone)]
pub struct EnvGuard {
    base_url: Option<String>,
    timeout: Option<String>,
}

impl Default for EnvGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvGuard {
    pub fn new() -> Self {
        Self {
            base_url: env::var(ENV_BASE_URL).ok(),
            timeout: env::var(ENV_TIMEOUT).ok(),
        }
    }
}

impl Drop for EnvGuard {
    #[instrument(level = "trace")]
    fn drop(&mut self) {
        env::remove_var(ENV_BASE_URL);
        env::remove_var(ENV_TIMEOUT);
        if let Some(val) = &self.base_url {
            env::set_var(ENV_BASE_URL, val);
        }
        if let Some(val) = &self.timeout {
            env::set_var(ENV_TIMEOUT, val);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn given_repeated_init_when_called_then_same_env() {
        let first = init_test_env() as *const TestEnv;
        let second = init_test_env() as *const TestEnv;
        assert_eq!(first, second);
    }

    #[test]
    #[serial]
    fn given_guard_when_dropped_then_env_restored() {
        env::set_var(ENV_BASE_URL, "http://before/");
        {
            let _guard = EnvGuard::new();
            env::set_var(ENV_BASE_URL, "http://during/");
            env::set_var(ENV_TIMEOUT, "3");
        }
        assert_eq!(env::var(ENV_BASE_URL).unwrap(), "http://before/");
        assert!(env::var(ENV_TIMEOUT).is_err());
        env::remove_var(ENV_BASE_URL);
    }
}
