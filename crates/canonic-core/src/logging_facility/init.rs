//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl Profile {
    /// Filter directive used when `RUST_LOG` is not set
    pub fn default_directive(&self) -> &'static str {
        match self {
            Profile::Development => "canonic=debug",
            Profile::Production => "canonic=info",
            Profile::Test => "off",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility with the profile's default filter
///
/// # Profiles
///
/// - **Development**: Human-readable logs with debug level
/// - **Production**: JSON structured logs with info level
/// - **Test**: Bare registry; capture is installed via `init_test_capture()`
///
/// # Example
///
/// ```
/// use canonic_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    init_with_filter(profile, profile.default_directive());
}

/// Initialize the logging facility with an explicit fallback filter
///
/// `RUST_LOG` still takes precedence over `default_directive`. Only the first
/// call in a process has any effect.
pub fn init_with_filter(profile: Profile, default_directive: &str) {
    INIT_ONCE.call_once(|| {
        let filter = || {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
        };
        // A capture layer may already own the global default; keep it.
        let installed = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(filter())
                .finish()
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter())
                .finish()
                .try_init(),
            // Test capture is initialized separately via init_test_capture()
            Profile::Test => tracing_subscriber::registry().try_init(),
        };
        if installed.is_err() {
            tracing::debug!("global subscriber already installed");
        }
    });
}
