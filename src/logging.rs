//! Logger setup for binaries, demos, and tests.
//!
//! The library itself only speaks through the `log` facade; this helper
//! wires up `env_logger` for executables that want to see the diagnostic
//! report and inference warnings.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize `env_logger`, honoring the `INTERPRET_LOG` environment
/// variable and falling back to `default_filter` (e.g. `"debug"`).
///
/// Safe to call more than once; only the first call takes effect.
pub fn init(default_filter: &str) {
    INIT.call_once(|| {
        env_logger::Builder::default()
            .parse_env(env_logger::Env::default().filter_or("INTERPRET_LOG", default_filter))
            .init();
    });
}
