pub mod fs;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "reservation_core=info".parse() {
            filter = filter.add_directive(directive);
        }

        // A subscriber may already be installed by the host application.
        if fmt().with_env_filter(filter).try_init().is_err() {
            tracing::debug!("global tracing subscriber already set");
        }
    });
}
