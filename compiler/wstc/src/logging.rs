//! Tracing subscriber setup for the `wst` binary.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Install the global subscriber. Later calls do nothing.
///
/// `RUST_LOG` overrides the default filter, e.g.
/// `RUST_LOG=wst_lexer=trace wst transcribe site/`.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));
        let registered = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(verbose)
                    .with_level(true),
            )
            .with(filter)
            .try_init();
        if let Err(e) = registered {
            eprintln!("warning: logging disabled: {e}");
        }
    });
}
