use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Send diagnostics to stderr; `RUST_LOG` overrides the level picked here
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();
}
