use tracing_subscriber::EnvFilter;

/// Diagnostics to stderr. `RUST_LOG` wins; otherwise `info`, or `debug` with `--verbose`.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
