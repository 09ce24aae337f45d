use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber; `RUST_LOG` selects levels, output goes to
/// stderr so stdout stays parseable.
pub(crate) fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
