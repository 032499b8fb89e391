use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` wins; otherwise only this crate logs at `level`.
fn crate_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,dollar_price_skill={}", level)))
}

/// Human-readable log lines on stderr; stdout is reserved for the
/// response JSON so the CLI output can be piped.
pub fn init_cli_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(crate_filter(level))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).compact())
        .init();
}

/// One JSON object per line. The Lambda log stream stamps each line itself.
pub fn init_lambda_logger() {
    tracing_subscriber::registry()
        .with(crate_filter("info"))
        .with(fmt::layer().with_target(false).without_time().json())
        .init();
}
