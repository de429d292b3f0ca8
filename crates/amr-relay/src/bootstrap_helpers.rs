use tracing_subscriber::EnvFilter;

/// Relay crates log at info; dependencies (hyper, reqwest) only surface warnings.
const DEFAULT_RELAY_LOG_DIRECTIVES: &str =
    "warn,amr_relay=info,amr_gateway=info,amr_workflow=info,amr_galaxy=info";

pub(crate) fn relay_env_filter(rust_log: Option<&str>) -> EnvFilter {
    match rust_log.map(str::trim).filter(|value| !value.is_empty()) {
        Some(directives) => EnvFilter::builder().parse_lossy(directives),
        None => EnvFilter::builder().parse_lossy(DEFAULT_RELAY_LOG_DIRECTIVES),
    }
}

pub(crate) fn init_tracing() {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(relay_env_filter(rust_log.as_deref()))
        .with_target(true)
        .compact()
        .init();
}
