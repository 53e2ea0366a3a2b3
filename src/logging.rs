use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// JSON output by default; `LOG_FORMAT=text` for a human-readable layer.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let text = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("text"))
        .unwrap_or(false);
    let registry = tracing_subscriber::registry().with(filter);
    if text {
        registry.with(fmt::layer().with_ansi(false)).init();
    } else {
        registry.with(fmt::layer().json()).init();
    }
}
