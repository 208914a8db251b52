//! Tracing setup for embedding applications.

use tracing_subscriber::{fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize console tracing with a compact format.
///
/// The embedding application may install its own subscriber instead; this
/// helper is a convenience for tools and tests. Returns an error if a global
/// subscriber is already set.
pub fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let console_fmt = tracing_subscriber::fmt::layer().event_format(
        Format::default()
            .compact()
            .with_target(false)
            .without_time(),
    );
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "trainia=debug".into()))
        .with(console_fmt)
        .try_init()?;
    Ok(())
}
