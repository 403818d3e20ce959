use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

const DEFAULT_DEV_FILTER: &str = "debug,sea_orm=info,sqlx=warn,tower_http=debug,hyper=info";
const DEFAULT_PROD_FILTER: &str = "info,sea_orm=warn,sqlx=warn,tower_http=info";

/// Install color-eyre hooks for the binary's `main`.
///
/// Shows the file and line of each report and hides the environment section.
/// Calling it more than once is harmless.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Initialize the global subscriber.
///
/// Production emits flattened JSON lines, development emits the pretty
/// formatter. Both carry an `ErrorLayer` so eyre reports include span traces.
/// `RUST_LOG` overrides the default filter.
///
/// Repeated calls (common in tests) are ignored.
pub fn init_tracing(environment: &Environment) {
    let is_production = environment.is_production();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if is_production {
            DEFAULT_PROD_FILTER
        } else {
            DEFAULT_DEV_FILTER
        })
    });

    let result = if is_production {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(()) => info!(environment = ?environment, "Tracing initialized"),
        Err(_) => debug!("Tracing already initialized, skipping"),
    }
}
