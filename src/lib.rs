pub mod core;

use tracing_subscriber::EnvFilter;

pub use crate::core::error::{ErrorKind, MetaError, MetaResult};
pub use crate::core::extract::{
    extract, ExtractionWarning, NeoForgeVersionExtractor, NeoForgeVersionMetadata,
};
pub use crate::core::startup::{ArgFileParser, MainClassPatterns, StartupArguments};

/// Initialize structured logging on stderr, so stdout stays free for output.
///
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,neoforge_meta=debug")),
        )
        .init();
}
