mod extractor;
mod metadata;

pub use extractor::{
    extract, NeoForgeVersionExtractor, INSTALL_PROFILE_ENTRY, UNIX_ARGS_ENTRY, WINDOWS_ARGS_ENTRY,
};
pub use metadata::{ExtractionWarning, NeoForgeVersionMetadata};
