use thiserror::Error;

/// Central error type for the extraction engine.
/// Every module returns `Result<T, MetaError>`.
///
/// Every failure is fatal for the extraction call that raised it; there are
/// no partial results.
#[derive(Debug, Error)]
pub enum MetaError {
    // ── Archive ─────────────────────────────────────────
    #[error("Required entry {0} is missing")]
    MissingRequiredEntry(String),

    #[error("Entry {entry} is not valid UTF-8: {source}")]
    EntryEncoding {
        entry: String,
        source: std::string::FromUtf8Error,
    },

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ── Integrity ───────────────────────────────────────
    #[error("Duplicate library {id} with different checksums: {first:?} != {second:?}")]
    LibraryChecksumMismatch {
        id: String,
        first: Option<String>,
        second: Option<String>,
    },

    #[error("Library specifies non-standard download path {declared}, expected {expected}")]
    NonStandardLibraryPath { declared: String, expected: String },

    // ── Platform ────────────────────────────────────────
    #[error("Different main class on unix vs. windows: {unix} != {windows}")]
    MainClassMismatch { unix: String, windows: String },

    #[error("Failed to find main class in command line: {tokens:?}")]
    MainClassNotFound { tokens: Vec<String> },

    #[error("Invalid main class pattern: {0}")]
    InvalidMainClassPattern(String),

    // ── References ──────────────────────────────────────
    #[error("Module path references path not in library list: {0}")]
    UnresolvedModulePath(String),

    // ── Maven ───────────────────────────────────────────
    #[error("Invalid Maven coordinate: {0}")]
    InvalidMavenCoordinate(String),

    #[error("maven-metadata.xml parse error: {0}")]
    MavenMetadata(#[from] quick_xml::DeError),

    // ── JSON ────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download failed for {url}: HTTP {status}")]
    DownloadFailed { url: String, status: u16 },

    #[error("SHA-1 mismatch for {url}: expected {expected}, got {actual}")]
    Sha1Mismatch {
        url: String,
        expected: String,
        actual: String,
    },
}

/// Coarse failure category, used by callers to decide whether the upstream
/// fetch is worth retrying or the artifact is permanently broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingRequiredEntry,
    IntegrityMismatch,
    PlatformMismatch,
    UnresolvedReference,
    /// The archive or one of its documents could not be decoded.
    Malformed,
    /// Network or transfer failure; retrying may help.
    Transport,
}

impl MetaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MetaError::MissingRequiredEntry(_) => ErrorKind::MissingRequiredEntry,
            MetaError::LibraryChecksumMismatch { .. } | MetaError::NonStandardLibraryPath { .. } => {
                ErrorKind::IntegrityMismatch
            }
            MetaError::MainClassMismatch { .. } | MetaError::MainClassNotFound { .. } => {
                ErrorKind::PlatformMismatch
            }
            MetaError::UnresolvedModulePath(_) => ErrorKind::UnresolvedReference,
            MetaError::EntryEncoding { .. }
            | MetaError::Zip(_)
            | MetaError::Io(_)
            | MetaError::InvalidMavenCoordinate(_)
            | MetaError::InvalidMainClassPattern(_)
            | MetaError::MavenMetadata(_)
            | MetaError::Json(_) => ErrorKind::Malformed,
            MetaError::Http(_) | MetaError::DownloadFailed { .. } | MetaError::Sha1Mismatch { .. } => {
                ErrorKind::Transport
            }
        }
    }
}

/// Convenience alias used throughout the crate.
pub type MetaResult<T> = Result<T, MetaError>;
