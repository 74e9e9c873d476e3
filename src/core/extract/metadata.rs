use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::library::ReferencedLibrary;
use crate::core::startup::StartupArguments;

/// Everything extracted from one installer archive.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NeoForgeVersionMetadata {
    pub release_time: DateTime<Utc>,
    pub minecraft_version: Option<String>,
    /// Id of the launcher profile (the version manifest's `id`).
    pub launcher_profile_id: String,
    /// Version manifest text, verbatim.
    pub launcher_profile: String,
    /// Installer profile text, verbatim.
    pub installer_profile: String,
    pub libraries: Vec<ReferencedLibrary>,
    pub client_startup: StartupArguments,
    pub server_startup: StartupArguments,
    pub warnings: Vec<ExtractionWarning>,
}

/// Something odd about the archive that did not prevent extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionWarning {
    /// Library id or entry name the warning is about.
    pub subject: String,
    pub message: String,
}

impl ExtractionWarning {
    pub fn new(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
        }
    }
}
