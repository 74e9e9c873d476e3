// ─── Version File ───
// The launcher version manifest embedded in an installer (usually `version.json`).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::argument::Argument;
use crate::core::error::MetaResult;

/// The subset of a version manifest the extractor reads.
///
/// The raw text is kept alongside by the caller; this model only drives
/// library and argument extraction.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionManifest {
    pub id: String,
    pub release_time: DateTime<Utc>,
    pub main_class: String,
    #[serde(default)]
    pub inherits_from: Option<String>,
    #[serde(default)]
    pub arguments: Arguments,
    #[serde(default)]
    pub libraries: Vec<LibraryEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Arguments {
    #[serde(default)]
    pub game: Vec<Argument>,
    #[serde(default)]
    pub jvm: Vec<Argument>,
}

// ─── Library Entries ───
// Shared by the version manifest and the installer profile.

#[derive(Debug, Clone, Deserialize)]
pub struct LibraryEntry {
    pub name: String,
    #[serde(default)]
    pub downloads: Option<LibraryDownloads>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LibraryDownloads {
    #[serde(default)]
    pub artifact: Option<LibraryDownload>,
    #[serde(default)]
    pub classifiers: BTreeMap<String, LibraryDownload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LibraryDownload {
    pub path: String,
    #[serde(default)]
    pub sha1: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
}

impl VersionManifest {
    pub fn parse(raw: &str) -> MetaResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// JVM argument literals in order, including those of conditional entries.
    pub fn jvm_tokens(&self) -> Vec<&str> {
        self.arguments
            .jvm
            .iter()
            .flat_map(|arg| arg.values().iter().map(String::as_str))
            .collect()
    }
}
