// ─── Install Profile ───
// `install_profile.json` at the root of every installer archive.

use std::collections::HashSet;

use serde::Deserialize;

use super::version_file::LibraryEntry;
use crate::core::error::MetaResult;
use crate::core::maven::MavenArtifact;

/// Subset of the installer profile the extractor reads.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallerProfile {
    /// Version id the installer creates, e.g. `neoforge-20.4.237`.
    #[serde(default)]
    pub version: Option<String>,
    /// Target game version.
    #[serde(default)]
    pub minecraft: Option<String>,
    /// Archive entry holding the version manifest, e.g. `/version.json`.
    #[serde(default)]
    pub json: Option<String>,
    #[serde(default)]
    pub libraries: Vec<LibraryEntry>,
    #[serde(default)]
    pub processors: Vec<Processor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Client,
    Server,
}

impl Side {
    pub fn name(self) -> &'static str {
        match self {
            Side::Client => "client",
            Side::Server => "server",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Processor {
    pub jar: String,
    #[serde(default)]
    pub classpath: Vec<String>,
    /// Absent means the processor runs on every side.
    #[serde(default)]
    pub sides: Option<Vec<String>>,
}

impl Processor {
    pub fn runs_on(&self, side: Side) -> bool {
        match &self.sides {
            None => true,
            Some(sides) => sides.iter().any(|s| s == side.name()),
        }
    }
}

impl InstallerProfile {
    pub fn parse(raw: &str) -> MetaResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Canonical ids of every jar a processor of `side` puts on its classpath,
    /// the processor jar itself included.
    pub fn processor_library_ids(&self, side: Side) -> MetaResult<HashSet<String>> {
        let mut ids = HashSet::new();
        for processor in self.processors.iter().filter(|p| p.runs_on(side)) {
            for coord in std::iter::once(&processor.jar).chain(&processor.classpath) {
                ids.insert(MavenArtifact::parse(coord)?.to_string());
            }
        }
        Ok(ids)
    }
}
