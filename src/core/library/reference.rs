use serde::Serialize;

use crate::core::error::{MetaError, MetaResult};
use crate::core::maven::MavenArtifact;
use crate::core::version::{LibraryDownload, LibraryEntry};

/// How a library is used by a NeoForge version. Flags are independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryUsage {
    /// On the client startup classpath.
    pub client_classpath: bool,
    /// On the client module path.
    pub client_module_path: bool,
    /// Used by an installer processor for the client.
    pub client_installer: bool,
    /// Used by an installer processor for the server.
    pub server_installer: bool,
}

impl LibraryUsage {
    pub fn merge(&mut self, other: LibraryUsage) {
        self.client_classpath |= other.client_classpath;
        self.client_module_path |= other.client_module_path;
        self.client_installer |= other.client_installer;
        self.server_installer |= other.server_installer;
    }
}

/// One downloadable library artifact referenced by a version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferencedLibrary {
    #[serde(flatten)]
    pub artifact: MavenArtifact,
    pub sha1_checksum: Option<String>,
    pub size: Option<u64>,
    pub url: Option<String>,
    #[serde(flatten)]
    pub usage: LibraryUsage,
}

impl ReferencedLibrary {
    /// A reference with no download information, parsed from a coordinate.
    pub fn from_coordinate(coord: &str) -> MetaResult<Self> {
        Ok(Self {
            artifact: MavenArtifact::parse(coord)?,
            sha1_checksum: None,
            size: None,
            url: None,
            usage: LibraryUsage::default(),
        })
    }

    /// Canonical id, `group:artifact:version[:classifier]@extension`.
    pub fn id(&self) -> String {
        self.artifact.to_string()
    }

    pub fn repository_path(&self) -> String {
        self.artifact.repository_path()
    }

    /// One reference per download declared by `entry`: the primary artifact
    /// first, then every classifier download.
    ///
    /// Fails if a declared download path is not the standard Maven layout of
    /// the reference it describes.
    pub fn expand(entry: &LibraryEntry) -> MetaResult<Vec<Self>> {
        let base = MavenArtifact::parse(&entry.name)?;
        let Some(downloads) = &entry.downloads else {
            return Ok(Vec::new());
        };

        let primary = downloads
            .artifact
            .as_ref()
            .map(|download| (base.clone(), download));
        let classified = downloads
            .classifiers
            .iter()
            .map(|(classifier, download)| (base.with_classifier(classifier), download));

        primary
            .into_iter()
            .chain(classified)
            .map(|(artifact, download)| Self::with_download(artifact, download))
            .collect()
    }

    fn with_download(artifact: MavenArtifact, download: &LibraryDownload) -> MetaResult<Self> {
        let expected = artifact.repository_path();
        if download.path != expected {
            return Err(MetaError::NonStandardLibraryPath {
                declared: download.path.clone(),
                expected,
            });
        }

        Ok(Self {
            artifact,
            sha1_checksum: download.sha1.clone(),
            size: download.size,
            url: download.url.clone(),
            usage: LibraryUsage::default(),
        })
    }
}
