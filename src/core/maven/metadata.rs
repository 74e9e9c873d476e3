use quick_xml::de::from_str;
use serde::Deserialize;

use crate::core::error::MetaResult;

/// Minimal `maven-metadata.xml` model – only the version listing.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MavenMetadata {
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub artifact_id: Option<String>,
    #[serde(default)]
    pub versioning: Option<MavenVersioning>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MavenVersioning {
    #[serde(default)]
    pub latest: Option<String>,
    #[serde(default)]
    pub release: Option<String>,
    #[serde(default)]
    pub versions: Option<MavenVersions>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct MavenVersions {
    #[serde(default, rename = "version")]
    pub items: Vec<String>,
}

impl MavenMetadata {
    pub fn parse(xml: &str) -> MetaResult<Self> {
        Ok(from_str(xml)?)
    }

    /// All published versions in document order (oldest first on Maven).
    pub fn versions(&self) -> &[String] {
        self.versioning
            .as_ref()
            .and_then(|v| v.versions.as_ref())
            .map(|v| v.items.as_slice())
            .unwrap_or_default()
    }
}
