use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::error::{MetaError, MetaResult};

/// Represents a fully parsed Maven coordinate.
///
/// Supported formats:
///   `groupId:artifactId:version`
///   `groupId:artifactId:version:classifier`
///   `groupId:artifactId:version:classifier@extension`
///   `groupId:artifactId:version@extension`
///
/// The `Display` form always carries the extension and is the canonical id
/// used to deduplicate libraries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct MavenArtifact {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub classifier: Option<String>,
    /// File extension. Defaults to `"jar"`.
    pub extension: String,
}

impl MavenArtifact {
    /// Parse a Maven coordinate string.
    ///
    /// # Examples
    /// ```
    /// use neoforge_meta::core::maven::MavenArtifact;
    ///
    /// let a = MavenArtifact::parse("net.sf.jopt-simple:jopt-simple:5.0.4").unwrap();
    /// assert_eq!(a.group_id, "net.sf.jopt-simple");
    /// assert_eq!(a.to_string(), "net.sf.jopt-simple:jopt-simple:5.0.4@jar");
    /// ```
    pub fn parse(coord: &str) -> MetaResult<Self> {
        // Split off @extension first
        let (coord_part, extension) = match coord.rsplit_once('@') {
            Some((head, ext)) => (head, ext),
            None => (coord, "jar"),
        };

        let parts: Vec<&str> = coord_part.split(':').collect();
        if parts.iter().any(|p| p.is_empty()) || extension.is_empty() {
            return Err(MetaError::InvalidMavenCoordinate(coord.to_string()));
        }

        let classifier = match parts.len() {
            3 => None,
            4 => Some(parts[3].to_string()),
            _ => return Err(MetaError::InvalidMavenCoordinate(coord.to_string())),
        };

        Ok(Self {
            group_id: parts[0].to_string(),
            artifact_id: parts[1].to_string(),
            version: parts[2].to_string(),
            classifier,
            extension: extension.to_string(),
        })
    }

    /// Construct the group path portion (`net/sf/jopt-simple`).
    pub fn group_path(&self) -> String {
        self.group_id.replace('.', "/")
    }

    /// Build the artifact filename.
    ///
    /// `artifactId-version[-classifier].extension`
    pub fn filename(&self) -> String {
        match &self.classifier {
            Some(c) => format!(
                "{}-{}-{}.{}",
                self.artifact_id, self.version, c, self.extension
            ),
            None => format!("{}-{}.{}", self.artifact_id, self.version, self.extension),
        }
    }

    /// Path relative to a repository root, always `/`-separated.
    ///
    /// `<group_path>/<artifact_id>/<version>/<filename>`
    pub fn repository_path(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            self.group_path(),
            self.artifact_id,
            self.version,
            self.filename()
        )
    }

    /// Construct the full URL for this artifact under the given repository base.
    pub fn url(&self, repo_base: &str) -> String {
        format!(
            "{}/{}",
            repo_base.trim_end_matches('/'),
            self.repository_path()
        )
    }

    /// Return a new artifact with the classifier replaced.
    pub fn with_classifier(&self, classifier: &str) -> Self {
        let mut clone = self.clone();
        clone.classifier = Some(classifier.to_string());
        clone
    }
}

impl fmt::Display for MavenArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.classifier {
            Some(c) => write!(
                f,
                "{}:{}:{}:{}@{}",
                self.group_id, self.artifact_id, self.version, c, self.extension
            ),
            None => write!(
                f,
                "{}:{}:{}@{}",
                self.group_id, self.artifact_id, self.version, self.extension
            ),
        }
    }
}
