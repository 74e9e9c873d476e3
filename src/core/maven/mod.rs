mod artifact;
mod metadata;

pub use artifact::MavenArtifact;
pub use metadata::{MavenMetadata, MavenVersioning, MavenVersions};

/// Repository NeoForge publishes its installers to.
pub const NEOFORGE_MAVEN: &str = "https://maven.neoforged.net/releases";
