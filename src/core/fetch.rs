// ─── NeoForge Maven Access ───
// Installer downloads and the published version list.

use reqwest::Client;
use sha1::{Digest, Sha1};
use tracing::{debug, info};

use crate::core::error::{MetaError, MetaResult};
use crate::core::maven::{MavenArtifact, MavenMetadata, NEOFORGE_MAVEN};

const NEOFORGE_GROUP: &str = "net.neoforged";
const NEOFORGE_ARTIFACT: &str = "neoforge";

/// Coordinate of the installer jar of a NeoForge `version`.
pub fn installer_artifact(version: &str) -> MavenArtifact {
    MavenArtifact {
        group_id: NEOFORGE_GROUP.to_string(),
        artifact_id: NEOFORGE_ARTIFACT.to_string(),
        version: version.to_string(),
        classifier: Some("installer".to_string()),
        extension: "jar".to_string(),
    }
}

pub fn installer_url(version: &str) -> String {
    installer_artifact(version).url(NEOFORGE_MAVEN)
}

fn versions_url() -> String {
    format!(
        "{}/{}/{}/maven-metadata.xml",
        NEOFORGE_MAVEN,
        NEOFORGE_GROUP.replace('.', "/"),
        NEOFORGE_ARTIFACT
    )
}

/// Download the installer of `version`, checked against the `.sha1` file
/// published next to it.
pub async fn fetch_installer(client: &Client, version: &str) -> MetaResult<Vec<u8>> {
    let url = installer_url(version);
    info!("Downloading installer {}", url);

    let bytes = get_bytes(client, &url).await?;
    let checksum = String::from_utf8_lossy(&get_bytes(client, &format!("{url}.sha1")).await?)
        .trim()
        .to_string();
    verify_sha1(&bytes, &checksum, &url)?;

    debug!("Installer {} verified ({} bytes)", version, bytes.len());
    Ok(bytes)
}

/// All NeoForge versions on the maven, oldest first.
pub async fn fetch_versions(client: &Client) -> MetaResult<Vec<String>> {
    let url = versions_url();
    debug!("Fetching version list {}", url);

    let xml = client.get(&url).send().await?.error_for_status()?.text().await?;
    let metadata = MavenMetadata::parse(&xml)?;
    Ok(metadata.versions().to_vec())
}

async fn get_bytes(client: &Client, url: &str) -> MetaResult<Vec<u8>> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(MetaError::DownloadFailed {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response.bytes().await?.to_vec())
}

/// Compare the SHA-1 of `bytes` with a hex digest, ignoring case.
pub fn verify_sha1(bytes: &[u8], expected: &str, url: &str) -> MetaResult<()> {
    let mut hasher = Sha1::new();
    hasher.update(bytes);
    let actual = hex::encode(hasher.finalize());

    if !actual.eq_ignore_ascii_case(expected) {
        return Err(MetaError::Sha1Mismatch {
            url: url.to_string(),
            expected: expected.to_string(),
            actual,
        });
    }
    Ok(())
}
