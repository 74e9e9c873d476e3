// ─── NeoForge Launch Metadata Core ───
// Extracts launcher and server startup metadata from NeoForge installer jars.
//
// Architecture:
//   core/
//     archive      In-memory installer jar, entry lookup by name
//     version/     Version manifest, installer profile, arguments + OS rules
//     maven/       Coordinates and maven-metadata.xml
//     library/     Referenced libraries, deduplicated with usage flags
//     startup/     Server arg-file parsing and cross-platform reconciliation
//     extract/     Orchestration into NeoForgeVersionMetadata
//     fetch        Installer downloads from the NeoForge maven

pub mod archive;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod http;
pub mod library;
pub mod maven;
pub mod startup;
pub mod version;
