// ─── NeoForge Version Extractor ───
// Turns one installer archive into launch metadata.

use tracing::{debug, info, warn};

use super::metadata::{ExtractionWarning, NeoForgeVersionMetadata};
use crate::core::archive::InstallerArchive;
use crate::core::error::{MetaError, MetaResult};
use crate::core::library::{LibraryRegistry, ReferencedLibrary};
use crate::core::startup::{consolidate, ArgFileParser, StartupArguments};
use crate::core::version::{InstallerProfile, LibraryEntry, OsType, Side, VersionManifest};

pub const INSTALL_PROFILE_ENTRY: &str = "install_profile.json";
pub const UNIX_ARGS_ENTRY: &str = "data/unix_args.txt";
pub const WINDOWS_ARGS_ENTRY: &str = "data/win_args.txt";

/// Extracts [`NeoForgeVersionMetadata`] from installer jars.
///
/// Stateless; one extractor can serve any number of archives, from any
/// number of threads.
#[derive(Debug, Clone, Default)]
pub struct NeoForgeVersionExtractor {
    arg_file_parser: ArgFileParser,
}

/// Raw documents pulled from the archive.
struct InstallerDocuments {
    installer_profile_text: String,
    installer_profile: InstallerProfile,
    version_manifest_text: String,
    version_manifest: VersionManifest,
    unix_args: String,
    windows_args: String,
}

impl NeoForgeVersionExtractor {
    pub fn new(arg_file_parser: ArgFileParser) -> Self {
        Self { arg_file_parser }
    }

    /// Extract everything from the installer jar in `installer`.
    ///
    /// Any failure aborts the whole extraction.
    pub fn extract(&self, installer: &[u8]) -> MetaResult<NeoForgeVersionMetadata> {
        let docs = read_documents(installer)?;
        let manifest = &docs.version_manifest;
        let profile = &docs.installer_profile;
        info!(
            "Extracting {} (installer for {}, Minecraft {})",
            manifest.id,
            profile.version.as_deref().unwrap_or("unknown"),
            profile.minecraft.as_deref().unwrap_or("unknown")
        );

        let mut warnings = Vec::new();
        check_profile_consistency(profile, manifest, &mut warnings);

        let client_startup = StartupArguments {
            jvm_args: manifest.arguments.jvm.clone(),
            program_args: manifest.arguments.game.clone(),
            main_class: manifest.main_class.clone(),
        };
        let server_startup = consolidate(
            self.arg_file_parser
                .parse(&docs.unix_args, OsType::Linux.classpath_separator())?,
            self.arg_file_parser
                .parse(&docs.windows_args, OsType::Windows.classpath_separator())?,
        )?;
        debug!(
            "Server startup: {} JVM / {} program arguments, main class {}",
            server_startup.jvm_args.len(),
            server_startup.program_args.len(),
            server_startup.main_class
        );

        let mut registry = LibraryRegistry::new();
        registry.add_classpath_libraries(expand_all(&manifest.libraries, &mut warnings)?)?;
        // Minecraft used the module path before 1.21.10
        registry.mark_module_path(&manifest.jvm_tokens())?;
        registry.merge_installer_libraries(
            expand_all(&profile.libraries, &mut warnings)?,
            &profile.processor_library_ids(Side::Client)?,
            &profile.processor_library_ids(Side::Server)?,
        )?;

        info!(
            "Extracted {} with {} libraries and {} warnings",
            manifest.id,
            registry.len(),
            warnings.len()
        );

        Ok(NeoForgeVersionMetadata {
            release_time: manifest.release_time,
            minecraft_version: profile.minecraft.clone(),
            launcher_profile_id: manifest.id.clone(),
            libraries: registry.into_libraries(),
            client_startup,
            server_startup,
            warnings,
            launcher_profile: docs.version_manifest_text,
            installer_profile: docs.installer_profile_text,
        })
    }
}

/// Extract with the default main-class heuristics.
pub fn extract(installer: &[u8]) -> MetaResult<NeoForgeVersionMetadata> {
    NeoForgeVersionExtractor::default().extract(installer)
}

fn read_documents(installer: &[u8]) -> MetaResult<InstallerDocuments> {
    let mut archive = InstallerArchive::new(installer)?;

    let installer_profile_text = archive.read_required(INSTALL_PROFILE_ENTRY)?;
    let installer_profile = InstallerProfile::parse(&installer_profile_text)?;
    let manifest_entry = installer_profile.json.clone().ok_or_else(|| {
        MetaError::MissingRequiredEntry(format!("{INSTALL_PROFILE_ENTRY}#json"))
    })?;

    let version_manifest_text = archive.read_required(&manifest_entry)?;
    let version_manifest = VersionManifest::parse(&version_manifest_text)?;

    Ok(InstallerDocuments {
        installer_profile_text,
        installer_profile,
        version_manifest_text,
        version_manifest,
        unix_args: archive.read_required(UNIX_ARGS_ENTRY)?,
        windows_args: archive.read_required(WINDOWS_ARGS_ENTRY)?,
    })
}

fn expand_all(
    entries: &[LibraryEntry],
    warnings: &mut Vec<ExtractionWarning>,
) -> MetaResult<Vec<ReferencedLibrary>> {
    let mut libraries = Vec::new();
    for entry in entries {
        let expanded = ReferencedLibrary::expand(entry)?;
        if expanded.is_empty() {
            warn!("Library {} declares no downloads", entry.name);
            warnings.push(ExtractionWarning::new(
                &entry.name,
                "library declares no downloads and was not recorded",
            ));
        }
        libraries.extend(expanded);
    }
    Ok(libraries)
}

fn check_profile_consistency(
    profile: &InstallerProfile,
    manifest: &VersionManifest,
    warnings: &mut Vec<ExtractionWarning>,
) {
    match (&profile.minecraft, &manifest.inherits_from) {
        (None, _) => {
            warn!("Installer profile of {} names no Minecraft version", manifest.id);
            warnings.push(ExtractionWarning::new(
                INSTALL_PROFILE_ENTRY,
                "installer profile names no Minecraft version",
            ));
        }
        (Some(minecraft), Some(parent)) if minecraft != parent => {
            warn!(
                "{} inherits from {} but targets Minecraft {}",
                manifest.id, parent, minecraft
            );
            warnings.push(ExtractionWarning::new(
                &manifest.id,
                format!("version manifest inherits from {parent} but installer targets {minecraft}"),
            ));
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::archive::tests::zip_bytes;
    use crate::core::error::ErrorKind;
    use crate::core::version::Argument;
    use pretty_assertions::assert_eq;

    const BOOTSTRAP_SHA1: &str = "2bd6ea6dfcbb5ba34f3fad8a3b4d3d2e1a3c4a5b";
    const SJH_SHA1: &str = "8b5d5a8f5ec13b0a2c4d3e5f6a7b8c9d0e1f2a3b";
    const LOADER_SHA1: &str = "0c1d2e3f4a5b6c7d8e9f0a1b2c3d4e5f6a7b8c9d";
    const UNIVERSAL_SHA1: &str = "f1e2d3c4b5a6978877665544332211ffeeddccbb";
    const INSTALLERTOOLS_SHA1: &str = "aa11bb22cc33dd44ee55ff6677889900aabbccdd";
    const BINARYPATCHER_SHA1: &str = "1234567890abcdef1234567890abcdef12345678";

    const UNIX_ARGS: &str = "\
-p libraries/cpw/mods/bootstraplauncher/1.1.2/bootstraplauncher-1.1.2.jar:libraries/cpw/mods/securejarhandler/2.1.24/securejarhandler-2.1.24.jar
--add-modules ALL-MODULE-PATH
--add-opens java.base/java.util.jar=cpw.mods.securejarhandler
-DlibraryDirectory=libraries
-DlegacyClassPath=libraries/net/neoforged/fancymodloader/loader/2.0.17/loader-2.0.17.jar:libraries/net/neoforged/neoforge/20.4.237/neoforge-20.4.237-universal.jar
cpw.mods.bootstraplauncher.BootstrapLauncher
--launchTarget forgeserver
--fml.neoForgeVersion 20.4.237
";

    const WINDOWS_ARGS: &str = "\
-p libraries/cpw/mods/bootstraplauncher/1.1.2/bootstraplauncher-1.1.2.jar;libraries/cpw/mods/securejarhandler/2.1.24/securejarhandler-2.1.24.jar\r
--add-modules ALL-MODULE-PATH\r
--add-opens java.base/java.util.jar=cpw.mods.securejarhandler\r
-DlibraryDirectory=libraries\r
-DlegacyClassPath=libraries/net/neoforged/fancymodloader/loader/2.0.17/loader-2.0.17.jar;libraries/net/neoforged/neoforge/20.4.237/neoforge-20.4.237-universal.jar\r
cpw.mods.bootstraplauncher.BootstrapLauncher\r
--launchTarget forgeserver\r
--fml.neoForgeVersion 20.4.237\r
";

    fn library(name: &str, path: &str, sha1: &str) -> serde_json::Value {
        serde_json::json!({
            "name": name,
            "downloads": {
                "artifact": {
                    "sha1": sha1,
                    "size": 1024,
                    "url": format!("https://maven.neoforged.net/releases/{path}"),
                    "path": path
                }
            }
        })
    }

    fn version_manifest(libraries: Vec<serde_json::Value>) -> serde_json::Value {
        serde_json::json!({
            "id": "neoforge-20.4.237",
            "time": "2024-06-13T10:22:11+00:00",
            "releaseTime": "2024-06-13T10:22:11+00:00",
            "inheritsFrom": "1.20.4",
            "type": "release",
            "mainClass": "cpw.mods.bootstraplauncher.BootstrapLauncher",
            "arguments": {
                "game": ["--launchTarget", "forgeclient", "--fml.neoForgeVersion", "20.4.237"],
                "jvm": [
                    "-p",
                    "${library_directory}/cpw/mods/bootstraplauncher/1.1.2/bootstraplauncher-1.1.2.jar${classpath_separator}${library_directory}/cpw/mods/securejarhandler/2.1.24/securejarhandler-2.1.24.jar",
                    "--add-modules",
                    "ALL-MODULE-PATH",
                    {"rules": [{"action": "allow", "os": {"name": "osx"}}], "value": "-XstartOnFirstThread"},
                    "-DlibraryDirectory=${library_directory}"
                ]
            },
            "libraries": libraries
        })
    }

    fn manifest_libraries() -> Vec<serde_json::Value> {
        vec![
            library(
                "cpw.mods:bootstraplauncher:1.1.2",
                "cpw/mods/bootstraplauncher/1.1.2/bootstraplauncher-1.1.2.jar",
                BOOTSTRAP_SHA1,
            ),
            library(
                "cpw.mods:securejarhandler:2.1.24",
                "cpw/mods/securejarhandler/2.1.24/securejarhandler-2.1.24.jar",
                SJH_SHA1,
            ),
            library(
                "net.neoforged.fancymodloader:loader:2.0.17",
                "net/neoforged/fancymodloader/loader/2.0.17/loader-2.0.17.jar",
                LOADER_SHA1,
            ),
            library(
                "net.neoforged:neoforge:20.4.237:universal",
                "net/neoforged/neoforge/20.4.237/neoforge-20.4.237-universal.jar",
                UNIVERSAL_SHA1,
            ),
        ]
    }

    fn installer_profile(universal_sha1: &str) -> serde_json::Value {
        serde_json::json!({
            "spec": 1,
            "profile": "NeoForge",
            "version": "neoforge-20.4.237",
            "minecraft": "1.20.4",
            "json": "/version.json",
            "path": null,
            "libraries": [
                library(
                    "net.neoforged:neoforge:20.4.237:universal",
                    "net/neoforged/neoforge/20.4.237/neoforge-20.4.237-universal.jar",
                    universal_sha1,
                ),
                library(
                    "net.neoforged.installertools:installertools:2.1.2",
                    "net/neoforged/installertools/installertools/2.1.2/installertools-2.1.2.jar",
                    INSTALLERTOOLS_SHA1,
                ),
                library(
                    "net.neoforged.installertools:binarypatcher:2.1.2",
                    "net/neoforged/installertools/binarypatcher/2.1.2/binarypatcher-2.1.2.jar",
                    BINARYPATCHER_SHA1,
                ),
                {"name": "net.neoforged:neoforge:20.4.237:server@lzma"}
            ],
            "processors": [
                {
                    "sides": ["server"],
                    "jar": "net.neoforged.installertools:installertools:2.1.2",
                    "classpath": [],
                    "args": ["--task", "EXTRACT_FILES"]
                },
                {
                    "sides": ["client"],
                    "jar": "net.neoforged.installertools:binarypatcher:2.1.2",
                    "classpath": ["net.neoforged:neoforge:20.4.237:universal"],
                    "args": ["--clean", "{MC_SRG}"]
                }
            ]
        })
    }

    fn installer(
        profile: &serde_json::Value,
        manifest: &serde_json::Value,
        with_windows_args: bool,
    ) -> Vec<u8> {
        let profile = profile.to_string();
        let manifest = manifest.to_string();
        let mut entries: Vec<(&str, &[u8])> = vec![
            ("install_profile.json", profile.as_bytes()),
            ("version.json", manifest.as_bytes()),
            ("data/unix_args.txt", UNIX_ARGS.as_bytes()),
        ];
        if with_windows_args {
            entries.push(("data/win_args.txt", WINDOWS_ARGS.as_bytes()));
        }
        zip_bytes(&entries)
    }

    fn default_installer() -> Vec<u8> {
        installer(
            &installer_profile(UNIVERSAL_SHA1),
            &version_manifest(manifest_libraries()),
            true,
        )
    }

    #[test]
    fn extracts_complete_metadata() {
        let metadata = extract(&default_installer()).unwrap();

        assert_eq!(metadata.launcher_profile_id, "neoforge-20.4.237");
        assert_eq!(metadata.minecraft_version.as_deref(), Some("1.20.4"));
        assert_eq!(metadata.release_time.to_rfc3339(), "2024-06-13T10:22:11+00:00");
        assert!(metadata.installer_profile.contains("\"json\":\"/version.json\""));
        assert!(metadata.launcher_profile.contains("neoforge-20.4.237"));

        let ids: Vec<String> = metadata.libraries.iter().map(|l| l.id()).collect();
        assert_eq!(
            ids,
            [
                "cpw.mods:bootstraplauncher:1.1.2@jar",
                "cpw.mods:securejarhandler:2.1.24@jar",
                "net.neoforged.fancymodloader:loader:2.0.17@jar",
                "net.neoforged:neoforge:20.4.237:universal@jar",
                "net.neoforged.installertools:installertools:2.1.2@jar",
                "net.neoforged.installertools:binarypatcher:2.1.2@jar",
            ]
        );

        let usage = |idx: usize| metadata.libraries[idx].usage;
        assert!(usage(0).client_classpath && usage(0).client_module_path);
        assert!(usage(1).client_module_path);
        assert!(usage(2).client_classpath && !usage(2).client_module_path);
        // Declared by both documents: one row, flags merged.
        assert!(usage(3).client_classpath && usage(3).client_installer && !usage(3).server_installer);
        assert!(usage(4).server_installer && !usage(4).client_installer && !usage(4).client_classpath);
        assert!(usage(5).client_installer && !usage(5).server_installer);

        assert_eq!(
            metadata.warnings,
            vec![ExtractionWarning::new(
                "net.neoforged:neoforge:20.4.237:server@lzma",
                "library declares no downloads and was not recorded"
            )]
        );
    }

    #[test]
    fn client_arguments_pass_through() {
        let metadata = extract(&default_installer()).unwrap();
        let client = &metadata.client_startup;

        assert_eq!(client.main_class, "cpw.mods.bootstraplauncher.BootstrapLauncher");
        assert_eq!(client.program_args.len(), 4);
        assert_eq!(client.jvm_args.len(), 6);
        assert!(matches!(client.jvm_args[4], Argument::Conditional { .. }));
    }

    #[test]
    fn identical_server_arg_files_reconcile_unconditionally() {
        let metadata = extract(&default_installer()).unwrap();
        let server = &metadata.server_startup;

        assert_eq!(server.main_class, "cpw.mods.bootstraplauncher.BootstrapLauncher");
        assert_eq!(
            server.jvm_args,
            [
                "-p",
                "${library_directory}/cpw/mods/bootstraplauncher/1.1.2/bootstraplauncher-1.1.2.jar${classpath_separator}${library_directory}/cpw/mods/securejarhandler/2.1.24/securejarhandler-2.1.24.jar",
                "--add-modules",
                "ALL-MODULE-PATH",
                "--add-opens",
                "java.base/java.util.jar=cpw.mods.securejarhandler",
                "-DlibraryDirectory=${library_directory}",
                "-DlegacyClassPath=${library_directory}/net/neoforged/fancymodloader/loader/2.0.17/loader-2.0.17.jar${classpath_separator}${library_directory}/net/neoforged/neoforge/20.4.237/neoforge-20.4.237-universal.jar",
            ]
            .map(Argument::common)
        );
        assert_eq!(
            server.program_args,
            ["--launchTarget forgeserver", "--fml.neoForgeVersion 20.4.237"].map(Argument::common)
        );

        let windows = server.resolve(OsType::Windows, "libraries");
        assert!(windows.jvm_args[1].contains("bootstraplauncher-1.1.2.jar;libraries/cpw"));
    }

    #[test]
    fn missing_windows_args_is_fatal() {
        let bytes = installer(
            &installer_profile(UNIVERSAL_SHA1),
            &version_manifest(manifest_libraries()),
            false,
        );

        match extract(&bytes) {
            Err(MetaError::MissingRequiredEntry(entry)) => assert_eq!(entry, "data/win_args.txt"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn profile_without_manifest_key_is_fatal() {
        let mut profile = installer_profile(UNIVERSAL_SHA1);
        profile.as_object_mut().unwrap().remove("json");
        let bytes = installer(&profile, &version_manifest(manifest_libraries()), true);

        let err = extract(&bytes).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredEntry);
    }

    #[test]
    fn conflicting_checksums_are_fatal() {
        let bytes = installer(
            &installer_profile("0000000000000000000000000000000000000000"),
            &version_manifest(manifest_libraries()),
            true,
        );

        match extract(&bytes) {
            Err(MetaError::LibraryChecksumMismatch { id, .. }) => {
                assert_eq!(id, "net.neoforged:neoforge:20.4.237:universal@jar")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn module_path_entry_missing_from_libraries_is_fatal() {
        let mut libraries = manifest_libraries();
        libraries.remove(1);
        let bytes = installer(
            &installer_profile(UNIVERSAL_SHA1),
            &version_manifest(libraries),
            true,
        );

        match extract(&bytes) {
            Err(MetaError::UnresolvedModulePath(path)) => assert_eq!(
                path,
                "cpw/mods/securejarhandler/2.1.24/securejarhandler-2.1.24.jar"
            ),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn inconsistent_target_version_is_a_warning() {
        let mut manifest = version_manifest(manifest_libraries());
        manifest["inheritsFrom"] = serde_json::json!("1.20.3");
        let metadata = extract(&installer(&installer_profile(UNIVERSAL_SHA1), &manifest, true)).unwrap();

        assert!(metadata
            .warnings
            .iter()
            .any(|w| w.subject == "neoforge-20.4.237" && w.message.contains("1.20.3")));
    }
}
