pub mod argument;
pub mod install_profile;
pub mod rule;
pub mod version_file;

pub use argument::{Argument, PlatformSet};
pub use install_profile::{InstallerProfile, Processor, Side};
pub use rule::{rules_allow, OsCondition, OsType, Rule, RuleAction};
pub use version_file::{
    Arguments, LibraryDownload, LibraryDownloads, LibraryEntry, VersionManifest,
};
