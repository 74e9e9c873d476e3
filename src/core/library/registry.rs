use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::reference::{LibraryUsage, ReferencedLibrary};
use crate::core::error::{MetaError, MetaResult};
use crate::core::startup::{CLASSPATH_SEPARATOR, LIBRARY_DIRECTORY};

/// Deduplicated set of libraries referenced by one version, keyed by
/// canonical id and kept in first-seen order.
///
/// Every discovery path goes through [`LibraryRegistry::resolve_or_verify`],
/// so the "same id, same checksum" invariant is checked in one place.
#[derive(Debug, Default)]
pub struct LibraryRegistry {
    libraries: Vec<ReferencedLibrary>,
    by_id: HashMap<String, usize>,
    by_path: HashMap<String, usize>,
}

impl LibraryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `library`, or verify it against the instance already known
    /// under the same id and fold its usage flags into that instance.
    pub fn resolve_or_verify(
        &mut self,
        library: ReferencedLibrary,
    ) -> MetaResult<&mut ReferencedLibrary> {
        let id = library.id();
        let idx = match self.by_id.get(&id) {
            Some(&idx) => {
                let existing = &mut self.libraries[idx];
                if existing.sha1_checksum != library.sha1_checksum {
                    return Err(MetaError::LibraryChecksumMismatch {
                        id,
                        first: existing.sha1_checksum.clone(),
                        second: library.sha1_checksum,
                    });
                }
                existing.usage.merge(library.usage);
                idx
            }
            None => {
                let idx = self.libraries.len();
                self.by_path.insert(library.repository_path(), idx);
                self.by_id.insert(id, idx);
                self.libraries.push(library);
                idx
            }
        };
        Ok(&mut self.libraries[idx])
    }

    /// Register libraries found on the client classpath.
    pub fn add_classpath_libraries(
        &mut self,
        libraries: impl IntoIterator<Item = ReferencedLibrary>,
    ) -> MetaResult<()> {
        for mut library in libraries {
            library.usage.client_classpath = true;
            debug!("Client classpath library: {}", library.id());
            self.resolve_or_verify(library)?;
        }
        Ok(())
    }

    /// Flag every library named by a `-p` / `--module-path` value in `jvm_tokens`.
    ///
    /// Module path entries are `${library_directory}/<repository path>` joined
    /// by `${classpath_separator}`; an entry under the library directory that
    /// names no known library is an error. Other entries are ignored.
    pub fn mark_module_path(&mut self, jvm_tokens: &[&str]) -> MetaResult<()> {
        let prefix = format!("{LIBRARY_DIRECTORY}/");

        for pair in jvm_tokens.windows(2) {
            if pair[0] != "-p" && pair[0] != "--module-path" {
                continue;
            }

            for item in pair[1].split(CLASSPATH_SEPARATOR) {
                let Some(relative_path) = item.strip_prefix(&prefix) else {
                    continue;
                };
                let idx = *self
                    .by_path
                    .get(relative_path)
                    .ok_or_else(|| MetaError::UnresolvedModulePath(relative_path.to_string()))?;
                let library = &mut self.libraries[idx];
                debug!("Module path library: {}", library.id());
                library.usage.client_module_path = true;
            }
        }

        Ok(())
    }

    /// Register libraries declared by the installer, flagging those used by
    /// client or server processors.
    pub fn merge_installer_libraries(
        &mut self,
        libraries: impl IntoIterator<Item = ReferencedLibrary>,
        client_processor_ids: &HashSet<String>,
        server_processor_ids: &HashSet<String>,
    ) -> MetaResult<()> {
        for mut library in libraries {
            let id = library.id();
            library.usage.merge(LibraryUsage {
                client_installer: client_processor_ids.contains(&id),
                server_installer: server_processor_ids.contains(&id),
                ..LibraryUsage::default()
            });
            debug!("Installer library: {}", id);
            self.resolve_or_verify(library)?;
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&ReferencedLibrary> {
        self.by_id.get(id).map(|&idx| &self.libraries[idx])
    }

    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }

    pub fn into_libraries(self) -> Vec<ReferencedLibrary> {
        self.libraries
    }
}
