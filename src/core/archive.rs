// ─── Installer Archive ───
// Random-access view over an installer jar held in memory.

use std::io::{Cursor, Read};

use zip::result::ZipError;
use zip::ZipArchive;

use crate::core::error::{MetaError, MetaResult};

pub struct InstallerArchive<'a> {
    zip: ZipArchive<Cursor<&'a [u8]>>,
}

impl<'a> InstallerArchive<'a> {
    pub fn new(bytes: &'a [u8]) -> MetaResult<Self> {
        Ok(Self {
            zip: ZipArchive::new(Cursor::new(bytes))?,
        })
    }

    /// Read an entry as UTF-8 text, or `None` if the archive has no such entry.
    /// A leading `/` in `name` is ignored.
    pub fn read_optional(&mut self, name: &str) -> MetaResult<Option<String>> {
        let name = name.strip_prefix('/').unwrap_or(name);

        let mut file = match self.zip.by_name(name) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|source| MetaError::EntryEncoding {
                entry: name.to_string(),
                source,
            })
    }

    /// Read an entry as text, falling back to `default` if it is absent.
    pub fn read_or(&mut self, name: &str, default: &str) -> MetaResult<String> {
        Ok(self
            .read_optional(name)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// Read an entry as text; its absence is an error naming the entry.
    pub fn read_required(&mut self, name: &str) -> MetaResult<String> {
        self.read_optional(name)?.ok_or_else(|| {
            MetaError::MissingRequiredEntry(name.strip_prefix('/').unwrap_or(name).to_string())
        })
    }
}
