//! Cartridge images and the game identifiers derived from them.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::{EnvError, Result};

/// A cartridge image plus the identifier the adapter registry resolves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rom {
    identifier: String,
    path: Option<PathBuf>,
    image: Vec<u8>,
}

impl Rom {
    /// Read a ROM file. The identifier is the lower-cased file stem,
    /// so `roms/Krull.bin` resolves as `krull`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(EnvError::RomNotFound {
                path: path.to_path_buf(),
            });
        }

        let image = fs::read(path).map_err(|e| EnvError::RomUnreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        if image.is_empty() {
            return Err(EnvError::RomUnreadable {
                path: path.to_path_buf(),
                reason: "empty image".to_string(),
            });
        }

        let identifier = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| EnvError::RomUnreadable {
                path: path.to_path_buf(),
                reason: "file name is not valid UTF-8".to_string(),
            })?;

        debug!(rom = %identifier, bytes = image.len(), "read ROM image");

        Ok(Self {
            identifier,
            path: Some(path.to_path_buf()),
            image,
        })
    }

    /// Wrap an in-memory image under an explicit identifier.
    pub fn from_bytes(identifier: impl Into<String>, image: Vec<u8>) -> Self {
        Self {
            identifier: identifier.into().to_ascii_lowercase(),
            path: None,
            image,
        }
    }

    /// Identifier used for adapter lookup.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// File the image came from, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Raw cartridge bytes.
    #[must_use]
    pub fn image(&self) -> &[u8] {
        &self.image
    }
}
