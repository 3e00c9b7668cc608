use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Raw access to the ledger file. Each call opens, reads or writes, and closes
/// the file; nothing is held between calls and there is no locking.
#[derive(Debug, Clone)]
pub struct Repository {
    path: PathBuf,
}

impl Repository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole file. A missing file is `None`, not an error.
    /// Invalid UTF-8 is replaced with U+FFFD rather than rejected.
    pub fn read(&self) -> Result<Option<String>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| {
                format!("Failed to read ledger file {}", self.path.display())
            }),
        }
    }

    /// Create an empty file if none exists. Returns true when it was created.
    pub fn create_if_missing(&self) -> Result<bool> {
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(_) => Ok(true),
            Err(err) if err.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(err) => Err(err).with_context(|| {
                format!("Failed to create ledger file {}", self.path.display())
            }),
        }
    }

    /// Append bytes at the end of the file.
    pub fn append(&self, bytes: &[u8]) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open ledger file {}", self.path.display()))?;
        file.write_all(bytes)
            .with_context(|| format!("Failed to append to ledger file {}", self.path.display()))?;
        Ok(())
    }

    /// Replace the file contents.
    pub fn write(&self, bytes: &[u8]) -> Result<()> {
        fs::write(&self.path, bytes)
            .with_context(|| format!("Failed to write ledger file {}", self.path.display()))
    }
}
