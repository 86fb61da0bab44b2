use std::fs;
use std::io;
use std::path::Path;

use super::FileStore;
use crate::core::TextEncoding;

/// [`FileStore`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileStore;

impl FileStore for LocalFileStore {
    fn read_to_string(&self, path: &Path, encoding: TextEncoding) -> io::Result<String> {
        let bytes = fs::read(path)?;
        encoding
            .decode(&bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        fs::write(path, bytes)
    }
}
