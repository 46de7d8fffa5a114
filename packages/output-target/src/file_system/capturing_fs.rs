use std::collections::BTreeMap;
use std::io;
use std::sync::{Arc, Mutex};

use super::types::{AbsoluteFsPath, FileSystem, ReadonlyFileSystem};

/// Keeps every write in memory instead of passing it to `delegate`.
///
/// Reads see captured files first and fall back to the delegate.
pub struct CapturingFileSystem<T: FileSystem> {
    delegate: T,
    pub files: Arc<Mutex<BTreeMap<String, String>>>,
}

impl<T: FileSystem> CapturingFileSystem<T> {
    pub fn new(delegate: T) -> Self {
        Self {
            delegate,
            files: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    /// Captured files, sorted by path.
    pub fn captured(&self) -> BTreeMap<String, String> {
        self.files.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }
}

impl<T: FileSystem> ReadonlyFileSystem for CapturingFileSystem<T> {
    fn exists(&self, path: &AbsoluteFsPath) -> bool {
        let captured = self
            .files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains_key(path.as_str());
        captured || self.delegate.exists(path)
    }

    fn read_file(&self, path: &AbsoluteFsPath) -> io::Result<String> {
        let captured = self
            .files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(path.as_str())
            .cloned();
        match captured {
            Some(content) => Ok(content),
            None => self.delegate.read_file(path),
        }
    }
}

impl<T: FileSystem> FileSystem for CapturingFileSystem<T> {
    fn write_file(&self, path: &AbsoluteFsPath, data: &[u8]) -> io::Result<()> {
        let content = String::from_utf8_lossy(data).to_string();
        self.files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(path.as_str().to_string(), content);
        Ok(())
    }

    fn ensure_dir(&self, _path: &AbsoluteFsPath) -> io::Result<()> {
        Ok(())
    }
}
