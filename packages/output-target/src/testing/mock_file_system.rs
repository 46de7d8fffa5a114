use std::collections::{BTreeMap, HashSet};
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::file_system::{AbsoluteFsPath, FileSystem, ReadonlyFileSystem};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// An in-memory file system recording every attempted write.
#[derive(Clone, Debug, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<BTreeMap<String, String>>>,
    write_log: Arc<Mutex<Vec<String>>>,
    failing_paths: Arc<Mutex<HashSet<String>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let fs = Self::new();
        for (path, content) in files {
            fs.add_file(path, content);
        }
        fs
    }

    /// Seed a file without recording a write.
    pub fn add_file(&self, path: &str, content: &str) {
        lock(&self.files).insert(AbsoluteFsPath::new(path).into_string(), content.to_string());
    }

    /// Make every write to `path` fail.
    pub fn fail_writes_to(&self, path: &str) {
        lock(&self.failing_paths).insert(AbsoluteFsPath::new(path).into_string());
    }

    /// Paths of every attempted write, failed ones included, in call order.
    pub fn written_paths(&self) -> Vec<String> {
        lock(&self.write_log).clone()
    }

    pub fn write_count(&self) -> usize {
        lock(&self.write_log).len()
    }

    pub fn file(&self, path: &str) -> Option<String> {
        lock(&self.files).get(AbsoluteFsPath::new(path).as_str()).cloned()
    }

    pub fn has_file(&self, path: &str) -> bool {
        self.file(path).is_some()
    }

    pub fn files(&self) -> BTreeMap<String, String> {
        lock(&self.files).clone()
    }
}

impl ReadonlyFileSystem for MockFileSystem {
    fn exists(&self, path: &AbsoluteFsPath) -> bool {
        lock(&self.files).contains_key(path.as_str())
    }

    fn read_file(&self, path: &AbsoluteFsPath) -> io::Result<String> {
        lock(&self.files).get(path.as_str()).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{} does not exist", path))
        })
    }
}

impl FileSystem for MockFileSystem {
    fn write_file(&self, path: &AbsoluteFsPath, data: &[u8]) -> io::Result<()> {
        lock(&self.write_log).push(path.as_str().to_string());
        if lock(&self.failing_paths).contains(path.as_str()) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is not writable", path),
            ));
        }
        lock(&self.files).insert(path.as_str().to_string(), String::from_utf8_lossy(data).to_string());
        Ok(())
    }

    fn ensure_dir(&self, _path: &AbsoluteFsPath) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_log_failed_writes() {
        let fs = MockFileSystem::new();
        fs.fail_writes_to("/out/a.ts");

        assert!(fs.write_file(&AbsoluteFsPath::new("/out/a.ts"), b"a").is_err());
        fs.write_file(&AbsoluteFsPath::new("/out/b.ts"), b"b").unwrap();

        assert_eq!(fs.written_paths(), vec!["/out/a.ts", "/out/b.ts"]);
        assert!(!fs.has_file("/out/a.ts"));
        assert_eq!(fs.file("/out/b.ts").as_deref(), Some("b"));
    }

    #[test]
    fn should_report_missing_files_as_not_found() {
        let fs = MockFileSystem::new();
        let err = fs.read_file(&AbsoluteFsPath::new("/missing.json")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
