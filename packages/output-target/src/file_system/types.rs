use std::io;
use std::path::Path;

use crate::util::{dirname, normalize_path};

/// A fully qualified path in the file system, in POSIX form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AbsoluteFsPath(String);

impl AbsoluteFsPath {
    pub fn new(path: impl Into<String>) -> Self {
        AbsoluteFsPath(normalize_path(&path.into()))
    }

    pub fn from<P: AsRef<Path>>(path: P) -> Self {
        Self::new(path.as_ref().to_string_lossy().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// The directory containing this path.
    pub fn parent(&self) -> AbsoluteFsPath {
        AbsoluteFsPath(dirname(&self.0))
    }
}

impl AsRef<str> for AbsoluteFsPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<Path> for AbsoluteFsPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl std::fmt::Display for AbsoluteFsPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The read-only aspects of a file system a pass needs.
pub trait ReadonlyFileSystem {
    fn exists(&self, path: &AbsoluteFsPath) -> bool;
    fn read_file(&self, path: &AbsoluteFsPath) -> io::Result<String>;
}

/// The write layer. Writes to distinct paths may run concurrently.
pub trait FileSystem: ReadonlyFileSystem + Send + Sync {
    /// Write `data` to `path`, creating missing parent directories.
    fn write_file(&self, path: &AbsoluteFsPath, data: &[u8]) -> io::Result<()>;
    fn ensure_dir(&self, path: &AbsoluteFsPath) -> io::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_normalize_on_construction() {
        let path = AbsoluteFsPath::new("C:\\repo\\src\\..\\lib\\proxies.ts");
        assert_eq!(path.as_str(), "C:/repo/lib/proxies.ts");
        assert_eq!(path.parent().as_str(), "C:/repo/lib");
    }
}
