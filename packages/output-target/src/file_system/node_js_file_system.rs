use std::fs;
use std::io;
use std::path::Path;

use super::types::{AbsoluteFsPath, FileSystem, ReadonlyFileSystem};

/// File system backed by the real disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeJSFileSystem;

impl NodeJSFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl ReadonlyFileSystem for NodeJSFileSystem {
    fn exists(&self, path: &AbsoluteFsPath) -> bool {
        Path::new(path.as_str()).exists()
    }

    fn read_file(&self, path: &AbsoluteFsPath) -> io::Result<String> {
        fs::read_to_string(path.as_str())
    }
}

impl FileSystem for NodeJSFileSystem {
    fn write_file(&self, path: &AbsoluteFsPath, data: &[u8]) -> io::Result<()> {
        self.ensure_dir(&path.parent())?;
        fs::write(path.as_str(), data)
    }

    fn ensure_dir(&self, path: &AbsoluteFsPath) -> io::Result<()> {
        fs::create_dir_all(path.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_create_parent_directories_on_write() {
        let root = std::env::temp_dir().join(format!("ng-proxies-fs-{}", std::process::id()));
        let file = AbsoluteFsPath::from(root.join("a").join("b").join("proxies.ts"));

        let fs = NodeJSFileSystem::new();
        fs.write_file(&file, b"export {};\n").unwrap();

        assert!(fs.exists(&file));
        assert_eq!(fs.read_file(&file).unwrap(), "export {};\n");
        let _ = std::fs::remove_dir_all(&root);
    }
}
