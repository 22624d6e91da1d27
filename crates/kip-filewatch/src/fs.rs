use std::io;
use std::path::Path;
use std::time::SystemTime;

/// The two filesystem probes a [`CachedFile`](crate::CachedFile) makes.
pub trait FileSystem: Send + Sync {
    /// Modification time of the file at `path`.
    fn modified(&self, path: &Path) -> io::Result<SystemTime>;

    /// Full contents of the file at `path`.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// The real filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        std::fs::metadata(path)?.modified()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_real_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("creds");
        std::fs::write(&path, "secret").unwrap();

        assert_eq!(OsFileSystem.read_to_string(&path).unwrap(), "secret");
        assert!(OsFileSystem.modified(&path).is_ok());
    }

    #[test]
    fn missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent");
        assert_eq!(
            OsFileSystem.modified(&path).unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
        assert!(OsFileSystem.read_to_string(&path).is_err());
    }
}
