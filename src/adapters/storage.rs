use crate::domain::ports::{Storage, STDOUT_PATH};
use crate::utils::error::Result;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Filesystem storage rooted at `base_path`. Absolute paths bypass the base;
/// `-` reads stdin and writes stdout.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new(".".to_string())
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        if path == STDOUT_PATH {
            let mut data = Vec::new();
            std::io::Read::read_to_end(&mut std::io::stdin().lock(), &mut data)?;
            return Ok(data);
        }

        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        if path == STDOUT_PATH {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush()?;
            return Ok(());
        }

        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_then_read_nested_path() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        storage
            .write_file("tables/xid_tables.h", b"#include <stdint.h>\n")
            .await
            .unwrap();

        let data = storage.read_file("tables/xid_tables.h").await.unwrap();
        assert_eq!(data, b"#include <stdint.h>\n");
        assert!(temp_dir.path().join("tables/xid_tables.h").exists());
    }

    #[tokio::test]
    async fn test_absolute_path_ignores_base() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new("does-not-matter".to_string());
        let target = temp_dir.path().join("out.csv");

        storage
            .write_file(target.to_str().unwrap(), b"property,start,end\n")
            .await
            .unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), b"property,start,end\n");
    }

    #[tokio::test]
    async fn test_read_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        let err = storage.read_file("absent.txt").await.unwrap_err();
        assert!(matches!(err, crate::utils::error::EtlError::IoError(_)));
    }
}
