use crate::core::{SelectedFile, Storage};
use crate::utils::error::Result;

/// 透過 Storage 讀取檔案，建立選取項目。不檢查檔案類型或大小。
pub async fn load_selection<S: Storage>(storage: &S, path: &str) -> Result<SelectedFile> {
    let bytes = storage.read_file(path).await?;
    tracing::debug!("Loaded {} ({} bytes) for upload", path, bytes.len());
    Ok(SelectedFile::from_path_bytes(path, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::CopilotError;
    use std::collections::HashMap;

    struct MemoryStorage {
        files: HashMap<String, Vec<u8>>,
    }

    impl Storage for MemoryStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files.get(path).cloned().ok_or_else(|| {
                CopilotError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }
    }

    #[test]
    fn test_load_selection_uses_file_name() {
        let mut files = HashMap::new();
        files.insert("exports/q3/spend.xlsx".to_string(), vec![1, 2, 3]);
        let storage = MemoryStorage { files };

        let file = tokio_test::block_on(load_selection(&storage, "exports/q3/spend.xlsx")).unwrap();
        assert_eq!(file.name(), "spend.xlsx");
        assert_eq!(file.bytes(), &[1, 2, 3]);
    }

    #[test]
    fn test_load_selection_missing_file() {
        let storage = MemoryStorage {
            files: HashMap::new(),
        };
        let result = tokio_test::block_on(load_selection(&storage, "missing.csv"));
        assert!(matches!(result, Err(CopilotError::IoError(_))));
    }
}
