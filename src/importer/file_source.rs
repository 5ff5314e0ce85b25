// ==========================================
// Numbers 库存管理 - 文件来源
// ==========================================
// 职责: 选择文件 + 读取文本内容（导入阶段 0）
// 说明: 仅“选择”步骤支持用户取消
// ==========================================

use crate::importer::error::{ImportError, ImporterResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 选中的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    /// 文件位置（本地路径或 URI）；为空表示选择器未返回可读位置
    pub uri: Option<String>,
    pub name: Option<String>,
}

impl PickedFile {
    pub fn from_path(path: &Path) -> Self {
        Self {
            uri: Some(path.display().to_string()),
            name: path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.to_string()),
        }
    }
}

/// 文件选择结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilePick {
    Canceled,
    Selected(PickedFile),
}

// ==========================================
// FileSource Trait
// ==========================================
// 实现者: LocalFileSource；测试中使用内存实现
#[async_trait]
pub trait FileSource: Send + Sync {
    /// 选择单个文件
    async fn pick(&self) -> ImporterResult<FilePick>;

    /// 读取文件文本内容
    async fn read_text(&self, file: &PickedFile) -> ImporterResult<String>;
}

// ==========================================
// LocalFileSource - 本地文件
// ==========================================
// path 为 None 时视为用户取消选择
#[derive(Debug, Clone, Default)]
pub struct LocalFileSource {
    path: Option<PathBuf>,
}

impl LocalFileSource {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn canceled() -> Self {
        Self { path: None }
    }
}

#[async_trait]
impl FileSource for LocalFileSource {
    async fn pick(&self) -> ImporterResult<FilePick> {
        match &self.path {
            None => Ok(FilePick::Canceled),
            Some(path) => Ok(FilePick::Selected(PickedFile::from_path(path))),
        }
    }

    async fn read_text(&self, file: &PickedFile) -> ImporterResult<String> {
        let uri = file.uri.as_deref().ok_or(ImportError::MissingFileUri)?;
        let path = uri.strip_prefix("file://").unwrap_or(uri);

        debug!(path = %path, "读取 CSV 文件");
        let bytes = tokio::fs::read(path).await?;

        String::from_utf8(bytes)
            .map_err(|e| ImportError::FileReadError(format!("file is not valid UTF-8: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_local_source_reads_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "name,quantity\nApples,1\n").unwrap();

        let source = LocalFileSource::new(Some(temp_file.path().to_path_buf()));
        let picked = match source.pick().await.unwrap() {
            FilePick::Selected(file) => file,
            FilePick::Canceled => panic!("expected a selected file"),
        };

        let text = source.read_text(&picked).await.unwrap();
        assert!(text.starts_with("name,quantity"));
    }

    #[tokio::test]
    async fn test_local_source_without_path_is_canceled() {
        let source = LocalFileSource::canceled();
        assert_eq!(source.pick().await.unwrap(), FilePick::Canceled);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let source = LocalFileSource::new(Some(PathBuf::from("definitely_missing.csv")));
        let picked = match source.pick().await.unwrap() {
            FilePick::Selected(file) => file,
            FilePick::Canceled => panic!("expected a selected file"),
        };

        let err = source.read_text(&picked).await.unwrap_err();
        assert!(matches!(err, ImportError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_picked_file_without_uri() {
        let source = LocalFileSource::canceled();
        let err = source
            .read_text(&PickedFile {
                uri: None,
                name: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "No file URI returned from picker.");
    }
}
