// ==========================================
// Numbers 库存管理 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类:
// - ImportError: 协作方失败（文件/解析/落库），转换为 row = 0 条目
// - RowRejection: 行级校验失败，计入 skipped，不中断批次
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("No file URI returned from picker.")]
    MissingFileUri,

    #[error("Failed to read file: {0}")]
    FileReadError(String),

    // ===== 解析错误 =====
    #[error("{0}")]
    CsvParseError(String),

    // ===== 落库错误 =====
    #[error("{0}")]
    Persistence(#[from] RepositoryError),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ImportError::FileNotFound(err.to_string()),
            _ => ImportError::FileReadError(err.to_string()),
        }
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        let message = match err.kind() {
            csv::ErrorKind::UnequalLengths {
                pos,
                expected_len,
                len,
            } => {
                let line = pos.as_ref().map(|p| p.line()).unwrap_or(0);
                if len < expected_len {
                    format!(
                        "Too few fields: expected {} fields but parsed {} (line {})",
                        expected_len, len, line
                    )
                } else {
                    format!(
                        "Too many fields: expected {} fields but parsed {} (line {})",
                        expected_len, len, line
                    )
                }
            }
            csv::ErrorKind::Utf8 { pos, err } => {
                let line = pos.as_ref().map(|p| p.line()).unwrap_or(0);
                format!("Invalid UTF-8 in CSV (line {}): {}", line, err)
            }
            csv::ErrorKind::Io(io_err) => format!("Failed to read CSV: {}", io_err),
            _ => format!("Malformed CSV: {}", err),
        };
        ImportError::CsvParseError(message)
    }
}

/// Result 类型别名
pub type ImporterResult<T> = Result<T, ImportError>;

// ==========================================
// RowRejection - 行级校验失败
// ==========================================
// 消息文本为对外契约，调用方据此展示
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRejection {
    #[error("Missing required field \"name\".")]
    MissingName,

    /// 数量缺失解析结果（非数字/非有限值）与负数合并为同一条消息
    #[error("Invalid quantity (must be >= 0).")]
    InvalidQuantity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_rejection_messages() {
        assert_eq!(
            RowRejection::MissingName.to_string(),
            "Missing required field \"name\"."
        );
        assert_eq!(
            RowRejection::InvalidQuantity.to_string(),
            "Invalid quantity (must be >= 0)."
        );
    }

    #[test]
    fn test_persistence_error_is_transparent() {
        let err: ImportError = RepositoryError::NotAuthenticated.into();
        assert_eq!(err.to_string(), "Not authenticated");
    }

    #[test]
    fn test_io_not_found_maps_to_file_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.csv");
        assert!(matches!(ImportError::from(io), ImportError::FileNotFound(_)));
    }
}
