// ==========================================
// Numbers 库存管理 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换Repository错误为用户可读的错误消息
// ==========================================

use crate::importer::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 认证错误
    // ==========================================
    #[error("Not authenticated")]
    NotAuthenticated,

    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("业务规则违反: {0}")]
    BusinessRuleViolation(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    // ==========================================
    // 导入错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    ImportError(String),
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotAuthenticated => ApiError::NotAuthenticated,

            // 数据库错误
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("唯一约束违反: {}", msg))
            }
            RepositoryError::ConstraintViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("约束违反: {}", msg))
            }
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Persistence(repo_err) => ApiError::from(repo_err),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_conversion() {
        let err: ApiError = RepositoryError::NotFound {
            entity: "Product".to_string(),
            id: "p-1".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert!(err.to_string().contains("p-1"));
    }

    #[test]
    fn test_not_authenticated_conversion() {
        let err: ApiError = RepositoryError::NotAuthenticated.into();
        assert!(matches!(err, ApiError::NotAuthenticated));
        assert_eq!(err.to_string(), "Not authenticated");
    }

    #[test]
    fn test_lock_and_constraint_conversion() {
        let err: ApiError = RepositoryError::LockError("poisoned".to_string()).into();
        assert!(matches!(err, ApiError::DatabaseConnectionError(_)));

        let err: ApiError =
            RepositoryError::ConstraintViolation("CHECK constraint failed".to_string()).into();
        assert!(matches!(err, ApiError::BusinessRuleViolation(_)));
        assert!(err.to_string().contains("CHECK"));
    }

    #[test]
    fn test_import_error_conversion() {
        let err: ApiError = ImportError::MissingFileUri.into();
        assert!(matches!(err, ApiError::ImportError(_)));

        let err: ApiError = ImportError::Persistence(RepositoryError::NotAuthenticated).into();
        assert!(matches!(err, ApiError::NotAuthenticated));
    }
}
