// ==========================================
// Numbers 库存管理 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::api::{ApiError, ApiResult, ImportApi, ProductApi};
use crate::config::AppConfig;
use crate::db::open_sqlite_connection;
use crate::domain::session::UserSession;
use crate::repository::SqliteProductRepository;

/// 共享仓储类型
pub type SharedProductRepository = Arc<SqliteProductRepository>;

/// 应用状态
///
/// 包含所有API实例和共享资源，API 共用同一个数据库连接
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 当前用户会话
    pub session: UserSession,

    /// 产品API
    pub product_api: Arc<ProductApi<SharedProductRepository>>,

    /// 产品导入API
    pub import_api: Arc<ImportApi<SharedProductRepository>>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 说明
    /// 1. 确保数据库所在目录存在
    /// 2. 打开共享连接并建表
    /// 3. 创建所有API实例
    pub fn new(config: &AppConfig) -> ApiResult<Self> {
        tracing::info!(db_path = %config.db_path, user_id = %config.user_id, "初始化AppState");

        if let Some(parent) = Path::new(&config.db_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ApiError::DatabaseConnectionError(format!(
                        "无法创建数据库目录 {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let conn = open_sqlite_connection(&config.db_path)
            .map_err(|e| ApiError::DatabaseConnectionError(format!("无法打开数据库: {}", e)))?;
        let product_repo = Arc::new(SqliteProductRepository::from_connection(Arc::new(
            Mutex::new(conn),
        ))?);

        let product_api = Arc::new(ProductApi::new(product_repo.clone()));
        let import_api = Arc::new(ImportApi::new(product_repo, config.import));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path: config.db_path.clone(),
            session: UserSession::new(config.user_id.clone()),
            product_api,
            import_api,
        })
    }
}
