// ==========================================
// Numbers 库存管理 - 核心库
// ==========================================
// 技术栈: Rust + SQLite + tokio
// 系统定位: 个人产品清单 + CSV 批量导入
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - CSV 数据
pub mod importer;

// 配置层 - 应用配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// 静态库存目录
pub mod catalog;

// API 层 - 业务接口
pub mod api;

// 应用层 - 组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    ImportResult, ImportRowError, NewProductInput, ProductRow, ProductUpdate, UserSession,
};

// 导入
pub use importer::{ProductCsvImporter, ProductImporter};

// 仓储
pub use repository::{ProductRepository, SqliteProductRepository};

// API
pub use api::{ImportApi, ProductApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Numbers";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
