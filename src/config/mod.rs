// ==========================================
// Numbers 库存管理 - 配置层
// ==========================================
// 职责: 应用配置管理，支持多级覆写
// 来源: 默认值 / 环境变量 / 命令行
// ==========================================

pub mod app_config;

// 重导出核心配置
pub use app_config::{env_keys, get_default_db_path, AppConfig, ConfigError, ImportSettings};
