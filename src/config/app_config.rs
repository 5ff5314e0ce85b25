// ==========================================
// Numbers 库存管理 - 应用配置
// ==========================================
// 职责: 配置加载与多级覆写
// 优先级: 默认值 → 环境变量 → 命令行参数（由调用方覆写）
// ==========================================

use crate::i18n::DEFAULT_LOCALE;
use crate::importer::DEFAULT_ERROR_PREVIEW_LIMIT;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// 环境变量键
pub mod env_keys {
    pub const DB_PATH: &str = "NUMBERS_DB_PATH";
    pub const USER_ID: &str = "NUMBERS_USER_ID";
    pub const LOCALE: &str = "NUMBERS_LOCALE";
    pub const ALERT_PREVIEW_LIMIT: &str = "NUMBERS_ALERT_PREVIEW_LIMIT";
}

/// 本地单用户模式下的默认用户
pub const DEFAULT_USER_ID: &str = "local-user";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置项 {key} 取值无效: {value}")]
    InvalidValue { key: &'static str, value: String },
}

// ==========================================
// ImportSettings - 导入参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSettings {
    /// 导入提示中最多展示的错误条数
    pub error_preview_limit: usize,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            error_preview_limit: DEFAULT_ERROR_PREVIEW_LIMIT,
        }
    }
}

// ==========================================
// AppConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub db_path: String,
    pub user_id: String,
    pub locale: String,
    pub import: ImportSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: get_default_db_path(),
            user_id: DEFAULT_USER_ID.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            import: ImportSettings::default(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AppConfig {
    /// 从进程环境变量加载
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载（未设置或空白的键使用默认值）
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = non_blank(lookup(env_keys::DB_PATH)) {
            config.db_path = path;
        }
        if let Some(user_id) = non_blank(lookup(env_keys::USER_ID)) {
            config.user_id = user_id;
        }
        if let Some(locale) = non_blank(lookup(env_keys::LOCALE)) {
            config.locale = locale;
        }
        if let Some(raw) = non_blank(lookup(env_keys::ALERT_PREVIEW_LIMIT)) {
            config.import.error_preview_limit =
                raw.parse().map_err(|_| ConfigError::InvalidValue {
                    key: env_keys::ALERT_PREVIEW_LIMIT,
                    value: raw.clone(),
                })?;
        }

        Ok(config)
    }

    /// 命令行覆写
    pub fn with_overrides(mut self, db_path: Option<String>, user_id: Option<String>) -> Self {
        if let Some(path) = non_blank(db_path) {
            self.db_path = path;
        }
        if let Some(user_id) = non_blank(user_id) {
            self.user_id = user_id;
        }
        self
    }
}

/// 默认数据库路径: <data_dir>/numbers-inventory/numbers.db
///
/// 拿不到用户数据目录时回退到当前目录
pub fn get_default_db_path() -> String {
    let path = match dirs::data_dir() {
        Some(data_dir) => data_dir.join("numbers-inventory").join("numbers.db"),
        None => PathBuf::from("./numbers.db"),
    };
    path.to_string_lossy().to_string()
}
