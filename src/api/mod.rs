// ==========================================
// Numbers 库存管理 - API 层
// ==========================================
// 职责: 提供业务 API 接口，供命令行调用
// ==========================================

pub mod error;
pub mod import_api;
pub mod product_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use import_api::{ImportApi, ImportApiResponse};
pub use product_api::{normalize_quantity_input, ProductApi};
