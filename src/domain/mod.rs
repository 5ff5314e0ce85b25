// ==========================================
// Numbers 库存管理 - 领域模型层
// ==========================================
// 职责: 定义领域实体与会话上下文
// 红线: 不含数据访问逻辑
// ==========================================

pub mod product;
pub mod session;

// 重导出核心类型
pub use product::{
    BulkInsertResult, ImportResult, ImportRowError, NewProductInput, ProductRow, ProductUpdate,
    RawProductRecord,
};
pub use session::UserSession;
