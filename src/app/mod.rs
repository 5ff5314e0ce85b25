// ==========================================
// Numbers 库存管理 - 应用层
// ==========================================
// 职责: 组装仓储与API，供命令行入口使用
// ==========================================

pub mod state;

// 重导出
pub use state::{AppState, SharedProductRepository};
