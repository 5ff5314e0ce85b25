// ==========================================
// Numbers 库存管理 - 产品导入 Trait
// ==========================================
// 职责: 定义产品 CSV 导入接口（不包含实现）
// 契约: 导入接口从不返回 Err，协作方失败折算为 row = 0 的错误条目
// ==========================================

use crate::domain::product::ImportResult;
use crate::domain::session::UserSession;
use crate::importer::file_source::FileSource;
use async_trait::async_trait;

// ==========================================
// ProductImporter Trait
// ==========================================
// 实现者: ProductCsvImporter
#[async_trait]
pub trait ProductImporter: Send + Sync {
    /// 选择文件并导入
    ///
    /// # 参数
    /// - session: 当前用户会话（批量插入限定在该用户下）
    /// - files: 文件来源（选择 + 读取）
    ///
    /// # 导入流程
    /// 0. 选择文件（取消 → 全零结果）
    /// 1. 读取文本
    /// 2. CSV 解析
    /// 3. 字段映射
    /// 4. 行校验（逐行、按文件顺序）
    /// 5. 批量落库（一次调用）
    async fn import_products_csv(
        &self,
        session: &UserSession,
        files: &dyn FileSource,
    ) -> ImportResult;

    /// 直接导入 CSV 文本（跳过文件选择与读取）
    async fn import_csv_text(&self, session: &UserSession, text: &str) -> ImportResult;

    /// 是否有导入正在进行（仅供调用方禁用触发入口，不提供互斥）
    fn is_importing(&self) -> bool;
}
