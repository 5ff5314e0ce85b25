// ==========================================
// Numbers 库存管理 - 产品导入 API
// ==========================================
// 职责: 封装产品 CSV 导入 + 导入结果提示
// 说明: 导入失败不以 Err 返回，全部体现在 result.errors 中
// ==========================================

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::config::ImportSettings;
use crate::domain::product::ImportResult;
use crate::domain::session::UserSession;
use crate::importer::{
    render_import_alert, FileSource, ImportAlert, LocalFileSource, ProductCsvImporter,
    ProductImporter,
};
use crate::repository::ProductRepository;

/// 导入API响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportApiResponse {
    pub result: ImportResult,
    /// 面向用户的提示；取消/空文件时为空
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<ImportAlert>,
}

/// 导入API
///
/// 导入器在多次调用间共享，is_importing 标记对调用方可见
pub struct ImportApi<R>
where
    R: ProductRepository,
{
    importer: ProductCsvImporter<R>,
    settings: ImportSettings,
}

impl<R> ImportApi<R>
where
    R: ProductRepository,
{
    pub fn new(product_repo: R, settings: ImportSettings) -> Self {
        Self {
            importer: ProductCsvImporter::new(product_repo),
            settings,
        }
    }

    fn respond(&self, result: ImportResult) -> ImportApiResponse {
        let alert = render_import_alert(&result, self.settings.error_preview_limit);
        ImportApiResponse { result, alert }
    }

    /// 导入本地 CSV 文件
    ///
    /// # 参数
    /// - file_path: 文件路径；None 表示用户取消选择
    pub async fn import_file(
        &self,
        session: &UserSession,
        file_path: Option<PathBuf>,
    ) -> ImportApiResponse {
        let files = LocalFileSource::new(file_path);
        self.import_from(session, &files).await
    }

    /// 从任意文件来源导入
    pub async fn import_from(
        &self,
        session: &UserSession,
        files: &dyn FileSource,
    ) -> ImportApiResponse {
        let result = self.importer.import_products_csv(session, files).await;
        info!(
            imported = result.imported,
            errors = result.errors.len(),
            "导入请求完成"
        );
        self.respond(result)
    }

    /// 导入 CSV 文本
    pub async fn import_text(&self, session: &UserSession, text: &str) -> ImportApiResponse {
        let result = self.importer.import_csv_text(session, text).await;
        self.respond(result)
    }

    pub fn is_importing(&self) -> bool {
        self.importer.is_importing()
    }
}
