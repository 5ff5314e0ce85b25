// ==========================================
// Numbers 库存管理 - 产品 CSV 导入器实现
// ==========================================
// 职责: 整合导入流程，从文件到仓储
// 流程: 选择 → 读取 → 解析 → 映射 → 校验 → 批量落库
// 约束:
// - 逐行顺序校验，错误行号 = 数据行下标 + 2
// - 每个阶段返回 Result，失败在顶层折算为 row = 0 条目
// - 无重试
// ==========================================

use crate::domain::product::{ImportResult, NewProductInput};
use crate::domain::session::UserSession;
use crate::importer::csv_parser::{CsvTextParser, ParsedCsv};
use crate::importer::error::{ImportError, ImporterResult};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_source::{FilePick, FileSource};
use crate::importer::product_importer_trait::ProductImporter;
use crate::importer::row_validator::RowValidator;
use crate::repository::ProductRepository;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info, instrument, warn};

/// 第一条数据行的文件行号（表头占第 1 行）
pub const FIRST_DATA_ROW: usize = 2;

// ==========================================
// ImportingFlag - 导入进行中标记
// ==========================================
// 离开作用域时自动复位（含提前返回）
struct ImportingFlag<'a>(&'a AtomicBool);

impl<'a> ImportingFlag<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for ImportingFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

// ==========================================
// ProductCsvImporter
// ==========================================
pub struct ProductCsvImporter<R>
where
    R: ProductRepository,
{
    // 数据访问层
    product_repo: R,

    // 导入组件
    parser: CsvTextParser,
    field_mapper: FieldMapper,
    row_validator: RowValidator,

    importing: AtomicBool,
}

impl<R> ProductCsvImporter<R>
where
    R: ProductRepository,
{
    /// 使用默认组件创建导入器
    pub fn new(product_repo: R) -> Self {
        Self::with_components(
            product_repo,
            CsvTextParser::new(),
            FieldMapper::new(),
            RowValidator::new(),
        )
    }

    pub fn with_components(
        product_repo: R,
        parser: CsvTextParser,
        field_mapper: FieldMapper,
        row_validator: RowValidator,
    ) -> Self {
        Self {
            product_repo,
            parser,
            field_mapper,
            row_validator,
            importing: AtomicBool::new(false),
        }
    }

    /// 阶段 0-1: 选择并读取文件
    ///
    /// # 返回
    /// - Ok(None): 用户取消
    /// - Ok(Some(text)): 文件内容
    async fn read_selected_file(&self, files: &dyn FileSource) -> ImporterResult<Option<String>> {
        let file = match files.pick().await? {
            FilePick::Canceled => return Ok(None),
            FilePick::Selected(file) => file,
        };

        if file.uri.is_none() {
            return Err(ImportError::MissingFileUri);
        }

        debug!(file_name = ?file.name, "读取选中文件");
        let text = files.read_text(&file).await?;
        Ok(Some(text))
    }

    /// 阶段 3-4: 映射 + 校验（拒绝行写入 result）
    fn validate_rows(&self, parsed: &ParsedCsv, result: &mut ImportResult) -> Vec<NewProductInput> {
        let mapping = self.field_mapper.resolve_columns(&parsed.headers);
        if !mapping.has_name_column() {
            warn!(headers = ?parsed.headers, "表头中未找到名称列");
        }

        let mut valid = Vec::with_capacity(parsed.row_count());
        for (idx, row) in parsed.rows.iter().enumerate() {
            let row_number = idx + FIRST_DATA_ROW;
            let record = self.field_mapper.map_row(row, &mapping, row_number);

            match self.row_validator.validate(&record) {
                Ok(product) => valid.push(product),
                Err(rejection) => {
                    debug!(row_number = row_number, reason = %rejection, "行校验失败");
                    result.reject_row(row_number, rejection.to_string());
                }
            }
        }
        valid
    }

    /// 阶段 2-5: 解析 → 校验 → 批量落库
    async fn run_pipeline(
        &self,
        session: &UserSession,
        text: &str,
        result: &mut ImportResult,
    ) -> ImporterResult<()> {
        let parsed = self.parser.parse(text)?;
        result.total_rows = parsed.row_count();
        info!(total_rows = result.total_rows, "CSV 解析完成");

        let valid = self.validate_rows(&parsed, result);
        result.valid_rows = valid.len();
        info!(
            valid = result.valid_rows,
            skipped = result.skipped,
            "行校验完成"
        );

        if valid.is_empty() {
            return Ok(());
        }

        let inserted = self.product_repo.create_products_bulk(session, valid).await?;
        if inserted.inserted < result.valid_rows {
            warn!(
                submitted = result.valid_rows,
                inserted = inserted.inserted,
                "批量插入条数少于提交条数"
            );
        }
        result.imported = inserted.inserted.min(result.valid_rows);

        Ok(())
    }

    /// 协作方失败 → row = 0 条目
    fn record_failure(result: &mut ImportResult, err: ImportError) {
        error!(error = %err, "导入失败");
        result.push_failure(err.to_string());
    }
}

#[async_trait]
impl<R> ProductImporter for ProductCsvImporter<R>
where
    R: ProductRepository,
{
    #[instrument(skip(self, session, files), fields(user_id = %session.user_id))]
    async fn import_products_csv(
        &self,
        session: &UserSession,
        files: &dyn FileSource,
    ) -> ImportResult {
        let _flag = ImportingFlag::raise(&self.importing);
        let mut result = ImportResult::default();

        let text = match self.read_selected_file(files).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                info!("用户取消选择文件");
                return result;
            }
            Err(e) => {
                Self::record_failure(&mut result, e);
                return result;
            }
        };

        if let Err(e) = self.run_pipeline(session, &text, &mut result).await {
            Self::record_failure(&mut result, e);
        }

        info!(
            total = result.total_rows,
            valid = result.valid_rows,
            imported = result.imported,
            skipped = result.skipped,
            "产品 CSV 导入结束"
        );
        result
    }

    async fn import_csv_text(&self, session: &UserSession, text: &str) -> ImportResult {
        let _flag = ImportingFlag::raise(&self.importing);
        let mut result = ImportResult::default();

        if let Err(e) = self.run_pipeline(session, text, &mut result).await {
            Self::record_failure(&mut result, e);
        }
        result
    }

    fn is_importing(&self) -> bool {
        self.importing.load(Ordering::SeqCst)
    }
}
