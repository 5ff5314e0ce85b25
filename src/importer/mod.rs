// ==========================================
// Numbers 库存管理 - 导入层
// ==========================================
// 职责: CSV 文件 → 产品批量落库 + 导入结果
// 流程: 文件来源 → CSV 解析 → 字段映射 → 行校验 → 批量插入
// ==========================================

// 模块声明
pub mod csv_parser;
pub mod error;
pub mod field_mapper;
pub mod file_source;
pub mod product_importer_impl;
pub mod product_importer_trait;
pub mod report;
pub mod row_validator;

// 重导出核心类型
pub use csv_parser::{CsvTextParser, ParsedCsv};
pub use error::{ImportError, ImporterResult, RowRejection};
pub use field_mapper::{ColumnMapping, FieldMapper, PRODUCT_FIELD_ALIASES};
pub use file_source::{FilePick, FileSource, LocalFileSource, PickedFile};
pub use product_importer_impl::ProductCsvImporter;
pub use report::{render_import_alert, ImportAlert, DEFAULT_ERROR_PREVIEW_LIMIT};
pub use row_validator::RowValidator;

// 重导出 Trait 接口
pub use product_importer_trait::ProductImporter;
