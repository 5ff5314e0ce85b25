// ==========================================
// Numbers 库存管理 - 产品领域模型
// ==========================================
// 职责: 产品实体、导入中间结构、导入结果
// 红线: 不含数据访问逻辑
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// ProductRow - 产品记录
// ==========================================
// 用途: 仓储层读出的完整产品行
// 对齐: products 表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    pub id: String,                     // 产品 ID（UUID v4）
    pub user_id: String,                // 所属用户
    pub name: String,                   // 产品名称
    pub quantity: i64,                  // 数量（>= 0）
    pub is_favorite: bool,              // 收藏标记
    pub created_at: DateTime<Utc>,      // 创建时间
}

// ==========================================
// NewProductInput - 新建产品输入
// ==========================================
// 用途: 单条新建 / 批量导入的规范化结构
// 生命周期: 校验时构造，批量插入时消费
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProductInput {
    pub name: String,
    pub quantity: i64,
    #[serde(default)]
    pub is_favorite: bool,
}

impl NewProductInput {
    /// CSV 导入行（收藏标记恒为 false）
    pub fn imported(name: impl Into<String>, quantity: i64) -> Self {
        Self {
            name: name.into(),
            quantity,
            is_favorite: false,
        }
    }
}

// ==========================================
// ProductUpdate - 产品更新
// ==========================================
// 整行覆盖: name / quantity / is_favorite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: String,
    pub quantity: i64,
    pub is_favorite: bool,
}

impl From<&ProductRow> for ProductUpdate {
    fn from(row: &ProductRow) -> Self {
        Self {
            name: row.name.clone(),
            quantity: row.quantity,
            is_favorite: row.is_favorite,
        }
    }
}

// ==========================================
// BulkInsertResult - 批量插入结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkInsertResult {
    pub inserted: usize, // 实际落库条数（可能小于提交条数）
}

// ==========================================
// RawProductRecord - 导入中间结构体
// ==========================================
// 用途: 字段映射产物（原始单元格，未校验）
// 生命周期: 仅在导入流程内
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawProductRecord {
    pub name: Option<String>,     // 名称列原值
    pub quantity: Option<String>, // 数量列原值
    pub row_number: usize,        // 文件行号（表头为第 1 行）
}

// ==========================================
// ImportRowError - 导入错误条目
// ==========================================
// row = 0 表示非行级错误（文件读取/解析/落库）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRowError {
    pub row: usize,
    pub message: String,
}

// ==========================================
// ImportResult - 导入结果
// ==========================================
// 用途: 导入接口返回值，不落库
// 不变式: valid_rows + skipped == total_rows, imported <= valid_rows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub total_rows: usize,
    pub valid_rows: usize,
    pub imported: usize,
    pub skipped: usize,
    pub errors: Vec<ImportRowError>,
}

impl ImportResult {
    /// 取消选择文件 / 未执行任何动作
    pub fn is_noop(&self) -> bool {
        self.total_rows == 0 && self.valid_rows == 0 && self.imported == 0 && self.errors.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// 记录被拒绝的数据行
    pub fn reject_row(&mut self, row: usize, message: impl Into<String>) {
        self.errors.push(ImportRowError {
            row,
            message: message.into(),
        });
        self.skipped += 1;
    }

    /// 记录非行级失败（row = 0），不计入 skipped
    pub fn push_failure(&mut self, message: impl Into<String>) {
        self.errors.push(ImportRowError {
            row: 0,
            message: message.into(),
        });
    }

    /// 行级错误条目（排除 row = 0）
    pub fn row_errors(&self) -> impl Iterator<Item = &ImportRowError> {
        self.errors.iter().filter(|e| e.row > 0)
    }
}
