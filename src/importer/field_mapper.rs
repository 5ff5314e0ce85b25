// ==========================================
// Numbers 库存管理 - 字段映射器
// ==========================================
// 阶段 2: 源列 → 标准字段
// 规则: 别名按优先级排列，第一个出现在表头中的别名决定该字段的列
//       （即使该行此列为空，也不再回退到后续别名）
// ==========================================

use crate::domain::product::RawProductRecord;

/// 标准字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Name,
    Quantity,
}

/// 别名 → 标准字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAlias {
    pub field: ProductField,
    pub aliases: &'static [&'static str],
}

/// 默认别名表（表头已规范化为小写）
pub const PRODUCT_FIELD_ALIASES: [FieldAlias; 2] = [
    FieldAlias {
        field: ProductField::Name,
        aliases: &["name", "product", "product name"],
    },
    FieldAlias {
        field: ProductField::Quantity,
        aliases: &["quantity", "qty", "count", "amount"],
    },
];

impl FieldAlias {
    /// 在表头中定位列（首个命中的别名；重复表头取第一次出现）
    pub fn resolve(&self, headers: &[String]) -> Option<usize> {
        self.aliases
            .iter()
            .find_map(|alias| headers.iter().position(|h| h == alias))
    }
}

// ==========================================
// ColumnMapping - 列定位结果
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    pub name: Option<usize>,
    pub quantity: Option<usize>,
}

impl ColumnMapping {
    pub fn has_name_column(&self) -> bool {
        self.name.is_some()
    }
}

// ==========================================
// FieldMapper
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct FieldMapper {
    aliases: &'static [FieldAlias],
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self {
            aliases: &PRODUCT_FIELD_ALIASES,
        }
    }
}

impl FieldMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按表头解析列位置（每次导入只做一次）
    pub fn resolve_columns(&self, headers: &[String]) -> ColumnMapping {
        let mut mapping = ColumnMapping::default();
        for alias in self.aliases {
            let column = alias.resolve(headers);
            match alias.field {
                ProductField::Name => mapping.name = mapping.name.or(column),
                ProductField::Quantity => mapping.quantity = mapping.quantity.or(column),
            }
        }
        mapping
    }

    /// 映射单行
    ///
    /// # 参数
    /// - row: 单元格原值
    /// - mapping: 列定位
    /// - row_number: 文件行号（表头为第 1 行）
    pub fn map_row(
        &self,
        row: &[String],
        mapping: &ColumnMapping,
        row_number: usize,
    ) -> RawProductRecord {
        let cell = |column: Option<usize>| column.and_then(|idx| row.get(idx)).cloned();

        RawProductRecord {
            name: cell(mapping.name),
            quantity: cell(mapping.quantity),
            row_number,
        }
    }
}
