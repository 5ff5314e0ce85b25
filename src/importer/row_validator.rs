// ==========================================
// Numbers 库存管理 - 行校验器
// ==========================================
// 阶段 3: RawProductRecord → NewProductInput / RowRejection
// 规则:
// 1. 名称 TRIM 后为空 → MissingName
// 2. 数量为空/缺列 → 0；否则按数值解析，失败或非有限值 → 无数量
// 3. 无数量、为负或超出 i64 范围 → InvalidQuantity
// 4. 通过 → 数量向下取整，is_favorite = false
// ==========================================

use crate::domain::product::{NewProductInput, RawProductRecord};
use crate::importer::error::RowRejection;

/// 数量单元格 → 数值
///
/// # 返回
/// - Some(0.0): 空值/缺列
/// - Some(n): 有限数值
/// - None: 无法解析或非有限值
pub fn coerce_quantity(raw: Option<&str>) -> Option<f64> {
    let trimmed = match raw.map(str::trim) {
        None | Some("") => return Some(0.0),
        Some(v) => v,
    };

    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RowValidator;

impl RowValidator {
    pub fn new() -> Self {
        Self
    }

    /// 校验并规范化单行
    pub fn validate(&self, record: &RawProductRecord) -> Result<NewProductInput, RowRejection> {
        let name = record.name.as_deref().map(str::trim).unwrap_or("");
        if name.is_empty() {
            return Err(RowRejection::MissingName);
        }

        let quantity = match coerce_quantity(record.quantity.as_deref()) {
            // i64::MAX as f64 == 2^63，严格小于才能无损转换
            Some(q) if q >= 0.0 && q < i64::MAX as f64 => q,
            _ => return Err(RowRejection::InvalidQuantity),
        };

        Ok(NewProductInput::imported(name, quantity.floor() as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: Option<&str>, quantity: Option<&str>) -> RawProductRecord {
        RawProductRecord {
            name: name.map(|s| s.to_string()),
            quantity: quantity.map(|s| s.to_string()),
            row_number: 2,
        }
    }

    #[test]
    fn test_coerce_quantity() {
        assert_eq!(coerce_quantity(None), Some(0.0));
        assert_eq!(coerce_quantity(Some("   ")), Some(0.0));
        assert_eq!(coerce_quantity(Some(" 12 ")), Some(12.0));
        assert_eq!(coerce_quantity(Some("1e2")), Some(100.0));
        assert_eq!(coerce_quantity(Some("-3")), Some(-3.0));
        assert_eq!(coerce_quantity(Some("abc")), None);
        assert_eq!(coerce_quantity(Some("inf")), None);
        assert_eq!(coerce_quantity(Some("NaN")), None);
    }

    #[test]
    fn test_valid_row_is_normalized() {
        let product = RowValidator::new()
            .validate(&record(Some("  Apples "), Some("10.9")))
            .unwrap();
        assert_eq!(product, NewProductInput::imported("Apples", 10));
        assert!(!product.is_favorite);
    }

    #[test]
    fn test_blank_name_rejected_even_with_valid_quantity() {
        let validator = RowValidator::new();
        assert_eq!(
            validator.validate(&record(Some("   "), Some("5"))),
            Err(RowRejection::MissingName)
        );
        assert_eq!(
            validator.validate(&record(None, Some("5"))),
            Err(RowRejection::MissingName)
        );
    }

    #[test]
    fn test_missing_name_checked_before_quantity() {
        assert_eq!(
            RowValidator::new().validate(&record(Some(""), Some("-1"))),
            Err(RowRejection::MissingName)
        );
    }

    #[test]
    fn test_negative_or_non_numeric_quantity_rejected() {
        let validator = RowValidator::new();
        assert_eq!(
            validator.validate(&record(Some("Bananas"), Some("-2"))),
            Err(RowRejection::InvalidQuantity)
        );
        assert_eq!(
            validator.validate(&record(Some("Bananas"), Some("lots"))),
            Err(RowRejection::InvalidQuantity)
        );
        assert_eq!(
            validator.validate(&record(Some("Bananas"), Some("-0.5"))),
            Err(RowRejection::InvalidQuantity)
        );
    }

    #[test]
    fn test_out_of_range_quantity_rejected() {
        let validator = RowValidator::new();
        assert_eq!(
            validator.validate(&record(Some("Bananas"), Some("1e30"))),
            Err(RowRejection::InvalidQuantity)
        );
        assert_eq!(
            validator.validate(&record(Some("Bananas"), Some("9223372036854775808"))),
            Err(RowRejection::InvalidQuantity)
        );
        assert_eq!(
            validator
                .validate(&record(Some("Bananas"), Some("1e18")))
                .unwrap()
                .quantity,
            1_000_000_000_000_000_000
        );
    }

    #[test]
    fn test_empty_quantity_defaults_to_zero() {
        let validator = RowValidator::new();
        assert_eq!(
            validator.validate(&record(Some("Cherries"), Some(""))).unwrap().quantity,
            0
        );
        assert_eq!(
            validator.validate(&record(Some("Cherries"), None)).unwrap().quantity,
            0
        );
    }
}
