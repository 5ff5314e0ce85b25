// ==========================================
// Numbers 库存管理 - 静态库存目录
// ==========================================
// 职责: 固定的库存清单（只读，不落库）
// ==========================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub code: String,
    pub name: String,
    pub quantity: i64,
}

impl InventoryItem {
    fn new(code: &str, name: &str, quantity: i64) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            quantity,
        }
    }
}

/// 库存清单
pub fn static_inventory() -> Vec<InventoryItem> {
    vec![
        InventoryItem::new("A", "Wheat Bread", 20),
        InventoryItem::new("B", "White Bread", 12),
        InventoryItem::new("C", "Cookies", 7),
    ]
}
