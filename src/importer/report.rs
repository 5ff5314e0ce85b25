// ==========================================
// Numbers 库存管理 - 导入结果提示
// ==========================================
// 职责: ImportResult → 面向用户的提示文本
// 规则:
// - 全零且无错误 → 不提示
// - 有错误 → 问题标题 + 四项计数 + 前 N 条错误（超出部分以 "+K" 汇总）
// - 否则 → 完成标题 + 总行数 + 已导入数
// ==========================================

use crate::domain::product::ImportResult;
use crate::i18n::{t, t_with_args};
use serde::Serialize;

/// 默认错误预览条数
pub const DEFAULT_ERROR_PREVIEW_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportAlert {
    pub title: String,
    pub body: String,
}

fn count_line(key: &str, count: usize) -> String {
    t_with_args(key, &[("count", &count.to_string())])
}

/// 渲染导入提示
///
/// # 参数
/// - result: 导入结果
/// - preview_limit: 最多展示的错误条数
///
/// # 返回
/// - None: 无需提示（取消或空文件）
pub fn render_import_alert(result: &ImportResult, preview_limit: usize) -> Option<ImportAlert> {
    if result.is_noop() {
        return None;
    }

    if !result.has_errors() {
        let body = [
            count_line("import.total_rows", result.total_rows),
            count_line("import.imported", result.imported),
        ]
        .join("\n");
        return Some(ImportAlert {
            title: t("import.complete_title"),
            body,
        });
    }

    let mut lines = vec![
        count_line("import.total_rows", result.total_rows),
        count_line("import.valid_rows", result.valid_rows),
        count_line("import.imported", result.imported),
        count_line("import.skipped", result.skipped),
        String::new(),
    ];

    lines.extend(result.errors.iter().take(preview_limit).map(|e| {
        t_with_args(
            "import.row_error",
            &[("row", &e.row.to_string()), ("message", &e.message)],
        )
    }));

    let hidden = result.errors.len().saturating_sub(preview_limit);
    if hidden > 0 {
        lines.push(count_line("import.more_errors", hidden));
    }

    Some(ImportAlert {
        title: t("import.issues_title"),
        body: lines.join("\n"),
    })
}
