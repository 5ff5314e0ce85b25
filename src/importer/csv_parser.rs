// ==========================================
// Numbers 库存管理 - CSV 文本解析器
// ==========================================
// 阶段 1: 文本 → 表头 + 数据行
// 规则:
// - 首行为表头，表头 TRIM + 小写
// - 跳过空行；字段数与表头不一致视为结构错误
// - 引号未闭合视为结构错误（csv 读取器会把后续行并入同一单元格）
// ==========================================

use crate::importer::error::{ImportError, ImporterResult};
use csv::{ReaderBuilder, StringRecord};

/// 表头规范化（TRIM + 小写）
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// 解析结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCsv {
    /// 规范化后的表头
    pub headers: Vec<String>,
    /// 数据行（单元格原值，未 TRIM）
    pub rows: Vec<Vec<String>>,
}

impl ParsedCsv {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

// ==========================================
// CsvTextParser
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct CsvTextParser {
    delimiter: u8,
}

impl Default for CsvTextParser {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvTextParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// 解析 CSV 文本
    ///
    /// # 返回
    /// - Ok(ParsedCsv): 表头与数据行
    /// - Err(CsvParseError): 结构错误（引号未闭合、字段数不一致等）
    pub fn parse(&self, text: &str) -> ImporterResult<ParsedCsv> {
        let text = text.trim_start_matches('\u{feff}');
        if text.trim().is_empty() {
            return Ok(ParsedCsv::default());
        }

        if let Some(line) = find_unterminated_quote(text, self.delimiter) {
            return Err(ImportError::CsvParseError(format!(
                "Quoted field unterminated (line {})",
                line
            )));
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .flexible(true) // 字段数校验由下方统一处理，便于给出行号
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(normalize_header).collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;

            if is_empty_line(&record) {
                continue;
            }

            if record.len() != headers.len() {
                return Err(field_count_error(&record, headers.len()));
            }

            rows.push(record.iter().map(|v| v.to_string()).collect());
        }

        Ok(ParsedCsv { headers, rows })
    }
}

/// 查找未闭合的引号字段
///
/// 仅字段开头的引号开启引用；引用内 "" 为转义。
///
/// # 返回
/// - Some(line): 未闭合引号所在行（从 1 开始）
pub fn find_unterminated_quote(text: &str, delimiter: u8) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut line = 1;
    let mut quote_line = 0;
    let mut in_quotes = false;
    let mut field_start = true;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if in_quotes {
            if b == b'"' {
                if bytes.get(i + 1) == Some(&b'"') {
                    i += 1;
                } else {
                    in_quotes = false;
                }
            } else if b == b'\n' {
                line += 1;
            }
        } else if b == b'"' && field_start {
            in_quotes = true;
            quote_line = line;
            field_start = false;
        } else if b == delimiter || b == b'\r' {
            field_start = true;
        } else if b == b'\n' {
            line += 1;
            field_start = true;
        } else {
            field_start = false;
        }
        i += 1;
    }

    in_quotes.then_some(quote_line)
}

/// 空行（单个空字段）
fn is_empty_line(record: &StringRecord) -> bool {
    record.len() == 1 && record.get(0).map(|v| v.is_empty()).unwrap_or(true)
}

fn field_count_error(record: &StringRecord, expected: usize) -> ImportError {
    let line = record.position().map(|p| p.line()).unwrap_or(0);
    let kind = if record.len() < expected {
        "Too few fields"
    } else {
        "Too many fields"
    };
    ImportError::CsvParseError(format!(
        "{}: expected {} fields but parsed {} (line {})",
        kind,
        expected,
        record.len(),
        line
    ))
}
