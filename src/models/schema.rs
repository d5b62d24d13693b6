use std::collections::HashSet;

use crate::error::{AppResult, ValidationError};

/// 题库表格的列定义，列的顺序决定每一行单元格的含义
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    columns: Vec<String>,
}

/// 当前题库的完整列名（15 列）
const AUTHORITATIVE_COLUMNS: [&str; 15] = [
    "Question",
    "Option 1",
    "Option 2",
    "Option 3",
    "Option 4",
    "Answer",
    "Hint",
    "Know More",
    "Link",
    "YouTube",
    "Image",
    "Type",
    "Concept/Subtopic",
    "Worksheet No",
    "Difficulty",
];

impl TableSchema {
    /// 从表头构建，列名必须唯一
    pub fn from_header(header: &[String]) -> AppResult<Self> {
        let mut seen = HashSet::new();
        for column in header {
            if !seen.insert(column.as_str()) {
                return Err(ValidationError::DuplicateHeader {
                    column: column.clone(),
                }
                .into());
            }
        }
        Ok(Self {
            columns: header.to_vec(),
        })
    }

    /// 当前题库使用的完整列定义
    pub fn authoritative() -> Self {
        Self {
            columns: AUTHORITATIVE_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.position(column).is_some()
    }

    /// 把表头补齐到 `width` 列，缺少的列名取自 `reference` 对应位置
    ///
    /// 只在末尾追加。`reference` 不够长时用 `Column N` 占位。
    /// 返回追加的列数
    pub fn widen_to(&mut self, width: usize, reference: &TableSchema) -> usize {
        let before = self.columns.len();
        while self.columns.len() < width {
            let index = self.columns.len();
            let name = reference
                .columns
                .get(index)
                .filter(|name| !self.contains(name))
                .cloned()
                .unwrap_or_else(|| format!("Column {}", index + 1));
            self.columns.push(name);
        }
        self.columns.len() - before
    }

    /// 列不存在时追加到末尾，返回是否追加
    pub fn ensure_column(&mut self, column: &str) -> bool {
        if self.contains(column) {
            return false;
        }
        self.columns.push(column.to_string());
        true
    }

    pub fn into_columns(self) -> Vec<String> {
        self.columns
    }
}
