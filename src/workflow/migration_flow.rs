//! 题库迁移流程 - 流程层
//!
//! 核心职责：把旧题库表格迁移到带新列的结构，并追加一批新题目
//!
//! 流程顺序：
//! 1. 读取题库（表头 + 数据行）
//! 2. 校验新题目（任何一道不合格则整体放弃）
//! 3. 表头补齐旧列，追加新列
//! 4. 旧数据行补齐宽度，新列填默认值
//! 5. 追加新题目行
//! 6. 整体写回（临时文件 + 原子替换）

use std::path::Path;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{AppResult, ParseError, ValidationError};
use crate::models::{QuestionRecord, TableSchema, LEGACY_CELLS};
use crate::services::{validate_records, BankStore, Table};

/// 迁移结果，供调用方输出日志
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MigrationResult {
    /// 新追加的题目行数
    pub appended_rows: usize,
    /// 原有数据行数
    pub existing_rows: usize,
    /// 被补齐的旧数据行数
    pub padded_rows: usize,
    /// 迁移后的表格宽度
    pub schema_width: usize,
    /// 本次是否新增了列
    pub header_extended: bool,
}

/// 题库迁移流程
///
/// - 只在内存中修改表格，全部成功后才写回
/// - 不持有文件句柄
pub struct MigrationFlow {
    default_difficulty: String,
    legacy_width: usize,
    topic: String,
    sheet_number: String,
    reference: TableSchema,
}

impl MigrationFlow {
    /// 创建新的迁移流程
    pub fn new(config: &Config) -> Self {
        Self {
            default_difficulty: config.default_difficulty.clone(),
            legacy_width: config.legacy_width,
            topic: String::new(),
            sheet_number: String::new(),
            reference: TableSchema::authoritative(),
        }
    }

    /// 设置整批新题目共享的知识点和练习册编号
    pub fn with_shared_fields(
        mut self,
        topic: impl Into<String>,
        sheet_number: impl Into<String>,
    ) -> Self {
        self.topic = topic.into();
        self.sheet_number = sheet_number.into();
        self
    }

    /// 迁移题库文件并追加新题目
    ///
    /// 读取、校验、构建全部在写入之前完成，任何错误都不会改动原文件
    pub fn migrate(
        &self,
        source_path: &Path,
        new_questions: &[QuestionRecord],
        target_column: &str,
    ) -> AppResult<MigrationResult> {
        let mut table = BankStore::load(source_path)?;
        info!(
            "📄 已读取题库: {} (表头 {} 列, 数据 {} 行)",
            source_path.display(),
            table.header.len(),
            table.rows.len()
        );

        let result = self.apply(&mut table, new_questions, target_column)?;

        BankStore::save(source_path, &table)?;
        info!("💾 已写回题库: {}", source_path.display());

        Ok(result)
    }

    /// 在内存中完成迁移（不读写文件）
    pub fn apply(
        &self,
        table: &mut Table,
        new_questions: &[QuestionRecord],
        target_column: &str,
    ) -> AppResult<MigrationResult> {
        validate_records(new_questions)?;

        let mut schema = TableSchema::from_header(&table.header)?;
        let mut header_extended = false;
        if !schema.contains(target_column) {
            let widened = schema.widen_to(self.legacy_width, &self.reference);
            schema.ensure_column(target_column);
            header_extended = true;
            info!(
                "➕ 表头新增列 {} (补齐旧列 {} 个)",
                target_column, widened
            );
        } else {
            debug!("表头已包含列 {}，不再追加", target_column);
        }

        let width = schema.width();
        let target_pos = schema.position(target_column).unwrap_or(width - 1);
        if !new_questions.is_empty() && target_pos < LEGACY_CELLS {
            return Err(ValidationError::HeaderTooNarrow {
                column: target_column.to_string(),
                position: target_pos + 1,
                required: LEGACY_CELLS,
            }
            .into());
        }

        // 先检查再修改，出错时表格保持原样
        for (index, row) in table.rows.iter().enumerate() {
            if row.len() > width {
                return Err(ParseError::RowTooWide {
                    row: index + 2,
                    cells: row.len(),
                    width,
                }
                .into());
            }
        }

        let mut padded_rows = 0;
        for row in table.rows.iter_mut() {
            if normalize_row(row, target_pos, width, &self.default_difficulty) {
                padded_rows += 1;
            }
        }
        let existing_rows = table.rows.len();

        for record in new_questions {
            let mut row = record.legacy_cells(&self.topic, &self.sheet_number);
            row.resize(width, String::new());
            row[target_pos] = record.difficulty.clone();
            table.rows.push(row);
        }

        table.header = schema.into_columns();

        let result = MigrationResult {
            appended_rows: new_questions.len(),
            existing_rows,
            padded_rows,
            schema_width: width,
            header_extended,
        };
        debug!("迁移结果: {:?}", result);
        Ok(result)
    }
}

/// 补齐一行旧数据，返回是否有改动
///
/// 行里没有新列单元格时：先补空到新列位置，再填默认值，最后补空到表头宽度
fn normalize_row(row: &mut Vec<String>, target_pos: usize, width: usize, default: &str) -> bool {
    let before = row.len();
    if row.len() <= target_pos {
        row.resize(target_pos, String::new());
        row.push(default.to_string());
    }
    if row.len() < width {
        row.resize(width, String::new());
    }
    row.len() != before
}
