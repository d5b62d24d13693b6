//! 题库存储服务 - 业务能力层
//!
//! 只负责"读 / 写题库 CSV"能力，不关心迁移流程

use crate::error::{AppError, AppResult, FileError, ParseError};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// 内存中的完整题库表格
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// 题库存储服务
///
/// 职责：
/// - 一次性读入整个表格（表头 + 数据行，保持原顺序）
/// - 整体写回：先写同目录临时文件，再原子替换
pub struct BankStore;

impl BankStore {
    /// 读取题库文件
    ///
    /// 文件不存在返回 `FileError::NotFound`，引号未闭合等结构错误返回 `ParseError`
    pub fn load(path: &Path) -> AppResult<Table> {
        let path_text = path.display().to_string();
        let bytes = fs::read(path).map_err(|e| AppError::file_read_failed(path_text.clone(), e))?;

        if let Some(line) = find_unterminated_quote(&bytes) {
            return Err(ParseError::UnterminatedQuote {
                path: path_text,
                line,
            }
            .into());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes.as_slice());

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|source| ParseError::MalformedCsv {
                path: path_text.clone(),
                line: source.position().map(|p| p.line()),
                source,
            })?;
            records.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }

        let mut records = records.into_iter();
        let header = records
            .next()
            .ok_or(ParseError::EmptyTable { path: path_text })?;
        let rows: Vec<Vec<String>> = records.collect();

        debug!("读取题库: 表头 {} 列, 数据 {} 行", header.len(), rows.len());
        Ok(Table { header, rows })
    }

    /// 整体写回题库文件
    ///
    /// 所有行必须与表头等宽，否则 csv writer 报错，目标文件保持原样
    pub fn save(path: &Path, table: &Table) -> AppResult<()> {
        let path_text = path.display().to_string();
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut tmp = NamedTempFile::new_in(dir)
            .map_err(|e| AppError::file_write_failed(path_text.clone(), e))?;

        {
            let mut writer = csv::WriterBuilder::new()
                .terminator(csv::Terminator::Any(b'\n'))
                .from_writer(tmp.as_file_mut());
            writer
                .write_record(&table.header)
                .map_err(|e| AppError::file_write_failed(path_text.clone(), e.into()))?;
            for row in &table.rows {
                writer
                    .write_record(row)
                    .map_err(|e| AppError::file_write_failed(path_text.clone(), e.into()))?;
            }
            writer
                .flush()
                .map_err(|e| AppError::file_write_failed(path_text.clone(), e))?;
        }

        tmp.as_file_mut()
            .flush()
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| AppError::file_write_failed(path_text.clone(), e))?;

        // 保留原文件权限，临时文件默认只有 0600
        if let Ok(metadata) = fs::metadata(path) {
            fs::set_permissions(tmp.path(), metadata.permissions())
                .map_err(|e| AppError::file_write_failed(path_text.clone(), e))?;
        }

        tmp.persist(path).map_err(|e| FileError::PersistFailed {
            path: path_text.clone(),
            source: e.error,
        })?;

        debug!("写回题库: {} ({} 行)", path_text, table.rows.len() + 1);
        Ok(())
    }
}

/// 找出未闭合的引号字段，返回它开始的行号（从 1 开始）
///
/// 只有出现在字段开头的引号才开启引用字段，字段中间的引号按普通字符处理
fn find_unterminated_quote(bytes: &[u8]) -> Option<u64> {
    let mut line = 1u64;
    let mut at_field_start = true;
    let mut quoted_since: Option<u64> = None;
    let mut iter = bytes.iter().peekable();

    while let Some(&b) = iter.next() {
        if b == b'\n' {
            line += 1;
        }
        match quoted_since {
            Some(_) => {
                if b == b'"' {
                    if iter.peek() == Some(&&b'"') {
                        iter.next();
                    } else {
                        quoted_since = None;
                        at_field_start = false;
                    }
                }
            }
            None => match b {
                b'"' if at_field_start => {
                    quoted_since = Some(line);
                    at_field_start = false;
                }
                b',' | b'\n' | b'\r' => at_field_start = true,
                _ => at_field_start = false,
            },
        }
    }

    quoted_since
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn load_keeps_row_order_and_ragged_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "q.csv", "Q,Ans,Hint\nfirst,1,h\nsecond,2\n");
        let table = BankStore::load(&path).unwrap();
        assert_eq!(table.header, vec!["Q", "Ans", "Hint"]);
        assert_eq!(table.rows[0], vec!["first", "1", "h"]);
        assert_eq!(table.rows[1], vec!["second", "2"]);
    }

    #[test]
    fn load_unquotes_cells_with_commas_and_newlines() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "q.csv",
            "Q,Hint\n\"Sarah has 12 pieces, eats 1/3\",\"line one\nline \"\"two\"\"\"\n",
        );
        let table = BankStore::load(&path).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][0], "Sarah has 12 pieces, eats 1/3");
        assert_eq!(table.rows[0][1], "line one\nline \"two\"");
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = BankStore::load(&dir.path().join("missing.csv")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn empty_file_has_no_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "q.csv", "");
        let err = BankStore::load(&path).unwrap_err();
        assert!(matches!(err, AppError::Parse(ParseError::EmptyTable { .. })));
    }

    #[test]
    fn unterminated_quote_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "q.csv", "Q,Ans\nok,1\n\"broken,2\n");
        let err = BankStore::load(&path).unwrap_err();
        assert!(matches!(
            err,
            AppError::Parse(ParseError::UnterminatedQuote { line: 3, .. })
        ));
    }

    #[test]
    fn inch_mark_inside_field_is_not_a_quote() {
        assert_eq!(find_unterminated_quote(b"Q\nA 5\" ruler,x\n"), None);
        assert_eq!(find_unterminated_quote(b"Q\n\"a\"\"b\",c\n"), None);
        assert_eq!(find_unterminated_quote(b"Q\n\"open"), Some(2));
    }

    #[test]
    fn save_replaces_whole_file_without_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "q.csv", "old,content\nwill,vanish\nthird,row\n");
        let table = Table {
            header: vec!["Q".into(), "Hint".into()],
            rows: vec![vec!["1/2 + 0 = ?".into(), "Adding zero, changes nothing.".into()]],
        };
        BankStore::save(&path, &table).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "Q,Hint\n1/2 + 0 = ?,\"Adding zero, changes nothing.\"\n");
        assert_eq!(BankStore::load(&path).unwrap(), table);
    }

    #[test]
    fn save_refuses_ragged_rows_and_keeps_original() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "q.csv", "Q,Ans\na,1\n");
        let table = Table {
            header: vec!["Q".into(), "Ans".into()],
            rows: vec![vec!["only one".into()]],
        };
        assert!(BankStore::save(&path, &table).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "Q,Ans\na,1\n");
    }
}
