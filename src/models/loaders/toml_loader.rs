use crate::error::{AppError, AppResult, ParseError};
use crate::models::question::QuestionBatch;
use std::fs;
use std::path::Path;

/// 从 TOML 文件加载一批新题目
pub fn load_question_batch(toml_file_path: &Path) -> AppResult<QuestionBatch> {
    let path_text = toml_file_path.display().to_string();

    let content = fs::read_to_string(toml_file_path)
        .map_err(|e| AppError::file_read_failed(path_text.clone(), e))?;

    let batch: QuestionBatch = toml::from_str(&content).map_err(|source| ParseError::Toml {
        path: path_text.clone(),
        source,
    })?;

    tracing::info!(
        "成功加载 {} 道新题目 (知识点: {}, 练习册: {})",
        batch.questions.len(),
        batch.topic,
        batch.sheet_number
    );

    Ok(batch.with_file_path(path_text))
}
