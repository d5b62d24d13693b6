//! 题目校验服务 - 业务能力层

use crate::error::{AppResult, ValidationError};
use crate::models::QuestionRecord;
use tracing::debug;

/// 校验整批新题目，任意一道不合格整批失败
///
/// 四个选项由类型保证，这里检查题干非空以及答案必须是选项之一
pub fn validate_records(records: &[QuestionRecord]) -> AppResult<()> {
    for (index, record) in records.iter().enumerate() {
        if record.prompt.trim().is_empty() {
            return Err(ValidationError::EmptyPrompt { index: index + 1 }.into());
        }
        if !record.answer_in_options() {
            return Err(ValidationError::AnswerNotInOptions {
                prompt: record.prompt.clone(),
                answer: record.answer.clone(),
            }
            .into());
        }
    }
    debug!("{} 道新题目校验通过", records.len());
    Ok(())
}
