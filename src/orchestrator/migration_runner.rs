//! 题库迁移运行器 - 编排层

use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::error::AppResult;
use crate::models::load_question_batch;
use crate::utils::logging::{log_startup, print_migration_stats, truncate_text};
use crate::workflow::{MigrationFlow, MigrationResult};

/// 题库迁移运行器
pub struct MigrationRunner {
    config: Config,
}

impl MigrationRunner {
    /// 初始化运行器（检查配置）
    pub fn initialize(config: Config) -> AppResult<Self> {
        config.validate_migration()?;
        log_startup("题库迁移", &config.question_bank_path);
        Ok(Self { config })
    }

    /// 加载新题目并迁移题库
    pub fn run(&self) -> AppResult<MigrationResult> {
        info!("\n📁 正在加载新题目: {}", self.config.questions_file);
        let batch = load_question_batch(Path::new(&self.config.questions_file))?;
        info!(
            "📚 {} (练习册 {}): {} 道新题, 来源 {}",
            batch.topic,
            batch.sheet_number,
            batch.questions.len(),
            batch.file_path.as_deref().unwrap_or("-")
        );

        if self.config.verbose_logging {
            for (index, question) in batch.questions.iter().enumerate() {
                info!(
                    "  {}. [{}] {}",
                    index + 1,
                    question.difficulty,
                    truncate_text(&question.prompt, 60)
                );
            }
        }

        let flow = MigrationFlow::new(&self.config)
            .with_shared_fields(batch.topic.clone(), batch.sheet_number.clone());
        let result = flow.migrate(
            Path::new(&self.config.question_bank_path),
            &batch.questions,
            &self.config.target_column,
        )?;

        print_migration_stats(&result, &self.config.question_bank_path);
        Ok(result)
    }
}
