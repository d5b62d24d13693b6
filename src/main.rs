use anyhow::Result;
use question_bank_tools::utils::logging;
use question_bank_tools::{Config, MigrationRunner};

fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(config.verbose_logging);

    // 迁移题库并追加新题目
    let result = MigrationRunner::initialize(config)?.run()?;

    println!(
        "Successfully added {} questions and updated headers.",
        result.appended_rows
    );

    Ok(())
}
