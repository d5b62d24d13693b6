//! 日志工具模块
//!
//! 提供日志初始化和格式化输出的辅助函数

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::workflow::{MigrationResult, VerificationOutcome};

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug / info
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // 测试中可能重复初始化，忽略错误
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 记录程序启动信息
pub fn log_startup(mode: &str, target: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - {}", mode);
    info!("📁 目标: {}", target);
    info!("{}", "=".repeat(60));
}

/// 打印迁移统计
pub fn print_migration_stats(result: &MigrationResult, path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 题库迁移完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📄 原有题目: {} (补齐 {} 行)", result.existing_rows, result.padded_rows);
    info!("➕ 新增题目: {}", result.appended_rows);
    info!(
        "📐 表格宽度: {} 列{}",
        result.schema_width,
        if result.header_extended { " (已新增列)" } else { "" }
    );
    info!("{}", "=".repeat(60));
    info!("\n题库已保存至: {}", path);
}

/// 打印页面验证结果
pub fn print_verification_outcome(outcome: &VerificationOutcome) {
    info!("\n{}", "=".repeat(60));
    if outcome.is_success() {
        info!("✅ 验证通过");
    } else {
        info!("❌ 验证未通过");
    }
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_text("分数加法练习", 2), "分数...");
        assert_eq!(truncate_text("1/2", 10), "1/2");
    }
}
