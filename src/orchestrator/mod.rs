//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责一次完整运行的调度：读取配置、准备资源、执行一个流程、输出统计。
//!
//! ## 模块划分
//!
//! ### `migration_runner` - 题库迁移
//! - 加载新题目（TOML）
//! - 调用 `MigrationFlow` 迁移并写回题库
//! - 输出迁移统计
//!
//! ### `verification_runner` - 页面验证
//! - 启动并持有无头浏览器（Browser、JsExecutor）
//! - 调用 `TileVisibilityFlow`
//! - 输出 SUCCESS / FAILURE，关闭浏览器
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator (一次运行)
//!     ↓
//! workflow (MigrationFlow / TileVisibilityFlow)
//!     ↓
//! services (能力层：bank_store / record_validator)   infrastructure (JsExecutor)
//! ```

pub mod migration_runner;
pub mod verification_runner;

// 重新导出主要类型
pub use migration_runner::MigrationRunner;
pub use verification_runner::VerificationRunner;
