//! # Question Bank Tools
//!
//! 练习册应用的两个配套工具：题库迁移和设置页验证
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `JsExecutor` - 唯一的 page owner，提供 eval() 和有超时的等待
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `BankStore` - 读取 / 原子写回题库 CSV
//! - `validate_records` - 新题目校验
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义一次完整的线性流程
//! - `MigrationFlow` - 读取 → 补齐 → 追加 → 写回
//! - `TileVisibilityFlow` - 登录 → 设置 → 隐藏模块 → 返回首页检查
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/migration_runner` - 加载新题目，执行迁移，输出统计
//! - `orchestrator/verification_runner` - 管理浏览器资源，执行验证
//!
//! ## 模块结构

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::JsExecutor;
pub use models::{QuestionBatch, QuestionRecord, TableSchema};
pub use orchestrator::{MigrationRunner, VerificationRunner};
pub use services::{BankStore, Table};
pub use workflow::{MigrationFlow, MigrationResult, TileVisibilityFlow, VerificationOutcome};
