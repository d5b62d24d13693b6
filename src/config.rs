use crate::error::{AppResult, ConfigError};

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    // --- 题库迁移配置 ---
    /// 题库 CSV 文件路径
    pub question_bank_path: String,
    /// 新题目 TOML 文件路径
    pub questions_file: String,
    /// 本次迁移新增的列名
    pub target_column: String,
    /// 旧题目默认难度
    pub default_difficulty: String,
    /// 新增列之前的表格宽度
    pub legacy_width: usize,
    // --- 页面验证配置 ---
    /// 被测应用地址
    pub app_url: String,
    /// 登录时填写的名字
    pub player_name: String,
    /// 设置页解锁口令
    pub settings_secret: String,
    /// 要隐藏的第一个模块标题
    pub hidden_tile_title: String,
    /// 截图目录
    pub screenshot_dir: String,
    /// 单个等待条件的超时时间（毫秒）
    pub wait_timeout_ms: u64,
    /// 浏览器可执行文件（为空时自动查找）
    pub chrome_executable: Option<String>,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            question_bank_path: "public/Worksheet 7 - Fractions/questions.csv".to_string(),
            questions_file: "demos/fractions_batch.toml".to_string(),
            target_column: "Difficulty".to_string(),
            default_difficulty: "Medium".to_string(),
            legacy_width: 14,
            app_url: "http://localhost:3006/Kani-Worksheet-App/".to_string(),
            player_name: "Jules Config Tester".to_string(),
            settings_secret: "Superdad".to_string(),
            hidden_tile_title: "Verbs".to_string(),
            screenshot_dir: "verification".to_string(),
            wait_timeout_ms: 10_000,
            chrome_executable: None,
            viewport_width: 1280,
            viewport_height: 720,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            question_bank_path: std::env::var("QUESTION_BANK_PATH").unwrap_or(default.question_bank_path),
            questions_file: std::env::var("QUESTIONS_FILE").unwrap_or(default.questions_file),
            target_column: std::env::var("TARGET_COLUMN").unwrap_or(default.target_column),
            default_difficulty: std::env::var("DEFAULT_DIFFICULTY").unwrap_or(default.default_difficulty),
            legacy_width: std::env::var("LEGACY_WIDTH").ok().and_then(|v| v.parse().ok()).unwrap_or(default.legacy_width),
            app_url: std::env::var("APP_URL").unwrap_or(default.app_url),
            player_name: std::env::var("PLAYER_NAME").unwrap_or(default.player_name),
            settings_secret: std::env::var("SETTINGS_SECRET").unwrap_or(default.settings_secret),
            hidden_tile_title: std::env::var("HIDDEN_TILE_TITLE").unwrap_or(default.hidden_tile_title),
            screenshot_dir: std::env::var("SCREENSHOT_DIR").unwrap_or(default.screenshot_dir),
            wait_timeout_ms: std::env::var("WAIT_TIMEOUT_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.wait_timeout_ms),
            chrome_executable: std::env::var("CHROME_EXECUTABLE").ok().filter(|v| !v.is_empty()).or(default.chrome_executable),
            viewport_width: std::env::var("VIEWPORT_WIDTH").ok().and_then(|v| v.parse().ok()).unwrap_or(default.viewport_width),
            viewport_height: std::env::var("VIEWPORT_HEIGHT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.viewport_height),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 检查迁移相关配置
    pub fn validate_migration(&self) -> AppResult<()> {
        if self.target_column.trim().is_empty() {
            return Err(invalid("TARGET_COLUMN", "列名不能为空"));
        }
        if self.legacy_width == 0 {
            return Err(invalid("LEGACY_WIDTH", "宽度必须大于 0"));
        }
        Ok(())
    }

    /// 检查页面验证相关配置
    pub fn validate_verification(&self) -> AppResult<()> {
        if self.hidden_tile_title.trim().is_empty() {
            return Err(invalid("HIDDEN_TILE_TITLE", "标题不能为空"));
        }
        if self.wait_timeout_ms == 0 {
            return Err(invalid("WAIT_TIMEOUT_MS", "超时时间必须大于 0"));
        }
        Ok(())
    }
}

fn invalid(name: &str, reason: &str) -> crate::error::AppError {
    ConfigError::InvalidValue {
        name: name.to_string(),
        reason: reason.to_string(),
    }
    .into()
}
