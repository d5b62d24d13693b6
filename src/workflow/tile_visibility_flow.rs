//! 模块隐藏验证流程 - 流程层
//!
//! 核心职责：通过页面操作确认"在设置页隐藏第一个模块后，首页不再显示它"
//!
//! 流程顺序：
//! 1. 首页填写名字 → Start Adventure → 等待模块标题出现
//! 2. Settings → 输入口令 → Unlock → 等待 Workbook Tiles
//! 3. 第一个下拉框选空值 → 截图
//! 4. Back → 等待模块标题消失 → 截图 → 统计结果

use std::fmt;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::js_executor::text_present_js;
use crate::infrastructure::JsExecutor;

const NAME_INPUT: &str = r#"input[placeholder="Enter your name..."]"#;
const START_BUTTON: &str = "Start Adventure";
const SETTINGS_BUTTON: &str = r#"button[aria-label="Settings"]"#;
const PASSWORD_INPUT: &str = r#"input[type="password"]"#;
const UNLOCK_BUTTON: &str = "Unlock";
const TILES_SECTION: &str = "Workbook Tiles";
const BACK_BUTTON: &str = "Back";

/// 验证结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// 模块已隐藏
    Hidden { title: String },
    /// 模块仍然显示
    StillPresent { title: String, count: usize },
}

impl VerificationOutcome {
    fn from_count(title: &str, count: usize) -> Self {
        if count == 0 {
            VerificationOutcome::Hidden {
                title: title.to_string(),
            }
        } else {
            VerificationOutcome::StillPresent {
                title: title.to_string(),
                count,
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, VerificationOutcome::Hidden { .. })
    }
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationOutcome::Hidden { title } => {
                write!(f, "SUCCESS: {} tile hidden.", title)
            }
            VerificationOutcome::StillPresent { title, count } => {
                write!(f, "FAILURE: {} tile still present. Count: {}", title, count)
            }
        }
    }
}

/// 两张截图的保存位置
#[derive(Debug, Clone)]
pub struct ScreenshotPaths {
    pub settings_change: PathBuf,
    pub landing_after_hide: PathBuf,
}

impl ScreenshotPaths {
    pub fn in_dir(dir: &str) -> Self {
        let dir = PathBuf::from(dir);
        Self {
            settings_change: dir.join("settings_change.png"),
            landing_after_hide: dir.join("landing_after_hide.png"),
        }
    }
}

/// 模块隐藏验证流程
///
/// - 不持有任何资源（page）
/// - 只依赖 JsExecutor 提供的能力
pub struct TileVisibilityFlow {
    app_url: String,
    player_name: String,
    settings_secret: String,
    tile_title: String,
    screenshots: ScreenshotPaths,
}

impl TileVisibilityFlow {
    /// 创建新的验证流程
    pub fn new(config: &Config) -> Self {
        Self {
            app_url: config.app_url.clone(),
            player_name: config.player_name.clone(),
            settings_secret: config.settings_secret.clone(),
            tile_title: config.hidden_tile_title.clone(),
            screenshots: ScreenshotPaths::in_dir(&config.screenshot_dir),
        }
    }

    pub async fn run(&self, executor: &JsExecutor) -> AppResult<VerificationOutcome> {
        info!("🌐 打开应用: {}", self.app_url);
        executor.goto(&self.app_url).await?;

        self.login(executor).await?;
        self.unlock_settings(executor).await?;

        info!("🙈 隐藏第一个模块...");
        executor.select_option(0, "").await?;
        executor.screenshot(&self.screenshots.settings_change).await?;

        executor.click_button_with_text(BACK_BUTTON).await?;

        // 等待模块消失；超时不算错误，由最终计数给出结论
        let absent_js = format!("!({})", text_present_js(&self.tile_title));
        if !executor.poll_condition(&absent_js).await? {
            warn!("⚠️ 等待 \"{}\" 消失超时", self.tile_title);
        }
        executor.screenshot(&self.screenshots.landing_after_hide).await?;

        let count = executor.text_count(&self.tile_title).await?;
        Ok(VerificationOutcome::from_count(&self.tile_title, count))
    }

    async fn login(&self, executor: &JsExecutor) -> AppResult<()> {
        info!("👤 登录: {}", self.player_name);
        executor.fill(NAME_INPUT, &self.player_name).await?;
        executor.click_button_with_text(START_BUTTON).await?;
        executor.wait_for_text(&self.tile_title).await
    }

    async fn unlock_settings(&self, executor: &JsExecutor) -> AppResult<()> {
        info!("⚙️ 进入设置页...");
        executor.click(SETTINGS_BUTTON).await?;
        executor.fill(PASSWORD_INPUT, &self.settings_secret).await?;
        executor.click_button_with_text(UNLOCK_BUTTON).await?;
        executor.wait_for_text(TILES_SECTION).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_lines_match_report_format() {
        assert_eq!(
            VerificationOutcome::from_count("Verbs", 0).to_string(),
            "SUCCESS: Verbs tile hidden."
        );
        let failed = VerificationOutcome::from_count("Verbs", 2);
        assert!(!failed.is_success());
        assert_eq!(failed.to_string(), "FAILURE: Verbs tile still present. Count: 2");
    }

    #[test]
    fn screenshots_land_in_configured_dir() {
        let paths = ScreenshotPaths::in_dir("verification");
        assert_eq!(paths.settings_change, PathBuf::from("verification/settings_change.png"));
        assert_eq!(
            paths.landing_after_hide,
            PathBuf::from("verification/landing_after_hide.png")
        );
    }
}
