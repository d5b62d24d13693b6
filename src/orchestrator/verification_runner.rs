//! 页面验证运行器 - 编排层
//!
//! 唯一持有 Browser 的模块

use std::time::Duration;

use chromiumoxide::Browser;
use tracing::{debug, warn};

use crate::browser;
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::JsExecutor;
use crate::utils::logging::{log_startup, print_verification_outcome};
use crate::workflow::{TileVisibilityFlow, VerificationOutcome};

/// 页面验证运行器
pub struct VerificationRunner {
    config: Config,
    browser: Browser,
    executor: JsExecutor,
}

impl VerificationRunner {
    /// 初始化：检查配置并启动无头浏览器
    pub async fn initialize(config: Config) -> AppResult<Self> {
        config.validate_verification()?;
        log_startup("设置页模块隐藏验证", &config.app_url);

        let (browser, page) = browser::launch_headless_browser(&config).await?;
        let executor = JsExecutor::new(page, Duration::from_millis(config.wait_timeout_ms));

        Ok(Self {
            config,
            browser,
            executor,
        })
    }

    /// 执行验证流程并关闭浏览器
    ///
    /// 流程出错时也会先关闭浏览器再返回错误
    pub async fn run(mut self) -> AppResult<VerificationOutcome> {
        let flow = TileVisibilityFlow::new(&self.config);
        let outcome = flow.run(&self.executor).await;

        if let Err(e) = self.browser.close().await {
            warn!("关闭浏览器失败: {}", e);
        } else {
            match self.browser.wait().await {
                Ok(_) => debug!("浏览器已关闭"),
                Err(e) => debug!("等待浏览器进程退出失败: {}", e),
            }
        }

        let outcome = outcome?;
        print_verification_outcome(&outcome);
        Ok(outcome)
    }
}
