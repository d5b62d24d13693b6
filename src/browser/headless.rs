use std::path::Path;

use chromiumoxide::cdp::js_protocol::runtime::EventConsoleApiCalled;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{AppResult, BrowserError};

/// 启动无头浏览器并打开一个空白页面
///
/// 页面的 console 输出会转发到日志（`CONSOLE: ...`）
pub async fn launch_headless_browser(config: &Config) -> AppResult<(Browser, Page)> {
    info!("🚀 启动无头浏览器...");

    let viewport = Viewport {
        width: config.viewport_width,
        height: config.viewport_height,
        ..Default::default()
    };

    let mut builder = BrowserConfig::builder()
        .new_headless_mode()
        .window_size(config.viewport_width, config.viewport_height)
        .viewport(viewport)
        .args(vec![
            "--disable-gpu",
            "--no-sandbox",
            "--disable-dev-shm-usage",
        ]);
    if let Some(executable) = &config.chrome_executable {
        debug!("使用浏览器: {}", executable);
        builder = builder.chrome_executable(Path::new(executable));
    }

    let browser_config = builder.build().map_err(|e| {
        error!("配置无头浏览器失败: {}", e);
        BrowserError::LaunchFailed { reason: e }
    })?;

    let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
        error!("启动无头浏览器失败: {}", e);
        BrowserError::LaunchFailed {
            reason: e.to_string(),
        }
    })?;
    debug!("无头浏览器启动成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    let page = browser.new_page("about:blank").await.map_err(|e| {
        error!("创建页面失败: {}", e);
        BrowserError::LaunchFailed {
            reason: e.to_string(),
        }
    })?;

    forward_console(&page).await?;

    Ok((browser, page))
}

/// 把页面 console 消息转发到日志
async fn forward_console(page: &Page) -> AppResult<()> {
    let mut events = page.event_listener::<EventConsoleApiCalled>().await?;
    tokio::spawn(async move {
        while let Some(event) = events.next().await {
            let text = event
                .args
                .iter()
                .filter_map(|arg| match &arg.value {
                    Some(serde_json::Value::String(s)) => Some(s.clone()),
                    Some(value) => Some(value.to_string()),
                    None => arg.description.clone(),
                })
                .collect::<Vec<_>>()
                .join(" ");
            info!("CONSOLE: {}", text);
        }
    });
    Ok(())
}
