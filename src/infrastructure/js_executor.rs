//! JS 执行器 - 基础设施层
//!
//! 持有唯一的 page 资源，只暴露"执行 JS / 等待条件 / 操作元素"的能力

use std::path::Path;
use std::time::Duration;

use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::{AppError, AppResult, BrowserError};
use crate::infrastructure::wait::{poll_until, POLL_INTERVAL};

/// JS 执行器
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 暴露 eval() 能力和有超时的等待
/// - 不认识题库 / 设置页
pub struct JsExecutor {
    page: Page,
    timeout: Duration,
}

impl JsExecutor {
    /// 创建新的 JS 执行器
    ///
    /// `timeout` 为每个等待条件的上限
    pub fn new(page: Page, timeout: Duration) -> Self {
        Self { page, timeout }
    }

    /// 执行 JS 代码并返回 JSON 结果
    pub async fn eval(&self, js_code: impl Into<String>) -> AppResult<JsonValue> {
        let result = self.page.evaluate(js_code.into()).await?;
        let json_value = result.into_value()?;
        Ok(json_value)
    }

    /// 执行 JS 代码并反序列化为指定类型
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> AppResult<T> {
        let json_value = self.eval(js_code).await?;
        let typed_value = serde_json::from_value(json_value)?;
        Ok(typed_value)
    }

    /// 导航到指定地址
    pub async fn goto(&self, url: &str) -> AppResult<()> {
        self.page
            .goto(url)
            .await
            .map_err(|source| BrowserError::NavigationFailed {
                url: url.to_string(),
                source,
            })?;
        Ok(())
    }

    /// 等待 JS 条件为真，超时返回 `WaitTimedOut`
    ///
    /// 页面跳转期间脚本可能执行失败，此时按"尚未满足"继续等待
    pub async fn wait_for(&self, condition_js: &str, description: &str) -> AppResult<()> {
        if self.poll_condition(condition_js).await? {
            debug!("✓ 条件满足: {}", description);
            Ok(())
        } else {
            Err(AppError::wait_timed_out(description, self.timeout_ms()))
        }
    }

    /// 等待 JS 条件为真，超时只返回 `false`
    pub async fn poll_condition(&self, condition_js: &str) -> AppResult<bool> {
        let executor = self;
        poll_until(self.timeout, POLL_INTERVAL, move || async move {
            match executor.eval_as::<bool>(condition_js).await {
                Ok(value) => Ok(value),
                Err(e) => {
                    debug!("条件脚本暂不可用: {}", e);
                    Ok(false)
                }
            }
        })
        .await
    }

    /// 等待页面出现指定文本
    pub async fn wait_for_text(&self, text: &str) -> AppResult<()> {
        self.wait_for(&text_present_js(text), &format!("文本 \"{}\"", text))
            .await
    }

    /// 等待选择器对应的元素出现
    pub async fn wait_for_selector(&self, selector: &str) -> AppResult<()> {
        let js = format!("!!document.querySelector({})", js_string(selector));
        self.wait_for(&js, &format!("元素 {}", selector)).await
    }

    /// 在输入框中输入文本
    pub async fn fill(&self, selector: &str, text: &str) -> AppResult<()> {
        self.wait_for_selector(selector).await?;
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|e| interaction_failed(selector, e))?;
        element
            .click()
            .await
            .map_err(|e| interaction_failed(selector, e))?
            .type_str(text)
            .await
            .map_err(|e| interaction_failed(selector, e))?;
        Ok(())
    }

    /// 点击选择器对应的元素
    pub async fn click(&self, selector: &str) -> AppResult<()> {
        self.wait_for_selector(selector).await?;
        self.page
            .find_element(selector)
            .await
            .map_err(|e| interaction_failed(selector, e))?
            .click()
            .await
            .map_err(|e| interaction_failed(selector, e))?;
        Ok(())
    }

    /// 点击文字包含 `text` 的按钮
    pub async fn click_button_with_text(&self, text: &str) -> AppResult<()> {
        let find = format!(
            "Array.from(document.querySelectorAll('button')).find(b => b.textContent.includes({}))",
            js_string(text)
        );
        self.wait_for(&format!("!!{}", find), &format!("按钮 \"{}\"", text))
            .await?;

        let clicked: bool = self
            .eval_as(format!("(() => {{ const b = {}; if (!b) return false; b.click(); return true; }})()", find))
            .await?;
        if !clicked {
            return Err(interaction_failed(format!("按钮 \"{}\"", text), "按钮已消失"));
        }
        Ok(())
    }

    /// 在第 `nth` 个 `<select>` 中选中值为 `value` 的选项，并触发 change 事件
    pub async fn select_option(&self, nth: usize, value: &str) -> AppResult<()> {
        let target = format!("第 {} 个下拉框", nth + 1);
        self.wait_for(
            &format!("document.querySelectorAll('select').length > {}", nth),
            &target,
        )
        .await?;

        let js = format!(
            r#"(() => {{
                const select = document.querySelectorAll('select')[{nth}];
                if (!select) return false;
                const value = {value};
                if (!Array.from(select.options).some(o => o.value === value)) return false;
                const setter = Object.getOwnPropertyDescriptor(HTMLSelectElement.prototype, 'value').set;
                setter.call(select, value);
                select.dispatchEvent(new Event('input', {{ bubbles: true }}));
                select.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return true;
            }})()"#,
            nth = nth,
            value = js_string(value)
        );
        let selected: bool = self.eval_as(js).await?;
        if !selected {
            return Err(interaction_failed(target, format!("没有值为 \"{}\" 的选项", value)));
        }
        Ok(())
    }

    /// 统计直接包含 `text` 的可见元素个数
    pub async fn text_count(&self, text: &str) -> AppResult<usize> {
        let js = format!(
            r#"(() => {{
                const needle = {};
                const walker = document.createTreeWalker(document.body, NodeFilter.SHOW_TEXT);
                const parents = new Set();
                while (walker.nextNode()) {{
                    const node = walker.currentNode;
                    const parent = node.parentElement;
                    if (!parent || ['SCRIPT', 'STYLE', 'NOSCRIPT'].includes(parent.tagName)) continue;
                    if (node.nodeValue.includes(needle)) parents.add(parent);
                }}
                return parents.size;
            }})()"#,
            js_string(text)
        );
        self.eval_as(js).await
    }

    /// 保存整页截图，目录不存在时自动创建
    pub async fn screenshot(&self, path: &Path) -> AppResult<()> {
        let path_text = path.display().to_string();
        if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| AppError::file_write_failed(dir.display().to_string(), e))?;
        }
        self.page
            .save_screenshot(ScreenshotParams::builder().build(), path)
            .await
            .map_err(|source| BrowserError::ScreenshotFailed {
                path: path_text.clone(),
                source,
            })?;
        debug!("📸 截图已保存: {}", path_text);
        Ok(())
    }

    fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }
}

/// 页面正文包含文本的判断脚本
pub fn text_present_js(text: &str) -> String {
    format!(
        "!!document.body && document.body.innerText.includes({})",
        js_string(text)
    )
}

/// 把 Rust 字符串转成 JS 字符串字面量
fn js_string(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string())
}

fn interaction_failed(target: impl Into<String>, reason: impl ToString) -> AppError {
    AppError::Browser(BrowserError::InteractionFailed {
        target: target.into(),
        reason: reason.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn js_string_escapes_quotes() {
        assert_eq!(js_string(r#"input[placeholder="Enter"]"#), r#""input[placeholder=\"Enter\"]""#);
    }

    #[test]
    fn text_present_js_embeds_literal() {
        assert_eq!(
            text_present_js("Workbook Tiles"),
            "!!document.body && document.body.innerText.includes(\"Workbook Tiles\")"
        );
    }
}
