//! 有上限的等待 - 基础设施层
//!
//! 所有页面同步都通过轮询条件完成，不使用固定时长的 sleep

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, Instant};

use crate::error::AppResult;

/// 默认轮询间隔
pub const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// 反复检查条件直到满足或超时
///
/// # 返回
/// 条件满足返回 `true`，超时返回 `false`；检查本身出错则立即返回错误
pub async fn poll_until<F, Fut>(timeout: Duration, interval: Duration, mut check: F) -> AppResult<bool>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<bool>>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if check().await? {
            return Ok(true);
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(false);
        }
        sleep(interval.min(deadline - now)).await;
    }
}
