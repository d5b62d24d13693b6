use anyhow::Result;
use question_bank_tools::utils::logging;
use question_bank_tools::{Config, VerificationRunner};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(config.verbose_logging);

    // 启动浏览器并执行验证，SUCCESS / FAILURE 都以 0 退出
    let outcome = VerificationRunner::initialize(config).await?.run().await?;

    println!("{}", outcome);

    Ok(())
}
