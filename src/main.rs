use anyhow::Result;
use pdf_insights::config::Config;
use pdf_insights::orchestrator::App;
use pdf_insights::utils::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
