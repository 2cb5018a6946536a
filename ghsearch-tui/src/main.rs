mod app;
mod config;
mod ui;

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // 终端被 TUI 占用，日志写入缓存目录下的文件
    let log_path = config::paths::log_file()?;
    let log_file = OpenOptions::new().create(true).append(true).open(&log_path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ghsearch_core=info".parse()?)
                .add_directive("ghsearch=info".parse()?),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    tracing::info!(log = %log_path.display(), "starting");
    let mut app = app::App::new().await?;
    app.run().await
}
