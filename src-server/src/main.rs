use adpacing_server::{config::ServerConfig, main_lib};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env()?;
    main_lib::init_tracing(config.log_json);
    main_lib::run(config).await
}
