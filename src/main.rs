use wayfarer::config::Config;
use wayfarer::engine::Engine;
use wayfarer::server::serve;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "invalid configuration");
            std::process::exit(1);
        }
    };

    let engine = Engine::new(&config).await;

    if let Err(err) = serve(engine, config.addr).await {
        tracing::error!(error = %err, "server exited");
        std::process::exit(1);
    }
}
