use smartstore_api::server::{self, StoreBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, AUTH_SECRET, etc.
    let _ = dotenvy::dotenv();
    server::init_tracing();

    let config = smartstore_api::config::config().clone();
    server::run(config, StoreBackend::Postgres).await
}
