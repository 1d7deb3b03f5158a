use clap::Args;

use crate::server::{self, StoreBackend};

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(long, help = "Serve seeded in-memory data instead of DATABASE_URL")]
    pub memory: bool,

    #[arg(long, help = "Port to listen on (overrides SMARTSTORE_API_PORT)")]
    pub port: Option<u16>,
}

pub async fn handle(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = crate::config::config().clone();
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let backend = if args.memory { StoreBackend::Memory } else { StoreBackend::Postgres };
    server::run(config, backend).await
}
