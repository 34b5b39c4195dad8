use std::net::TcpListener;

use anyhow::Context as _;
use tracing::info;

use person_registry::configuration::get_static_configuration;
use person_registry::telemetry::{get_subscriber, init_subscriber};
use person_registry::{get_database_connection, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("person-registry".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber).context("failed to install tracing subscriber")?;

    let configuration = get_static_configuration().context("failed to load configuration")?;
    let address = configuration.address();

    let store = get_database_connection(configuration.database)
        .await
        .context("failed to open the person store")?;

    let listener = TcpListener::bind(&address)
        .with_context(|| format!("failed to bind {address}"))?;

    info!("Starting server at {address}...");
    run(listener, store)?.await.context("server error")?;

    Ok(())
}
