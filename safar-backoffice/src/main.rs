use clap::Parser;
use safar_backoffice::cli::Cli;
use safar_backoffice::run;
use safar_client::{ApiClient, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "safar_backoffice=info,safar_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    let mut api = ApiClient::new(&config, cli.company.clone())?;

    // Session restore: if a cached session exists but carries no tenant id,
    // refetch the profile before running the command.
    if api.session().is_authenticated() && api.company_id().is_none() {
        if let Err(err) = api.ensure_company_id().await {
            tracing::warn!("Session restore could not resolve a company id: {}", err);
        }
    }

    run(cli.command, &mut api).await
}
