use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use fishy_dex::{actions, api::ApiClient, cli, config, display, error, session, storage};
use cli::{Cli, Commands};
use config::Config;
use fishy_dex_common::{filter_centers, Catalog, Tracker};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default = if verbose {
        "fishy_dex=debug,fishy_dex_common=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load().context("設定の読み込みに失敗")?;
    let client = ApiClient::new(config.endpoints(), config.session_token());

    match cli.command {
        Commands::Catalog { filter, search } => {
            session::require_session(&client).await?;
            let store = storage::open_seen_store(config.store_path()?);

            let fishes = client.fetch_fishes().await;
            let mut catalog = Catalog::new(fishes, store.read());
            catalog.set_filter(filter);
            catalog.set_query(search);

            print!("{}", display::render_catalog(&catalog, Utc::now()));
        }

        Commands::Toggle { id } => {
            session::require_session(&client).await?;
            let store = storage::open_seen_store(config.store_path()?);

            let fishes = client.fetch_fishes().await;
            let fish = fishes
                .iter()
                .find(|f| f.id == id)
                .ok_or_else(|| error::FishyDexError::FishNotFound(id.clone()))?;

            let card = actions::toggle_seen(&client, &store, fish).await;
            print!("{}", display::render_card(fish, &card, Utc::now()));

            let catalog = Catalog::new(fishes, store.read());
            println!("{}", display::render_stats(&catalog.stats()));
        }

        Commands::Tracker => {
            session::require_session(&client).await?;

            let tracker = Tracker::new(client.fetch_fishes().await);
            print!("{}", display::render_tracker(&tracker, Utc::now()));
        }

        Commands::Centers { search, sort } => {
            session::require_session(&client).await?;

            let centers = client.fetch_diving_centers().await;
            let shown = filter_centers(&centers, &search, sort);
            print!("{}", display::render_centers(&shown, centers.len()));
        }

        Commands::Config { api_url, session_token, show } => {
            let mut config = config;
            let changed = api_url.is_some() || session_token.is_some();

            if let Some(url) = api_url {
                config.api_base_url = url;
            }
            if let Some(token) = session_token {
                config.session_token = Some(token);
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  APIベースURL: {}", config.api_base_url());
                println!(
                    "  セッション: {}",
                    if config.session_token().is_some() { "設定済み" } else { "未設定" }
                );
                println!("  既見セット: {}", config.store_path()?.display());
            }
        }
    }

    Ok(())
}
