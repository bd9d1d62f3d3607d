//! whatsnext server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) and `WHATSNEXT_*`
//! environment variables, applies any command-line overrides, opens the
//! selected graph store, and serves the JSON API over HTTP.
//!
//! ```text
//! whatsnext --store sqlite --sqlite-path ~/.local/share/whats-next.db
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use whatsnext_server::{ServerConfig, StoreBackend, app, expand_tilde};
use whatsnext_store_memory::MemoryStore;
use whatsnext_store_sqlite::SqliteStore;

#[derive(Parser)]
#[command(author, version, about = "What's Next graph server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Address to bind, overriding the config file.
  #[arg(long)]
  host: Option<String>,

  /// Port to bind, overriding the config file.
  #[arg(short, long)]
  port: Option<u16>,

  /// Storage backend, overriding the config file.
  #[arg(long, value_enum)]
  store: Option<StoreBackend>,

  /// SQLite database file, used with `--store sqlite`.
  #[arg(long)]
  sqlite_path: Option<PathBuf>,
}

impl Cli {
  fn apply(self, cfg: &mut ServerConfig) {
    if let Some(host) = self.host {
      cfg.host = host;
    }
    if let Some(port) = self.port {
      cfg.port = port;
    }
    if let Some(store) = self.store {
      cfg.store = store;
    }
    if let Some(path) = self.sqlite_path {
      cfg.sqlite_path = path;
    }
  }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config.clone()).required(false))
    .add_source(config::Environment::with_prefix("WHATSNEXT"))
    .build()
    .context("failed to read config file")?;

  let mut server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;
  cli.apply(&mut server_cfg);

  let router = match server_cfg.store {
    StoreBackend::Memory => {
      tracing::info!("using in-memory store");
      app(Arc::new(MemoryStore::new()), &server_cfg)
    }
    StoreBackend::Sqlite => {
      let store_path = expand_tilde(&server_cfg.sqlite_path);
      let store = SqliteStore::open(&store_path)
        .await
        .with_context(|| format!("failed to open store at {store_path:?}"))?;
      app(Arc::new(store), &server_cfg)
    }
  };

  let address = server_cfg.address();
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, router).await.context("server error")?;

  Ok(())
}
