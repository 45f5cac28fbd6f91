//! tunevault-ui - Personal music library web service
//!
//! Serves the album/song collection UI with session-cookie authentication.

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tunevault_common::config;
use tunevault_ui::{build_router, AppState};

#[derive(Parser, Debug)]
#[command(name = "tunevault-ui", about = "Personal music library web service")]
struct Args {
    /// Root folder holding the database and uploaded media
    /// (falls back to TUNEVAULT_ROOT, then the OS data directory)
    #[arg(long)]
    root_folder: Option<String>,

    /// Port to listen on
    #[arg(long, default_value_t = 5740)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting tunevault-ui v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let root_folder = config::resolve_root_folder(args.root_folder.as_deref());
    config::ensure_directories(&root_folder)?;
    info!("Root folder: {}", root_folder.display());

    let db_path = config::database_path(&root_folder);
    let pool = tunevault_common::db::init_database(&db_path).await?;

    let state = AppState::new(pool, config::media_dir(&root_folder));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", args.port)).await?;
    info!("tunevault-ui listening on http://127.0.0.1:{}", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
