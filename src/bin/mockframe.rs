//! Mockframe server binary.
//!
//! Serves the detection and mockup-generation API over HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Default settings: 127.0.0.1:8000, frames read from ./frames
//! mockframe
//!
//! # Custom port, extra local frame root, remote frame store
//! mockframe --port 8080 --frames-dir ./frames --frames-dir /srv/frames \
//!     --frames-base-url https://frames.example.com
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mockframe::web::{self, AppState};
use mockframe::{Catalog, FrameStore};

/// Mockframe server - iPhone mockup detection and generation API
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8000")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Local directory containing frame images, laid out as
    /// `<dir>/<model>/<model> - <color> - <orientation>.png`.
    /// Repeatable; directories are consulted in order.
    #[arg(long = "frames-dir", default_value = "frames")]
    frames_dirs: Vec<PathBuf>,

    /// Base URL of a remote frame store, consulted before local directories
    #[arg(long, env = "FRAMES_BASE_URL")]
    frames_base_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let frames = FrameStore::new(args.frames_dirs, args.frames_base_url.as_deref())?;
    let state = AppState::new(Catalog::iphone(), frames);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    web::run_server(state, addr).await
}
