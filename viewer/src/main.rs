use anyhow::Result;
use clap::Parser;
use tracing::info;

use viewer::{build_viewer_app, load_config, Args};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = load_config(&args.config)?;
    info!(?config, "Trail config loaded");

    let mut app = build_viewer_app(args, config);
    app.run();
    Ok(())
}
